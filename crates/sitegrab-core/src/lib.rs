pub mod config;
pub mod logging;

pub mod cancel;
pub mod fetch;
pub mod orchestrator;
pub mod pacing;
pub mod record;
pub mod retry;
pub mod site;
pub mod store;
pub mod supplement;
pub mod url_list;
