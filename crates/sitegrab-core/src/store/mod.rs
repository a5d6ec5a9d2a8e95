//! Persistent scrape state.
//!
//! Progress and results are plain serde values kept behind the [`Store`]
//! trait: loaded whole at startup, rewritten whole after every URL attempt.
//! [`JsonFileStore`] is the default backend; [`MemoryStore`] keeps the value
//! in process.

mod backend;
mod progress;
mod results;

pub use backend::{JsonFileStore, MemoryStore};
pub use progress::ProgressState;
pub use results::ResultsLog;

use anyhow::Result;

/// Load-all / save-all persistence for one value.
pub trait Store<T> {
    /// Current value, or `T::default()` when nothing usable is stored.
    fn load(&self) -> T;
    /// Replace the stored value.
    fn save(&self, value: &T) -> Result<()>;
}
