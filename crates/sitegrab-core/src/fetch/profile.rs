//! Per-attempt request configuration.

use rand::seq::SliceRandom;
use std::time::Duration;

use crate::config::FetchConfig;

/// Desktop browser User-Agents rotated across attempts.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Headers sent with every request, besides the User-Agent.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Encodings advertised to the server; curl decodes the body.
pub const ACCEPT_ENCODING: &str = "gzip, deflate";

/// Pool the User-Agent for each attempt is drawn from.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self {
            agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UserAgentPool {
    /// Pool from a configured list; an empty list falls back to the defaults.
    pub fn new(agents: Vec<String>) -> Self {
        let agents: Vec<String> = agents
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if agents.is_empty() {
            Self::default()
        } else {
            Self { agents }
        }
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }
}

/// Immutable settings for one GET attempt.
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RequestProfile {
    /// Fresh profile with a newly drawn User-Agent.
    pub fn draw(pool: &UserAgentPool, cfg: &FetchConfig) -> Self {
        Self {
            user_agent: pool.pick().to_string(),
            headers: BROWSER_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        }
    }
}
