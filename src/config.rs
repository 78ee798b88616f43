use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_SEED_DIR: &str = "LISTING_BROWSER_SEED_DIR";
pub const ENV_LATENCY: &str = "LISTING_BROWSER_LATENCY";
pub const ENV_LOG: &str = "LISTING_BROWSER_LOG";

/// Runtime settings for the listing browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding seed JSON files; the bundled data is used when unset
    pub seed_dir: Option<PathBuf>,
    /// Pause before each store operation as a remote API would
    pub simulate_latency: bool,
    /// Tracing directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_dir: None,
            simulate_latency: false,
            log_filter: "listing_browser=info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `LISTING_BROWSER_*` variables; blank values are ignored
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = value(ENV_SEED_DIR) {
            config.seed_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = value(ENV_LATENCY) {
            config.simulate_latency = matches!(
                flag.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
        if let Some(filter) = value(ENV_LOG) {
            config.log_filter = filter;
        }
        config
    }
}
