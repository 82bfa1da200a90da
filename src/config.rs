use crate::store::DEFAULT_STORE_FILE;
use std::env;
use std::path::PathBuf;

pub const STORE_ENV: &str = "LSN_STORE";
pub const LISTING_ENV: &str = "LSN_LS";
pub const LOG_ENV: &str = "LSN_LOG";
const DEFAULT_LISTING: &str = "ls";

/// Settings read from the environment once per invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub listing_program: String,
    pub use_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            listing_program: DEFAULT_LISTING.to_string(),
            use_color: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_path: non_empty_var(STORE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            listing_program: non_empty_var(LISTING_ENV)
                .unwrap_or(defaults.listing_program),
            use_color: env::var_os("NO_COLOR").is_none(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
