use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use mars_photos_adapters::DEFAULT_ENDPOINT;
use mars_photos_application::FailurePolicy;

pub const ENDPOINT_VAR: &str = "MARS_PHOTOS_ENDPOINT";
pub const API_KEY_VAR: &str = "NASA_API_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub thumbnail_edge: u32,
    pub failure_policy: FailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: "DEMO_KEY".to_string(),
            request_timeout: Duration::from_secs(30),
            thumbnail_edge: 300,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(endpoint) = non_blank(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(api_key) = non_blank(API_KEY_VAR) {
            config.api_key = api_key;
        }
        config
    }
}

/// Falls back to the working directory when `requested` is missing or not a directory.
pub fn resolve_output_dir(requested: Option<&Path>) -> PathBuf {
    match requested {
        Some(path) if path.is_dir() => path.to_path_buf(),
        Some(path) => {
            let fallback = working_dir();
            warn!(
                "The specified directory '{}' is invalid. Saving to {}.",
                path.display(),
                fallback.display()
            );
            fallback
        }
        None => working_dir(),
    }
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
