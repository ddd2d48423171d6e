//! Service configuration for the listing backend.
//!
//! The base URL comes from the first CLI argument, or the `GALLET_BASE_URL`
//! environment variable when no argument is given. An optional second
//! argument selects the gallery path to open.

use anyhow::{Context, Result};
use url::Url;

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "GALLET_BASE_URL";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the gallery backend; the listing endpoint lives under it.
    pub base_url: Url,
    /// Gallery path to open first, if any.
    pub start_path: Option<String>,
}

impl ServiceConfig {
    pub fn new(base_url: &str, start_path: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid base URL {:?}", base_url))?;
        Ok(Self {
            base_url,
            start_path,
        })
    }

    /// Builds configuration from the process arguments and environment.
    pub fn from_env_and_args() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let base_url = match args.next() {
            Some(arg) => arg,
            None => std::env::var(BASE_URL_ENV)
                .with_context(|| format!("no base URL argument and {} is unset", BASE_URL_ENV))?,
        };
        Self::new(&base_url, args.next())
    }
}
