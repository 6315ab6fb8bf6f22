//! Server configuration loading
//!
//! Layered: YAML file first, then `INKFEST_`-prefixed environment variables
//! (nested keys separated by `__`, e.g. `INKFEST_BIND_ADDR`).

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

/// Top-level server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Registration service configuration
    #[serde(default)]
    pub registration: registration_service::Config,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}

/// Load configuration from the given YAML file plus environment overrides
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let config = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("INKFEST_").split("__"))
        .extract()?;
    Ok(config)
}
