//! Configuration loading from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::config::schema::Settings;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The control plane cannot be queried without a project id.
    #[error("GOOGLE_CLOUD_PROJECT is not set")]
    MissingProject,

    /// A numeric variable did not parse.
    #[error("{var} is not a valid number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The configured global endpoint is not a valid URL. A typo here would
    /// be published to every client in the directory.
    #[error("GLOBAL_ENDPOINT is not a valid URL: {0:?}")]
    InvalidGlobalEndpoint(String),
}

/// Load settings from the process environment.
pub fn load_from_env() -> Result<Settings, SettingsError> {
    load_with(|var| env::var(var).ok())
}

/// Load settings through an arbitrary variable lookup.
///
/// The lookup indirection keeps unit tests off the process environment,
/// which is shared mutable state across the whole test binary. An empty
/// value is treated the same as an unset one.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, SettingsError> {
    let defaults = Settings::default();
    let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

    let port = parse_or(get("PORT"), defaults.port, "PORT")?;
    let startup_timeout_secs = parse_or(
        get("STARTUP_TIMEOUT_SECS"),
        defaults.startup_timeout_secs,
        "STARTUP_TIMEOUT_SECS",
    )?;

    let region = get("REGION").unwrap_or(defaults.region);
    let project = get("GOOGLE_CLOUD_PROJECT").ok_or(SettingsError::MissingProject)?;

    let global_endpoint = get("GLOBAL_ENDPOINT");
    if let Some(raw) = &global_endpoint {
        Url::parse(raw).map_err(|_| SettingsError::InvalidGlobalEndpoint(raw.clone()))?;
    }

    let asset_dir = get("ASSET_DIR")
        .map(PathBuf::from)
        .unwrap_or(defaults.asset_dir);

    Ok(Settings {
        port,
        region,
        project,
        global_endpoint,
        asset_dir,
        startup_timeout_secs,
    })
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    default: T,
    var: &'static str,
) -> Result<T, SettingsError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| SettingsError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}
