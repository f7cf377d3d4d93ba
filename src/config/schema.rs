//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for one regional deployment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listen port (`PORT`).
    pub port: u16,

    /// Region code of this deployment (`REGION`), returned verbatim by the
    /// ping routes.
    pub region: String,

    /// Cloud project whose deployed services make up the directory
    /// (`GOOGLE_CLOUD_PROJECT`).
    pub project: String,

    /// URL for the synthetic "global" directory entry (`GLOBAL_ENDPOINT`).
    /// Unset means no global entry is added.
    pub global_endpoint: Option<String>,

    /// Directory the single-page-application bundle is served from
    /// (`ASSET_DIR`).
    pub asset_dir: PathBuf,

    /// Deadline for the startup-time directory build
    /// (`STARTUP_TIMEOUT_SECS`).
    pub startup_timeout_secs: u64,
}

impl Settings {
    /// Startup deadline as a [`Duration`].
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            region: "pong".to_string(),
            project: String::new(),
            global_endpoint: None,
            asset_dir: PathBuf::from("./public"),
            startup_timeout_secs: 30,
        }
    }
}
