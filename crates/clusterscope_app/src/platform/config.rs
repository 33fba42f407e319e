use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clusterscope_engine::{ClientSettings, DEFAULT_ENDPOINT};
use clusterscope_logging::{scope_info, scope_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "clusterscope.ron";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_response_bytes,
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }
}

/// Reads the configuration file. A missing or unusable file yields defaults.
pub(crate) fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            scope_warn!("Failed to read configuration from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            scope_info!("Loaded configuration from {:?}", path);
            config
        }
        Err(err) => {
            scope_warn!("Failed to parse configuration from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

pub(crate) fn write_default_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&AppConfig::default(), pretty)?;
    fs::write(path, content)?;
    Ok(())
}
