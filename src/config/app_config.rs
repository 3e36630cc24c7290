use std::env;

use crate::error::ConfigError;
use crate::probe::session::ProbeSession;

use super::model::FileConfig;

pub struct AppConfig {
    pub session: ProbeSession,
    pub concurrency: usize,
}

/// Load the probe configuration from a YAML file and environment variables.
///
/// The file location comes from `CONFIG_FILE` (default `config.yml`). A
/// `PROBE_TOKEN` environment variable overrides any token in the file, so
/// the token can stay out of checked-in configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yml".to_string());
    let config_str = std::fs::read_to_string(&config_file).map_err(|source| ConfigError::Io {
        path: config_file.clone(),
        source,
    })?;

    let mut file: FileConfig = serde_yaml::from_str(&config_str)?;

    if let Ok(token) = env::var("PROBE_TOKEN") {
        file.session.token = Some(token);
    }

    log::info!(
        "loaded {} request specs from {config_file} (base URL {})",
        file.session.requests.len(),
        file.session.base_url
    );

    Ok(AppConfig {
        session: file.session,
        concurrency: file.concurrency,
    })
}
