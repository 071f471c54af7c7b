use crate::backend::{Backend, LocalStore, RemoteApi, local};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKBOARD_CONFIG_PATH";
const API_URL_ENV_VAR: &str = "TASKBOARD_API_URL";

/// Deployment configuration: which backing store to use and where it
/// lives. `mode` is `"local"` or `"remote"`; when absent, the presence
/// of `api_url` decides.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub store_path: Option<String>,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<StoreError>,
}

pub fn config_path() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| StoreError::invalid_input("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskboard")
            .join(CONFIG_FILE_NAME))
    } else {
        let home =
            std::env::var("HOME").map_err(|_| StoreError::invalid_input("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskboard")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: apply_env_overrides(Config::default()),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: apply_env_overrides(Config::default()),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config: apply_env_overrides(config),
            error: None,
        },
        Err(err) => ConfigLoad {
            config: apply_env_overrides(Config::default()),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| StoreError::invalid_input(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        StoreError::invalid_input(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(url) = std::env::var(API_URL_ENV_VAR)
        && !url.trim().is_empty()
    {
        config.api_url = Some(url);
        config.mode = Some("remote".to_string());
    }
    config
}

/// Builds the backing store the configuration names. Remote mode without
/// an `api_url` is a configuration error, not a runtime surprise.
pub fn backend_from_config(config: &Config) -> Result<Arc<dyn Backend>, StoreError> {
    let mode = match config.mode.as_deref() {
        Some(mode) => mode.to_ascii_lowercase(),
        None if config.api_url.is_some() => "remote".to_string(),
        None => "local".to_string(),
    };

    match mode.as_str() {
        "local" => {
            let path = match config.store_path.as_deref() {
                Some(path) if !path.trim().is_empty() => PathBuf::from(path),
                _ => local::store_path()
                    .map_err(|err| StoreError::invalid_input(err.to_string()))?,
            };
            Ok(Arc::new(LocalStore::new(path)))
        }
        "remote" => {
            let url = config
                .api_url
                .as_deref()
                .ok_or_else(|| StoreError::invalid_input("remote mode requires api_url"))?;
            let api = RemoteApi::new(url)
                .map_err(|err| StoreError::invalid_input(err.to_string()))?;
            Ok(Arc::new(api))
        }
        other => Err(StoreError::invalid_input(format!(
            "unknown backend mode: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, backend_from_config, load_config_with_fallback_from_path};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskboard-{nanos}-{file_name}"))
    }

    #[test]
    fn missing_config_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert!(result.error.is_none());
        assert!(result.config.mode.is_none() || result.config.mode.as_deref() == Some("remote"));
    }

    #[test]
    fn invalid_config_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        let error = result.error.unwrap();
        assert_eq!(error.code(), "invalid_input");
    }

    #[test]
    fn reads_valid_config() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "mode": "remote",
            "api_url": "https://tasks.example.com"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert!(result.error.is_none());
        assert_eq!(result.config.mode.as_deref(), Some("remote"));
        assert_eq!(
            result.config.api_url.as_deref(),
            Some("https://tasks.example.com")
        );
    }

    #[test]
    fn remote_mode_requires_api_url() {
        let config = Config {
            mode: Some("remote".to_string()),
            api_url: None,
            store_path: None,
        };
        let err = backend_from_config(&config).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let config = Config {
            mode: Some("cloud".to_string()),
            api_url: None,
            store_path: None,
        };
        let err = backend_from_config(&config).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn explicit_store_path_builds_local_backend() {
        let config = Config {
            mode: Some("local".to_string()),
            api_url: None,
            store_path: Some(temp_path("store.json").display().to_string()),
        };
        assert!(backend_from_config(&config).is_ok());
    }
}
