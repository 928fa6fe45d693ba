//! Configuration loader for Messagr.
//!
//! Reads `config.toml` from the data directory (`~/.messagr/` by default) and
//! deserializes it into [`MessagrConfig`]. A missing file means defaults; a
//! file that exists but does not parse is an error, so a typo in the endpoint
//! URL is never silently replaced by the default one.

use std::path::{Path, PathBuf};

use messagr_types::config::MessagrConfig;
use messagr_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MESSAGR_DATA_DIR";

/// Resolve the Messagr data directory.
///
/// Uses `MESSAGR_DATA_DIR` if set, otherwise `~/.messagr`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".messagr");
    }

    // Last resort: current directory
    PathBuf::from(".messagr")
}

/// Load configuration from `{data_dir}/config.toml`.
pub async fn load_config(data_dir: &Path) -> Result<MessagrConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(MessagrConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Io {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<MessagrConfig>(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await.unwrap();
        assert_eq!(config.endpoint.base_url, "http://127.0.0.1:4943");
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.defaults.page_size, 100);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[endpoint]
base_url = "https://messagr.example"
identity_token = "tok"

[defaults]
search_limit = 20
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await.unwrap();
        assert_eq!(config.endpoint.base_url, "https://messagr.example");
        assert_eq!(config.endpoint.identity_token.as_deref(), Some("tok"));
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.defaults.search_limit, 20);
        assert_eq!(config.defaults.sort_by, "relevance");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[tokio::test]
    async fn load_config_wrong_type_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "[endpoint]\ntimeout_secs = \"soon\"\n",
        )
        .await
        .unwrap();

        assert!(matches!(
            load_config(tmp.path()).await,
            Err(ConfigError::Parse { .. })
        ));
    }
}
