use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use archiver_logging::archiver_debug;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_OUTPUT_DIRECTORY: &str = "output";
const DEFAULT_BASE_URL: &str = "https://www.codewars.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} not found!", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Key '{key}' not found in {}", path.display())]
    MissingKey { key: &'static str, path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    username: Option<String>,
    #[serde(rename = "_session_id")]
    session_id: Option<String>,
    output_directory: Option<PathBuf>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    extensions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverConfig {
    pub username: String,
    pub session_id: String,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub request_timeout: Duration,
    /// Language identifier to file extension, layered over the built-in table.
    pub extensions: BTreeMap<String, String>,
}

pub fn load_config(path: &Path) -> Result<ArchiverConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: ConfigFile = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    archiver_debug!("Loaded configuration from {:?}", path);

    Ok(ArchiverConfig {
        username: required(file.username, "username", path)?,
        session_id: required(file.session_id, "_session_id", path)?,
        output_dir: file
            .output_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)),
        base_url: file
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        request_timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        extensions: file.extensions,
    })
}

/// A blank value counts as missing.
fn required(value: Option<String>, key: &'static str, path: &Path) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingKey {
            key,
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"username": "alice", "_session_id": "abc123"}"#);

        let config = load_config(&path).unwrap();
        assert_eq!(config.username, "alice");
        assert_eq!(config.session_id, "abc123");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.base_url, "https://www.codewars.com");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn optional_keys_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "username": "alice",
                "_session_id": "abc123",
                "output_directory": "archive",
                "base_url": "http://localhost:8080",
                "timeout_secs": 30,
                "extensions": {"brainfuck2": "bf"},
                "unrelated": true
            }"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("archive"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.extensions.get("brainfuck2").map(String::as_str), Some("bf"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().ends_with("config.json not found!"));
    }

    #[test]
    fn missing_username_names_the_key() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"_session_id": "abc123"}"#);
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "username", .. }));
        assert!(err.to_string().starts_with("Key 'username' not found in "));
    }

    #[test]
    fn null_or_blank_session_is_missing() {
        let dir = TempDir::new().unwrap();
        for body in [
            r#"{"username": "alice", "_session_id": null}"#,
            r#"{"username": "alice", "_session_id": "  "}"#,
            r#"{"username": "alice"}"#,
        ] {
            let path = write_config(&dir, body);
            let err = load_config(&path).unwrap_err();
            assert!(
                matches!(err, ConfigError::MissingKey { key: "_session_id", .. }),
                "body {body}"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ username: alice");
        assert!(matches!(
            load_config(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
