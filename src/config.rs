use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;
use crate::views::history::normalize_rows_per_page;

pub const DEFAULT_CONFIG_PATH: &str = "config/admin.json";
pub const API_URL_ENV: &str = "AUTOREPLY_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub rows_per_page: Option<u32>,
}

impl AppConfig {
    /// History page size, falling back to the default for unsupported values.
    pub fn rows_per_page(&self) -> u32 {
        normalize_rows_per_page(self.rows_per_page.unwrap_or_default())
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// Picks the backend URL: flag, then environment, then config file, then the
/// local default. Blank values are skipped.
pub fn resolve_api_url(flag: Option<&str>, env: Option<&str>, config: &AppConfig) -> String {
    [flag, env, config.api_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_beats_env_and_file() {
        let config = AppConfig {
            api_url: Some("http://file:8000".into()),
            rows_per_page: None,
        };

        assert_eq!(
            resolve_api_url(Some("http://flag:1"), Some("http://env:2"), &config),
            "http://flag:1"
        );
        assert_eq!(
            resolve_api_url(None, Some("http://env:2"), &config),
            "http://env:2"
        );
        assert_eq!(resolve_api_url(None, Some("  "), &config), "http://file:8000");
    }

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(
            resolve_api_url(None, None, &AppConfig::default()),
            "http://localhost:8000"
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.json");

        let config = load_config(path.to_str().expect("utf8 path"));

        assert!(config.api_url.is_none());
        assert_eq!(config.rows_per_page(), 10);
    }

    #[test]
    fn reads_file_values() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("admin.json");
        fs::write(
            &path,
            r#"{ "api_url": "http://bot.internal:8000", "rows_per_page": 25 }"#,
        )
        .expect("write config");

        let config = load_config(path.to_str().expect("utf8 path"));

        assert_eq!(config.api_url.as_deref(), Some("http://bot.internal:8000"));
        assert_eq!(config.rows_per_page(), 25);
    }

    #[test]
    fn invalid_file_and_page_size_fall_back() {
        let dir = TempDir::new().expect("temp dir");
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").expect("write config");
        assert!(load_config(broken.to_str().expect("utf8 path")).api_url.is_none());

        let odd = AppConfig {
            api_url: None,
            rows_per_page: Some(7),
        };
        assert_eq!(odd.rows_per_page(), 10);
    }
}
