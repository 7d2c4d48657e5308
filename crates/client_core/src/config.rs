use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use shared::protocol::RECAP_ENDPOINT_PATH;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "storyboard.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api base '{value}': {reason}")]
    InvalidApiBase { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub api_base: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}

impl ClientSettings {
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self, SettingsError> {
        Self {
            api_base: api_base.into(),
        }
        .validated()
    }

    /// Checks the base address is an absolute http(s) URL and strips any
    /// trailing slash so the endpoint path can be appended verbatim.
    pub fn validated(self) -> Result<Self, SettingsError> {
        let raw = self.api_base.trim();
        let parsed = Url::parse(raw).map_err(|err| SettingsError::InvalidApiBase {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidApiBase {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            api_base: raw.trim_end_matches('/').to_string(),
        })
    }

    pub fn recap_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base.trim_end_matches('/'),
            RECAP_ENDPOINT_PATH
        )
    }
}

/// Loads settings once at startup: defaults, then `storyboard.toml` in the
/// working directory, then `RECAP_API_BASE` / `APP__API_BASE`.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base") {
                    settings.api_base = v.clone();
                }
            }
            Err(err) => {
                tracing::warn!("ignoring unreadable settings file '{}': {err}", file.display());
            }
        }
    }

    if let Some(v) = env("RECAP_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }

    settings.validated()
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn temp_settings_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("storyboard_settings_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_to_local_development_address() {
        let settings =
            load_settings_with(Path::new("does-not-exist.toml"), no_env).expect("settings");
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.recap_url(), "http://localhost:8000/api/recap");
    }

    #[test]
    fn file_value_is_overridden_by_environment() {
        let path = temp_settings_file("api_base = \"http://from-file:9000\"\n");

        let from_file = load_settings_with(&path, no_env).expect("settings");
        assert_eq!(from_file.api_base, "http://from-file:9000");

        let from_env = load_settings_with(&path, |key| {
            (key == "RECAP_API_BASE").then(|| "https://recap.example.com/".to_string())
        })
        .expect("settings");
        assert_eq!(from_env.api_base, "https://recap.example.com");

        let prefixed = load_settings_with(&path, |key| match key {
            "RECAP_API_BASE" => Some("http://a:1".to_string()),
            "APP__API_BASE" => Some("http://b:2".to_string()),
            _ => None,
        })
        .expect("settings");
        assert_eq!(prefixed.api_base, "http://b:2");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ClientSettings::with_api_base("ftp://example.com").expect_err("must fail");
        assert!(err.to_string().contains("unsupported scheme"));
        assert!(ClientSettings::with_api_base("not a url").is_err());
    }

    #[test]
    fn keeps_path_prefix_when_building_endpoint() {
        let settings = ClientSettings::with_api_base("http://host:8000/recaps/").expect("settings");
        assert_eq!(settings.recap_url(), "http://host:8000/recaps/api/recap");
    }
}
