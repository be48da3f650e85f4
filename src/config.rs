//! Application Configuration
//!
//! Read from a JSON block embedded by the host page:
//! `<script type="application/json" id="roster-config">{...}</script>`

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{Leader, Settings};

/// Id of the element holding the JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "roster-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the roster backend, without trailing slash
    pub api_base_url: String,
    pub settings: Settings,
    /// Acting leader; absent means personal data is still missing
    pub current_user: Option<Leader>,
    /// How long a notice stays on screen
    pub notice_timeout_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api".to_string(),
            settings: Settings::default(),
            current_user: None,
            notice_timeout_ms: 4000,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Unknown level names fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Load from the page, falling back to defaults
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("[CONFIG] {}, using defaults", err);
                Self::default()
            }),
            None => {
                log::warn!("[CONFIG] no #{} element, using defaults", CONFIG_ELEMENT_ID);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.settings.friends, 3);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_json(
            r#"{
                "api_base_url": "https://colecta.example/api",
                "settings": {"friends": 5},
                "current_user": {"id": 9, "firstname": "Leo", "has_location": true},
                "notice_timeout_ms": 2500,
                "log_level": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://colecta.example/api");
        assert_eq!(config.settings.friends, 5);
        let leader = config.current_user.clone().unwrap();
        assert_eq!(leader.id, 9);
        assert!(leader.has_location);
        assert_eq!(leader.lastname, None);
        assert_eq!(config.notice_timeout_ms, 2500);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(AppConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
        assert!(AppConfig::from_json(r#"{"settings": {"friends": "three"}}"#).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = AppConfig { log_level: "chatty".into(), ..AppConfig::default() };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
