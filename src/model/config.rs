use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the content API (routes live under `/api`)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Origin that relative image paths are resolved against.
    /// Defaults to `api_url` when absent.
    #[serde(default)]
    pub asset_base: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: default_api_url(),
            asset_base: None,
            timeout_secs: default_timeout_secs(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn asset_base(&self) -> &str {
        self.asset_base.as_deref().unwrap_or(&self.api_url)
    }
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

fn default_card_width() -> u16 {
    24
}

fn default_card_gap() -> u16 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Width of one project card in terminal cells
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Cells between adjacent cards
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            card_width: default_card_width(),
            card_gap: default_card_gap(),
            colors: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.asset_base(), "http://localhost:5000");
        assert_eq!(config.ui.card_width, 24);
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn asset_base_overrides_api_url() {
        let config: AppConfig = toml::from_str(
            r#"api_url = "https://api.example.org"
asset_base = "https://cdn.example.org"

[ui]
card_gap = 4
"#,
        )
        .unwrap();
        assert_eq!(config.asset_base(), "https://cdn.example.org");
        assert_eq!(config.ui.card_gap, 4);
        assert_eq!(config.ui.card_width, 24);
    }
}
