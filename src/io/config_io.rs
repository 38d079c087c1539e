use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

use super::atomic_write;

const APP_DIR: &str = "odsgrid";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not edit {path}: {source}")]
    Edit {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// `$XDG_CONFIG_HOME/odsgrid`, or `~/.config/odsgrid`.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"))
        .join(APP_DIR)
}

/// `$XDG_STATE_HOME/odsgrid`, or `~/.local/state/odsgrid`. Holds the TUI log.
pub fn state_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("state"))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Read config.toml. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Apply the `ODSG_API_URL` environment value and then the `--api-url`
/// flag. The flag wins.
pub fn apply_overrides(config: &mut AppConfig, env_url: Option<String>, flag_url: Option<&str>) {
    if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
        config.api_url = url;
    }
    if let Some(url) = flag_url {
        config.api_url = url.to_string();
    }
}

/// Load the effective configuration for this process.
pub fn load(path: &Path, flag_url: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut config = read_config(path)?;
    apply_overrides(&mut config, std::env::var("ODSG_API_URL").ok(), flag_url);
    tracing::debug!(path = %path.display(), api_url = %config.api_url, "config loaded");
    Ok(config)
}

/// Set one dotted `key` (e.g. `api_url`, `ui.card_width`,
/// `ui.colors.selection`) in config.toml, keeping the rest of the file
/// as written.
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = text.parse().map_err(|e| ConfigError::Edit {
        path: path.to_path_buf(),
        source: e,
    })?;

    set_in_document(&mut doc, key, value)?;

    // Reject edits that leave the file unreadable.
    let updated = doc.to_string();
    toml::from_str::<AppConfig>(&updated).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })?;

    atomic_write(path, updated.as_bytes()).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn set_in_document(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["api_url"] | ["asset_base"] => {
            doc[parts[0]] = toml_edit::value(value);
        }
        ["timeout_secs"] => {
            let secs: i64 = value.parse().map_err(|_| invalid())?;
            doc["timeout_secs"] = toml_edit::value(secs);
        }
        ["ui", "show_key_hints"] => {
            let flag: bool = value.parse().map_err(|_| invalid())?;
            ui_table(doc)["show_key_hints"] = toml_edit::value(flag);
        }
        ["ui", field @ ("card_width" | "card_gap")] => {
            let n: i64 = value.parse().map_err(|_| invalid())?;
            ui_table(doc)[*field] = toml_edit::value(n);
        }
        ["ui", "colors", name] => {
            if ui_table(doc).get("colors").is_none() {
                let colors = new_table(doc);
                doc["ui"]["colors"] = toml_edit::Item::Table(colors);
            }
            if !doc["ui"]["colors"].is_table_like() {
                return Err(invalid());
            }
            doc["ui"]["colors"][*name] = toml_edit::value(value);
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}

fn ui_table(doc: &mut toml_edit::DocumentMut) -> &mut toml_edit::Item {
    if !doc.contains_key("ui") {
        let ui = new_table(doc);
        doc["ui"] = toml_edit::Item::Table(ui);
    }
    &mut doc["ui"]
}

/// A fresh table that takes over the document's trailing comments, so
/// they stay above the table instead of ending up after it.
fn new_table(doc: &mut toml_edit::DocumentMut) -> toml_edit::Table {
    let mut table = toml_edit::Table::new();
    let trailing = doc.trailing().as_str().unwrap_or("").to_string();
    if !trailing.trim().is_empty() {
        doc.set_trailing("");
        table.decor_mut().set_prefix(trailing);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
    }

    #[test]
    fn parse_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, Some("http://env:1".into()), None);
        assert_eq!(config.api_url, "http://env:1");
        apply_overrides(&mut config, Some("http://env:1".into()), Some("http://flag:2"));
        assert_eq!(config.api_url, "http://flag:2");
    }

    #[test]
    fn set_value_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "# staging server\napi_url = \"http://a\"\n").unwrap();

        set_value(&path, "api_url", "http://b").unwrap();
        set_value(&path, "ui.card_width", "30").unwrap();
        set_value(&path, "ui.colors.selection", "#FF00FF").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# staging server\n"));
        let config = read_config(&path).unwrap();
        assert_eq!(config.api_url, "http://b");
        assert_eq!(config.ui.card_width, 30);
        assert_eq!(config.ui.colors["selection"], "#FF00FF");
    }

    #[test]
    fn comment_only_file_keeps_comment_on_top() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "# mine\n").unwrap();

        set_value(&path, "ui.card_width", "30").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# mine\n[ui]\n"), "got: {text:?}");

        fs::write(&path, "[ui]\ncard_gap = 1\n# colors below\n").unwrap();
        set_value(&path, "ui.colors.selection", "#FF00FF").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let comment = text.find("# colors below").unwrap();
        assert!(comment < text.find("[ui.colors]").unwrap(), "got: {text:?}");
        assert_eq!(read_config(&path).unwrap().ui.card_gap, 1);
    }

    #[test]
    fn set_value_rejects_bad_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        assert!(matches!(
            set_value(&path, "timeout_secs", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            set_value(&path, "ui.card_width", "-3"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            set_value(&path, "theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(!path.exists());
    }
}
