//! User configuration: `<config_dir>/zakupy/config.toml`, all fields
//! optional with sensible defaults.

use crate::storage::ReadPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Where the JSON collections live. Defaults to the platform data
    /// directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Color assigned to locations created without an explicit choice.
    #[serde(default)]
    pub default_color: Option<String>,

    /// What to do when reading a collection fails.
    #[serde(default)]
    pub read_policy: ReadPolicy,
}

/// Load the user config, falling back to defaults when the file is
/// absent.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_from(&config_dir.join("zakupy/config.toml"))
}

fn load_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the data directory: CLI flag, then config, then the platform
/// default.
#[must_use]
pub fn resolve_data_dir(cli_override: Option<PathBuf>, config: &UserConfig) -> PathBuf {
    cli_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| dirs::data_dir().map(|d| d.join("zakupy")))
        .unwrap_or_else(|| PathBuf::from(".zakupy"))
}

#[cfg(test)]
mod tests {
    use super::{UserConfig, load_from, resolve_data_dir};
    use crate::storage::ReadPolicy;
    use std::path::PathBuf;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from(&dir.path().join("config.toml")).expect("load");
        assert!(cfg.data_dir.is_none());
        assert!(cfg.default_color.is_none());
        assert_eq!(cfg.read_policy, ReadPolicy::DefaultEmpty);
    }

    #[test]
    fn config_fields_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
data_dir = "/tmp/zakupy-test"
default_color = "#00FF00"
read_policy = "propagate"
"##,
        )
        .expect("write");

        let cfg = load_from(&path).expect("load");
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/tmp/zakupy-test")));
        assert_eq!(cfg.default_color.as_deref(), Some("#00FF00"));
        assert_eq!(cfg.read_policy, ReadPolicy::Propagate);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [not toml").expect("write");
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn cli_flag_wins_over_config() {
        let config = UserConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..UserConfig::default()
        };
        let resolved = resolve_data_dir(Some(PathBuf::from("/from/cli")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));

        let resolved = resolve_data_dir(None, &config);
        assert_eq!(resolved, PathBuf::from("/from/config"));
    }
}
