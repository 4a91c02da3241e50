//! Config file location and loading
//!
//! The file is read-only: nothing the user changes at runtime is written back.

use std::path::{Path, PathBuf};

use steasy_core::prelude::*;

use super::types::AppConfig;

/// Directory under the platform config dir
pub const CONFIG_DIR: &str = "station-easy";

/// Config file name
pub const CONFIG_FILENAME: &str = "config.toml";

/// `<config_dir>/station-easy/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields defaults. Unreadable or unparsable files are
/// logged with context and also yield defaults.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => {
            debug!("No config directory on this platform, using defaults");
            return AppConfig::default();
        }
    };

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return AppConfig::default();
    }

    match read_config(&config_path) {
        Ok(config) => {
            info!("Loaded config from {:?}", config_path);
            config
        }
        Err(_) => {
            warn!("Using default config");
            AppConfig::default()
        }
    }
}

/// Read and parse one config file
pub fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {:?}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings_store::Theme;
    use steasy_core::Language;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(Some(&temp.path().join("absent.toml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_custom_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[startup]
splash_ms = 0
language = "Tamil"
theme = "dark"

[simulation]
otp_code = "000000"
chat_reply_delay_ms = 10
"#,
        )
        .unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config.startup.splash_ms, 0);
        assert_eq!(config.startup.language, Language::Tamil);
        assert_eq!(config.startup.theme, Theme::Dark);
        assert_eq!(config.simulation.otp_code, "000000");
        assert_eq!(config.simulation.chat_reply_delay_ms, 10);
        assert_eq!(config.simulation.otp_delay_ms, 1500);
    }

    #[test]
    fn test_invalid_toml_gives_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[startup\nsplash_ms = ").unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_wrong_type_gives_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[startup]\nsplash_ms = \"long\"\n").unwrap();

        assert_eq!(load_config(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_read_config_reports_error_kind() {
        let temp = tempdir().unwrap();
        let err = read_config(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[simulation]\notp_delay_ms = -").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_default_path_is_namespaced() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("station-easy/config.toml"));
        }
    }
}
