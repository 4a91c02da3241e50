//! Global app settings with partial-update merge and change notification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steasy_core::prelude::*;
use steasy_core::Language;
use tokio::sync::watch;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Resolve against the platform preference
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_prefers_dark,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Theme::Light => "lightMode",
            Theme::Dark => "darkMode",
            Theme::System => "systemDefault",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::System => write!(f, "system"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(Error::unknown_setting(format!("unknown theme '{other}'"))),
        }
    }
}

/// The four global settings every screen observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub language: Language,
    pub theme: Theme,
    pub accessibility_enabled: bool,
    pub voice_assistant: bool,
}

impl AppSettings {
    /// Shallow merge; returns whether any field changed
    pub fn merge(&mut self, patch: &SettingsPatch) -> bool {
        let before = *self;
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(enabled) = patch.accessibility_enabled {
            self.accessibility_enabled = enabled;
        }
        if let Some(enabled) = patch.voice_assistant {
            self.voice_assistant = enabled;
        }
        *self != before
    }
}

/// Partial settings update. Only present fields are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_assistant: Option<bool>,
}

impl SettingsPatch {
    pub fn language(language: Language) -> Self {
        Self {
            language: Some(language),
            ..Self::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Self::default()
        }
    }

    /// Parse a JSON object patch; unknown fields are rejected
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::unknown_setting(e.to_string()))
    }

    /// Parse a single `field=value` assignment
    pub fn from_assignment(input: &str) -> Result<Self> {
        let (field, value) = input
            .split_once('=')
            .ok_or_else(|| Error::invalid_command(format!("expected field=value, got '{input}'")))?;
        let field = field.trim();
        let value = value.trim();

        let json = match field {
            "language" => serde_json::Value::String(value.parse::<Language>()?.code().to_string()),
            "theme" => serde_json::Value::String(value.parse::<Theme>()?.to_string()),
            _ => match value {
                "true" | "on" => serde_json::Value::Bool(true),
                "false" | "off" => serde_json::Value::Bool(false),
                other => serde_json::Value::String(other.to_string()),
            },
        };

        let mut object = serde_json::Map::new();
        object.insert(field.to_string(), json);
        Self::from_json(serde_json::Value::Object(object))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Single owner of [`AppSettings`]; dependents subscribe to the watch
#[derive(Debug)]
pub struct SettingsStore {
    tx: watch::Sender<AppSettings>,
}

impl SettingsStore {
    pub fn new(initial: AppSettings) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Latest settings after the most recent completed update
    pub fn current(&self) -> AppSettings {
        *self.tx.borrow()
    }

    /// Merge `patch`; subscribers are woken only if something changed
    pub fn update(&self, patch: &SettingsPatch) -> bool {
        let changed = self.tx.send_if_modified(|settings| settings.merge(patch));
        if changed {
            debug!("Settings updated: {:?}", self.current());
        }
        changed
    }

    pub fn subscribe(&self) -> watch::Receiver<AppSettings> {
        self.tx.subscribe()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.theme, Theme::Light);
        assert!(!settings.accessibility_enabled);
        assert!(!settings.voice_assistant);
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut settings = AppSettings {
            voice_assistant: true,
            ..AppSettings::default()
        };
        let changed = settings.merge(&SettingsPatch {
            theme: Some(Theme::Dark),
            accessibility_enabled: Some(true),
            ..SettingsPatch::default()
        });
        assert!(changed);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.accessibility_enabled);
        assert_eq!(settings.language, Language::English);
        assert!(settings.voice_assistant);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut settings = AppSettings::default();
        assert!(!settings.merge(&SettingsPatch::default()));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SettingsPatch::from_json(serde_json::json!({ "font_size": 3 })).unwrap_err();
        assert!(matches!(err, Error::UnknownSetting { .. }));

        let err = SettingsPatch::from_assignment("font_size=3").unwrap_err();
        assert!(matches!(err, Error::UnknownSetting { .. }));
    }

    #[test]
    fn test_assignment_parsing() {
        assert_eq!(
            SettingsPatch::from_assignment("language=ta").unwrap(),
            SettingsPatch::language(Language::Tamil)
        );
        assert_eq!(
            SettingsPatch::from_assignment("theme = dark").unwrap(),
            SettingsPatch::theme(Theme::Dark)
        );
        let patch = SettingsPatch::from_assignment("voice_assistant=on").unwrap();
        assert_eq!(patch.voice_assistant, Some(true));
        assert!(SettingsPatch::from_assignment("theme").is_err());
        assert!(SettingsPatch::from_assignment("accessibility_enabled=maybe").is_err());
    }

    #[test]
    fn test_theme_resolution() {
        assert!(!Theme::Light.is_dark(true));
        assert!(Theme::Dark.is_dark(false));
        assert!(Theme::System.is_dark(true));
        assert!(!Theme::System.is_dark(false));
    }

    #[test]
    fn test_store_notifies_only_on_change() {
        let store = SettingsStore::default();
        let mut rx = store.subscribe();

        assert!(!store.update(&SettingsPatch::language(Language::English)));
        assert!(!rx.has_changed().unwrap());

        assert!(store.update(&SettingsPatch::language(Language::Hindi)));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().language, Language::Hindi);
        assert_eq!(store.current().language, Language::Hindi);
    }
}
