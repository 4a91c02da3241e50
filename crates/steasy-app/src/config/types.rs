//! Configuration types for Station Easy
//!
//! Defines:
//! - `AppConfig` - root of `config.toml`
//! - `StartupConfig` - splash duration and initial settings
//! - `SimulationConfig` - timings and outcomes of the simulated devices

use std::time::Duration;

use serde::{Deserialize, Serialize};
use steasy_core::{Coordinates, Language};
use steasy_device::{SimulatedGeolocation, SimulatedOtpGateway, DEFAULT_OTP_CODE, DEFAULT_POSITION};

use crate::settings_store::{AppSettings, Theme};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub startup: StartupConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// `[startup]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StartupConfig {
    /// How long the splash stays up, in milliseconds
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub theme: Theme,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            splash_ms: default_splash_ms(),
            language: Language::default(),
            theme: Theme::default(),
        }
    }
}

impl StartupConfig {
    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    /// Settings the process starts with
    pub fn initial_settings(&self) -> AppSettings {
        AppSettings {
            language: self.language,
            theme: self.theme,
            ..AppSettings::default()
        }
    }
}

/// `[simulation]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_otp_delay_ms")]
    pub otp_delay_ms: u64,

    /// Code handed out by the simulated gateway and expected on verify
    #[serde(default = "default_otp_code")]
    pub otp_code: String,

    #[serde(default = "default_chat_reply_delay_ms")]
    pub chat_reply_delay_ms: u64,

    /// Pause after a feedback submit before returning to settings
    #[serde(default = "default_feedback_return_ms")]
    pub feedback_return_ms: u64,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            otp_delay_ms: default_otp_delay_ms(),
            otp_code: default_otp_code(),
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
            feedback_return_ms: default_feedback_return_ms(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn otp_gateway(&self) -> SimulatedOtpGateway {
        SimulatedOtpGateway::new(Duration::from_millis(self.otp_delay_ms), self.otp_code.clone())
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    pub fn feedback_return_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_return_ms)
    }
}

/// `[simulation.geolocation]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeolocationConfig {
    /// `false` simulates a denied permission
    #[serde(default = "default_true")]
    pub available: bool,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Random offset in degrees added to each fix
    #[serde(default)]
    pub jitter: f64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            available: true,
            latitude: default_latitude(),
            longitude: default_longitude(),
            jitter: 0.0,
        }
    }
}

impl GeolocationConfig {
    pub fn provider(&self) -> SimulatedGeolocation {
        if self.available {
            SimulatedGeolocation::available(Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
            .with_jitter(self.jitter)
        } else {
            SimulatedGeolocation::denied()
        }
    }
}

fn default_splash_ms() -> u64 {
    2500
}

fn default_otp_delay_ms() -> u64 {
    1500
}

fn default_otp_code() -> String {
    DEFAULT_OTP_CODE.to_string()
}

fn default_chat_reply_delay_ms() -> u64 {
    1500
}

fn default_feedback_return_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

fn default_latitude() -> f64 {
    DEFAULT_POSITION.latitude
}

fn default_longitude() -> f64 {
    DEFAULT_POSITION.longitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.startup.splash_ms, 2500);
        assert_eq!(config.startup.language, Language::English);
        assert_eq!(config.simulation.otp_delay_ms, 1500);
        assert_eq!(config.simulation.otp_code, "123456");
        assert_eq!(config.simulation.chat_reply_delay_ms, 1500);
        assert_eq!(config.simulation.feedback_return_ms, 2000);
        assert!(config.simulation.geolocation.available);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [startup]
            language = "Malayalam"

            [simulation.geolocation]
            available = false
            "#,
        )
        .unwrap();
        assert_eq!(config.startup.language, Language::Malayalam);
        assert_eq!(config.startup.splash_ms, 2500);
        assert_eq!(config.startup.theme, Theme::Light);
        assert!(!config.simulation.geolocation.available);
        assert_eq!(config.simulation.geolocation.latitude, 9.9816);
    }

    #[test]
    fn test_initial_settings_from_startup() {
        let startup = StartupConfig {
            language: Language::Hindi,
            theme: Theme::System,
            ..StartupConfig::default()
        };
        let settings = startup.initial_settings();
        assert_eq!(settings.language, Language::Hindi);
        assert_eq!(settings.theme, Theme::System);
        assert!(!settings.voice_assistant);
    }
}
