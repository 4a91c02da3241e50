//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by the controller to decide how an error is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, reported inline without changing navigation state
    Validation,
    /// Wrong verification code, reported inline and retryable
    AuthMismatch,
    /// A simulated device call failed; the dependent view degrades
    DeviceUnavailable,
    /// IO, config parsing, or missing built-in data
    Infrastructure,
}

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Please enter a valid 10-digit number")]
    InvalidPhone { input: String },

    #[error("Enter all 6 digits of the verification code ({entered} entered)")]
    IncompleteOtp { entered: usize },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    #[error("Unknown setting: {message}")]
    UnknownSetting { message: String },

    // ─────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Incorrect OTP. Please try again.")]
    AuthMismatch,

    // ─────────────────────────────────────────────────────────────
    // Device Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{device} unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_phone(input: impl Into<String>) -> Self {
        Self::InvalidPhone {
            input: input.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    pub fn unknown_setting(message: impl Into<String>) -> Self {
        Self::UnknownSetting {
            message: message.into(),
        }
    }

    pub fn device_unavailable(device: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            device: device.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error for the controller
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPhone { .. }
            | Error::IncompleteOtp { .. }
            | Error::InvalidCommand { .. }
            | Error::UnknownSetting { .. } => ErrorKind::Validation,
            Error::AuthMismatch => ErrorKind::AuthMismatch,
            Error::DeviceUnavailable { .. } => ErrorKind::DeviceUnavailable,
            Error::Io(_) | Error::Toml(_) | Error::Config { .. } => ErrorKind::Infrastructure,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Every domain error is recoverable; only broken plumbing is not.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Infrastructure
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
