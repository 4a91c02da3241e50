//! # steasy-device - Simulated Device Collaborators
//!
//! The controller treats these as opaque calls that eventually resolve with a
//! value or a failure. None of them are retried.
//!
//! - [`OtpGateway`] / [`SimulatedOtpGateway`] - timed OTP delivery, plus [`verify_code`]
//! - [`GeolocationProvider`] / [`SimulatedGeolocation`] - position fix or denial
//! - [`ChatResponder`] / [`KeywordResponder`] - text to canned reply key
//!
//! Enable the `test-helpers` feature for `MockChatResponder`.

pub mod chat;
pub mod geolocation;
pub mod otp;

pub use chat::{ChatResponder, KeywordResponder, ReplyKey, DEFAULT_REPLY_DELAY};
#[cfg(any(test, feature = "test-helpers"))]
pub use chat::MockChatResponder;
pub use geolocation::{
    GeolocationProvider, LocalGeolocationProvider, SimulatedGeolocation, DEFAULT_POSITION,
};
pub use otp::{
    verify_code, LocalOtpGateway, OtpDelivery, OtpGateway, SimulatedOtpGateway,
    DEFAULT_OTP_CODE, DEFAULT_OTP_DELAY,
};
