//! Simulated OTP delivery and verification

use std::time::Duration;

use steasy_core::prelude::*;
use steasy_core::{PhoneNumber, OTP_LENGTH};

/// Code every simulated delivery hands out
pub const DEFAULT_OTP_CODE: &str = "123456";

/// Delay before a simulated delivery resolves
pub const DEFAULT_OTP_DELAY: Duration = Duration::from_millis(1500);

/// Outcome of a successful send: the code is surfaced out-of-band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDelivery {
    pub phone: PhoneNumber,
    pub code: String,
}

/// OTP delivery channel
#[trait_variant::make(OtpGateway: Send)]
pub trait LocalOtpGateway {
    /// Deliver a verification code to `phone`
    async fn send_code(&self, phone: &PhoneNumber) -> Result<OtpDelivery>;
}

/// Resolves after a fixed delay with a fixed code
#[derive(Debug, Clone)]
pub struct SimulatedOtpGateway {
    delay: Duration,
    code: String,
}

impl SimulatedOtpGateway {
    pub fn new(delay: Duration, code: impl Into<String>) -> Self {
        Self {
            delay,
            code: code.into(),
        }
    }
}

impl Default for SimulatedOtpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_DELAY, DEFAULT_OTP_CODE)
    }
}

impl OtpGateway for SimulatedOtpGateway {
    async fn send_code(&self, phone: &PhoneNumber) -> Result<OtpDelivery> {
        debug!("Simulating OTP delivery to {}", phone.masked());
        tokio::time::sleep(self.delay).await;
        info!("OTP delivered to {}", phone.masked());
        Ok(OtpDelivery {
            phone: phone.clone(),
            code: self.code.clone(),
        })
    }
}

/// Check an entered code against the expected one.
///
/// All [`OTP_LENGTH`] digits must be present before a comparison is made.
pub fn verify_code(entered: &str, expected: &str) -> Result<()> {
    let digits = entered.chars().filter(char::is_ascii_digit).count();
    if digits != OTP_LENGTH || entered.len() != OTP_LENGTH {
        return Err(Error::IncompleteOtp { entered: digits });
    }
    if entered == expected {
        Ok(())
    } else {
        Err(Error::AuthMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::{verify_code, OtpGateway, SimulatedOtpGateway, DEFAULT_OTP_CODE};
    use std::time::Duration;
    use steasy_core::{Error, PhoneNumber};

    #[test]
    fn test_verify_correct_code() {
        assert!(verify_code("123456", DEFAULT_OTP_CODE).is_ok());
    }

    #[test]
    fn test_verify_wrong_code_is_mismatch() {
        let err = verify_code("654321", DEFAULT_OTP_CODE).unwrap_err();
        assert!(matches!(err, Error::AuthMismatch));
    }

    #[test]
    fn test_verify_requires_all_digits() {
        let err = verify_code("1234", DEFAULT_OTP_CODE).unwrap_err();
        assert!(matches!(err, Error::IncompleteOtp { entered: 4 }));

        let err = verify_code("12a456", DEFAULT_OTP_CODE).unwrap_err();
        assert!(matches!(err, Error::IncompleteOtp { entered: 5 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_send_waits_then_returns_code() {
        let gateway = SimulatedOtpGateway::new(Duration::from_millis(1500), "111111");
        let phone = PhoneNumber::parse("9876543210").unwrap();

        let start = tokio::time::Instant::now();
        let delivery = gateway.send_code(&phone).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(delivery.code, "111111");
        assert_eq!(delivery.phone, phone);
    }
}
