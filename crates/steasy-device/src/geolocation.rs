//! Simulated geolocation

use std::time::Duration;

use rand::Rng;
use steasy_core::prelude::*;
use steasy_core::Coordinates;

/// Ernakulam Junction, the default simulated fix
pub const DEFAULT_POSITION: Coordinates = Coordinates {
    latitude: 9.9816,
    longitude: 76.2999,
};

/// Source of the traveler's position. A failure is terminal for the request.
#[trait_variant::make(GeolocationProvider: Send)]
pub trait LocalGeolocationProvider {
    async fn current_position(&self) -> Result<Coordinates>;
}

/// Simulated provider: either always available or always denied
#[derive(Debug, Clone)]
pub struct SimulatedGeolocation {
    fix: Option<Coordinates>,
    delay: Duration,
    /// Max random offset in degrees applied to each reading
    jitter: f64,
}

impl SimulatedGeolocation {
    pub fn available(fix: Coordinates) -> Self {
        Self {
            fix: Some(fix),
            delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    pub fn denied() -> Self {
        Self {
            fix: None,
            delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_jitter(mut self, degrees: f64) -> Self {
        self.jitter = degrees.abs();
        self
    }

    fn sample(&self, fix: Coordinates) -> Coordinates {
        if self.jitter == 0.0 {
            return fix;
        }
        let mut rng = rand::thread_rng();
        Coordinates {
            latitude: fix.latitude + rng.gen_range(-self.jitter..=self.jitter),
            longitude: fix.longitude + rng.gen_range(-self.jitter..=self.jitter),
        }
    }
}

impl Default for SimulatedGeolocation {
    fn default() -> Self {
        Self::available(DEFAULT_POSITION)
    }
}

impl GeolocationProvider for SimulatedGeolocation {
    async fn current_position(&self) -> Result<Coordinates> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.fix {
            Some(fix) => {
                let position = self.sample(fix);
                debug!("Geolocation fix: {}", position);
                Ok(position)
            }
            None => {
                warn!("Geolocation requested but permission is denied");
                Err(Error::device_unavailable(
                    "Geolocation",
                    "permission denied",
                ))
            }
        }
    }
}
