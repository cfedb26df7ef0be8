//! Stand-in device for desktops, demos and tests.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::provider::{LocateFuture, LocationFailure, LocationProvider};
use crate::geo::LatLng;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Fixed(LatLng),
    Jitter { center: LatLng, radius_m: f64 },
    Fail(LocationFailure),
}

/// Answers every request immediately, from a fixed point, a seeded random
/// point around a center, or with a fixed failure.
///
/// Uses `ChaCha8Rng` so identical seeds produce identical positions on every
/// platform.
pub struct SimulatedLocation {
    mode: Mode,
    rng: Mutex<ChaCha8Rng>,
}

impl SimulatedLocation {
    pub fn fixed(position: LatLng) -> Self {
        Self::with_mode(Mode::Fixed(position))
    }

    /// Uniformly random positions within `radius_m` metres of `center`.
    pub fn jitter(center: LatLng, radius_m: f64) -> Self {
        Self::with_mode(Mode::Jitter {
            center,
            radius_m: radius_m.max(0.0),
        })
    }

    pub fn failing(failure: LocationFailure) -> Self {
        Self::with_mode(Mode::Fail(failure))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(DEFAULT_SEED)),
        }
    }

    fn next_answer(&self) -> Result<LatLng, LocationFailure> {
        match self.mode {
            Mode::Fixed(position) => Ok(position),
            Mode::Fail(failure) => Err(failure),
            Mode::Jitter { center, radius_m } => {
                let mut rng = self
                    .rng
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                // sqrt keeps the density uniform over the disc
                let r = radius_m * rng.gen::<f64>().sqrt();
                let theta = rng.gen::<f64>() * std::f64::consts::TAU;
                Ok(center.offset_m(r * theta.sin(), r * theta.cos()))
            }
        }
    }
}

impl LocationProvider for SimulatedLocation {
    fn request_position(&self) -> LocateFuture {
        let answer = self.next_answer();
        Box::pin(async move { answer })
    }
}
