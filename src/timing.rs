use std::{
    sync::{Mutex, PoisonError},
    thread,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{config::DurationRange, interrupt::InterruptFlag};

/// Where think and eat times come from.
pub trait DurationSource: Send + Sync {
    /// A duration in `[min, max)`, or `min` when the range is empty.
    fn between(&self, min: Duration, max: Duration) -> Duration;

    fn sample(&self, range: DurationRange) -> Duration {
        self.between(range.min, range.max)
    }
}

/// Uniformly distributed durations, optionally from a fixed seed.
pub struct UniformDurations {
    rng: Mutex<StdRng>,
}

impl UniformDurations {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        UniformDurations {
            rng: Mutex::new(rng),
        }
    }
}

impl DurationSource for UniformDurations {
    fn between(&self, min: Duration, max: Duration) -> Duration {
        if min >= max {
            return min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(min..max)
    }
}

/// Sleeps for `duration` unless interrupted first. Returns true on interrupt.
///
/// `park_timeout` may wake early for no reason, so the deadline is re-checked
/// each time round.
pub fn nap(duration: Duration, interrupt: &InterruptFlag) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if interrupt.take() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::park_timeout(deadline - now);
    }
}
