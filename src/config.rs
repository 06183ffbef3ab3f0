use std::{fmt, str::FromStr, time::Duration};

use crate::error::{Error, Result};

/// Half-open `[min, max)` range a nap length is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: Duration,
    pub max: Duration,
}

impl DurationRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        DurationRange { min, max }
    }

    pub const fn fixed(d: Duration) -> Self {
        DurationRange { min: d, max: d }
    }

    fn validate(&self, what: &'static str) -> Result<()> {
        if self.min > self.max {
            return Err(Error::InvertedDurationRange {
                what,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min.as_millis(), self.max.as_millis())
    }
}

/// Parses milliseconds as `MIN..MAX`, or a single value for a fixed length.
impl FromStr for DurationRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("invalid milliseconds {v:?}: {e}"))
        };

        match s.split_once("..") {
            Some((min, max)) => Ok(DurationRange::new(parse(min)?, parse(max)?)),
            None => parse(s).map(DurationRange::fixed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of philosophers, which is also the number of chopsticks.
    pub philosophers: usize,
    pub think: DurationRange,
    pub eat: DurationRange,
    /// Pause between the left and the right chopstick, with the waiting flag up.
    pub hesitation: Duration,
    pub probe_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            philosophers: 5,
            think: DurationRange::new(Duration::ZERO, Duration::from_secs(20)),
            eat: DurationRange::new(Duration::ZERO, Duration::from_secs(5)),
            hesitation: Duration::ZERO,
            probe_interval: Duration::from_secs(2),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.philosophers < 2 {
            return Err(Error::TooFewPhilosophers(self.philosophers));
        }
        self.think.validate("think")?;
        self.eat.validate("eat")?;
        if self.probe_interval.is_zero() {
            return Err(Error::ZeroProbeInterval);
        }
        Ok(())
    }
}
