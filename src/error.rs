use std::{io, time::Duration};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// With a single philosopher both hands reach for the same chopstick.
    #[error("at least 2 philosophers are needed, got {0}")]
    TooFewPhilosophers(usize),

    #[error("{what} range is inverted: {min:?}..{max:?}")]
    InvertedDurationRange {
        what: &'static str,
        min: Duration,
        max: Duration,
    },

    #[error("{philosophers} philosophers need as many chopsticks and waiting flags, got {chopsticks} and {flags}")]
    TableMismatch {
        philosophers: usize,
        chopsticks: usize,
        flags: usize,
    },

    #[error("probe interval must be greater than zero")]
    ZeroProbeInterval,

    #[error("failed to register signal handler: {0}")]
    SignalRegistration(#[source] io::Error),

    #[error("failed to spawn thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
}
