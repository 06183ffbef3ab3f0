//! Dining philosophers, left-hand first, with a famine probe.
//!
//! Every philosopher picks up the chopstick on the left and then the one on
//! the right. Nothing stops all of them from holding their left chopstick at
//! once, so the table can deadlock; the famine probe watches the waiting
//! flags and ends the process when everyone is stuck.

pub mod config;
pub mod dinner;
pub mod error;
pub mod famine;
pub mod interrupt;
pub mod narration;
pub mod philosopher;
pub mod shutdown;
pub mod table;
pub mod timing;
pub mod waiting;

pub use config::{DurationRange, SimulationConfig};
pub use dinner::Dinner;
pub use error::{Error, Result};
pub use famine::{is_famine, FamineProbe};
pub use narration::{ConsoleSink, Event, EventSink, Narration};
pub use philosopher::{Philosopher, Setting};
pub use shutdown::{Shutdown, FAMINE_EXIT_CODE};
pub use table::{seats, Chopsticks, Table};
pub use timing::{DurationSource, UniformDurations};
pub use waiting::WaitingBoard;
