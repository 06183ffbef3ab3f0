//! What the philosophers say about themselves.

use std::{
    fmt,
    io::{self, Write},
};

/// One step of a philosopher's cycle, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Thinking,
    PickedUpLeft,
    PickedUpRight,
    Eating,
    Full,
    PutDownRight,
    PutDownLeft,
}

impl Event {
    /// A full think/eat cycle.
    pub const CYCLE: [Event; 7] = [
        Event::Thinking,
        Event::PickedUpLeft,
        Event::PickedUpRight,
        Event::Eating,
        Event::Full,
        Event::PutDownRight,
        Event::PutDownLeft,
    ];

    /// The event that must come right after this one.
    pub fn next(self) -> Event {
        match self {
            Event::Thinking => Event::PickedUpLeft,
            Event::PickedUpLeft => Event::PickedUpRight,
            Event::PickedUpRight => Event::Eating,
            Event::Eating => Event::Full,
            Event::Full => Event::PutDownRight,
            Event::PutDownRight => Event::PutDownLeft,
            Event::PutDownLeft => Event::Thinking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    Philosopher { id: usize, event: Event },
    Famine,
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (id, event) = match self {
            Narration::Philosopher { id, event } => (id, event),
            Narration::Famine => {
                return f.write_str("Oh no! It looks like everyone's going to starve to death...")
            }
        };

        match event {
            Event::Thinking => write!(f, "Philosopher {id} is thinking ..."),
            Event::PickedUpLeft => write!(
                f,
                "Philosopher {id} is hungry and picked up the chopstick on the left."
            ),
            Event::PickedUpRight => write!(f, "Philosopher {id} picked up the chopstick on the right."),
            Event::Eating => write!(f, "Philosopher {id} is eating."),
            Event::Full => write!(f, "Philosopher {id} is full now."),
            Event::PutDownRight => write!(f, "Philosopher {id} put down the right chopstick."),
            Event::PutDownLeft => write!(f, "Philosopher {id} put down the left chopstick."),
        }
    }
}

/// Append-only destination for narration.
///
/// Each philosopher records from its own thread, so its lines arrive in
/// order; lines from different philosophers interleave freely.
pub trait EventSink: Send + Sync {
    fn record(&self, narration: Narration);
}

/// Prints every narration line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&self, narration: Narration) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{narration}").and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write narration");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cycle_is_closed() {
        for (i, e) in Event::CYCLE.iter().enumerate() {
            assert_eq!(e.next(), Event::CYCLE[(i + 1) % Event::CYCLE.len()]);
        }
    }

    #[test]
    fn test_lines_are_tagged() {
        for event in Event::CYCLE {
            let line = Narration::Philosopher { id: 3, event }.to_string();
            assert!(line.starts_with("Philosopher 3 "), "{line}");
        }
        assert!(Narration::Famine.to_string().contains("starve"));
    }
}
