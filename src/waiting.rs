use std::sync::atomic::{AtomicBool, Ordering};

/// One flag per philosopher: "holding at most the left chopstick and waiting
/// for the right one".
///
/// Philosopher `i` is the only writer of flag `i`. Reads and writes are
/// `Relaxed` and a snapshot is not atomic across philosophers, so the famine
/// probe sees a best-effort picture of the table, never a consistent one.
pub struct WaitingBoard {
    flags: Vec<AtomicBool>,
}

impl WaitingBoard {
    pub fn new(n: usize) -> Self {
        WaitingBoard {
            flags: (0..n).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn set(&self, id: usize, waiting: bool) {
        self.flags[id].store(waiting, Ordering::Relaxed);
    }

    pub fn is_waiting(&self, id: usize) -> bool {
        self.flags[id].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Vec<bool> {
        self.flags
            .iter()
            .map(|f| f.load(Ordering::Relaxed))
            .collect()
    }
}
