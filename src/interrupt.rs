//! Interrupt-and-continue for philosophers and the probe.
//!
//! An interrupt cuts a nap short and the unit carries on as if the nap had
//! ended normally. A philosopher blocked on a chopstick only looks at it again
//! and keeps waiting. Nothing is ever cancelled.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread::Thread,
};

/// Pending-interrupt flag owned by one unit.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the flag and reports whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }
}

struct Unit {
    name: String,
    thread: Thread,
    flag: InterruptFlag,
}

#[derive(Default)]
pub struct Interrupts {
    units: Mutex<Vec<Unit>>,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, thread: Thread, flag: InterruptFlag) {
        let mut units = self.units.lock().unwrap_or_else(PoisonError::into_inner);
        units.push(Unit {
            name: name.into(),
            thread,
            flag,
        });
    }

    /// Raises every unit's flag and wakes it. Returns how many were poked.
    pub fn interrupt_all(&self) -> usize {
        let units = self.units.lock().unwrap_or_else(PoisonError::into_inner);
        for unit in units.iter() {
            tracing::debug!(unit = %unit.name, "interrupting");
            unit.flag.raise();
            unit.thread.unpark();
        }
        units.len()
    }
}

/// Interrupts every registered unit whenever the process receives SIGUSR1.
#[cfg(unix)]
pub fn listen(interrupts: Arc<Interrupts>) -> crate::Result<std::thread::JoinHandle<()>> {
    use libc::SIGUSR1;
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGUSR1]).map_err(crate::Error::SignalRegistration)?;
    std::thread::Builder::new()
        .name("interrupts".into())
        .spawn(move || {
            for sig in signals.forever() {
                let n = interrupts.interrupt_all();
                tracing::info!(signal = sig, units = n, "interrupt received");
            }
        })
        .map_err(|source| crate::Error::Spawn {
            name: "interrupts".into(),
            source,
        })
}
