use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

/// Exit status after a famine. The classic `exit(-1)` truncated to 8 bits.
pub const FAMINE_EXIT_CODE: i32 = 255;

/// Process-wide stop signal.
///
/// The famine probe triggers it and the entry point waits on it and turns the
/// status into `process::exit`. Nothing else ends the process, so tests can
/// wait on the same handle without losing the test runner.
#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<(Mutex<Option<i32>>, Condvar)>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<i32>> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests termination with `status`. Only the first request counts;
    /// returns false if one was already made.
    pub fn trigger(&self, status: i32) -> bool {
        self.trigger_after(status, || ())
    }

    /// Like `trigger`, but runs `before` first while still holding the lock,
    /// so `before` only runs for the request that wins.
    pub fn trigger_after(&self, status: i32, before: impl FnOnce()) -> bool {
        let mut current = self.lock();
        if current.is_some() {
            return false;
        }
        before();
        *current = Some(status);
        self.inner.1.notify_all();
        true
    }

    pub fn status(&self) -> Option<i32> {
        *self.lock()
    }

    /// Blocks until triggered and returns the requested status.
    pub fn wait(&self) -> i32 {
        let mut current = self.lock();
        loop {
            if let Some(status) = *current {
                return status;
            }
            current = self
                .inner
                .1
                .wait(current)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<i32> {
        let current = self.lock();
        let (current, _) = self
            .inner
            .1
            .wait_timeout_while(current, timeout, |s| s.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        *current
    }
}
