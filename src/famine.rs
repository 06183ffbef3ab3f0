use std::{sync::Arc, time::Duration};

use crate::{
    interrupt::InterruptFlag,
    narration::{EventSink, Narration},
    shutdown::{Shutdown, FAMINE_EXIT_CODE},
    timing::nap,
    waiting::WaitingBoard,
};

/// True iff there is at least one philosopher and every one of them is
/// waiting. A table with nobody at it is not starving.
pub fn is_famine(snapshot: &[bool]) -> bool {
    !snapshot.is_empty() && snapshot.iter().all(|&waiting| waiting)
}

/// Looks at the waiting board every `interval` and stops the dinner once
/// everybody is waiting at the same time.
///
/// The board is read flag by flag with no lock, so this is a heuristic: it
/// can miss a short all-waiting moment and it can catch a transient one.
pub struct FamineProbe {
    board: Arc<WaitingBoard>,
    sink: Arc<dyn EventSink>,
    shutdown: Shutdown,
    interval: Duration,
}

impl FamineProbe {
    pub fn new(
        board: Arc<WaitingBoard>,
        sink: Arc<dyn EventSink>,
        shutdown: Shutdown,
        interval: Duration,
    ) -> Self {
        FamineProbe {
            board,
            sink,
            shutdown,
            interval,
        }
    }

    /// Runs a single check. On famine the diagnostic line is recorded and
    /// shutdown is triggered, once.
    pub fn check(&self) -> bool {
        let snapshot = self.board.snapshot();
        if !is_famine(&snapshot) {
            tracing::debug!(?snapshot, "probe: someone can still eat");
            return false;
        }

        // the diagnostic line is the only famine output; keep the log below the
        // default filter
        let reported = self
            .shutdown
            .trigger_after(FAMINE_EXIT_CODE, || self.sink.record(Narration::Famine));
        if reported {
            tracing::info!(philosophers = snapshot.len(), "famine detected");
        }
        true
    }

    /// Checks every interval until famine or until someone else shuts down.
    pub fn run(&self, interrupt: &InterruptFlag) {
        while self.shutdown.status().is_none() {
            if nap(self.interval, interrupt) {
                tracing::debug!("probe interrupted, checking early");
            }
            if self.check() {
                break;
            }
        }
    }
}
