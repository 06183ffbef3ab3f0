#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Barrier, Mutex,
    },
    time::Duration,
};

use dining_philosophers::{
    Chopsticks, DurationSource, Event, EventSink, Narration, Setting, Table, WaitingBoard,
};

/// Everything that was narrated, plus each philosopher's own waiting flag as
/// it was at the moment the line was recorded.
pub struct Recorder {
    board: Arc<WaitingBoard>,
    lines: Mutex<Vec<(Narration, Option<bool>)>>,
}

impl Recorder {
    pub fn new(board: Arc<WaitingBoard>) -> Self {
        Recorder {
            board,
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<(Narration, Option<bool>)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn events_of(&self, id: usize) -> Vec<(Event, bool)> {
        self.lines()
            .into_iter()
            .filter_map(|(n, waiting)| match n {
                Narration::Philosopher { id: who, event } if who == id => {
                    Some((event, waiting.unwrap()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn famines(&self) -> usize {
        self.lines()
            .iter()
            .filter(|(n, _)| *n == Narration::Famine)
            .count()
    }
}

impl EventSink for Recorder {
    fn record(&self, narration: Narration) {
        let waiting = match narration {
            Narration::Philosopher { id, .. } => Some(self.board.is_waiting(id)),
            Narration::Famine => None,
        };
        self.lines.lock().unwrap().push((narration, waiting));
    }
}

/// Always the same duration, whatever the range.
pub struct Fixed(pub Duration);

impl DurationSource for Fixed {
    fn between(&self, _min: Duration, _max: Duration) -> Duration {
        self.0
    }
}

/// Counts holders per chopstick around a real table and remembers if a
/// chopstick ever had two.
pub struct Counting {
    inner: Table,
    holders: Vec<AtomicUsize>,
    pub pick_ups: AtomicUsize,
    pub violated: AtomicBool,
}

impl Counting {
    pub fn new(n: usize) -> Self {
        Counting {
            inner: Table::new(n),
            holders: (0..n).map(|_| AtomicUsize::new(0)).collect(),
            pick_ups: AtomicUsize::new(0),
            violated: AtomicBool::new(false),
        }
    }
}

impl Chopsticks for Counting {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn pick_up(&self, index: usize, philosopher: usize) {
        assert!(index < self.len());
        self.inner.pick_up(index, philosopher);
        if self.holders[index].fetch_add(1, Ordering::SeqCst) != 0 {
            self.violated.store(true, Ordering::SeqCst);
        }
        self.pick_ups.fetch_add(1, Ordering::SeqCst);
    }

    fn put_down(&self, index: usize, philosopher: usize) {
        self.holders[index].fetch_sub(1, Ordering::SeqCst);
        self.inner.put_down(index, philosopher);
    }

    fn holder(&self, index: usize) -> Option<usize> {
        self.inner.holder(index)
    }
}

/// Holds every philosopher right after their first chopstick until all of
/// them have one, forcing the circular wait.
pub struct Pausing {
    inner: Table,
    everyone_has_left: Barrier,
}

impl Pausing {
    pub fn new(n: usize) -> Self {
        Pausing {
            inner: Table::new(n),
            everyone_has_left: Barrier::new(n),
        }
    }
}

impl Chopsticks for Pausing {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn pick_up(&self, index: usize, philosopher: usize) {
        self.inner.pick_up(index, philosopher);
        if index == philosopher {
            self.everyone_has_left.wait();
        }
    }

    fn put_down(&self, index: usize, philosopher: usize) {
        self.inner.put_down(index, philosopher);
    }

    fn holder(&self, index: usize) -> Option<usize> {
        self.inner.holder(index)
    }
}

pub fn setting(
    chopsticks: Arc<dyn Chopsticks>,
    durations: Arc<dyn DurationSource>,
) -> (Setting, Arc<Recorder>) {
    let board = Arc::new(WaitingBoard::new(chopsticks.len()));
    let recorder = Arc::new(Recorder::new(board.clone()));
    let setting = Setting {
        chopsticks,
        board,
        sink: recorder.clone(),
        durations,
    };
    (setting, recorder)
}
