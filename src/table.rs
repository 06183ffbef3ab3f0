use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Chopsticks used by philosopher `id` at a table of `n`: (left, right).
pub fn seats(id: usize, n: usize) -> (usize, usize) {
    assert!(n > 0);
    (id % n, (id + 1) % n)
}

/// A ring of chopsticks. Chopstick `i` lies between philosopher `i - 1` and
/// philosopher `i`.
pub trait Chopsticks: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks until chopstick `index` is free, then hands it to `philosopher`.
    fn pick_up(&self, index: usize, philosopher: usize);

    /// Puts chopstick `index` back on the table. Panics unless `philosopher`
    /// holds it.
    fn put_down(&self, index: usize, philosopher: usize);

    fn holder(&self, index: usize) -> Option<usize>;
}

struct Chopstick {
    holder: Mutex<Option<usize>>, // None while it lies on the table
    cond: Condvar,
}

impl Chopstick {
    fn new() -> Self {
        Chopstick {
            holder: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    // The holder is a plain Option, so a panicking philosopher cannot leave it
    // half-written.
    fn lock(&self) -> MutexGuard<'_, Option<usize>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Table {
    chopsticks: Vec<Chopstick>,
}

impl Table {
    pub fn new(n: usize) -> Self {
        Table {
            chopsticks: (0..n).map(|_| Chopstick::new()).collect(),
        }
    }

    fn chopstick(&self, index: usize) -> &Chopstick {
        assert!(
            index < self.chopsticks.len(),
            "chopstick {index} is not on a table of {}",
            self.chopsticks.len()
        );
        &self.chopsticks[index]
    }
}

impl Chopsticks for Table {
    fn len(&self) -> usize {
        self.chopsticks.len()
    }

    fn pick_up(&self, index: usize, philosopher: usize) {
        let chopstick = self.chopstick(index);
        let mut holder = chopstick.lock();
        // a wakeup only means "look again"; keep waiting until it is free
        while holder.is_some() {
            holder = chopstick
                .cond
                .wait(holder)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *holder = Some(philosopher);
    }

    fn put_down(&self, index: usize, philosopher: usize) {
        let chopstick = self.chopstick(index);
        let mut holder = chopstick.lock();
        assert_eq!(
            *holder,
            Some(philosopher),
            "philosopher {philosopher} put down chopstick {index} without holding it"
        );
        *holder = None;
        chopstick.cond.notify_one();
    }

    fn holder(&self, index: usize) -> Option<usize> {
        *self.chopstick(index).lock()
    }
}
