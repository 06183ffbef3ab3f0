use std::{sync::Arc, time::Duration};

use crate::{
    config::{DurationRange, SimulationConfig},
    interrupt::InterruptFlag,
    narration::{Event, EventSink, Narration},
    table::{seats, Chopsticks},
    timing::{nap, DurationSource},
    waiting::WaitingBoard,
};

/// Everything at the table a philosopher shares with the others.
#[derive(Clone)]
pub struct Setting {
    pub chopsticks: Arc<dyn Chopsticks>,
    pub board: Arc<WaitingBoard>,
    pub sink: Arc<dyn EventSink>,
    pub durations: Arc<dyn DurationSource>,
}

pub struct Philosopher {
    id: usize,
    left: usize,
    right: usize,
    setting: Setting,
    think: DurationRange,
    eat: DurationRange,
    hesitation: Duration,
}

impl Philosopher {
    /// Panics on a table with fewer than two chopsticks, where both hands
    /// would reach for the same one.
    pub fn new(id: usize, setting: Setting, config: &SimulationConfig) -> Self {
        assert!(
            setting.chopsticks.len() >= 2,
            "a philosopher needs two chopsticks, the table has {}",
            setting.chopsticks.len()
        );
        let (left, right) = seats(id, setting.chopsticks.len());
        Philosopher {
            id,
            left,
            right,
            setting,
            think: config.think,
            eat: config.eat,
            hesitation: config.hesitation,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Chopsticks this philosopher reaches for, in order.
    pub fn hands(&self) -> (usize, usize) {
        (self.left, self.right)
    }

    fn say(&self, event: Event) {
        self.setting
            .sink
            .record(Narration::Philosopher { id: self.id, event });
    }

    fn think(&self, interrupt: &InterruptFlag) {
        self.say(Event::Thinking);
        let d = self.setting.durations.sample(self.think);
        if nap(d, interrupt) {
            tracing::debug!(id = self.id, "interrupted while thinking");
        }
    }

    // Left, then right, the same for everyone. The left chopstick is never
    // put back while waiting for the right one, which is what lets the whole
    // table deadlock.
    fn eat(&self, interrupt: &InterruptFlag) {
        let Setting {
            chopsticks, board, ..
        } = &self.setting;

        board.set(self.id, true);

        chopsticks.pick_up(self.left, self.id);
        self.say(Event::PickedUpLeft);

        if !self.hesitation.is_zero() && nap(self.hesitation, interrupt) {
            tracing::debug!(id = self.id, "interrupted while hesitating");
        }

        chopsticks.pick_up(self.right, self.id);
        board.set(self.id, false);
        self.say(Event::PickedUpRight);

        self.say(Event::Eating);
        let d = self.setting.durations.sample(self.eat);
        if nap(d, interrupt) {
            tracing::debug!(id = self.id, "interrupted while eating");
        }
        self.say(Event::Full);

        chopsticks.put_down(self.right, self.id);
        self.say(Event::PutDownRight);

        chopsticks.put_down(self.left, self.id);
        self.say(Event::PutDownLeft);
    }

    /// One think/eat round.
    pub fn cycle(&self, interrupt: &InterruptFlag) {
        self.think(interrupt);
        self.eat(interrupt);
    }

    /// Thinks and eats until the process ends.
    pub fn run(&self, interrupt: &InterruptFlag) -> ! {
        tracing::debug!(id = self.id, left = self.left, right = self.right, "sitting down");
        loop {
            self.cycle(interrupt);
        }
    }
}
