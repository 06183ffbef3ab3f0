use std::{sync::Arc, thread};

use crate::{
    config::SimulationConfig,
    error::{Error, Result},
    famine::FamineProbe,
    interrupt::{InterruptFlag, Interrupts},
    narration::ConsoleSink,
    philosopher::{Philosopher, Setting},
    shutdown::Shutdown,
    table::{Chopsticks, Table},
    timing::UniformDurations,
    waiting::WaitingBoard,
};

/// A running table: one thread per philosopher plus the famine probe.
///
/// Threads are detached. Philosophers never return, and the only way out is
/// the shutdown handle followed by process exit.
pub struct Dinner {
    shutdown: Shutdown,
    board: Arc<WaitingBoard>,
    interrupts: Arc<Interrupts>,
    chopsticks: Arc<dyn Chopsticks>,
}

impl Dinner {
    /// Starts a dinner on a fresh table that narrates to stdout. Units are
    /// registered with `interrupts`, which may already be listening.
    pub fn serve(config: &SimulationConfig, interrupts: Arc<Interrupts>) -> Result<Dinner> {
        let setting = Setting {
            chopsticks: Arc::new(Table::new(config.philosophers)),
            board: Arc::new(WaitingBoard::new(config.philosophers)),
            sink: Arc::new(ConsoleSink),
            durations: Arc::new(UniformDurations::new(config.seed)),
        };
        Dinner::start_with(config, setting, interrupts)
    }

    pub fn start(config: &SimulationConfig, setting: Setting) -> Result<Dinner> {
        Dinner::start_with(config, setting, Arc::new(Interrupts::new()))
    }

    /// Validates `config` against `setting`, then spawns the philosophers and
    /// the probe.
    ///
    /// Threads cannot be stopped once spawned: if a later spawn fails, the
    /// error is returned but the philosophers already seated keep eating at
    /// the shared table until the process exits.
    pub fn start_with(
        config: &SimulationConfig,
        setting: Setting,
        interrupts: Arc<Interrupts>,
    ) -> Result<Dinner> {
        config.validate()?;
        let n = config.philosophers;
        if setting.chopsticks.len() != n || setting.board.len() != n {
            return Err(Error::TableMismatch {
                philosophers: n,
                chopsticks: setting.chopsticks.len(),
                flags: setting.board.len(),
            });
        }

        let dinner = Dinner {
            shutdown: Shutdown::new(),
            board: setting.board.clone(),
            interrupts,
            chopsticks: setting.chopsticks.clone(),
        };

        for id in 0..n {
            let philosopher = Philosopher::new(id, setting.clone(), config);
            dinner.spawn(format!("philosopher-{id}"), move |interrupt| {
                philosopher.run(&interrupt)
            })?;
        }

        let probe = FamineProbe::new(
            dinner.board.clone(),
            setting.sink,
            dinner.shutdown.clone(),
            config.probe_interval,
        );
        dinner.spawn("famine-probe".to_string(), move |interrupt| {
            probe.run(&interrupt)
        })?;

        tracing::info!(
            philosophers = n,
            think = %config.think,
            eat = %config.eat,
            probe_ms = u64::try_from(config.probe_interval.as_millis()).unwrap_or(u64::MAX),
            "dinner is served"
        );
        Ok(dinner)
    }

    fn spawn<F>(&self, name: String, f: F) -> Result<()>
    where
        F: FnOnce(InterruptFlag) + Send + 'static,
    {
        let flag = InterruptFlag::new();
        let flag0 = flag.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || f(flag0))
            .map_err(|source| Error::Spawn {
                name: name.clone(),
                source,
            })?;
        self.interrupts.register(name, handle.thread().clone(), flag);
        Ok(())
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn waiting(&self) -> &Arc<WaitingBoard> {
        &self.board
    }

    pub fn interrupts(&self) -> &Arc<Interrupts> {
        &self.interrupts
    }

    pub fn chopsticks(&self) -> &Arc<dyn Chopsticks> {
        &self.chopsticks
    }

    /// Blocks until the dinner is over and returns the exit status.
    pub fn wait(&self) -> i32 {
        self.shutdown.wait()
    }
}
