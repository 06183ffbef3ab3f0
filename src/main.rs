//! Dining philosophers CLI.
//!
//! Seats the philosophers, lets them think and eat, and exits with status 255
//! once the famine probe finds everybody holding one chopstick.

use std::{io::IsTerminal, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dining_philosophers::{interrupt::Interrupts, Dinner, DurationRange, SimulationConfig};

#[derive(Parser)]
#[command(name = "dining-philosophers")]
#[command(about = "Left-hand-first dining philosophers with a famine probe", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of philosophers (and chopsticks)
    #[arg(short = 'n', long, env = "DINING_PHILOSOPHERS", default_value_t = 5)]
    philosophers: usize,

    /// Thinking time in milliseconds, MIN..MAX
    #[arg(long, env = "DINING_THINK_MS", default_value = "0..20000")]
    think_ms: DurationRange,

    /// Eating time in milliseconds, MIN..MAX
    #[arg(long, env = "DINING_EAT_MS", default_value = "0..5000")]
    eat_ms: DurationRange,

    /// Pause between picking up the left and the right chopstick
    #[arg(long, env = "DINING_HESITATE_MS", default_value_t = 0)]
    hesitate_ms: u64,

    /// How often the famine probe looks at the table
    #[arg(long, env = "DINING_PROBE_INTERVAL_MS", default_value_t = 2000)]
    probe_interval_ms: u64,

    /// Seed for think and eat times
    #[arg(long, env = "DINING_SEED")]
    seed: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            philosophers: self.philosophers,
            think: self.think_ms,
            eat: self.eat_ms,
            hesitation: Duration::from_millis(self.hesitate_ms),
            probe_interval: Duration::from_millis(self.probe_interval_ms),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise stay quiet so the narration is readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    // listen first so an early SIGUSR1 cannot hit the default action
    let interrupts = Arc::new(Interrupts::new());
    #[cfg(unix)]
    dining_philosophers::interrupt::listen(interrupts.clone())
        .context("failed to listen for SIGUSR1")?;

    let dinner = Dinner::serve(&cli.config(), interrupts)
        .context("failed to seat the philosophers")?;

    let status = dinner.wait();
    tracing::info!(status, "dinner is over");
    process::exit(status);
}
