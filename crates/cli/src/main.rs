use clap::{Parser, Subcommand};
use er_core::config::core_config_from_values;
use er_core::constants::{HOLDING_CAPACITY_ENV, OVERFLOW_POLICY_ENV};
use er_core::{CoreConfig, TreatmentController};
use er_ids::{RandomIdGenerator, SequentialIdGenerator};
use std::io::{self, Cursor};
use tracing_subscriber::EnvFilter;

mod menu;
mod render;

use menu::MenuDriver;

#[derive(Parser)]
#[command(name = "er")]
#[command(about = "Single-doctor emergency room with interruptible treatment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Run {
        /// Holding-area capacity (overrides ER_HOLDING_CAPACITY)
        #[arg(long)]
        capacity: Option<String>,
        /// `reject` or `evict-oldest` (overrides ER_OVERFLOW_POLICY)
        #[arg(long)]
        overflow_policy: Option<String>,
        /// Do not clear the screen before each redraw
        #[arg(long)]
        no_clear: bool,
    },
    /// Play a four-patient interruption scenario and exit
    Demo {
        /// Holding-area capacity (overrides ER_HOLDING_CAPACITY)
        #[arg(long)]
        capacity: Option<String>,
        /// `reject` or `evict-oldest` (overrides ER_OVERFLOW_POLICY)
        #[arg(long)]
        overflow_policy: Option<String>,
    },
}

fn resolve_config(
    capacity: Option<String>,
    overflow_policy: Option<String>,
) -> er_core::TreatmentResult<CoreConfig> {
    core_config_from_values(
        capacity.or_else(|| std::env::var(HOLDING_CAPACITY_ENV).ok()),
        overflow_policy.or_else(|| std::env::var(OVERFLOW_POLICY_ENV).ok()),
    )
}

/// Menu input for the demo: admit A, B, C, D, then complete once.
fn demo_script() -> String {
    let arrivals = [
        ("A", "Broken leg", "Severe"),
        ("B", "Head injury", "Severe"),
        ("C", "Stab wound", "Critical"),
        ("D", "Cardiac arrest", "Critical"),
    ];
    let mut script: String = arrivals
        .iter()
        .map(|(name, condition, severity)| format!("1\n{name}\n{condition}\n{severity}\n\n"))
        .collect();
    script.push_str("2\n\n3\n");
    script
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            capacity,
            overflow_policy,
            no_clear,
        }) => {
            let cfg = resolve_config(capacity, overflow_policy)?;
            let stdin = io::stdin();
            let mut driver = MenuDriver::new(
                stdin.lock(),
                io::stdout(),
                RandomIdGenerator::from_entropy(),
                TreatmentController::new(&cfg),
            )
            .clear_screen(!no_clear);
            driver.run()?;
        }
        Some(Commands::Demo {
            capacity,
            overflow_policy,
        }) => {
            let cfg = resolve_config(capacity, overflow_policy)?;
            println!(
                "Demo: capacity {}, overflow policy {}",
                cfg.holding_capacity(),
                cfg.overflow_policy()
            );
            let mut driver = MenuDriver::new(
                Cursor::new(demo_script()),
                io::stdout(),
                SequentialIdGenerator::default(),
                TreatmentController::new(&cfg),
            )
            .clear_screen(false);
            driver.run()?;
            println!(
                "\n\nDemo finished: doctor is {}.",
                driver.controller().state().as_str()
            );
        }
        None => {
            println!("Use 'er --help' for commands");
        }
    }

    Ok(())
}
