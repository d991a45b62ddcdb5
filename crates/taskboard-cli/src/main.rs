use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskboard_cli::{load_scenario, load_snapshot, Config, Overrides};
use taskboard_core::Dashboard;
use taskboard_term::TerminalSink;

#[derive(Parser)]
#[command(name = "taskboard", version, about = "Live terminal dashboard for task runs")]
struct Cli {
    /// Config file (defaults to ./taskboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show the wait list of stacked tasks
    #[arg(long, global = true)]
    verbose: bool,

    /// Finished rows to keep besides failures (0 keeps failures only)
    #[arg(long, global = true)]
    max_finished: Option<usize>,

    #[arg(long, global = true)]
    no_color: bool,

    /// Clear and reprint the screen instead of redrawing in place
    #[arg(long, global = true)]
    redraw: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a scripted scenario through the live dashboard
    Play {
        scenario: PathBuf,
        /// Override the scenario's tick length
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Don't sleep between ticks
        #[arg(long)]
        fast: bool,
    },

    /// Render a captured snapshot file once
    Show { snapshot: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("current dir")?;
    let mut config = Config::resolve(cli.config.as_deref(), &cwd)?;
    config.apply(&Overrides {
        verbose: cli.verbose,
        max_finished_rows: cli.max_finished,
        no_color: cli.no_color,
        redraw: cli.redraw,
    });

    let sink = TerminalSink::stdout(&config.terminal);
    let mut dashboard = Dashboard::new(config.dashboard, sink);

    match cli.cmd {
        Command::Play { scenario, tick_ms, fast } => {
            let mut scenario = load_scenario(&scenario)?;
            if let Some(tick_ms) = tick_ms {
                scenario.tick_ms = tick_ms;
                scenario.validate()?;
            }
            let pace = (!fast).then(|| Duration::from_millis(scenario.tick_ms));
            taskboard_cli::play(&mut dashboard, &scenario, pace)?;
        }
        Command::Show { snapshot } => {
            let file = load_snapshot(&snapshot)?;
            taskboard_cli::show(&mut dashboard, file)?;
        }
    }
    Ok(())
}
