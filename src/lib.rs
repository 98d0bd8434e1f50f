pub mod border;
pub mod classifier;
pub mod config;
pub mod coords;
pub mod error;
pub mod highlight;
pub mod model;
pub mod output;
pub mod prompt;
pub mod remove;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use classifier::{Classifier, ClassifierOptions};
use config::EffectiveConfig;
use highlight::ColorPolicy;
use model::OutputFormat;
use session::{Phase, PruneSession};
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
#[command(
    name = "border-prune",
    version,
    about = "Find and delete world region files lying outside the world border",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorPolicy>,

    /// Directory to scan, relative to the world (repeatable; default region, entities, poi).
    #[arg(long, global = true)]
    pub dir: Vec<PathBuf>,

    /// World border center, X block coordinate.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub center_x: Option<i64>,

    /// World border center, Z block coordinate.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub center_z: Option<i64>,

    /// World border side length in blocks.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub diameter: Option<i64>,

    /// Reject non-positive diameters instead of pruning everything.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// World directory named by the subcommand, `.` when there is none.
    pub fn world(&self) -> &Path {
        match &self.command {
            Some(Command::Scan { world }) | Some(Command::Remove { world, .. }) => world.as_path(),
            _ => Path::new("."),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List files outside the world border.
    Scan {
        #[arg(default_value = ".")]
        world: PathBuf,
    },
    /// List files outside the world border, then delete them after confirmation.
    Remove {
        #[arg(default_value = ".")]
        world: PathBuf,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Show command help.
    Help {
        command: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(Command::Help { command }) = &cli.command {
        if let Some(name) = command {
            let mut cmd = Cli::command();
            if let Some(sc) = cmd.find_subcommand_mut(name) {
                sc.print_help().context("failed to print help")?;
                println!();
                return Ok(());
            }
        }
        Cli::command().print_help().context("failed to print help")?;
        println!();
        return Ok(());
    }

    let cfg = EffectiveConfig::load(&cli)?;
    let command = cli.command.unwrap_or(Command::Scan {
        world: PathBuf::from("."),
    });
    let classifier = Classifier::new(ClassifierOptions::from_config(&cfg));

    match command {
        Command::Scan { world } => run_scan(classifier, world, &cfg),
        Command::Remove { world, yes } => run_remove(classifier, world, &cfg, yes),
        Command::Help { .. } => unreachable!(),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "border_prune=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .try_init();
}

fn run_scan(classifier: Classifier, world: PathBuf, cfg: &EffectiveConfig) -> Result<()> {
    let mut session = PruneSession::new(classifier, world);
    session.scan()?;
    output::print_scan(session.scan_result(), cfg)
}

fn run_remove(classifier: Classifier, world: PathBuf, cfg: &EffectiveConfig, yes: bool) -> Result<()> {
    let mut session = PruneSession::new(classifier, world);
    session.scan()?;
    output::print_scan(session.scan_result(), cfg)?;
    if session.phase() == Phase::Done {
        return Ok(());
    }

    let confirmed = yes || {
        let stdin = std::io::stdin();
        prompt::confirm(&mut stdin.lock(), &mut std::io::stderr(), "Confirm deletion?")?
    };
    if session.resolve(confirmed)? == Phase::Cancelled {
        output::print_cancelled(cfg);
        return Ok(());
    }

    let summary = session.delete()?;
    output::print_remove_summary(summary, cfg)?;
    if !summary.is_clean() {
        anyhow::bail!("{} file(s) could not be deleted", summary.failed.len());
    }
    Ok(())
}
