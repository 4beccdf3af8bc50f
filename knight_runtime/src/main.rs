//! knight-tour — command-line harness.
//!
//! Builds a configuration from an optional JSON file plus flags, runs one
//! solve session and prints the result.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use knight_relax::board::PositionEncoding;
use knight_relax::domain::RelaxConfig;
use knight_relax::KnightError;
use knight_runtime::config::load_config;
use knight_runtime::session::SolveSession;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    /// 10*x + y (ambiguous above 10x10)
    Legacy,
    /// x,y
    Pair,
}

impl From<EncodingArg> for PositionEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Legacy => PositionEncoding::Legacy,
            EncodingArg::Pair => PositionEncoding::Pair,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "knight-tour", about = "Search for a knight's tour with a relaxation network")]
struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length (6..=25)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Seed for every random draw
    #[arg(long)]
    seed: Option<u64>,

    /// Epochs per relaxation before giving up on convergence
    #[arg(long)]
    epoch_cap: Option<u64>,

    /// Relax/validate attempts before giving up
    #[arg(long, conflicts_with = "unbounded")]
    max_attempts: Option<u64>,

    /// Restart until a tour is found, however long it takes
    #[arg(long)]
    unbounded: bool,

    #[arg(long, value_enum)]
    encoding: Option<EncodingArg>,

    /// Print the per-attempt records as JSON after the solution
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(RelaxConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RelaxConfig::default(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(cap) = self.epoch_cap {
            config.epoch_cap = cap;
        }
        if self.unbounded {
            config.max_attempts = None;
        } else if let Some(max) = self.max_attempts {
            config.max_attempts = Some(max);
        }
        if let Some(enc) = self.encoding {
            config.encoding = enc.into();
        }
        Ok((config, self.json))
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let (config, json) = cli.into_config()?;
    let mut session = SolveSession::new(config).context("building network")?;

    let solved = match session.run() {
        Ok(solution) => {
            info!(
                attempts = solution.attempts,
                epochs = solution.outcome.epochs(),
                hash = %solution.hash,
                "tour found"
            );
            println!("{}", session.render());
            true
        }
        Err(KnightError::AttemptsExhausted { attempts }) => {
            error!(attempts, "no tour found");
            false
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(session.records())?);
    }
    Ok(solved)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
