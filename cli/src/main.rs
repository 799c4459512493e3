//! fanout — plan and export payment fan-outs from the command line.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

use fanout_types::Amount;

mod commands;
mod config;
mod export;
mod input;
mod logging;

use config::ToolConfig;

#[derive(Parser)]
#[command(name = "fanout", about = "Payment fan-out planner", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Derivation-state file location.
    #[arg(long, global = true, env = "FANOUT_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Directory export files are written into.
    #[arg(long, global = true, env = "FANOUT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Preview an allocation without touching addresses.
    Plan(PlanArgs),
    /// Full pipeline: allocate, derive, batch, export, record state.
    Generate(GenerateArgs),
    /// Inspect or clear persisted derivation state.
    State(StateArgs),
}

/// How a fund total is split across recipients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Identical shares, remainder on the first recipient.
    Equal,
    /// Random shares inside caller-given bounds.
    Random,
    /// Random shares inside self-derived bounds.
    Smart,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Equal => "equal",
            Mode::Random => "random",
            Mode::Smart => "smart",
        })
    }
}

/// Allocation flags shared by `plan` and `generate`.
#[derive(clap::Args)]
pub struct AllocationArgs {
    /// Fund total to split, in coins (e.g. "1.5").
    #[arg(long)]
    pub total: Amount,

    /// Number of recipients to split across.
    #[arg(long)]
    pub count: usize,

    /// Allocation mode.
    #[arg(long, value_enum, default_value_t = Mode::Smart)]
    pub mode: Mode,

    /// Per-recipient minimum, in coins (random mode only).
    #[arg(long)]
    pub min: Option<Amount>,

    /// Per-recipient maximum, in coins (random mode only).
    #[arg(long)]
    pub max: Option<Amount>,

    /// Seed for reproducible draws; OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub allocation: AllocationArgs,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub allocation: AllocationArgs,

    /// Address book file: one pre-derived address per line.
    #[arg(long)]
    pub addresses: PathBuf,

    /// File whose contents identify the key source. Only a fingerprint
    /// of it is ever stored or printed.
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Base derivation path for display paths (default from config).
    #[arg(long)]
    pub base_path: Option<String>,

    /// First derivation index to use.
    #[arg(long, conflicts_with = "continue_last")]
    pub start_index: Option<u32>,

    /// Resume from the index after the last recorded run.
    #[arg(long)]
    pub continue_last: bool,

    /// Per-batch ceiling, in coins; batching only happens when set.
    #[arg(long)]
    pub max_per_batch: Option<Amount>,

    /// Shuffle entries before batching.
    #[arg(long)]
    pub randomize_batches: bool,

    /// Output stem; files land as STEM.csv, STEM_batch_NNN.csv,
    /// STEM_report.txt inside the output directory.
    #[arg(long, default_value = "fanout")]
    pub out: String,
}

#[derive(clap::Args)]
pub struct StateArgs {
    #[command(subcommand)]
    pub action: StateAction,
}

#[derive(clap::Subcommand)]
pub enum StateAction {
    /// Show the recorded last index for a source and base path.
    Show {
        /// File whose contents identify the key source.
        #[arg(long)]
        source_file: PathBuf,

        /// Base derivation path (default from config).
        #[arg(long)]
        base_path: Option<String>,
    },
    /// Forget the recorded state for a source and base path.
    Clear {
        /// File whose contents identify the key source.
        #[arg(long)]
        source_file: PathBuf,

        /// Base derivation path (default from config).
        #[arg(long)]
        base_path: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let base = match cli.config {
        Some(ref path) => {
            let cfg = ToolConfig::from_toml_file(path)?;
            tracing::info!("Loaded config from {}", path.display());
            cfg
        }
        None => ToolConfig::default(),
    };
    let config = ToolConfig {
        state_file: cli.state_file.unwrap_or(base.state_file),
        output_dir: cli.output_dir.unwrap_or(base.output_dir),
        base_path: base.base_path,
    };

    match cli.command {
        Command::Plan(args) => commands::plan::run(&args),
        Command::Generate(args) => commands::generate::run(&args, &config),
        Command::State(args) => commands::state::run(&args, &config),
    }
}
