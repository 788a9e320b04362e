use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use block_directory::codec;
use block_directory::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware, DebugState};
use block_directory::selectors;
use block_directory::{fixtures, reducer, BlockDirectoryState, StoreWithMiddleware};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// block-directory - replay block directory actions and query the result
#[derive(Parser)]
#[command(name = "block-directory")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every dispatched action (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines action log and print the final state
    Replay {
        /// Action log, or `-` for stdin
        file: PathBuf,

        /// Print one selector instead of the whole state
        #[arg(short, long, value_enum)]
        select: Option<Selector>,

        /// Search term for `requesting` and `blocks`
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Block id for `notice` and `installing`
        #[arg(short, long)]
        block: Option<String>,

        #[command(flatten)]
        log: LogArgs,
    },

    /// Replay an action log and print the state as titled sections
    Inspect {
        /// Action log, or `-` for stdin
        file: PathBuf,

        #[command(flatten)]
        log: LogArgs,
    },

    /// Print a sample install session as an action log
    Sample,
}

#[derive(clap::Args)]
struct LogArgs {
    /// Only log actions matching these globs (comma-separated)
    #[arg(long)]
    log_include: Option<String>,

    /// Never log actions matching these globs (comma-separated)
    #[arg(long)]
    log_exclude: Option<String>,

    /// Number of actions kept in the action log
    #[arg(long, default_value_t = 100)]
    log_capacity: usize,

    /// Print the action log to stderr after replaying
    #[arg(long)]
    show_log: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Selector {
    /// Installed block types
    Installed,
    /// Whether the `--filter` search is in flight
    Requesting,
    /// Results for the `--filter` search
    Blocks,
    /// Every error notice
    Notices,
    /// The error notice for `--block`
    Notice,
    /// Whether the user may install blocks
    Permission,
    /// Whether `--block` is being installed
    Installing,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli.command {
        Commands::Replay {
            file,
            select,
            filter,
            block,
            log,
        } => cmd_replay(&file, select, &filter, block.as_deref(), &log),
        Commands::Inspect { file, log } => cmd_inspect(&file, &log),
        Commands::Sample => cmd_sample(),
    }
}

fn cmd_replay(
    file: &Path,
    select: Option<Selector>,
    filter: &str,
    block: Option<&str>,
    log: &LogArgs,
) -> Result<()> {
    let state = replay(file, log)?;

    let Some(selector) = select else {
        println!("{}", codec::encode_state(&state)?);
        return Ok(());
    };

    let value = select_value(&state, selector, filter, block)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_inspect(file: &Path, log: &LogArgs) -> Result<()> {
    let state = replay(file, log)?;
    print!("{}", state.debug_text());
    Ok(())
}

fn cmd_sample() -> Result<()> {
    print!("{}", codec::encode_action_log(&fixtures::sample_session())?);
    Ok(())
}

/// Read, decode and reduce an action log
fn replay(file: &Path, args: &LogArgs) -> Result<BlockDirectoryState> {
    let input = read_input(file)?;
    let actions = codec::decode_action_log(&input)
        .with_context(|| format!("Failed to decode actions from {}", file.display()))?;

    let filter = ActionLoggerConfig::new(args.log_include.as_deref(), args.log_exclude.as_deref());
    let logger = ActionLoggerMiddleware::with_log(ActionLogConfig::new(args.log_capacity, filter));
    let mut store = StoreWithMiddleware::new(BlockDirectoryState::default(), reducer, logger);

    let total = actions.len();
    let changed = store.dispatch_all(actions);
    tracing::info!(total, changed, "replay finished");

    let (state, logger) = store.into_parts();
    if args.show_log {
        if let Some(log) = logger.log() {
            for entry in log.entries() {
                eprintln!("{}", entry.display_line());
            }
        }
    }
    Ok(state)
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read actions from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))
}

fn select_value(
    state: &BlockDirectoryState,
    selector: Selector,
    filter: &str,
    block: Option<&str>,
) -> Result<Value> {
    let value = match selector {
        Selector::Installed => serde_json::to_value(selectors::get_installed_block_types(state))?,
        Selector::Requesting => json!(selectors::is_requesting_downloadable_blocks(state, filter)),
        Selector::Blocks => serde_json::to_value(selectors::get_downloadable_blocks(state, filter))?,
        Selector::Notices => serde_json::to_value(selectors::get_error_notices(state))?,
        Selector::Notice => {
            let block = require_block(block, "notice")?;
            // Absent notices print as `false`, matching the state shape
            match selectors::get_error_notice_for_block(state, block) {
                Some(message) => json!(message),
                None => json!(false),
            }
        }
        Selector::Permission => json!(selectors::has_install_blocks_permission(state)),
        Selector::Installing => {
            let block = require_block(block, "installing")?;
            json!(selectors::is_installing(state, block))
        }
    };
    Ok(value)
}

fn require_block<'a>(block: Option<&'a str>, selector: &str) -> Result<&'a str> {
    match block {
        Some(block) => Ok(block),
        None => bail!("--select {selector} needs --block <ID>"),
    }
}
