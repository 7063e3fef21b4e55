//! # Sprout Register
//!
//! Interactive inventory and sales menu for a small shop.
//!
//! ## Module Organization
//! ```text
//! sprout/
//! ├── main.rs     ◄─── You are here (flags, logging, startup)
//! ├── session.rs  ◄─── Menu loop and commands
//! └── prompt.rs   ◄─── Line input with retry
//! ```

mod prompt;
mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sprout_store::{Register, RegisterConfig};

use crate::session::Session;

/// Keep track of stock, purchases and sales.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (default: <config dir>/sprout/register.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Warehouse register file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Keep cost and sales history in this file
    #[arg(short, long, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Opens the register, runs the menu on stdin/stdout, then flushes.
///
/// ## Startup Sequence
/// ```text
/// 1. Config: defaults → register.toml → SPROUT_* env → --file / --ledger
/// 2. Register::open loads (or creates / recovers) the files
/// 3. Menu loop until `exit` or end of input
/// 4. Register::close writes the final state
/// ```
fn run(args: Args) -> Result<()> {
    let mut config = RegisterConfig::load(args.config).context("loading configuration")?;
    if let Some(file) = args.file {
        config.storage.inventory_path = file;
    }
    if let Some(ledger) = args.ledger {
        config.storage.ledger_path = Some(ledger);
    }

    let (register, outcome) = Register::open(config).context("opening the warehouse register")?;
    info!(?outcome, "Register ready");

    let stdin = io::stdin();
    let mut session = Session::new(register, stdin.lock(), io::stdout());
    session.greet(outcome)?;
    session.run()?;

    session
        .into_register()
        .close()
        .context("saving the warehouse register")?;
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `-v` - Debug for the register crates only
/// - Default: warnings only, so the menu on stdout is not interleaved
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,sprout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
