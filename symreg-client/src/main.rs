//! symreg: Command-line client for a symbolic-regression search server
//!
//! Imports a data file, sends it with search options to a server, starts the
//! search, then polls progress and prints the accumulated solution frontier
//! until interrupted.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use symreg_client::Connection;
use symreg_protocol::{CommandResult, DataSet, SearchOptions, SolutionFrontier, DEFAULT_PORT};
use symreg_utils::{init_logging_with_config, LogConfig, Result, SymregError};

#[derive(Parser, Debug)]
#[command(name = "symreg", about = "Run a symbolic-regression search on a remote server")]
struct Args {
    /// Server hostname or address
    #[arg(long, default_value = "127.0.0.1", env = "SYMREG_HOST")]
    host: String,

    /// Server TCP port
    #[arg(long, default_value_t = DEFAULT_PORT, env = "SYMREG_PORT")]
    port: u16,

    /// ASCII data file to search over
    data: PathBuf,

    /// Relationship to search for, e.g. "y = f(x)"
    #[arg(long, default_value = "y = f(x)")]
    relationship: String,

    /// Seconds between progress polls
    #[arg(long, default_value_t = 1)]
    interval: u64,

    /// Give up on unresponsive servers after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging_with_config(LogConfig::client()) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let data = DataSet::import_ascii_file(&args.data)
        .map_err(|e| SymregError::config(format!("{}: {}", args.data.display(), e)))?;
    println!("Imported data: {}", data.summary());

    let mut options = SearchOptions::new(&args.relationship);
    options.set_default_building_blocks();
    println!("Search options: {}", options.summary());

    let mut conn = Connection::new();
    if let Some(secs) = args.timeout {
        conn.set_io_timeout(Some(Duration::from_secs(secs)))?;
    }

    let greeting = conn.connect(&args.host, args.port)?;
    println!("Connected to {}:{}: {}", args.host, args.port, greeting);

    let info = conn.query_server_info()?;
    println!("Server: {}", info.summary());

    accepted("send data set", conn.send_data_set(&data)?)?;
    accepted("send options", conn.send_options(&options)?)?;
    accepted("start search", conn.start_search()?)?;
    println!("Search started, polling every {}s\n", args.interval);

    let mut best = SolutionFrontier::new();
    loop {
        let progress = conn.query_progress()?;
        if best.add(progress.solution.clone()) {
            println!("{}", progress.summary());
            println!("{}", best);
        }
        thread::sleep(Duration::from_secs(args.interval));
    }
}

fn accepted(step: &str, result: CommandResult) -> Result<()> {
    if result.is_success() {
        Ok(())
    } else {
        Err(SymregError::protocol(format!(
            "Server rejected {}: {}",
            step, result.message
        )))
    }
}
