//! Demo executable for `queryrepo_core`.
//!
//! # Responsibility
//! - Load a statement tree (embedded by default) into a repository.
//! - Prepare and run the `demo` statements against an in-memory database.

mod demo;
mod schema;

use clap::Parser;
use log::error;
use queryrepo_core::{default_log_level, init_logging, LogConfig};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "queryrepo", version, about = "Load named SQL statements and run the demo collection")]
struct Args {
    /// Statement root on disk; the embedded demo tree is used when omitted.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Name inserted by the demo insert statement.
    #[arg(long, default_value = "item2")]
    item: String,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logs go to stderr otherwise.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut log_config = LogConfig::new(args.log_level.as_str());
    if let Some(dir) = &args.log_dir {
        log_config = log_config.with_log_dir(dir);
    }
    if let Err(err) = init_logging(&log_config) {
        eprintln!("queryrepo: {err}");
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("queryrepo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let conn = schema::open_demo_db()?;
    let repo = demo::load_repository(args.root.as_deref())?;
    let stdout = std::io::stdout();
    demo::run(&repo, &conn, &args.item, &mut stdout.lock())
}
