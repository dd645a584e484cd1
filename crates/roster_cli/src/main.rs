//! Command-line entry point for the roster service.
//!
//! Runs one roster call per invocation and prints `status=<code>` followed by
//! the JSON body, if any. Exits non-zero when the call is rejected.

mod api;
mod cli;

use clap::Parser;
use cli::Cli;
use log::{error, info};
use roster_core::db::open_db;
use roster_core::{core_version, init_logging, RosterConfig};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    // clap prints help/version and exits on usage errors.
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let mut command = cli.command;

    let config = RosterConfig::from_env().map_err(|err| format!("invalid configuration: {err}"))?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }
    info!(
        "event=cli_start module=cli status=ok command={} core_version={}",
        command.name(),
        core_version()
    );

    command.read_missing_body(read_stdin)?;

    let conn = open_db(&config.db_path).map_err(|err| {
        error!("event=db_open module=cli status=error error={err}");
        format!("failed to open `{}`: {err}", config.db_path.display())
    })?;

    let response = api::handle(&conn, &command);
    println!("status={}", response.status);
    if let Some(body) = &response.body {
        println!("{body}");
    }

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_stdin() -> Result<String, String> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|err| format!("failed to read request body: {err}"))?;
    Ok(body)
}
