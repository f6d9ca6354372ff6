//! Chartroom CLI entry point.
//!
//! Exit codes: `0` when the command completed, `2` when `open` ended in a
//! dialog instead of an open diagram, `1` on error.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use chartroom::ChartroomError;
use chartroom_cli::{Args, Status, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(command:? = args.command(); "Starting Chartroom");
    debug!(args:?; "Parsed arguments");

    match chartroom_cli::run(&args) {
        Ok(status) => {
            if status == Status::NoDiagramOpened {
                info!("No diagram opened");
            }
            status.into()
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}

/// Log one rendered report per import diagnostic, or one for the error.
fn report(err: &ChartroomError) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match reporter.render_report(&mut rendered, &reportable) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{err}"),
        }
    }
}
