mod commands;
mod opts;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use rosmaster::UnrecognizedOperation;
use std::{env, ffi::OsString, io, process::ExitCode};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let raw_args: Vec<OsString> = env::args_os().collect();

    if let Some(name) = opts::unrecognized_command(&raw_args) {
        println!("{}", UnrecognizedOperation(name));
        opts::Args::command().print_help()?;
        return Ok(ExitCode::from(1));
    }

    let args = opts::Args::parse_from(raw_args);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts::log_level(args.verbose, args.quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    commands::handle(args.command)?;

    Ok(ExitCode::SUCCESS)
}
