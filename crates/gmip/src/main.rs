#![forbid(unsafe_code)]

//! `gmip` binary: parse the command line, load the deck, run the viewer.

use std::process::ExitCode;

use gmip::Error;
use gmip::cli::{self, Cli, Command};

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(message)) => {
            eprint!("{message}");
            ExitCode::from(64)
        }
        Err(err) => {
            tracing::error!(code = err.exit_code(), "{err}");
            eprintln!("gmip: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> gmip::Result<()> {
    match Cli::parse_args(std::env::args_os())?.into_command() {
        Command::Help => print!("{}", cli::help_text()),
        Command::Version => println!("{}", cli::version_text()),
        Command::Present { path, config } => {
            tracing::info!(path = %path.display(), palette = %config.palette, "starting");
            gmip::present(&path, config)?;
        }
    }
    Ok(())
}

/// Log to `$GMIP_LOG_FILE` when set, filtered by `$GMIP_LOG`.
#[cfg(feature = "tracing")]
fn init_logging() {
    use gmip_core::logging::{DEFAULT_FILTER, init_file_subscriber};

    let Some(path) = std::env::var_os("GMIP_LOG_FILE") else {
        return;
    };
    let filter = std::env::var("GMIP_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_owned());
    if let Err(err) = init_file_subscriber(std::path::Path::new(&path), &filter) {
        eprintln!("gmip: cannot log to {}: {err}", path.to_string_lossy());
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}
