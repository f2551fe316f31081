//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup and exit codes
//! - Interactive configuration

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cmd = match cli::Cli::try_parse() {
        Ok(cmd) => cmd,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            cli::init_logging(false);
            log::error!("{err}");
            log::error!("Please check your arguments");
            return cli::Exit::Usage.into();
        }
    };

    cli::init_logging(cmd.debug);
    cmd.run().await.into()
}
