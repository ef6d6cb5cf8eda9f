#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use configme::{cli, config::Config, error::ConfigmeError, setup_logging};
use std::{path::PathBuf, process::ExitCode};

fn main() -> ExitCode {
    // Parse command line arguments; help and usage errors never reach logging
    let args = match cli::parse_args(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(ConfigmeError::ScriptHelpArgument { message }) => {
            println!("{}", message.trim_end());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}", err.to_string().trim_end());
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> Result<PathBuf> {
    // Setup logging based on debug flag
    setup_logging(args.debug)?;

    // Initialize configuration
    let config = Config::from_args(args)?;

    // Execute the appropriate command
    cli::execute_command(&config, &args.command)
}
