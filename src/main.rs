//! Command-line entry point.

mod cli;

use clap::Parser;
use osudb::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::debug!("CLI: {:?}", config);

    match cli::run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("CLI: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
