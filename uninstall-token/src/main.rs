//! Reveal Falcon uninstall tokens from the command line

use clap::Parser as _;
use rootcause::Report;

use crate::cli_args::{Cli, Commands};

mod cli_args;
mod cli {
    pub mod common;
    pub mod config;
    pub mod retrieve;
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(format!("warn,falcon={level},uninstall_token={level}")),
    )
    .init();

    let config = args.config.load(args.config_file.as_deref())?;

    match args.command {
        Commands::Retrieve(retrieve) => cli::retrieve::retrieve(&config, retrieve).await?,
        Commands::Config => cli::config::show(&config),
    }
    Ok(())
}
