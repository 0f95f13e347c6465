use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use self::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    Cli::parse().run()
}
