
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{categories, render, summary};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Categories => categories::run(&cli),
        Commands::Summary(args) => summary::run(&cli, args),
    }
}

/// Warnings by default, -v for info, -vv for debug. RUST_LOG still wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> { run() }
