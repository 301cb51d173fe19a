// src/bin/cli.rs
use clap::Parser;
use lands_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(cli::Args::parse())?;
    Ok(())
}
