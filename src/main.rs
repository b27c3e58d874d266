#![doc = "prsync keeps local branch metadata in line with your pull requests on GitHub."]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod constants;
mod errors;
mod remote;
mod store;
mod subcommands;
mod sync;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::parse().init_tracing_subscriber()?.run().await
}
