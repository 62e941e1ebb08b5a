use std::io::Read;

use anyhow::Context;
use clap::Parser;

use http_resource::cli::{Cli, multicall_args};
use http_resource::commands;
use http_resource::config::{DEBUG_ENV_VAR, LogConfig, Request};
use http_resource::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(multicall_args(std::env::args_os()));

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;
    let request = Request::from_json(&input)?;

    logging::init(&LogConfig::new(
        std::env::var(DEBUG_ENV_VAR).ok(),
        &request.source,
    ));

    let output = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(commands::run(&cli.command, request))
        .with_context(|| format!("{} failed", cli.command.name()))?;

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
