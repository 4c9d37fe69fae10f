// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("dlshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keeps a local DLsite library catalog in sync with its folders")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the configuration file")
                .default_value("config.toml"),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();
    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let report = commands::sync_library(&config_path).await?;
    commands::print_report(&report);
    Ok(())
}
