// Terminal frontend for the shogi client. Talks to the same HTTP service as the browser page.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod command;
pub mod network;

mod client_main;
mod shogi_prelude;

use std::fs;

use anyhow::Context;
use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    let matches = Command::new("Shogi")
        .version(clap::crate_version!())
        .about("Shogi console client")
        .arg(arg!(<server_url> "Game service URL, e.g. http://localhost:5000"))
        .arg(
            arg!(--"log-level" <level> "Default log level, overridden by RUST_LOG")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
        .arg(arg!(--"log-file" <path> "Write logs to this file instead of stderr"))
        .get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map_or(Ok(log::LevelFilter::Info), |level| level.parse())
        .context("Parsing log level")?;
    // The board occupies the terminal, so logs go to stderr or to a file.
    let log_target = match matches.get_one::<String>("log-file") {
        Some(path) => {
            let file = fs::File::create(path).with_context(|| format!("Creating {}", path))?;
            env_logger::Target::Pipe(Box::new(file))
        }
        None => env_logger::Target::Stderr,
    };
    env_logger::Builder::new()
        .target(log_target)
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let server_url = matches
        .get_one::<String>("server_url")
        .context("Missing server URL")?
        .clone();
    client_main::run(client_main::ClientConfig { server_url })
}
