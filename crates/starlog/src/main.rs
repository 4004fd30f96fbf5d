// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! starlog - a student experience journal served over the web.
//!
//! This is the binary entry point: it loads configuration, then
//! dispatches to the serve or check command.

use clap::{Parser, Subcommand};

mod check;
mod serve;

/// starlog - a student experience journal served over the web.
#[derive(Parser, Debug)]
#[command(name = "starlog", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the starlog web server.
    Serve {
        /// Override the configured bind host.
        #[arg(long)]
        host: Option<String>,
        /// Override the configured bind port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run startup checks against the configured store.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration problems are fatal before any command runs.
    let config = match starlog_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            starlog_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Err(e) = serve::run_serve(config, host, port).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Check { plain }) => {
            if !check::run_check(&config, plain).await {
                std::process::exit(1);
            }
        }
        None => {
            println!("starlog: use --help for available commands");
        }
    }
}
