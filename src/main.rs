//! alphabot - A Matrix bot reporting alpha.tl team league matches.
//!
//! The bot answers two commands in the rooms it is invited to, using the
//! public alpha.tl JSON API.
//!
//! # Commands
//!
//! - `!match <number>` - Teams, score, maps and players of a match
//! - `!match vs <team_code>` - Same, for the match configured for a team code
//! - `!standings` - Group standings of the configured tournament
//!
//! # Configuration
//!
//! ```yaml
//! alphatl:
//!   url: "https://alpha.tl"
//!   tournament_id: 50
//!
//! matrix:
//!   user_id: "@alphabot:matrix.org"
//!   password: "your-password"
//!   store_passphrase: "your-store-passphrase"
//! ```
//!
//! Any value can be overridden with an `ALPHABOT_` environment variable, see
//! [`config`].
//!
//! # Usage
//!
//! ```bash
//! alphabot --config config.yaml --data ./data
//! ```
//!
//! # Architecture
//!
//! - [`alphatl`] - alpha.tl API client and data model
//! - [`bot`] - Wiring of the Matrix client and the commands
//! - [`commands`] - Command parsing, execution and reply formatting
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`matrix`] - Matrix login, session persistence and sync
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod alphatl;
mod bot;
mod commands;
mod config;
mod matrix;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the YAML configuration file
    #[arg(short, long)]
    config: String,

    /// Directory of the Matrix session and store
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting alphabot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, &args.data).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };
    bot.start().await;
}
