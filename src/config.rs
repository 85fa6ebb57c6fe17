//! Configuration file structures for the bot.
//!
//! The configuration is a YAML file, every value of which can be overridden
//! by an `ALPHABOT_` environment variable, nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # alpha.tl API
//! alphatl:
//!   # Base URL of the alpha.tl website
//!   url: "https://alpha.tl"
//!   # Tournament reported by the standings command
//!   tournament_id: 50
//!   # Request timeout in seconds, optional
//!   timeout: 10
//!
//! # Matrix account
//! matrix:
//!   user_id: "@alphabot:matrix.org"
//!   password: "secret-password"
//!   # Passphrase of the local sqlite store
//!   store_passphrase: "store-passphrase"
//!
//! # Optional
//! bot:
//!   prefix: "!"
//!
//! # Team code aliases of `!match vs <code>`, optional
//! team_codes:
//!   abc: 12345
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export ALPHABOT_MATRIX__PASSWORD="secret-from-env"
//! export ALPHABOT_ALPHATL__TOURNAMENT_ID=51
//! ```

use std::{collections::HashMap, path::Path};

use anyhow::bail;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the file.
const ENV_PREFIX: &str = "ALPHABOT_";

/// Root configuration structure of the bot.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// alpha.tl API configuration
    pub alphatl: AlphaTl,
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Command settings
    #[serde(default)]
    pub bot: BotSettings,
    /// Team code aliases, mapped to match numbers
    #[serde(default)]
    pub team_codes: HashMap<String, u64>,
}

impl Config {
    /// Loads the configuration from a YAML file and `ALPHABOT_` environment variables.
    ///
    /// Environment variables win over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, is not valid YAML, or a
    /// required value is missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        if !Path::new(path).exists() {
            bail!("config file {} does not exist", path);
        }

        let config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

/// alpha.tl API configuration.
#[derive(Deserialize, Debug)]
pub struct AlphaTl {
    /// Base URL of the alpha.tl website, e.g. `https://alpha.tl`.
    pub url: String,

    /// Tournament reported by the `standings` command.
    pub tournament_id: u64,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    10
}

/// Matrix account configuration.
#[derive(Deserialize, Debug)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, `@username:homeserver.com`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Only used when no session was persisted yet.
    pub password: String,

    /// Passphrase encrypting the local sqlite store.
    pub store_passphrase: String,
}

/// Command settings.
#[derive(Deserialize, Debug)]
pub struct BotSettings {
    /// Character starting every command.
    #[serde(default = "default_prefix")]
    pub prefix: char,
}

fn default_prefix() -> char {
    '!'
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            prefix: default_prefix(),
        }
    }
}
