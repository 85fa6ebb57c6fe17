//! Matrix transport of the bot.
//!
//! - `client` - [`MatrixClient`], the entry point: login, sync and replies
//! - `login` - Password login or restoration of a persisted session
//! - `session` - Persistence of the session and sync token on disk
//! - `sync` - Sync loop, auto-join and message dispatch
//!
//! # Examples
//!
//! ```no_run
//! use alphabot::matrix::{MatrixClient, UserCredentials};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = UserCredentials {
//!     user_id: "@alphabot:example.com".to_string(),
//!     password: "password".to_string(),
//!     store_passphrase: "passphrase".to_string(),
//! };
//!
//! let client = MatrixClient::new(&credentials, "./data").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod login;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase of the local sqlite store
    pub store_passphrase: String,
}

/// A text message received in a joined room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub body: String,
    pub room_id: String,
    pub sender_id: String,
    pub event_id: String,
}
