//! Bot command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline of the bot,
//! from a Matrix message body to the plain text reply.
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + parse_command()
//! └─────────────┘
//!      │
//!      ├── parse() ─────────────► command::Command
//!      │
//!      └── parse_command() ─────► Action Handlers
//!                                  - handle_match ──► resolver ──► Requester
//!                                  - handle_standings ──────────► Requester
//!                                        │
//!                                        ▼
//!                                  text_response (reply text)
//! ```
//!
//! # Command Structure
//!
//! Commands start with the configured prefix, `!` by default. The verb is
//! case-insensitive.
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `match` | `<number>` | Report of the match with this number |
//! | `match` | `vs <team_code>` | Report of the match mapped to a team code |
//! | `standings` | None | Standings of the configured tournament |
//!
//! Any other verb is answered with `Invalid command entered.`.
//!
//! # Error Handling
//!
//! Every error ends up as a reply: bad arguments, unknown team codes, API
//! error documents, network failures and unexpected documents each have
//! their own message. Messages without the prefix get no reply at all.
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator for parsing and executing commands
//! - [`command`] - Message splitting and command definitions
//! - [`resolver`] - Match identifier resolution
//! - [`team_codes`] - Team code aliases
//! - [`actions`] - Individual command handler implementations
//! - [`text_response`] - Report and message formatting

mod actions;
mod command;
mod commander;
mod resolver;
mod team_codes;
mod text_response;

pub use crate::commands::commander::Commander;
pub use crate::commands::team_codes::TeamCodeDirectory;
