//! Command action handlers.
//!
//! One handler per command. Each handler fetches what it needs through a
//! [`Requester`](crate::alphatl::Requester) and always returns the text to
//! reply, errors included.
//!
//! # Available Handlers
//!
//! - [`handle_match`] - Report of a single match
//! - [`handle_standings`] - Standings of the configured tournament

mod match_report;
mod standings;

use log::error;

pub use crate::commands::actions::{match_report::handle_match, standings::handle_standings};
use crate::{
    alphatl::FetchError,
    commands::text_response::{format_network_error, format_unexpected_response},
};

/// Picks the reply for a failed fetch.
fn format_fetch_error(error: &FetchError) -> String {
    error!("alpha.tl request failed: {}", error);

    match error {
        FetchError::Timeout | FetchError::Network(_) | FetchError::InvalidBody(_) => {
            format_network_error()
        }
        FetchError::MalformedResponse(_) => format_unexpected_response(),
    }
}
