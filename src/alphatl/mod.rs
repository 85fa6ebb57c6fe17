//! alpha.tl statistics API integration.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the read-only alpha.tl API
//! - `response_structs` - Raw JSON documents returned by the API
//! - `structs` - Validated match and standings records
//!
//! # Examples
//!
//! ```no_run
//! use alphabot::alphatl::{AlphaRequester, Requester};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let requester = AlphaRequester::new("https://alpha.tl", 10)?;
//! let response = requester.get_match("12345").await?;
//! # Ok(())
//! # }
//! ```

mod requester;
mod response_structs;
mod structs;

#[cfg(test)]
pub use crate::alphatl::requester::MockRequester;
pub use crate::alphatl::requester::{AlphaRequester, Requester};
pub use crate::alphatl::response_structs::{ApiResponse, MatchResponse, StandingsResponse};
#[cfg(test)]
pub use crate::alphatl::response_structs::{
    BnetDataResponse, ClanResponse, IdOrText, LadderResponse, PlayerResponse, TeamResponse,
    TeamStandingResponse,
};
pub use crate::alphatl::structs::{
    MatchRecord, MatchState, PlayerEntry, StandingsRecord, TeamStanding,
};
#[cfg(test)]
pub use crate::alphatl::structs::{LadderProfile, LadderStanding};

/// Errors raised while fetching a document from the API.
///
/// An `{"error": ...}` document is not an error at this level; it is returned
/// as [`ApiResponse::Error`] so callers can word it per query.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The body is not JSON.
    #[error("response body is not json: {0}")]
    InvalidBody(serde_json::Error),
    /// The body is JSON but not the expected document.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}
