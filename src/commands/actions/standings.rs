//! Standings command handler.
//!
//! The tournament is fixed by configuration, command arguments are ignored.

use log::{debug, warn};

use crate::{
    alphatl::{ApiResponse, Requester, StandingsRecord},
    commands::{actions::format_fetch_error, text_response::format_standings},
};

/// Returns the standings of tournament `tournament_id`.
///
/// An error document from the API is replied verbatim.
pub async fn handle_standings<R: Requester>(requester: &R, tournament_id: u64) -> String {
    debug!("handling standings command");

    let response = match requester.get_standings(tournament_id).await {
        Ok(ApiResponse::Data(response)) => response,
        Ok(ApiResponse::Error { error }) => {
            warn!("standings of tournament {} unavailable: {}", tournament_id, error);
            return error;
        }
        Err(e) => return format_fetch_error(&e),
    };

    debug!("standings response {}", response);

    match StandingsRecord::try_from(response) {
        Ok(record) => format_standings(&record),
        Err(e) => format_fetch_error(&e),
    }
}
