//! HTTP client for the alpha.tl API.
//!
//! This module provides the [`AlphaRequester`] struct, the production
//! implementation of [`Requester`].

use std::time::Duration;

use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::alphatl::FetchError;
use crate::alphatl::response_structs::{ApiResponse, MatchResponse, StandingsResponse};

/// HTTP client for requesting data from the alpha.tl API.
///
/// # Examples
///
/// ```no_run
/// let requester = AlphaRequester::new("https://alpha.tl", 10)?;
/// let standings = requester.get_standings(50).await?;
/// println!("Standings: {:?}", standings);
/// ```
pub struct AlphaRequester {
    /// alpha.tl base url, without trailing slash
    url: String,
    /// HTTP client, carrying the request timeout
    client: Client,
}

/// Trait for making requests to the alpha.tl API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches the match with the given identifier.
    async fn get_match(&self, match_id: &str) -> Result<ApiResponse<MatchResponse>, FetchError>;
    /// Fetches the standings of a tournament.
    async fn get_standings(
        &self,
        tournament_id: u64,
    ) -> Result<ApiResponse<StandingsResponse>, FetchError>;
}

impl AlphaRequester {
    /// Create a new [AlphaRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the alpha.tl website.
    /// * `timeout` - Request timeout in seconds.
    pub fn new(url: &str, timeout: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(AlphaRequester {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Sends `GET /api?{key}={value}` and decodes the body.
    ///
    /// The status code is not checked: the API sends its `error` documents
    /// with non success statuses too.
    async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        value: &str,
    ) -> Result<ApiResponse<T>, FetchError> {
        let url = format!("{}/api", &self.url);
        debug!("request {}?{}={}", &url, key, value);

        let body = self
            .client
            .get(&url)
            .query(&[(key, value)])
            .send()
            .await
            .map_err(map_reqwest_error)?
            .text()
            .await
            .map_err(map_reqwest_error)?;

        debug!("response from {}?{}={} -> {}", &url, key, value, &body);

        let json: serde_json::Value = serde_json::from_str(&body).map_err(FetchError::InvalidBody)?;
        serde_json::from_value(json).map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error)
    }
}

impl Requester for AlphaRequester {
    /// Request `/api?match={matchId}`.
    ///
    /// ```json
    /// {
    ///   "id": 12345,
    ///   "team1": { "name": "Alpha" },
    ///   "team2": { "name": "Beta" },
    ///   "score": "2 - 0",
    ///   "maps": ["Oxide", "Jagannatha"],
    ///   "games": [0, 0],
    ///   "lineup1": [{ "nickname": "Zest", "race": "P", "bnetdata": null }],
    ///   "lineup2": [{ "nickname": "Maru", "race": "T", "bnetdata": null }]
    /// }
    /// ```
    async fn get_match(&self, match_id: &str) -> Result<ApiResponse<MatchResponse>, FetchError> {
        info!("request match {}", match_id);
        self.get("match", match_id).await
    }

    /// Request `/api?tournament={tournamentId}`.
    ///
    /// ```json
    /// {
    ///   "groups": [
    ///     [{ "games": 3, "wins": 2, "loses": 1, "winsets": 5, "losesets": 3, "clan": { "tag": "ABC" } }]
    ///   ]
    /// }
    /// ```
    async fn get_standings(
        &self,
        tournament_id: u64,
    ) -> Result<ApiResponse<StandingsResponse>, FetchError> {
        info!("request standings of tournament {}", tournament_id);
        self.get("tournament", &tournament_id.to_string()).await
    }
}
