//! Response structures for alpha.tl API endpoints.
//!
//! These mirror the JSON documents returned by `/api?match={id}` and
//! `/api?tournament={id}`. Every field the API may omit is optional here; the
//! checks that turn a response into a usable record live in
//! [`crate::alphatl::structs`].

use serde::Deserialize;
use std::fmt;

/// Envelope returned by every endpoint.
///
/// The API answers `{"error": "..."}` in place of the expected document when
/// it cannot serve the query, so the error shape is tried first.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    /// The API reported an error for this query.
    Error {
        /// Error text as sent by the API.
        error: String,
    },
    /// The expected document.
    Data(T),
}

/// Identifier sent either as a JSON number or a JSON string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IdOrText {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for IdOrText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdOrText::Number(n) => match n.as_f64() {
                // Integral floats print as integers, `12345.0` is match 12345
                Some(value) if n.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
                    write!(f, "{}", value as i64)
                }
                _ => write!(f, "{}", n),
            },
            IdOrText::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Scheduled start of a match.
///
/// The API has sent unix seconds as well as textual dates.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TimestampResponse {
    Seconds(i64),
    FractionalSeconds(f64),
    Text(String),
}

/// Match document from `/api?match={id}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    #[serde(alias = "matchId")]
    pub id: Option<IdOrText>,
    pub team1: Option<TeamResponse>,
    pub team2: Option<TeamResponse>,
    #[serde(alias = "scheduledTime")]
    pub datetime: Option<TimestampResponse>,
    #[serde(default)]
    pub maps: Vec<String>,
    #[serde(default)]
    pub lineup1: Vec<PlayerResponse>,
    #[serde(default)]
    pub lineup2: Vec<PlayerResponse>,
    /// Winning side of each decided game, `null` while the match has no results.
    #[serde(alias = "gameOutcomes")]
    pub games: Option<Vec<Option<u8>>>,
    pub score: Option<IdOrText>,
}

impl fmt::Display for MatchResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={:?}, maps={:?}, lineups={}/{}, games={:?}, score={:?}",
            self.id,
            self.maps,
            self.lineup1.len(),
            self.lineup2.len(),
            self.games,
            self.score
        )
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TeamResponse {
    pub name: String,
}

/// A player slot of a lineup.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub nickname: String,
    #[serde(alias = "faction")]
    pub race: String,
    #[serde(alias = "ladderProfile")]
    pub bnetdata: Option<BnetDataResponse>,
}

/// Battle.net ladder data attached to a player.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BnetDataResponse {
    #[serde(alias = "primaryFaction")]
    pub primary_race: String,
    #[serde(default)]
    pub solo_ladders: Vec<LadderResponse>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LadderResponse {
    #[serde(alias = "faction")]
    pub race: String,
    #[serde(alias = "rating")]
    pub mmr: i64,
}

/// Tournament document from `/api?tournament={id}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StandingsResponse {
    pub groups: Option<Vec<Vec<TeamStandingResponse>>>,
}

impl fmt::Display for StandingsResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.groups {
            Some(groups) => write!(
                f,
                "groups={:?}",
                groups.iter().map(Vec::len).collect::<Vec<_>>()
            ),
            None => write!(f, "groups=None"),
        }
    }
}

/// One row of a standings group.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TeamStandingResponse {
    pub games: u32,
    pub wins: u32,
    pub loses: u32,
    pub winsets: u32,
    pub losesets: u32,
    pub clan: ClanResponse,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ClanResponse {
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_document() {
        let response: ApiResponse<MatchResponse> =
            serde_json::from_str(r#"{"error": "Match not found"}"#).unwrap();

        assert_eq!(
            response,
            ApiResponse::Error {
                error: "Match not found".to_owned()
            }
        );
    }

    #[test]
    fn test_completed_match_document() {
        let json = r#"{
            "id": 12345,
            "team1": {"name": "Alpha"},
            "team2": {"name": "Beta"},
            "score": "1 - 1",
            "maps": ["Oxide", "Jagannatha"],
            "games": [0, 1],
            "lineup1": [
                {"nickname": "Zest", "race": "P", "bnetdata": {"primaryRace": "P", "soloLadders": [{"race": "P", "mmr": 5200}]}},
                {"nickname": "Trap", "race": "P", "bnetdata": null}
            ],
            "lineup2": [
                {"nickname": "Maru", "race": "T"},
                {"nickname": "Dark", "race": "Z"}
            ]
        }"#;

        let response: ApiResponse<MatchResponse> = serde_json::from_str(json).unwrap();
        let ApiResponse::Data(game) = response else {
            panic!("expected a match document");
        };

        assert_eq!(game.id.unwrap().to_string(), "12345");
        assert_eq!(game.team1.unwrap().name, "Alpha");
        assert_eq!(game.games, Some(vec![Some(0), Some(1)]));
        assert_eq!(game.lineup1.len(), 2);
        assert_eq!(
            game.lineup1[0].bnetdata.as_ref().unwrap().solo_ladders[0].mmr,
            5200
        );
        assert!(game.lineup1[1].bnetdata.is_none());
        assert!(game.lineup2[0].bnetdata.is_none());
    }

    #[test]
    fn test_upcoming_match_document_with_camel_case_names() {
        let json = r#"{
            "matchId": "777",
            "team1": {"name": "Alpha"},
            "team2": {"name": "Beta"},
            "scheduledTime": 1760470200,
            "maps": ["Oxide"]
        }"#;

        let game: MatchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(game.id, Some(IdOrText::Text("777".to_owned())));
        assert_eq!(game.datetime, Some(TimestampResponse::Seconds(1760470200)));
        assert!(game.lineup1.is_empty());
        assert!(game.games.is_none());
        assert!(game.score.is_none());
    }

    #[test]
    fn test_standings_document() {
        let json = r#"{"groups": [[
            {"games": 3, "wins": 2, "loses": 1, "winsets": 7, "losesets": 4, "clan": {"tag": "ABC"}}
        ], []]}"#;

        let standings: StandingsResponse = serde_json::from_str(json).unwrap();
        let groups = standings.groups.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].clan.tag, "ABC");
        assert_eq!(groups[0][0].winsets, 7);
        assert!(groups[1].is_empty());
    }

    #[test]
    fn test_id_display() {
        let id: IdOrText = serde_json::from_str("12345.0").unwrap();
        assert_eq!(id.to_string(), "12345");

        let id: IdOrText = serde_json::from_str("12345.5").unwrap();
        assert_eq!(id.to_string(), "12345.5");

        let id: IdOrText = serde_json::from_str("12345").unwrap();
        assert_eq!(id.to_string(), "12345");

        let id: IdOrText = serde_json::from_str(r#""12345""#).unwrap();
        assert_eq!(id.to_string(), "12345");
    }

    #[test]
    fn test_match_response_display() {
        let game = MatchResponse {
            id: Some(IdOrText::Text("1".to_owned())),
            maps: vec!["Oxide".to_owned()],
            ..Default::default()
        };

        let display = format!("{}", game);
        assert!(display.contains("maps=[\"Oxide\"]"));
        assert!(display.contains("lineups=0/0"));
    }
}
