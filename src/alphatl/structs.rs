//! Validated records built from alpha.tl responses.
//!
//! A [`MatchRecord`] or [`StandingsRecord`] only exists if the response it
//! comes from carries every required field and respects the lineup/map
//! alignment, so renderers can index freely.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::alphatl::FetchError;
use crate::alphatl::response_structs::{
    BnetDataResponse, MatchResponse, PlayerResponse, StandingsResponse, TeamStandingResponse,
    TimestampResponse,
};

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Lineups are not locked in yet.
    Upcoming,
    /// Lineups are known but no game result exists.
    InProgress,
    /// At least the result list exists, possibly partially filled.
    Completed,
}

/// One head-to-head contest.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: String,
    pub team1: String,
    pub team2: String,
    /// Only set before the match starts
    pub scheduled_time: Option<DateTime<Utc>>,
    pub maps: Vec<String>,
    pub lineup1: Vec<PlayerEntry>,
    pub lineup2: Vec<PlayerEntry>,
    /// Winning side (0 or 1) of each decided game
    pub game_outcomes: Option<Vec<Option<u8>>>,
    pub score: Option<String>,
}

impl MatchRecord {
    /// Classifies the match.
    ///
    /// The checks run in order: an empty first lineup always means
    /// [`MatchState::Upcoming`], whatever the other fields hold.
    pub fn state(&self) -> MatchState {
        if self.lineup1.is_empty() {
            MatchState::Upcoming
        } else if self.game_outcomes.is_none() {
            MatchState::InProgress
        } else {
            MatchState::Completed
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, teams={} vs {}, state={:?}",
            self.id,
            self.team1,
            self.team2,
            self.state()
        )
    }
}

impl TryFrom<MatchResponse> for MatchRecord {
    type Error = FetchError;

    fn try_from(response: MatchResponse) -> Result<Self, Self::Error> {
        let id = response
            .id
            .ok_or_else(|| FetchError::MalformedResponse("missing match id".to_owned()))?
            .to_string();
        let team1 = response
            .team1
            .ok_or_else(|| FetchError::MalformedResponse("missing team1".to_owned()))?
            .name;
        let team2 = response
            .team2
            .ok_or_else(|| FetchError::MalformedResponse("missing team2".to_owned()))?
            .name;

        let maps_count = response.maps.len();
        if !response.lineup1.is_empty()
            && (response.lineup1.len() != maps_count || response.lineup2.len() != maps_count)
        {
            return Err(FetchError::MalformedResponse(format!(
                "lineups of {} and {} players for {} maps",
                response.lineup1.len(),
                response.lineup2.len(),
                maps_count
            )));
        }
        if let Some(games) = &response.games
            && games.len() > maps_count
        {
            return Err(FetchError::MalformedResponse(format!(
                "{} game results for {} maps",
                games.len(),
                maps_count
            )));
        }

        let scheduled_time = match response.datetime {
            Some(datetime) => Some(parse_timestamp(&datetime)?),
            None => None,
        };

        Ok(MatchRecord {
            id,
            team1,
            team2,
            scheduled_time,
            maps: response.maps,
            lineup1: response.lineup1.into_iter().map(PlayerEntry::from).collect(),
            lineup2: response.lineup2.into_iter().map(PlayerEntry::from).collect(),
            game_outcomes: response.games,
            score: response.score.map(|score| score.to_string()),
        })
    }
}

/// Reads unix seconds (integer, fractional or digits in a string), RFC 3339,
/// or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` taken as UTC.
fn parse_timestamp(timestamp: &TimestampResponse) -> Result<DateTime<Utc>, FetchError> {
    let parsed = match timestamp {
        TimestampResponse::Seconds(seconds) => DateTime::from_timestamp(*seconds, 0),
        TimestampResponse::FractionalSeconds(seconds) if seconds.is_finite() => {
            let millis = (seconds * 1000.0).round() as i64;
            DateTime::from_timestamp_millis(millis)
        }
        TimestampResponse::FractionalSeconds(_) => None,
        TimestampResponse::Text(text) => parse_text_timestamp(text.trim()),
    };

    parsed.ok_or_else(|| FetchError::MalformedResponse(format!("invalid datetime {:?}", timestamp)))
}

fn parse_text_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0));
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// A player occupying one game slot of a lineup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEntry {
    pub nickname: String,
    /// Race played in that game
    pub faction: String,
    pub ladder_profile: Option<LadderProfile>,
}

impl From<PlayerResponse> for PlayerEntry {
    fn from(player: PlayerResponse) -> Self {
        PlayerEntry {
            nickname: player.nickname,
            faction: player.race,
            ladder_profile: player.bnetdata.map(LadderProfile::from),
        }
    }
}

/// Ladder standings of a player.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderProfile {
    pub primary_faction: String,
    /// One entry per race, in no particular order
    pub ladders: Vec<LadderStanding>,
}

impl LadderProfile {
    /// Rating of the ladder played with the primary race.
    pub fn primary_rating(&self) -> Option<i64> {
        self.ladders
            .iter()
            .find(|ladder| ladder.faction == self.primary_faction)
            .map(|ladder| ladder.rating)
    }
}

impl From<BnetDataResponse> for LadderProfile {
    fn from(bnetdata: BnetDataResponse) -> Self {
        LadderProfile {
            primary_faction: bnetdata.primary_race,
            ladders: bnetdata
                .solo_ladders
                .into_iter()
                .map(|ladder| LadderStanding {
                    faction: ladder.race,
                    rating: ladder.mmr,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LadderStanding {
    pub faction: String,
    pub rating: i64,
}

/// Tournament table, one group per entry, groups in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRecord {
    pub groups: Vec<Vec<TeamStanding>>,
}

impl TryFrom<StandingsResponse> for StandingsRecord {
    type Error = FetchError;

    fn try_from(response: StandingsResponse) -> Result<Self, Self::Error> {
        let groups = response
            .groups
            .ok_or_else(|| FetchError::MalformedResponse("missing groups".to_owned()))?;

        Ok(StandingsRecord {
            groups: groups
                .into_iter()
                .map(|group| group.into_iter().map(TeamStanding::from).collect())
                .collect(),
        })
    }
}

/// A team row, already ranked by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub set_wins: u32,
    pub set_losses: u32,
    pub team_tag: String,
}

impl From<TeamStandingResponse> for TeamStanding {
    fn from(team: TeamStandingResponse) -> Self {
        TeamStanding {
            games_played: team.games,
            wins: team.wins,
            losses: team.loses,
            set_wins: team.winsets,
            set_losses: team.losesets,
            team_tag: team.clan.tag,
        }
    }
}
