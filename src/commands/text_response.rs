//! Plain text response formatters for bot commands.
//!
//! Reports are sent as plain text: the column spacing of the game lines
//! relies on it.

use chrono::{DateTime, Duration, Utc};

use crate::alphatl::{MatchRecord, MatchState, PlayerEntry, StandingsRecord, TeamStanding};

/// Base url of the alpha.tl website, used for the links of every report.
const WEBSITE_URL: &str = "https://alpha.tl";

/// Separates the match header from the game results.
const DIVIDER: &str = "\n------------------------------------------\n";

/// Atlantic Daylight Time, UTC-3.
const ADT_OFFSET_HOURS: i64 = -3;

/// Formats the report of a match, according to its [`MatchState`].
///
/// An upcoming match lists its schedule and maps when a schedule is known.
/// A completed match shows its score and one block per decided game.
pub fn format_match_report(record: &MatchRecord) -> String {
    let mut report = format!("{}   vs   {}\n", record.team1, record.team2);

    match record.state() {
        MatchState::Upcoming => {
            if let Some(scheduled_time) = &record.scheduled_time {
                report.push_str(&format!(
                    "This match is currently upcoming and scheduled for: {} ADT\n",
                    format_adt_time(scheduled_time)
                ));
                report.push_str("\nMatch Maps:\n   ");
                report.push_str(&record.maps.join("\n   "));
            }
            report.push_str(DIVIDER);
        }
        MatchState::InProgress => {
            report.push_str(DIVIDER);
        }
        MatchState::Completed => {
            report.push_str(&format!(
                "Score: {}\n",
                record.score.as_deref().unwrap_or_default()
            ));
            report.push_str(DIVIDER);

            let outcomes = record.game_outcomes.as_deref().unwrap_or_default();
            for (index, outcome) in outcomes.iter().enumerate() {
                report.push_str(&format_game(record, index, *outcome));
            }
        }
    }

    report.push_str(&format!("\nWebpage:\n{}/match/{}", WEBSITE_URL, record.id));
    report
}

/// Formats the block of the game at `index`.
///
/// Lineups and maps are aligned with the outcomes when the record is built,
/// missing entries render as empty text.
fn format_game(record: &MatchRecord, index: usize, outcome: Option<u8>) -> String {
    let map = record.maps.get(index).map(String::as_str).unwrap_or_default();
    let player1 = record.lineup1.get(index).map(format_player).unwrap_or_default();
    let player2 = record.lineup2.get(index).map(format_player).unwrap_or_default();
    let (result1, result2) = format_results(outcome);

    format!(
        "Map: {}\n{} {}   vs   {} {}\n\n",
        map, player1, result1, result2, player2
    )
}

/// Results of both sides for a game won by side `outcome`.
fn format_results(outcome: Option<u8>) -> (&'static str, &'static str) {
    match outcome {
        Some(0) => ("Win", "Loss"),
        Some(_) => ("Loss", "Win"),
        None => ("", ""),
    }
}

/// Formats a player as `nickname (rating)race`.
///
/// The rating is the one of the ladder played with the primary race, or
/// `Unknown` without ladder data.
///
/// # Examples
///
/// ```
/// # use alphabot::alphatl::PlayerEntry;
/// # use alphabot::commands::text_response::format_player;
/// let player = PlayerEntry {
///     nickname: "Maru".to_owned(),
///     faction: "T".to_owned(),
///     ladder_profile: None,
/// };
/// assert_eq!(format_player(&player), "Maru (Unknown)T");
/// ```
pub fn format_player(player: &PlayerEntry) -> String {
    let rating = player
        .ladder_profile
        .as_ref()
        .and_then(|profile| profile.primary_rating())
        .map(|rating| rating.to_string())
        .unwrap_or_else(|| "Unknown".to_owned());

    format!("{} ({}){}", player.nickname, rating, player.faction)
}

/// Formats a time in ADT, e.g. `Wednesday, October 14, 2026, 4:30 PM`.
fn format_adt_time(time: &DateTime<Utc>) -> String {
    // The rendered format carries no zone, shifting the wall clock is enough
    let adt = time.naive_utc() + Duration::hours(ADT_OFFSET_HOURS);

    adt.format("%A, %B %-d, %Y, %-I:%M %p")
        .to_string()
}

/// Formats the tournament standings, one lettered section per group.
pub fn format_standings(record: &StandingsRecord) -> String {
    let mut standings = String::new();

    for (index, group) in record.groups.iter().enumerate() {
        standings.push_str(&format_group(group, &group_letter(index)));
        standings.push('\n');
    }

    standings.push_str(&format!("Webpage:\n{}/americasamateur", WEBSITE_URL));
    standings
}

fn format_group(group: &[TeamStanding], letter: &str) -> String {
    let rows = group
        .iter()
        .enumerate()
        .map(|(rank, team)| {
            format!(
                "{}. MP: {}, MS: {}-{}, SS: {}-{}, T: {}\n",
                rank + 1,
                team.games_played,
                team.wins,
                team.losses,
                team.set_wins,
                team.set_losses,
                team.team_tag
            )
        })
        .collect::<String>();

    format!("Group {}\n{}", letter, rows)
}

/// Letter of the group at `index`: `A`..`Z`, then `AA`, `AB`...
fn group_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;

    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'A' + (remaining % 26) as u8));
        remaining /= 26;
    }

    letters.iter().rev().collect()
}

/// Reply to a `match` command whose arguments cannot be resolved.
pub fn format_invalid_match_arguments() -> String {
    "You need to supply a valid match number or team name with the keyword \"vs\".".to_owned()
}

/// Reply when the API has no match for `match_id`.
pub fn format_match_not_found(match_id: &str) -> String {
    format!("No results found for match {}.", match_id)
}

/// Reply to an unknown verb.
pub fn format_unknown_command() -> String {
    "Invalid command entered.".to_owned()
}

/// Reply when the API cannot be reached or answers garbage.
pub fn format_network_error() -> String {
    "Unable to reach the alpha.tl API, please try again later.".to_owned()
}

/// Reply when the API answers a document of the wrong shape.
pub fn format_unexpected_response() -> String {
    "Received an unexpected response from the alpha.tl API.".to_owned()
}
