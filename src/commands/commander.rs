//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point turning a
//! chat message into the reply to send.
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → parse_command() → reply text
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use alphabot::alphatl::AlphaRequester;
//! # use alphabot::commands::{Commander, TeamCodeDirectory};
//! # async fn example() -> Result<(), anyhow::Error> {
//! let requester = AlphaRequester::new("https://alpha.tl", 10)?;
//! let commander = Commander::new(requester, TeamCodeDirectory::default(), 50, '!');
//!
//! if let Some(reply) = commander.respond("!match 12345").await {
//!     println!("{}", reply);
//! }
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::{
    alphatl::Requester,
    commands::{
        actions::{handle_match, handle_standings},
        command::{Command, parse_command_line},
        team_codes::TeamCodeDirectory,
        text_response::format_unknown_command,
    },
};

/// Command router.
///
/// Holds the only state shared between commands: the requester, the team
/// code directory and the tournament of the `standings` command. None of it
/// changes after creation, so one instance serves concurrent commands.
///
/// # Supported Commands
///
/// - `match <number>` - Report of a match
/// - `match vs <team_code>` - Report of the match of a team code
/// - `standings` - Standings of the configured tournament
pub struct Commander<R: Requester> {
    /// alpha.tl API client
    requester: R,
    /// Team code aliases of `match vs`
    team_codes: TeamCodeDirectory,
    /// Tournament reported by `standings`
    tournament_id: u64,
    /// Character starting every command
    prefix: char,
}

impl<R: Requester> Commander<R> {
    /// Creates a new Commander.
    pub fn new(
        requester: R,
        team_codes: TeamCodeDirectory,
        tournament_id: u64,
        prefix: char,
    ) -> Self {
        Commander {
            requester,
            team_codes,
            tournament_id,
            prefix,
        }
    }

    /// Parses a message body into a [`Command`].
    ///
    /// Returns `None` when the body does not start with the command prefix.
    pub fn parse(&self, body: &str) -> Option<Command> {
        parse_command_line(self.prefix, body).map(Command::from_line)
    }

    /// Executes a parsed command and returns the reply.
    ///
    /// Every failure is turned into a reply, this never fails.
    pub async fn parse_command(&self, command: &Command) -> String {
        match command {
            Command::Match(args) => handle_match(&self.requester, &self.team_codes, args).await,
            Command::Standings => handle_standings(&self.requester, self.tournament_id).await,
            Command::Unknown(verb) => {
                debug!("unknown command {:?}", verb);
                format_unknown_command()
            }
        }
    }

    /// Parses and executes a message body.
    ///
    /// Returns `None` for messages which are not commands.
    pub async fn respond(&self, body: &str) -> Option<String> {
        let command = self.parse(body)?;
        Some(self.parse_command(&command).await)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::alphatl::{
        ApiResponse, BnetDataResponse, FetchError, IdOrText, LadderResponse, MatchResponse,
        MockRequester, PlayerResponse, TeamResponse,
    };
    use crate::commands::text_response::{format_invalid_match_arguments, format_network_error};

    fn create_commander(requester: MockRequester) -> Commander<MockRequester> {
        Commander::new(
            requester,
            TeamCodeDirectory::new([("abc".to_owned(), 4242)]),
            50,
            '!',
        )
    }

    fn player(nickname: &str, race: &str, mmr: Option<i64>) -> PlayerResponse {
        PlayerResponse {
            nickname: nickname.to_owned(),
            race: race.to_owned(),
            bnetdata: mmr.map(|mmr| BnetDataResponse {
                primary_race: race.to_owned(),
                solo_ladders: vec![LadderResponse {
                    race: race.to_owned(),
                    mmr,
                }],
            }),
        }
    }

    #[test]
    fn test_parse_commands() {
        let commander = create_commander(MockRequester::new());

        assert_eq!(
            commander.parse("!match 12345"),
            Some(Command::Match(vec!["12345".to_owned()]))
        );
        assert_eq!(commander.parse("!Standings"), Some(Command::Standings));
        assert_eq!(
            commander.parse("!help"),
            Some(Command::Unknown("help".to_owned()))
        );
        assert_eq!(commander.parse("hello there"), None);
    }

    #[tokio::test]
    async fn test_respond_ignores_regular_messages() {
        let mut requester = MockRequester::new();
        requester.expect_get_match().never();
        requester.expect_get_standings().never();
        let commander = create_commander(requester);

        assert_eq!(commander.respond("match 12345").await, None);
        assert_eq!(commander.respond("").await, None);
    }

    #[tokio::test]
    async fn test_respond_unknown_command() {
        let commander = create_commander(MockRequester::new());

        assert_eq!(
            commander.respond("!register 1").await,
            Some("Invalid command entered.".to_owned())
        );
        assert_eq!(
            commander.respond("!").await,
            Some("Invalid command entered.".to_owned())
        );
        assert_eq!(
            commander.respond("! match 1").await,
            Some("Invalid command entered.".to_owned())
        );
    }

    #[tokio::test]
    async fn test_respond_completed_match() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_match()
            .with(eq("12345"))
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::Data(MatchResponse {
                    id: Some(IdOrText::Number(12345.into())),
                    team1: Some(TeamResponse {
                        name: "Alpha".to_owned(),
                    }),
                    team2: Some(TeamResponse {
                        name: "Beta".to_owned(),
                    }),
                    datetime: None,
                    maps: vec!["Oxide".to_owned(), "Jagannatha".to_owned()],
                    lineup1: vec![player("Zest", "P", Some(5200)), player("Trap", "P", None)],
                    lineup2: vec![player("Maru", "T", Some(6100)), player("Dark", "Z", None)],
                    games: Some(vec![Some(0), Some(1)]),
                    score: Some(IdOrText::Text("1 - 1".to_owned())),
                }))
            });
        let commander = create_commander(requester);

        let reply = commander.respond("!match 12345").await.unwrap();

        assert_eq!(
            reply,
            "Alpha   vs   Beta\n\
             Score: 1 - 1\n\
             \n------------------------------------------\n\
             Map: Oxide\n\
             Zest (5200)P Win   vs   Loss Maru (6100)T\n\n\
             Map: Jagannatha\n\
             Trap (Unknown)P Loss   vs   Win Dark (Unknown)Z\n\n\
             \nWebpage:\nhttps://alpha.tl/match/12345"
        );
    }

    #[tokio::test]
    async fn test_respond_match_with_bad_arguments() {
        let mut requester = MockRequester::new();
        requester.expect_get_match().never();
        let commander = create_commander(requester);

        assert_eq!(
            commander.respond("!match vs xyz").await,
            Some(format_invalid_match_arguments())
        );
        assert_eq!(
            commander.respond("!match").await,
            Some(format_invalid_match_arguments())
        );
    }

    #[tokio::test]
    async fn test_respond_standings_uses_configured_tournament() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_standings()
            .with(eq(50u64))
            .times(1)
            .returning(|_| Err(FetchError::Timeout));
        let commander = create_commander(requester);

        assert_eq!(
            commander.respond("!standings 12").await,
            Some(format_network_error())
        );
    }
}
