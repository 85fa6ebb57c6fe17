//! Match command handler.
//!
//! Resolves the match identifier from the command arguments, fetches the
//! match and renders its report. Nothing is requested when the arguments
//! cannot be resolved.

use log::{debug, info};

use crate::{
    alphatl::{ApiResponse, MatchRecord, Requester},
    commands::{
        actions::format_fetch_error,
        resolver::resolve_match_id,
        team_codes::TeamCodeDirectory,
        text_response::{format_invalid_match_arguments, format_match_not_found, format_match_report},
    },
};

/// Returns the report of the match designated by `args`.
pub async fn handle_match<R: Requester>(
    requester: &R,
    team_codes: &TeamCodeDirectory,
    args: &[String],
) -> String {
    debug!("handling match command {:?}", args);

    let Ok(match_id) = resolve_match_id(args, team_codes) else {
        return format_invalid_match_arguments();
    };

    let response = match requester.get_match(&match_id).await {
        Ok(ApiResponse::Data(response)) => response,
        Ok(ApiResponse::Error { error }) => {
            info!("no match {}: {}", match_id, error);
            return format_match_not_found(&match_id);
        }
        Err(e) => return format_fetch_error(&e),
    };

    debug!("match response {}", response);

    match MatchRecord::try_from(response) {
        Ok(record) => {
            debug!("rendering match {}", record);
            format_match_report(&record)
        }
        Err(e) => format_fetch_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::alphatl::{
        FetchError, IdOrText, MatchResponse, MockRequester, PlayerResponse, TeamResponse,
    };

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn team_codes() -> TeamCodeDirectory {
        TeamCodeDirectory::new([("abc".to_owned(), 4242)])
    }

    fn player(nickname: &str) -> PlayerResponse {
        PlayerResponse {
            nickname: nickname.to_owned(),
            race: "P".to_owned(),
            bnetdata: None,
        }
    }

    fn completed_match(id: &str) -> MatchResponse {
        MatchResponse {
            id: Some(IdOrText::Text(id.to_owned())),
            team1: Some(TeamResponse {
                name: "Alpha".to_owned(),
            }),
            team2: Some(TeamResponse {
                name: "Beta".to_owned(),
            }),
            datetime: None,
            maps: vec!["Oxide".to_owned(), "Jagannatha".to_owned()],
            lineup1: vec![player("a1"), player("a2")],
            lineup2: vec![player("b1"), player("b2")],
            games: Some(vec![Some(0), Some(1)]),
            score: Some(IdOrText::Text("1 - 1".to_owned())),
        }
    }

    #[tokio::test]
    async fn test_handle_match_by_number() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_match()
            .with(eq("12345"))
            .times(1)
            .returning(|id| Ok(ApiResponse::Data(completed_match(id))));

        let response = handle_match(&requester, &team_codes(), &args(&["12345"])).await;

        assert_eq!(response.matches("Map: ").count(), 2);
        assert!(response.contains("Map: Oxide\na1 (Unknown)P Win   vs   Loss b1 (Unknown)P\n\n"));
        assert!(response.contains("Map: Jagannatha\na2 (Unknown)P Loss   vs   Win b2 (Unknown)P\n\n"));
        assert!(response.ends_with("https://alpha.tl/match/12345"));
    }

    #[tokio::test]
    async fn test_handle_match_by_team_code() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_match()
            .with(eq("4242"))
            .times(1)
            .returning(|id| Ok(ApiResponse::Data(completed_match(id))));

        let response = handle_match(&requester, &team_codes(), &args(&["vs", "ABC"])).await;

        assert!(response.starts_with("Alpha   vs   Beta\nScore: 1 - 1\n"));
        assert!(response.ends_with("https://alpha.tl/match/4242"));
    }

    #[tokio::test]
    async fn test_handle_match_invalid_arguments_skips_request() {
        let mut requester = MockRequester::new();
        requester.expect_get_match().never();

        for invalid in [
            args(&[]),
            args(&["abc"]),
            args(&["vs", "unknown"]),
            args(&["1", "2"]),
        ] {
            assert_eq!(
                handle_match(&requester, &team_codes(), &invalid).await,
                format_invalid_match_arguments()
            );
        }
    }

    #[tokio::test]
    async fn test_handle_match_api_error() {
        let mut requester = MockRequester::new();
        requester.expect_get_match().times(1).returning(|_| {
            Ok(ApiResponse::Error {
                error: "Match not found".to_owned(),
            })
        });

        let response = handle_match(&requester, &team_codes(), &args(&["999"])).await;
        assert_eq!(response, "No results found for match 999.");
    }

    #[tokio::test]
    async fn test_handle_match_network_failure() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_match()
            .times(1)
            .returning(|_| Err(FetchError::Timeout));

        let response = handle_match(&requester, &team_codes(), &args(&["1"])).await;
        assert_eq!(response, crate::commands::text_response::format_network_error());
    }

    #[tokio::test]
    async fn test_handle_match_malformed_payload() {
        let mut requester = MockRequester::new();
        requester.expect_get_match().times(1).returning(|id| {
            let mut response = completed_match(id);
            response.team1 = None;
            Ok(ApiResponse::Data(response))
        });

        let response = handle_match(&requester, &team_codes(), &args(&["1"])).await;
        assert_eq!(
            response,
            crate::commands::text_response::format_unexpected_response()
        );
    }
}
