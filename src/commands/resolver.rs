//! Match identifier resolution.
//!
//! Turns the arguments of a `match` command into the identifier to request.
//! Two forms are accepted, checked in order:
//!
//! 1. a single match number, `!match 12345`
//! 2. the `vs` keyword and a team code, `!match vs abc`
//!
//! A match number is an unsigned decimal digit sequence (`[0-9]+`). Signs,
//! decimal points and exponents are rejected.

use log::debug;

use crate::commands::team_codes::TeamCodeDirectory;

/// Literal introducing a team code, matched case-sensitively.
const VS_KEYWORD: &str = "vs";

/// The arguments match neither accepted form, or the team code is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError;

/// Resolves the arguments of a `match` command into a match identifier.
///
/// # Errors
///
/// Returns [`ResolveError`] for any other argument list, including a `vs`
/// form whose team code is not in `directory`.
pub fn resolve_match_id(args: &[String], directory: &TeamCodeDirectory) -> Result<String, ResolveError> {
    let resolved = match args {
        [number] if is_match_number(number) => Some(number.clone()),
        [keyword, code] if keyword == VS_KEYWORD => directory.get(code).map(str::to_owned),
        _ => None,
    };

    debug!("resolved match arguments {:?} -> {:?}", args, resolved);

    resolved.ok_or(ResolveError)
}

fn is_match_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
