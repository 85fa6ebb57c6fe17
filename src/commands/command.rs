//! Command parsing.
//!
//! This module splits a chat message into a verb and its arguments, and maps
//! the verb to a [`Command`].

use log::debug;

/// A message split into its verb and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// First token after the prefix, lower-cased. Empty if the message is only the prefix.
    pub verb: String,
    /// Remaining tokens, in order, case preserved
    pub args: Vec<String>,
}

/// Splits a message into a [`CommandLine`].
///
/// Returns `None` when the message does not start with `prefix`, so regular
/// chat is never answered. The verb directly follows the prefix, the arguments are separated by runs
/// of whitespace.
///
/// # Examples
///
/// ```
/// # use alphabot::commands::command::parse_command_line;
/// let line = parse_command_line('!', "!Match vs ABC").unwrap();
/// assert_eq!(line.verb, "match");
/// assert_eq!(line.args, vec!["vs", "ABC"]);
/// ```
pub fn parse_command_line(prefix: char, body: &str) -> Option<CommandLine> {
    let rest = body.strip_prefix(prefix)?;
    // The verb sticks to the prefix, `! match` has an empty verb
    let (verb, rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

    let verb = verb.to_lowercase();
    let args = rest.split_whitespace().map(str::to_owned).collect();

    Some(CommandLine { verb, args })
}

/// Represents a parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Match report
    ///
    /// # Fields
    ///
    /// * `Vec<String>` - Arguments following the verb, resolved later
    Match(Vec<String>),
    /// Tournament standings, arguments are ignored
    Standings,
    /// Any other verb
    Unknown(String),
}

impl Command {
    /// Maps a [`CommandLine`] to a [`Command`] by its verb.
    pub fn from_line(line: CommandLine) -> Self {
        debug!("parsing command: {:?}", line);

        match line.verb.as_str() {
            "match" => Command::Match(line.args),
            "standings" => Command::Standings,
            _ => Command::Unknown(line.verb),
        }
    }
}
