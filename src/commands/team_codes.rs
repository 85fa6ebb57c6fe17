//! Team code aliases.

use std::collections::HashMap;

/// Read-only mapping from a team alias to a match identifier.
///
/// Aliases are stored lower-cased, lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct TeamCodeDirectory {
    codes: HashMap<String, String>,
}

impl TeamCodeDirectory {
    /// Builds the directory from `(alias, match id)` pairs.
    ///
    /// When two aliases only differ by case, the last one wins.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let codes = entries
            .into_iter()
            .map(|(alias, match_id)| (alias.to_lowercase(), match_id.to_string()))
            .collect();

        TeamCodeDirectory { codes }
    }

    /// Returns the match identifier mapped to `alias`.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.codes.get(&alias.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }
}
