use serde::{Deserialize, Serialize};

/// How a completion-service answer was mapped onto a catalog character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Case-insensitive equality with a character name.
    Exact,
    /// The answer contains a character name, or a name contains the answer.
    Contained,
    /// Best token-overlap / edit-distance score.
    Fuzzy,
    /// No usable score; a character was picked at random.
    RandomFallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contained => "contained",
            Self::Fuzzy => "fuzzy",
            Self::RandomFallback => "randomFallback",
        }
    }

    /// Whether the answer text named the character closely enough to show as-is.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Exact | Self::Contained)
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
