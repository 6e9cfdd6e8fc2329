use std::fmt;

use serde::{Deserialize, Serialize};

use crate::substitution::SubstitutionPair;

/// Outcome of comparing two code prefixes. Serialized into the archive with
/// the same labels the status cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Match,
    #[serde(rename = "No match")]
    NoMatch,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Match => write!(f, "Match"),
            MatchStatus::NoMatch => write!(f, "No match"),
        }
    }
}

/// Decides whether two prefixes belong together: either they are equal
/// (ASCII case-insensitive) or the substitution table declares them
/// equivalent, in either direction. Empty prefixes never match.
pub fn is_allowed_combination(p1: &str, p2: &str, pairs: &[SubstitutionPair]) -> bool {
    if p1.is_empty() || p2.is_empty() {
        return false;
    }
    if p1.eq_ignore_ascii_case(p2) {
        return true;
    }
    pairs.iter().any(|pair| {
        (p1 == pair.expected && p2 == pair.substitute)
            || (p2 == pair.expected && p1 == pair.substitute)
    })
}

/// Convenience wrapper producing the archive status.
pub fn evaluate(p1: &str, p2: &str, pairs: &[SubstitutionPair]) -> MatchStatus {
    if is_allowed_combination(p1, p2, pairs) {
        MatchStatus::Match
    } else {
        MatchStatus::NoMatch
    }
}
