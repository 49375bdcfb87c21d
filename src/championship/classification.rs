use serde::{Deserialize, Serialize};
use std::fmt;

pub const DNF: i32 = -1;
pub const DSQ: i32 = -2;
pub const DNS: i32 = -3;
pub const DNE: i32 = -4;
pub const DNQ: i32 = -5;

/// Outcome of one entrant in one round, either a 1-based position or a
/// non-finish sentinel.
///
/// Persisted records carry the integer code (positive = position, negative =
/// sentinel) so the JSON format stays stable for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Classification {
    Position(u32),
    /// Did not finish (or finished below the classification threshold)
    Dnf,
    /// Disqualified
    Dsq,
    /// Did not start
    Dns,
    /// Did not enter, used to backfill rounds before an entrant's first race
    Dne,
    /// Did not qualify
    Dnq,
}

impl Classification {
    /// Integer code of this classification
    pub fn code(self) -> i32 {
        match self {
            Classification::Position(pos) => pos as i32,
            Classification::Dnf => DNF,
            Classification::Dsq => DSQ,
            Classification::Dns => DNS,
            Classification::Dne => DNE,
            Classification::Dnq => DNQ,
        }
    }

    /// Decode an integer code. Zero and unknown negative codes have no meaning.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            c if c > 0 => Some(Classification::Position(c as u32)),
            DNF => Some(Classification::Dnf),
            DSQ => Some(Classification::Dsq),
            DNS => Some(Classification::Dns),
            DNE => Some(Classification::Dne),
            DNQ => Some(Classification::Dnq),
            _ => None,
        }
    }

    /// Position if this is an actual finishing or grid position
    pub fn position(self) -> Option<u32> {
        match self {
            Classification::Position(pos) => Some(pos),
            _ => None,
        }
    }

    pub fn is_position(self, pos: u32) -> bool {
        self == Classification::Position(pos)
    }

    /// Merge used for team histories: the better of two results for the same round.
    ///
    /// Two positions keep the smaller one, a position beats any sentinel, and
    /// between two sentinels the larger (less severe) code is kept.
    pub fn best_of(self, other: Self) -> Self {
        match (self, other) {
            (Classification::Position(a), Classification::Position(b)) => {
                Classification::Position(a.min(b))
            }
            (Classification::Position(_), _) => self,
            (_, Classification::Position(_)) => other,
            _ => {
                if other.code() > self.code() {
                    other
                } else {
                    self
                }
            }
        }
    }

    /// Merge used for driver histories across several entries: the larger
    /// integer code wins.
    ///
    /// Any position beats a sentinel, but between two positions the worse
    /// placement is kept.
    pub fn max_code(self, other: Self) -> Self {
        if other.code() > self.code() {
            other
        } else {
            self
        }
    }

    /// Display label, "N/A" for positions
    pub fn label(self) -> &'static str {
        label_for_code(self.code())
    }
}

/// Display label for a raw classification code.
///
/// Positive and unrecognised codes fall back to "N/A".
pub fn label_for_code(code: i32) -> &'static str {
    match code {
        DNS => "DNS",
        DNF => "DNF",
        DNE => "DNE",
        DSQ => "DSQ",
        DNQ => "DNQ",
        _ => "N/A",
    }
}

impl From<Classification> for i32 {
    fn from(value: Classification) -> Self {
        value.code()
    }
}

impl TryFrom<i32> for Classification {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Classification::from_code(code).ok_or_else(|| format!("Unknown classification code: {}", code))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Position(pos) => write!(f, "{}", pos),
            other => f.write_str(other.label()),
        }
    }
}
