// Axial hex coordinates as used by zone positions
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub q: i32,
    pub r: i32,
}

impl Position {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Euclidean distance over the raw axial coordinates
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dq = f64::from(other.q - self.q);
        let dr = f64::from(other.r - self.r);
        dq.hypot(dr)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid zone position: {}", self.0)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses the point form the API returns, e.g. `(12,-3)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParsePositionError(s.to_string()))?;

        let (q, r) = inner
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;

        let q = q.trim().parse::<i32>().map_err(|_| ParsePositionError(s.to_string()))?;
        let r = r.trim().parse::<i32>().map_err(|_| ParsePositionError(s.to_string()))?;

        Ok(Position { q, r })
    }
}

// Fleets carry their position as a point string rather than q/r fields
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
