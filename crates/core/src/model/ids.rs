use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a `PracticeRecord`.
///
/// Encoded as `<unix-millis>_<suffix>`: the creation timestamp keeps ids
/// roughly time-ordered, the random suffix keeps two records created in
/// the same millisecond distinct.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordIdError {
    #[error("record id must look like <millis>_<suffix>")]
    Malformed,
}

impl RecordId {
    /// Compose an id from a creation timestamp and a suffix.
    #[must_use]
    pub fn compose(timestamp_ms: i64, suffix: &str) -> Self {
        Self(format!("{timestamp_ms}_{suffix}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond creation timestamp embedded in the id, if parseable.
    #[must_use]
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.0.split('_').next()?.parse().ok()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((millis, suffix)) = s.split_once('_') else {
            return Err(RecordIdError::Malformed);
        };
        if millis.parse::<i64>().is_err() || suffix.is_empty() {
            return Err(RecordIdError::Malformed);
        }
        Ok(Self(s.to_owned()))
    }
}
