use std::cmp;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use err_derive::Error;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, rendered as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StampId(i64);

#[derive(Debug, Clone, Error)]
pub enum IdParseError {
    #[error(display = "Unparseable Id: {:?}", _0)]
    Unparseable(String),
    #[error(display = "Id out of range: {}", _0)]
    OutOfRange(i64),
}

/// Issues `StampId`s from the wall clock.
///
/// Two ids requested within the same millisecond would collide, so each
/// generator hands out strictly increasing values, running ahead of the
/// clock when it has to.
#[derive(Debug, Default)]
pub struct IdGen {
    last: AtomicI64,
}

impl StampId {
    pub fn from_millis(millis: i64) -> Self {
        StampId(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    pub fn timestamp(&self) -> Result<DateTime<Utc>, IdParseError> {
        Utc.timestamp_millis_opt(self.0)
            .single()
            .ok_or(IdParseError::OutOfRange(self.0))
    }
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> StampId {
        let now = Utc::now().timestamp_millis();
        let next = |last: i64| cmp::max(last + 1, now);
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
            .unwrap_or_else(|last| last);
        StampId(next(prev))
    }
}

impl fmt::Display for StampId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

impl std::str::FromStr for StampId {
    type Err = IdParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.is_empty() || !src.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdParseError::Unparseable(src.to_string()));
        }
        src.parse::<i64>()
            .map(StampId)
            .map_err(|_| IdParseError::Unparseable(src.to_string()))
    }
}
