//! Timestamps and time windows
//!
//! All dates in Microsave are naive, second-resolution timestamps written as
//! `YYYY-MM-DD HH:MM:SS`. Anything else is rejected when the value is parsed,
//! so the rule engine never sees a malformed date.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Wire format for every timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A transaction or period boundary timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a strictly formatted `YYYY-MM-DD HH:MM:SS` string
    pub fn parse(s: &str) -> Result<Self> {
        let dt = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map_err(|_| Error::InvalidTimestamp(s.to_string()))?;

        // chrono accepts unpadded fields ("2023-1-5 9:00:00"), the wire format does not
        if dt.format(TIMESTAMP_FORMAT).to_string() != s {
            return Err(Error::InvalidTimestamp(s.to_string()));
        }

        Ok(Self(dt))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Anything bounded by an inclusive `[start, end]` window
pub trait Windowed {
    fn start(&self) -> Timestamp;
    fn end(&self) -> Timestamp;

    /// Inclusive on both ends
    fn contains(&self, ts: Timestamp) -> bool {
        self.start() <= ts && ts <= self.end()
    }

    /// Reject windows whose start is after their end
    fn check(&self) -> Result<()> {
        if self.start() > self.end() {
            return Err(Error::InvalidPeriod {
                start: self.start().to_string(),
                end: self.end().to_string(),
            });
        }
        Ok(())
    }
}

/// A plain `[start, end]` window with no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Period {
    /// Build a period, rejecting `start > end`
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        let period = Self { start, end };
        period.check()?;
        Ok(period)
    }
}

impl Windowed for Period {
    fn start(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

/// Validate every window in a list, failing on the first malformed one
pub fn check_all<W: Windowed>(windows: &[W]) -> Result<()> {
    windows.iter().try_for_each(|w| w.check())
}

/// Pick the window with the latest start.
///
/// Ties keep the earliest element in iteration order.
pub fn latest_start<'a, W, I>(windows: I) -> Option<&'a W>
where
    W: Windowed + 'a,
    I: IntoIterator<Item = &'a W>,
{
    windows.into_iter().fold(None, |best: Option<&'a W>, w| match best {
        Some(b) if w.start() <= b.start() => Some(b),
        _ => Some(w),
    })
}
