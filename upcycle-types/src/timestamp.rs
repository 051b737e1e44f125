//! Wall-clock timestamps carried on records as epoch seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A UTC timestamp with microsecond precision.
///
/// On the wire this is a floating-point count of seconds since the Unix
/// epoch. The zero value is the epoch itself, used when a record carries no
/// usable creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(DateTime::<Utc>::UNIX_EPOCH);

    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Converts from fractional epoch seconds.
    pub fn from_epoch_seconds(secs: f64) -> Result<Self> {
        if !secs.is_finite() {
            return Err(Error::InvalidTimestamp(format!("{secs} is not finite")));
        }
        let micros = (secs * 1_000_000.0).round();
        if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
            return Err(Error::InvalidTimestamp(format!("{secs} is out of range")));
        }
        DateTime::from_timestamp_micros(micros as i64)
            .map(Self)
            .ok_or_else(|| Error::InvalidTimestamp(format!("{secs} is out of range")))
    }

    /// Returns fractional seconds since the Unix epoch.
    #[must_use]
    pub fn epoch_seconds(&self) -> f64 {
        self.0.timestamp_micros() as f64 / 1_000_000.0
    }

    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
