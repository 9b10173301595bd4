//! Time source for the `x-ts-date` header.
//!
//! The signer reads the clock once per request. Tests pin it with
//! [`FixedClock`] so the timestamp, and therefore the signature, is
//! reproducible.

use crate::crypto::nonce::format_timestamp;
use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "test-seams"))]
use crate::{crypto::nonce::parse_timestamp, TelesignError};

/// Source of the request timestamp.
pub trait Clock: Send + Sync {
    /// Current UTC instant.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current instant rendered as an `x-ts-date` value.
    fn x_ts_date(&self) -> String {
        format_timestamp(self.now_utc())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

#[cfg(any(test, feature = "test-seams"))]
impl FixedClock {
    /// Pin the clock to `at`.
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Pin the clock to an `x-ts-date` value such as
    /// `Wed, 02 Oct 2024 12:34:56 GMT`.
    ///
    /// # Errors
    /// * `InputError` - `date` is not a valid header date
    pub fn from_x_ts_date(date: &str) -> Result<Self, TelesignError> {
        parse_timestamp(date).map(Self::at)
    }

    /// A copy of this clock moved forward (or back) by `offset`.
    pub fn shifted(self, offset: chrono::Duration) -> Self {
        Self {
            at: self.at + offset,
        }
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.at
    }
}
