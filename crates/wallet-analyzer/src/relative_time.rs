//! Human-readable elapsed time ("3 days", "1 year").

use std::fmt;

use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const DAYS_PER_MONTH: u64 = 30;
const DAYS_PER_YEAR: u64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    fn label(self, plural: bool) -> &'static str {
        match (self, plural) {
            (TimeUnit::Second, false) => "second",
            (TimeUnit::Second, true) => "seconds",
            (TimeUnit::Minute, false) => "minute",
            (TimeUnit::Minute, true) => "minutes",
            (TimeUnit::Hour, false) => "hour",
            (TimeUnit::Hour, true) => "hours",
            (TimeUnit::Day, false) => "day",
            (TimeUnit::Day, true) => "days",
            (TimeUnit::Month, false) => "month",
            (TimeUnit::Month, true) => "months",
            (TimeUnit::Year, false) => "year",
            (TimeUnit::Year, true) => "years",
        }
    }
}

/// Elapsed time expressed in the coarsest unit whose boundary it has crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub value: u64,
    pub unit: TimeUnit,
}

impl RelativeTime {
    pub fn from_seconds(seconds: u64) -> Self {
        let days = seconds / DAY;
        let (value, unit) = if seconds < MINUTE {
            (seconds, TimeUnit::Second)
        } else if seconds < HOUR {
            (seconds / MINUTE, TimeUnit::Minute)
        } else if seconds < DAY {
            (seconds / HOUR, TimeUnit::Hour)
        } else if days < DAYS_PER_MONTH {
            (days, TimeUnit::Day)
        } else if days < DAYS_PER_YEAR {
            (days / DAYS_PER_MONTH, TimeUnit::Month)
        } else {
            (days / DAYS_PER_YEAR, TimeUnit::Year)
        };
        Self { value, unit }
    }

    /// Time elapsed from `then` to `now`. A `then` in the future counts as zero.
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_seconds(elapsed_seconds(then, now))
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.label(self.value != 1))
    }
}

/// Whole seconds from `then` to `now`, floored at zero.
pub fn elapsed_seconds(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - then).num_seconds()).unwrap_or(0)
}

/// Whole 30-day months from `then` to `now`.
pub fn months_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    elapsed_seconds(then, now) / DAY / DAYS_PER_MONTH
}
