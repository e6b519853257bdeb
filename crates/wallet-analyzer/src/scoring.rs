//! Complexity scoring for wallet activity.
//!
//! Each raw signal is divided by its weight so that one "point" corresponds to
//! a typical amount of that activity. The summed base score is compressed with
//! a sub-linear power curve and floored into the 0-10 persona scale.

use serde::{Deserialize, Serialize};

/// Highest complexity score.
pub const MAX_COMPLEXITY: u8 = 10;

/// Exponent of the compression curve applied to the base score.
pub const CURVE_EXPONENT: f64 = 0.7;

/// Months of account age worth one experience point.
pub const MONTHS_PER_EXPERIENCE_POINT: f64 = 6.0;

/// Experience points stop accruing after 30 months.
pub const MAX_EXPERIENCE_POINTS: f64 = 5.0;

/// Divisors applied to each activity signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Transactions per point.
    pub transactions: f64,
    /// Unique counterparties per point.
    pub contacts: f64,
    /// Held tokens per point.
    pub tokens: f64,
    /// Held NFTs per point.
    pub nfts: f64,
}

impl ScoringWeights {
    pub const DEFAULT: Self = Self {
        transactions: 75.0,
        contacts: 8.0,
        tokens: 12.0,
        nfts: 15.0,
    };
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Metrics that feed the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub transactions: u64,
    pub unique_contacts: u64,
    pub tokens: u64,
    pub nfts: u64,
    /// Whole 30-day months since the oldest outbound transfer, `None` without history.
    pub months_since_oldest: Option<u64>,
}

impl ActivityMetrics {
    /// True when any count-based signal is nonzero. Account age alone does not count.
    pub fn has_activity(&self) -> bool {
        self.transactions > 0 || self.unique_contacts > 0 || self.tokens > 0 || self.nfts > 0
    }
}

/// One point per six months of account age, capped at five.
pub fn experience_points(months_since_oldest: u64) -> f64 {
    (months_since_oldest as f64 / MONTHS_PER_EXPERIENCE_POINT).min(MAX_EXPERIENCE_POINTS)
}

/// Weighted sum of all signals before compression.
pub fn base_score(metrics: &ActivityMetrics, weights: &ScoringWeights) -> f64 {
    metrics.transactions as f64 / weights.transactions
        + metrics.unique_contacts as f64 / weights.contacts
        + metrics.tokens as f64 / weights.tokens
        + metrics.nfts as f64 / weights.nfts
        + metrics.months_since_oldest.map_or(0.0, experience_points)
}

/// Complexity score in `0..=10` using the default weights.
///
/// Zero only when every count-based signal is zero; any activity at all is
/// worth at least 1.
pub fn complexity_score(metrics: &ActivityMetrics) -> u8 {
    complexity_score_with(metrics, &ScoringWeights::DEFAULT)
}

pub fn complexity_score_with(metrics: &ActivityMetrics, weights: &ScoringWeights) -> u8 {
    if !metrics.has_activity() {
        return 0;
    }

    let curved = base_score(metrics, weights).powf(CURVE_EXPONENT).floor();
    let capped = curved.clamp(0.0, MAX_COMPLEXITY as f64) as u8;
    capped.max(1)
}
