//! Reconciliation of raw provider data into activity counts.

use std::collections::HashSet;

use alloy_primitives::U256;
use chain_core::types::{AssetTransfer, TokenBalance};
use chrono::{DateTime, Utc};

/// Distinct held tokens, counting a positive native balance as one more token.
///
/// Entries with a missing or zero balance are skipped.
pub fn count_held_tokens(
    balances: &[TokenBalance],
    native_balance: U256,
) -> chain_core::Result<u64> {
    let mut held = 0u64;
    for balance in balances {
        if balance.is_held()? {
            held += 1;
        }
    }

    if native_balance > U256::ZERO {
        held += 1;
    }

    Ok(held)
}

/// Summary of an address's outbound transfer history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferActivity {
    /// Number of transfers examined.
    pub transfer_count: usize,
    /// Distinct lower-cased recipients, excluding the sender itself.
    pub unique_recipients: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

impl TransferActivity {
    pub fn from_transfers(address: &str, transfers: &[AssetTransfer]) -> Self {
        let own = address.to_lowercase();

        let recipients: HashSet<String> = transfers
            .iter()
            .filter_map(|t| t.to.as_deref())
            .map(str::to_lowercase)
            .filter(|to| *to != own)
            .collect();

        let mut oldest: Option<DateTime<Utc>> = None;
        let mut newest: Option<DateTime<Utc>> = None;
        for ts in transfers.iter().filter_map(AssetTransfer::timestamp) {
            oldest = Some(oldest.map_or(ts, |o| o.min(ts)));
            newest = Some(newest.map_or(ts, |n| n.max(ts)));
        }

        Self {
            transfer_count: transfers.len(),
            unique_recipients: recipients.len(),
            oldest,
            newest,
        }
    }

    pub fn has_history(&self) -> bool {
        self.transfer_count > 0
    }
}
