//! Wallet analysis: fetch, reconcile, and score one address.

use chain_core::api::AlchemyClient;
use chain_core::types::{AssetTransfer, AssetTransfersRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::activity::{count_held_tokens, TransferActivity};
use crate::error::ProviderError;
use crate::provider::WalletDataProvider;
use crate::relative_time::{months_between, RelativeTime};
use crate::scoring::{complexity_score, ActivityMetrics};

/// Transfers requested per history page.
pub const TRANSFER_PAGE_SIZE: u32 = 1000;

/// History pages fetched at most; anything beyond is silently ignored.
pub const MAX_TRANSFER_PAGES: usize = 10;

/// `experience` of an address with no outbound transfers.
pub const NEW_WALLET: &str = "New";

/// `recent_activity` of an address with no timestamped transfers.
pub const NO_ACTIVITY: &str = "No activity";

/// Result of analyzing one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStats {
    /// Transactions sent by the address (its nonce).
    pub transactions: u64,
    /// Distinct recipients of outbound transfers, excluding the address itself.
    pub contracts: u64,
    /// Tokens with a positive balance, plus one for a positive native balance.
    pub tokens: u64,
    pub nfts: u64,
    /// Complexity score in `0..=10`.
    pub complexity: u8,
    /// Time since the oldest outbound transfer, or "New".
    pub experience: String,
    /// Time since the newest outbound transfer, or "No activity".
    pub recent_activity: String,
}

/// Analyzes wallets against a chain data provider.
///
/// Holds no state between calls; concurrent analyses never interact.
pub struct WalletAnalyzer<P> {
    provider: P,
}

impl<P: WalletDataProvider> WalletAnalyzer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Analyze `address` relative to the current time.
    pub async fn analyze(&self, address: &str) -> Result<WalletStats, ProviderError> {
        self.analyze_at(address, Utc::now()).await
    }

    /// Analyze `address`, measuring account age and recency against `now`.
    ///
    /// Any failed provider call aborts the whole analysis.
    pub async fn analyze_at(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> Result<WalletStats, ProviderError> {
        info!("Analyzing wallet: {}", address);

        let (tokens, nfts, transactions, transfers) = tokio::try_join!(
            self.count_tokens(address),
            self.count_nfts(address),
            self.transaction_count(address),
            self.fetch_transfer_history(address),
        )?;

        let activity = TransferActivity::from_transfers(address, &transfers);
        if !activity.has_history() {
            debug!("No outbound transfers found for {}", address);
        }

        let metrics = ActivityMetrics {
            transactions,
            unique_contacts: activity.unique_recipients as u64,
            tokens,
            nfts,
            months_since_oldest: activity.oldest.map(|oldest| months_between(oldest, now)),
        };

        let experience = activity
            .oldest
            .map(|oldest| RelativeTime::between(oldest, now).to_string())
            .unwrap_or_else(|| NEW_WALLET.to_string());
        let recent_activity = activity
            .newest
            .map(|newest| RelativeTime::between(newest, now).to_string())
            .unwrap_or_else(|| NO_ACTIVITY.to_string());

        // Without outbound history there is nothing to score against.
        let complexity = if activity.has_history() {
            complexity_score(&metrics)
        } else {
            0
        };

        let stats = WalletStats {
            transactions,
            contracts: metrics.unique_contacts,
            tokens,
            nfts,
            complexity,
            experience,
            recent_activity,
        };

        info!(
            "Wallet {}: complexity={}, transactions={}, contracts={}, tokens={}, nfts={}",
            address, stats.complexity, stats.transactions, stats.contracts, stats.tokens, stats.nfts
        );

        Ok(stats)
    }

    async fn count_tokens(&self, address: &str) -> Result<u64, ProviderError> {
        let (balances, native_balance) = tokio::try_join!(
            async {
                self.provider
                    .get_token_balances(address)
                    .await
                    .map_err(|e| ProviderError::new("getTokenBalances", e))
            },
            async {
                self.provider
                    .get_native_balance(address)
                    .await
                    .map_err(|e| ProviderError::new("getBalance", e))
            },
        )?;

        count_held_tokens(&balances, native_balance)
            .map_err(|e| ProviderError::new("getTokenBalances", e))
    }

    async fn count_nfts(&self, address: &str) -> Result<u64, ProviderError> {
        let ownership = self
            .provider
            .get_nfts_for_owner(address)
            .await
            .map_err(|e| ProviderError::new("getNftsForOwner", e))?;

        Ok(ownership.total_count)
    }

    async fn transaction_count(&self, address: &str) -> Result<u64, ProviderError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| ProviderError::new("getTransactionCount", e))
    }

    /// Follow the transfer cursor until it runs out or the page cap is hit.
    async fn fetch_transfer_history(
        &self,
        address: &str,
    ) -> Result<Vec<AssetTransfer>, ProviderError> {
        let mut transfers = Vec::new();
        let mut page_key: Option<String> = None;

        for page in 1..=MAX_TRANSFER_PAGES {
            let request =
                AssetTransfersRequest::outbound_external(address, TRANSFER_PAGE_SIZE, page_key.take());

            let response = self
                .provider
                .get_asset_transfers(&request)
                .await
                .map_err(|e| ProviderError::new("getAssetTransfers", e))?;

            debug!(
                "Transfer page {} for {}: {} transfers",
                page,
                address,
                response.transfers.len()
            );
            transfers.extend(response.transfers);

            match response.page_key {
                Some(key) if !key.is_empty() => page_key = Some(key),
                _ => return Ok(transfers),
            }
        }

        warn!(
            "Transfer history for {} truncated at {} pages ({} transfers)",
            address,
            MAX_TRANSFER_PAGES,
            transfers.len()
        );

        Ok(transfers)
    }
}

/// Analyze `address` with an Alchemy client.
pub async fn analyze_wallet(
    client: &AlchemyClient,
    address: &str,
) -> Result<WalletStats, ProviderError> {
    WalletAnalyzer::new(client.clone()).analyze(address).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockWalletDataProvider;
    use alloy_primitives::U256;
    use chain_core::types::{NftOwnership, TokenBalance, TransferMetadata, TransferPage};
    use chrono::{Duration, TimeZone};

    const ADDRESS: &str = "0xAbC0000000000000000000000000000000000001";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn transfer(to: &str, at: DateTime<Utc>) -> AssetTransfer {
        AssetTransfer {
            from: Some(ADDRESS.to_lowercase()),
            to: Some(to.to_string()),
            category: Some("external".to_string()),
            metadata: Some(TransferMetadata {
                block_timestamp: Some(at.to_rfc3339()),
            }),
            ..Default::default()
        }
    }

    fn held(count: usize) -> Vec<TokenBalance> {
        (0..count)
            .map(|i| TokenBalance {
                contract_address: format!("0xtoken{i}"),
                token_balance: Some("0x01".to_string()),
                error: None,
            })
            .collect()
    }

    fn expect_reads(
        mock: &mut MockWalletDataProvider,
        balances: Vec<TokenBalance>,
        native: u64,
        nfts: u64,
        nonce: u64,
    ) {
        mock.expect_get_token_balances()
            .returning(move |_| Ok(balances.clone()));
        mock.expect_get_native_balance()
            .returning(move |_| Ok(U256::from(native)));
        mock.expect_get_nfts_for_owner()
            .returning(move |_| Ok(NftOwnership { total_count: nfts }));
        mock.expect_get_transaction_count()
            .returning(move |_| Ok(nonce));
    }

    /// Serve `pages` in order, chaining them with `page-N` cursors.
    fn expect_pages(mock: &mut MockWalletDataProvider, pages: Vec<Vec<AssetTransfer>>) {
        let total = pages.len();
        mock.expect_get_asset_transfers().returning(move |request| {
            let index = match request.page_key.as_deref() {
                None => 0,
                Some(key) => key.trim_start_matches("page-").parse().unwrap(),
            };
            let page_key = (index + 1 < total).then(|| format!("page-{}", index + 1));
            Ok(TransferPage {
                transfers: pages.get(index).cloned().unwrap_or_default(),
                page_key,
            })
        });
    }

    #[tokio::test]
    async fn test_inactive_wallet() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 0);
        expect_pages(&mut mock, vec![Vec::new()]);

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(
            stats,
            WalletStats {
                transactions: 0,
                contracts: 0,
                tokens: 0,
                nfts: 0,
                complexity: 0,
                experience: NEW_WALLET.to_string(),
                recent_activity: NO_ACTIVITY.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_seasoned_wallet() {
        let mut mock = MockWalletDataProvider::new();
        // 23 ERC-20s plus ETH = 24 tokens
        expect_reads(&mut mock, held(23), 5, 30, 150);

        let oldest = now() - Duration::days(36 * 30);
        let newest = now() - Duration::hours(3);
        let mut first: Vec<_> = (0..10)
            .map(|i| transfer(&format!("0x{:040x}", i + 100), oldest + Duration::days(i)))
            .collect();
        first.push(transfer(ADDRESS, now() - Duration::days(2)));
        let second: Vec<_> = (10..16)
            .map(|i| transfer(&format!("0x{:040x}", i + 100), newest))
            .collect();
        expect_pages(&mut mock, vec![first, second]);

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(stats.transactions, 150);
        assert_eq!(stats.contracts, 16);
        assert_eq!(stats.tokens, 24);
        assert_eq!(stats.nfts, 30);
        assert_eq!(stats.complexity, 6);
        assert_eq!(stats.experience, "2 years");
        assert_eq!(stats.recent_activity, "3 hours");
    }

    #[tokio::test]
    async fn test_pagination_stops_at_page_cap() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 10_000);
        mock.expect_get_asset_transfers()
            .times(MAX_TRANSFER_PAGES)
            .returning(|_| {
                Ok(TransferPage {
                    transfers: vec![transfer("0xdef", now() - Duration::days(1))],
                    page_key: Some("more".to_string()),
                })
            });

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();
        assert_eq!(stats.contracts, 1);
    }

    #[tokio::test]
    async fn test_pagination_follows_cursor() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 3);

        let mut seq = mockall::Sequence::new();
        for (expected_key, next_key) in [(None, Some("a")), (Some("a"), Some("b")), (Some("b"), None)] {
            mock.expect_get_asset_transfers()
                .withf(move |request| {
                    request.page_key.as_deref() == expected_key
                        && request.from_address == ADDRESS
                        && request.max_count == TRANSFER_PAGE_SIZE
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| {
                    Ok(TransferPage {
                        transfers: vec![transfer(
                            &format!("0x{}", next_key.unwrap_or("end")),
                            now() - Duration::days(1),
                        )],
                        page_key: next_key.map(str::to_string),
                    })
                });
        }

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();
        assert_eq!(stats.contracts, 3);
    }

    #[tokio::test]
    async fn test_empty_cursor_ends_pagination() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 1);
        mock.expect_get_asset_transfers().times(1).returning(|_| {
            Ok(TransferPage {
                transfers: vec![transfer("0xdef", now() - Duration::minutes(2))],
                page_key: Some(String::new()),
            })
        });

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();
        assert_eq!(stats.recent_activity, "2 minutes");
    }

    #[tokio::test]
    async fn test_holdings_without_history_score_zero() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, held(1), 1, 40, 400);
        expect_pages(&mut mock, vec![Vec::new()]);

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(
            stats,
            WalletStats {
                transactions: 400,
                contracts: 0,
                tokens: 2,
                nfts: 40,
                complexity: 0,
                experience: NEW_WALLET.to_string(),
                recent_activity: NO_ACTIVITY.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_untimestamped_history() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 1);
        expect_pages(
            &mut mock,
            vec![vec![AssetTransfer {
                to: Some("0xdef".to_string()),
                ..Default::default()
            }]],
        );

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(stats.contracts, 1);
        assert_eq!(stats.complexity, 1);
        assert_eq!(stats.experience, NEW_WALLET);
        assert_eq!(stats.recent_activity, NO_ACTIVITY);
    }

    #[tokio::test]
    async fn test_self_transfers_not_counted() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, Vec::new(), 0, 0, 2);
        expect_pages(
            &mut mock,
            vec![vec![
                transfer(&ADDRESS.to_lowercase(), now() - Duration::days(40)),
                transfer(ADDRESS, now() - Duration::days(10)),
            ]],
        );

        let stats = WalletAnalyzer::new(mock).analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(stats.contracts, 0);
        assert_eq!(stats.experience, "1 month");
        assert_eq!(stats.recent_activity, "10 days");
        assert_eq!(stats.complexity, 1);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_analysis() {
        let mut mock = MockWalletDataProvider::new();
        mock.expect_get_token_balances().returning(|_| Ok(Vec::new()));
        mock.expect_get_native_balance().returning(|_| Ok(U256::ZERO));
        mock.expect_get_nfts_for_owner()
            .returning(|_| Ok(NftOwnership { total_count: 0 }));
        mock.expect_get_transaction_count().returning(|_| {
            Err(chain_core::Error::Api {
                message: "rate limited".to_string(),
                status: Some(429),
            })
        });
        expect_pages(&mut mock, vec![Vec::new()]);

        let err = WalletAnalyzer::new(mock)
            .analyze_at(ADDRESS, now())
            .await
            .unwrap_err();

        assert_eq!(err.operation, "getTransactionCount");
        assert!(matches!(
            err.source,
            chain_core::Error::Api {
                status: Some(429),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_page_failure_aborts_analysis() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, held(1), 0, 0, 5);
        mock.expect_get_asset_transfers().returning(|request| {
            if request.page_key.is_none() {
                Ok(TransferPage {
                    transfers: vec![transfer("0xdef", now())],
                    page_key: Some("next".to_string()),
                })
            } else {
                Err(chain_core::Error::Rpc {
                    code: -32000,
                    message: "page expired".to_string(),
                })
            }
        });

        let err = WalletAnalyzer::new(mock)
            .analyze_at(ADDRESS, now())
            .await
            .unwrap_err();
        assert_eq!(err.operation, "getAssetTransfers");
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_identical() {
        let mut mock = MockWalletDataProvider::new();
        expect_reads(&mut mock, held(4), 1, 7, 42);
        expect_pages(
            &mut mock,
            vec![
                vec![transfer("0x01", now() - Duration::days(400))],
                vec![transfer("0x02", now() - Duration::days(3))],
            ],
        );

        let analyzer = WalletAnalyzer::new(mock);
        let first = analyzer.analyze_at(ADDRESS, now()).await.unwrap();
        let second = analyzer.analyze_at(ADDRESS, now()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.experience, "1 year");
    }

    #[test]
    fn test_stats_json_field_names() {
        let stats = WalletStats {
            transactions: 1,
            contracts: 2,
            tokens: 3,
            nfts: 4,
            complexity: 1,
            experience: "1 day".to_string(),
            recent_activity: "5 minutes".to_string(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["recentActivity"], "5 minutes");
        assert_eq!(json["complexity"], 1);
        assert!(json.get("recent_activity").is_none());
    }
}
