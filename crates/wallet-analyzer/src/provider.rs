//! Capability interface over the chain data provider.

use alloy_primitives::U256;
use async_trait::async_trait;
use chain_core::api::AlchemyClient;
use chain_core::types::{AssetTransfersRequest, NftOwnership, TokenBalance, TransferPage};
use chain_core::Result;

/// The five provider reads a wallet analysis needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletDataProvider: Send + Sync {
    /// All fungible-token balances of the address.
    async fn get_token_balances(&self, address: &str) -> Result<Vec<TokenBalance>>;

    /// Native-currency balance, in wei.
    async fn get_native_balance(&self, address: &str) -> Result<U256>;

    /// NFT ownership summary; only the total count is used.
    async fn get_nfts_for_owner(&self, address: &str) -> Result<NftOwnership>;

    /// Nonce of the address.
    async fn get_transaction_count(&self, address: &str) -> Result<u64>;

    /// One page of asset transfers.
    async fn get_asset_transfers(&self, request: &AssetTransfersRequest) -> Result<TransferPage>;
}

#[async_trait]
impl WalletDataProvider for AlchemyClient {
    async fn get_token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        AlchemyClient::get_token_balances(self, address).await
    }

    async fn get_native_balance(&self, address: &str) -> Result<U256> {
        self.get_balance(address).await
    }

    async fn get_nfts_for_owner(&self, address: &str) -> Result<NftOwnership> {
        AlchemyClient::get_nfts_for_owner(self, address).await
    }

    async fn get_transaction_count(&self, address: &str) -> Result<u64> {
        AlchemyClient::get_transaction_count(self, address).await
    }

    async fn get_asset_transfers(&self, request: &AssetTransfersRequest) -> Result<TransferPage> {
        AlchemyClient::get_asset_transfers(self, request).await
    }
}
