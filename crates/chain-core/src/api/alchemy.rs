//! Alchemy client for on-chain wallet data.
//!
//! Node calls (`eth_*`) and enhanced calls (`alchemy_*`) share one JSON-RPC
//! endpoint; NFT ownership comes from the separate NFT REST API.

use std::time::Duration;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AlchemyConfig;
use crate::types::{
    parse_quantity, parse_u64_quantity, AssetTransfersRequest, NftOwnership, TokenBalance,
    TokenBalancesResponse, TransferPage,
};
use crate::{Error, Result};

/// Page size used by [`AlchemyClient::get_transaction_history`].
pub const HISTORY_PREVIEW_SIZE: u32 = 100;

/// Alchemy API client bound to a single network.
#[derive(Debug, Clone)]
pub struct AlchemyClient {
    rpc_url: String,
    nft_api_url: String,
    http_client: reqwest::Client,
}

impl AlchemyClient {
    /// Create a client from explicit endpoints.
    pub fn new(rpc_url: String, nft_api_url: String) -> Self {
        Self {
            rpc_url,
            nft_api_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client from configuration, applying the request timeout.
    pub fn from_config(config: &AlchemyConfig) -> Result<Self> {
        let rpc_url = config.get_rpc_url().ok_or_else(|| Error::Config {
            message: "No Alchemy RPC URL configured. Set ALCHEMY_API_KEY or ALCHEMY_RPC_URL."
                .to_string(),
        })?;
        let nft_api_url = config.get_nft_api_url().ok_or_else(|| Error::Config {
            message: "No Alchemy NFT API URL configured. Set ALCHEMY_API_KEY or ALCHEMY_NFT_API_URL."
                .to_string(),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            rpc_url,
            nft_api_url,
            http_client,
        })
    }

    /// Get all ERC-20 balances held by an address.
    pub async fn get_token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        let response: TokenBalancesResponse = self
            .rpc_call(
                "alchemy_getTokenBalances",
                serde_json::json!([address, "erc20"]),
            )
            .await?;

        Ok(response.token_balances)
    }

    /// Get the native-currency balance of an address, in wei.
    pub async fn get_balance(&self, address: &str) -> Result<U256> {
        let balance: String = self
            .rpc_call("eth_getBalance", serde_json::json!([address, "latest"]))
            .await?;

        parse_quantity("balance", &balance)
    }

    /// Get the nonce (number of transactions sent) of an address.
    pub async fn get_transaction_count(&self, address: &str) -> Result<u64> {
        let count: String = self
            .rpc_call(
                "eth_getTransactionCount",
                serde_json::json!([address, "latest"]),
            )
            .await?;

        parse_u64_quantity("transactionCount", &count)
    }

    /// Get the NFT ownership summary for an address.
    ///
    /// Only the provider's `totalCount` is needed, so a single-item page without
    /// metadata is requested.
    pub async fn get_nfts_for_owner(&self, address: &str) -> Result<NftOwnership> {
        let url = format!("{}/getNFTsForOwner", self.nft_api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("owner", address), ("withMetadata", "false"), ("pageSize", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                message: format!("NFT request failed: {}", response.status()),
                status: Some(response.status().as_u16()),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch one page of asset transfers.
    pub async fn get_asset_transfers(
        &self,
        request: &AssetTransfersRequest,
    ) -> Result<TransferPage> {
        let page: TransferPage = self
            .rpc_call("alchemy_getAssetTransfers", serde_json::json!([request]))
            .await?;

        debug!(
            "Fetched {} transfers for {} (more pages: {})",
            page.transfers.len(),
            request.from_address,
            page.page_key.is_some()
        );

        Ok(page)
    }

    /// Most recent slice of outbound transfers, without following the cursor.
    pub async fn get_transaction_history(&self, address: &str) -> Result<TransferPage> {
        self.get_asset_transfers(&history_request(address)).await
    }

    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                message: format!("RPC request {} failed: {}", method, response.status()),
                status: Some(response.status().as_u16()),
            });
        }

        let body: JsonRpcResponse<T> = response.json().await?;
        body.into_result(method)
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if let Some(error) = self.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        self.result.ok_or_else(|| Error::Api {
            message: format!("No result in {} response", method),
            status: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

fn history_request(address: &str) -> AssetTransfersRequest {
    AssetTransfersRequest::outbound_external(address, HISTORY_PREVIEW_SIZE, None)
}
