//! Wire types returned by the chain data provider.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parse a JSON-RPC quantity into a `U256`.
///
/// `0x`-prefixed strings are hex (an empty `"0x"` is zero), anything else is
/// read as decimal.
pub fn parse_quantity(field: &'static str, raw: &str) -> Result<U256> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some("") => return Ok(U256::ZERO),
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(raw, 10),
    };
    parsed.map_err(|e| Error::Parse {
        field,
        message: format!("{raw:?}: {e}"),
    })
}

/// Parse a JSON-RPC quantity that must fit in a `u64` (nonces, block numbers).
pub fn parse_u64_quantity(field: &'static str, raw: &str) -> Result<u64> {
    let value = parse_quantity(field, raw)?;
    u64::try_from(value).map_err(|_| Error::Parse {
        field,
        message: format!("{raw:?} does not fit in u64"),
    })
}

/// One fungible-token balance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub contract_address: String,
    /// Raw balance as returned by the provider, `None` when the lookup failed.
    pub token_balance: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TokenBalance {
    /// Parsed balance, `None` when the provider returned no balance.
    pub fn amount(&self) -> Result<Option<U256>> {
        self.token_balance
            .as_deref()
            .map(|raw| parse_quantity("tokenBalance", raw))
            .transpose()
    }

    /// Whether this entry holds a strictly positive balance.
    pub fn is_held(&self) -> Result<bool> {
        Ok(self.amount()?.is_some_and(|amount| amount > U256::ZERO))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesResponse {
    pub address: String,
    pub token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub page_key: Option<String>,
}

/// NFT ownership summary for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOwnership {
    pub total_count: u64,
}

/// Transfer categories accepted by `alchemy_getAssetTransfers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferCategory {
    External,
    Internal,
    Erc20,
    Erc721,
    Erc1155,
    Specialnft,
}

/// Parameters of one `alchemy_getAssetTransfers` page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersRequest {
    pub from_address: String,
    pub category: Vec<TransferCategory>,
    pub with_metadata: bool,
    /// Page size, encoded as a hex quantity on the wire.
    #[serde(serialize_with = "serialize_hex_u32")]
    pub max_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    pub from_block: String,
}

impl AssetTransfersRequest {
    /// Outbound native-currency transfers sent by `address`, from genesis.
    pub fn outbound_external(
        address: impl Into<String>,
        max_count: u32,
        page_key: Option<String>,
    ) -> Self {
        Self {
            from_address: address.into(),
            category: vec![TransferCategory::External],
            with_metadata: true,
            max_count,
            page_key,
            from_block: "0x0".to_string(),
        }
    }
}

fn serialize_hex_u32<S: serde::Serializer>(
    value: &u32,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{:x}", value))
}

/// Asset transfer from the Alchemy enhanced API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetTransfer {
    #[serde(default)]
    pub from: Option<String>,
    /// Recipient, `None` for contract creations.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(rename = "blockNum", default)]
    pub block_num: Option<String>,
    #[serde(default)]
    pub metadata: Option<TransferMetadata>,
}

impl AssetTransfer {
    /// Block timestamp of the transfer, if present and well-formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.as_ref()?.block_timestamp.as_deref()?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                tracing::debug!("Ignoring unparseable block timestamp {:?}: {}", raw, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMetadata {
    #[serde(rename = "blockTimestamp", default)]
    pub block_timestamp: Option<String>,
}

/// One page of asset transfers plus the continuation cursor, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPage {
    pub transfers: Vec<AssetTransfer>,
    #[serde(rename = "pageKey", default)]
    pub page_key: Option<String>,
}
