//! Configuration management for the wallet analyzer.

use crate::{Error, Result};
use std::env;

pub const DEFAULT_NETWORK: &str = "eth-mainnet";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub alchemy: AlchemyConfig,
}

/// Connection settings for the Alchemy data API of a single network.
#[derive(Debug, Clone)]
pub struct AlchemyConfig {
    pub api_key: Option<String>,
    /// Alchemy network identifier, e.g. `eth-mainnet`.
    pub network: String,
    pub rpc_url: Option<String>,
    pub nft_api_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AlchemyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            network: DEFAULT_NETWORK.to_string(),
            rpc_url: None,
            nft_api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AlchemyConfig {
    /// Create a config for the given API key on the default network.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// JSON-RPC endpoint: the explicit override, else derived from network and key.
    pub fn get_rpc_url(&self) -> Option<String> {
        self.rpc_url.clone().or_else(|| {
            self.api_key
                .as_ref()
                .map(|key| format!("https://{}.g.alchemy.com/v2/{}", self.network, key))
        })
    }

    /// Base URL of the NFT REST API (v3).
    pub fn get_nft_api_url(&self) -> Option<String> {
        self.nft_api_url.clone().or_else(|| {
            self.api_key
                .as_ref()
                .map(|key| format!("https://{}.g.alchemy.com/nft/v3/{}", self.network, key))
        })
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match env::var("ALCHEMY_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| Error::Config {
                message: format!("ALCHEMY_TIMEOUT_SECS must be a number of seconds, got {raw:?}"),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            alchemy: AlchemyConfig {
                api_key: env::var("ALCHEMY_API_KEY").ok().filter(|k| !k.is_empty()),
                network: env::var("ALCHEMY_NETWORK")
                    .unwrap_or_else(|_| DEFAULT_NETWORK.to_string()),
                rpc_url: env::var("ALCHEMY_RPC_URL").ok(),
                nft_api_url: env::var("ALCHEMY_NFT_API_URL").ok(),
                timeout_secs,
            },
        })
    }
}
