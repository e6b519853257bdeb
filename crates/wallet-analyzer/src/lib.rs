//! Wallet Analyzer
//!
//! Derive a bounded complexity score and persona from a wallet's on-chain activity.

pub mod activity;
pub mod analyzer;
pub mod error;
pub mod persona;
pub mod provider;
pub mod relative_time;
pub mod scoring;

pub use analyzer::{analyze_wallet, WalletAnalyzer, WalletStats};
pub use error::ProviderError;
pub use persona::Persona;
pub use provider::WalletDataProvider;
pub use relative_time::RelativeTime;
pub use scoring::{complexity_score, ActivityMetrics, ScoringWeights};
