//! Wallet Persona: on-chain complexity scoring.
//!
//! This is the root crate that provides test and benchmark access to the workspace.
//! For actual functionality, use the individual crates directly:
//!
//! - `chain-core`: Alchemy client, provider types, configuration
//! - `wallet-analyzer`: Activity aggregation, scoring, persona mapping
//! - `wallet-scanner`: Command-line front end

// Re-export for tests and benchmarks
pub use chain_core as core;
pub use wallet_analyzer as analyzer;
