//! API clients for external services.

pub mod alchemy;

pub use alchemy::AlchemyClient;
