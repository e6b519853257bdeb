//! Chain Core Library
//!
//! Provider client, wire types, and configuration shared by the wallet analyzer
//! and its command-line front end.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
