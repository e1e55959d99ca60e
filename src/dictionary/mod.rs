//! Definition and pronunciation lookup
//!
//! This module provides:
//! - The `DefinitionLookup` capability consumed by the card generator
//! - An HTTP client for the dictionary API
//! - Parsing of the API response into a `LookupResult`

pub mod client;
pub mod models;

pub use client::{DefinitionLookup, DictionaryClient, DictionaryError};
pub use models::DictionaryResponse;
