//! Async client for the blockchain.info data API.
//!
//! The crate is organized into a transport layer ([`client`]), wire codecs
//! for the API's irregular JSON shapes ([`json`]), typed response models
//! ([`models`]) and one explorer per domain area ([`explorer`]). Most
//! consumers start with [`BlockchainApiHelper`], which owns one HTTP client
//! per API host and hands out the explorers.

pub mod client;
pub mod explorer;
pub mod json;
pub mod models;

pub use crate::client::{ApiError, BlockchainApiHelper, BlockchainHttpClient, QueryString};
