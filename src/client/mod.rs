//! HTTP transport layer for the blockchain.info API.
//!
//! The module is organized into several components:
//!
//! - [`BlockchainHttpClient`] - reqwest wrapper that appends the API code,
//!   validates response envelopes and decodes bodies
//! - [`QueryString`] - ordered query parameter builder
//! - [`ApiError`] - error taxonomy for the whole crate
//! - [`BlockchainApiHelper`] - facade that owns one client per API host
//!
//! # Error envelopes
//!
//! The service reports some logical failures with a success status code and
//! a body of the form `{"error": "<message>"}`. The client detects this
//! shape and surfaces it as [`ApiError::Server`] with status 400 so that
//! callers never have to inspect raw bodies themselves.

mod error;
mod helper;
mod http_client;
mod query_string;

pub use error::ApiError;
pub use helper::BlockchainApiHelper;
pub use http_client::BlockchainHttpClient;
pub use query_string::QueryString;
