//! Native JSON-RPC client for Bitcoin Core compatible endpoints.
//!
//! Implements [`BitcoinRpc`](super::BitcoinRpc) over HTTP using `reqwest`,
//! with basic or cookie-file auth, wallet-scoped endpoints and per-call
//! timeout resolution.

mod client;
mod connection;
mod protocol;

pub use client::HttpRpcClient;
