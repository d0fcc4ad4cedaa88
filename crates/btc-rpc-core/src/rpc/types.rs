//! Values exchanged with the node that are not part of the error model.
//!
//! [`RawResponse`] is the transport-level view of one HTTP reply;
//! [`ChainInfo`] is the typed result of `getblockchaininfo`.

use bitcoin::BlockHash;
use reqwest::header::HeaderMap;
use serde::Deserialize;

// ==============================================================================
// Raw Response
// ==============================================================================

/// Status, body and headers of a single HTTP reply, before any JSON-RPC
/// interpretation. The body is kept as raw bytes because it may not be JSON.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    status_code: Option<u16>,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
}

impl RawResponse {
    pub fn new(status_code: Option<u16>, body: Option<Vec<u8>>) -> Self {
        Self {
            status_code,
            body,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The body bytes, or `None` when the reply had no body.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_success(&self) -> bool {
        self.status_code
            .is_some_and(|status| (200..300).contains(&status))
    }
}

// ==============================================================================
// Chain Info
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    pub pruned: bool,
}
