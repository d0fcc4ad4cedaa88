//! Bitcoin Core RPC abstraction layer.
//!
//! Defines the [`BitcoinRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) plus a test mock (`mock::MockRpc`).

mod http_adapter;
pub mod methods;
#[cfg(test)]
pub mod mock;
pub mod timeout;
pub mod types;

pub use http_adapter::HttpRpcClient;
pub use methods::Method;
pub use timeout::{DefaultTimeout, TimeoutSource, FALLBACK_TIMEOUT};
pub use types::{ChainInfo, RawResponse};

use async_trait::async_trait;
use bitcoin::BlockHash;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Generic method dispatch against a node.
///
/// `call` is the only required operation: any method name is sent as-is and
/// `params` become the positional JSON-RPC `params` array. The provided
/// accessors are shorthands that go through `call` with the name from
/// [`Method`] and decode the result.
#[async_trait]
pub trait BitcoinRpc: Send + Sync {
    /// Invoke `method` and return the raw `result` member.
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError>;

    async fn call_method(
        &self,
        method: Method,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.call(method.as_str(), params).await
    }

    /// Fetch basic chain info (network, block count, pruning status).
    async fn get_blockchain_info(&self) -> Result<ChainInfo, CoreError> {
        let raw = self.call_method(Method::GetBlockchainInfo, Vec::new()).await?;
        decode_result(Method::GetBlockchainInfo.as_str(), raw)
    }

    async fn get_block_count(&self) -> Result<u64, CoreError> {
        let raw = self.call_method(Method::GetBlockCount, Vec::new()).await?;
        decode_result(Method::GetBlockCount.as_str(), raw)
    }

    async fn get_best_block_hash(&self) -> Result<BlockHash, CoreError> {
        let raw = self.call_method(Method::GetBestBlockHash, Vec::new()).await?;
        decode_result(Method::GetBestBlockHash.as_str(), raw)
    }

    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, CoreError> {
        let raw = self
            .call_method(Method::GetBlockHash, vec![serde_json::json!(height)])
            .await?;
        decode_result(Method::GetBlockHash.as_str(), raw)
    }

    async fn get_network_info(&self) -> Result<serde_json::Value, CoreError> {
        self.call_method(Method::GetNetworkInfo, Vec::new()).await
    }

    /// Seconds since the node started.
    async fn uptime(&self) -> Result<u64, CoreError> {
        let raw = self.call_method(Method::Uptime, Vec::new()).await?;
        decode_result(Method::Uptime.as_str(), raw)
    }

    /// Only meaningful on a wallet-scoped client.
    async fn get_wallet_info(&self) -> Result<serde_json::Value, CoreError> {
        self.call_method(Method::GetWalletInfo, Vec::new()).await
    }

    async fn list_wallets(&self) -> Result<Vec<String>, CoreError> {
        let raw = self.call_method(Method::ListWallets, Vec::new()).await?;
        decode_result(Method::ListWallets.as_str(), raw)
    }

    async fn create_wallet(&self, name: &str) -> Result<serde_json::Value, CoreError> {
        self.call_method(Method::CreateWallet, vec![serde_json::json!(name)])
            .await
    }

    async fn load_wallet(&self, name: &str) -> Result<serde_json::Value, CoreError> {
        self.call_method(Method::LoadWallet, vec![serde_json::json!(name)])
            .await
    }

    async fn unload_wallet(&self, name: &str) -> Result<serde_json::Value, CoreError> {
        self.call_method(Method::UnloadWallet, vec![serde_json::json!(name)])
            .await
    }
}

/// Decode a `result` member into `T`, naming `method` on failure.
pub fn decode_result<T: DeserializeOwned>(
    method: &str,
    raw: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(raw).map_err(|source| CoreError::InvalidResult {
        method: method.to_owned(),
        source,
    })
}
