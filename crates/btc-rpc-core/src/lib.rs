pub mod config;
pub mod error;
pub mod rpc;

pub use config::RpcConfig;
pub use error::{CoreError, RpcError};
pub use rpc::{BitcoinRpc, DefaultTimeout, HttpRpcClient, Method};
