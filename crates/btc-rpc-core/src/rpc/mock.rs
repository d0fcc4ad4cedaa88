use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};

use super::BitcoinRpc;

/// A mock node for testing. Returns canned results per method name and
/// records every call; unknown methods fail the way Bitcoin Core does.
pub struct MockRpc {
    responses: HashMap<String, Result<serde_json::Value, RpcError>>,
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            responses: HashMap::new(),
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

pub struct MockRpcBuilder {
    responses: HashMap<String, Result<serde_json::Value, RpcError>>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, method: &str, result: serde_json::Value) -> Self {
        self.responses.insert(method.to_owned(), Ok(result));
        self
    }

    pub fn with_error(mut self, method: &str, error: RpcError) -> Self {
        self.responses.insert(method.to_owned(), Err(error));
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BitcoinRpc for MockRpc {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params));

        match self.responses.get(method) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(err)) => Err(err.clone().into()),
            None => Err(RpcError::from_parts(
                format!("rpc call `{method}` failed"),
                Some(500),
                Some(-32601),
                Some("Method not found".to_owned()),
            )
            .into()),
        }
    }
}
