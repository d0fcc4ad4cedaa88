use crate::error::{CoreError, RpcError};

use super::super::types::RawResponse;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Turn a raw node reply into the call's `result`.
///
/// - non-2xx status: [`RpcError`] decoded from whatever body there is
/// - 2xx with an undecodable body: [`CoreError::MalformedResponse`]
/// - 2xx with a non-null `error`: [`RpcError`]
/// - otherwise the `result` member (`null` when absent)
pub(super) fn interpret_response(
    method: &str,
    raw: &RawResponse,
) -> Result<serde_json::Value, CoreError> {
    if !raw.is_success() {
        return Err(RpcError::from_response(failure_message(method), raw).into());
    }

    let decoded: JsonRpcResponse = raw
        .body()
        .and_then(|body| serde_json::from_slice(body).ok())
        .ok_or_else(|| {
            CoreError::MalformedResponse(RpcError::from_response(
                format!("rpc call `{method}` returned an undecodable body"),
                raw,
            ))
        })?;

    if decoded.error.is_some() {
        return Err(RpcError::from_response(failure_message(method), raw).into());
    }

    Ok(decoded.result.unwrap_or(serde_json::Value::Null))
}

fn failure_message(method: &str) -> String {
    format!("rpc call `{method}` failed")
}
