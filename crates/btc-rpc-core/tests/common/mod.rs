//! In-process stand-in for a Bitcoin Core JSON-RPC endpoint.
//!
//! Speaks just enough of the protocol for client tests: basic auth, the
//! node root and `/wallet/{name}`, canned results, node-shaped error
//! objects, a slow method for timeout tests and a few broken replies.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use btc_rpc_core::RpcConfig;
use serde_json::{json, Value};

pub const RPC_USER: &str = "alice";
pub const RPC_PASS: &str = "secret";
/// `Basic base64("alice:secret")`
const EXPECTED_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

pub const LOADED_WALLET: &str = "hot";
pub const WALLET_NOT_FOUND: &str = "Requested wallet does not exist or is not loaded";
pub const BEST_BLOCK_HASH: &str =
    "0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206";

/// How long `createwallet` takes to answer.
pub const SLOW_METHOD_DELAY: Duration = Duration::from_millis(500);

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("btc_rpc_core=debug")),
            )
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct NodeState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockNode {
    pub port: u16,
    state: NodeState,
}

impl MockNode {
    pub async fn start() -> Self {
        init_tracing();

        let state = NodeState::default();
        let router = Router::new()
            .route("/", post(root))
            .route("/wallet/{name}", post(wallet))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock node must bind");
        let port = listener
            .local_addr()
            .expect("mock node must have a local address")
            .port();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock node must serve");
        });

        Self { port, state }
    }

    /// Config pointing at this node with valid credentials.
    pub fn config(&self) -> RpcConfig {
        RpcConfig::new("127.0.0.1", self.port).with_credentials(RPC_USER, RPC_PASS)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("request log poisoned")
            .clone()
    }
}

async fn root(State(state): State<NodeState>, headers: HeaderMap, body: String) -> Response {
    respond(&state, None, &headers, &body).await
}

async fn wallet(
    State(state): State<NodeState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    respond(&state, Some(name), &headers, &body).await
}

async fn respond(
    state: &NodeState,
    wallet: Option<String>,
    headers: &HeaderMap,
    body: &str,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(EXPECTED_AUTH);
    if !authorized {
        // bitcoind answers bad credentials with an empty 401.
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let request: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    state
        .requests
        .lock()
        .expect("request log poisoned")
        .push(RecordedRequest {
            path: match &wallet {
                Some(name) => format!("/wallet/{name}"),
                None => "/".to_owned(),
            },
            accept: header_str(header::ACCEPT),
            content_type: header_str(header::CONTENT_TYPE),
            body: request.clone(),
        });

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let params = request.get("params").cloned().unwrap_or_else(|| json!([]));
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if let Some(name) = &wallet {
        if name != LOADED_WALLET {
            return rpc_error(StatusCode::INTERNAL_SERVER_ERROR, -18, WALLET_NOT_FOUND, id);
        }
    }

    match method {
        "getblockchaininfo" => rpc_result(
            json!({
                "chain": "regtest",
                "blocks": 101,
                "headers": 101,
                "bestblockhash": BEST_BLOCK_HASH,
                "pruned": false,
            }),
            id,
        ),
        "getblockcount" => rpc_result(json!(101), id),
        "getwalletinfo" => rpc_result(json!({ "walletname": wallet }), id),
        "echo" => rpc_result(params, id),
        "createwallet" => {
            tokio::time::sleep(SLOW_METHOD_DELAY).await;
            rpc_result(json!({ "name": params.get(0), "warning": "" }), id)
        }
        "garbage" => raw_reply(StatusCode::OK, "this is not json".to_owned()),
        "gateway" => raw_reply(
            StatusCode::BAD_GATEWAY,
            "<html><body>502 Bad Gateway</body></html>".to_owned(),
        ),
        "softerror" => rpc_error(StatusCode::OK, -8, "Invalid parameter", id),
        _ => rpc_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            -32601,
            "Method not found",
            id,
        ),
    }
}

fn rpc_result(result: Value, id: Value) -> Response {
    raw_reply(
        StatusCode::OK,
        json!({ "result": result, "error": null, "id": id }).to_string(),
    )
}

fn rpc_error(status: StatusCode, code: i64, message: &str, id: Value) -> Response {
    raw_reply(
        status,
        json!({ "result": null, "error": { "code": code, "message": message }, "id": id })
            .to_string(),
    )
}

fn raw_reply(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
