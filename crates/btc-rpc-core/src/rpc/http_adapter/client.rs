use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};
use tracing::{debug, error, trace};

use crate::config::RpcConfig;
use crate::error::CoreError;

use super::super::timeout::{format_timeout, resolve_timeout, DefaultTimeout};
use super::super::types::RawResponse;
use super::super::BitcoinRpc;
use super::connection::{base_url, endpoint_url, resolve_auth};
use super::protocol::{interpret_response, JsonRpcRequest};

/// Bitcoin Core JSON-RPC client over HTTP.
///
/// One request per call, no batching and no retries. A wallet-scoped client
/// obtained through [`HttpRpcClient::wallet`] shares the connection pool,
/// credentials and [`DefaultTimeout`] handle with its parent but nothing else.
pub struct HttpRpcClient {
    client: reqwest::Client,
    host: String,
    port: u16,
    base_url: Url,
    url: Url,
    auth: Option<(String, String)>,
    timeout: Option<Duration>,
    default_timeout: DefaultTimeout,
    wallet_name: String,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    pub fn new(config: RpcConfig) -> Result<Self, CoreError> {
        let auth = resolve_auth(
            config.user.as_deref(),
            config.password.as_deref(),
            config.cookie_file.as_deref(),
        )?;
        let base_url = base_url(&config.host, config.port)?;

        // Request timeouts are applied per call, see `execute`.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            url: endpoint_url(&base_url, &config.wallet_name),
            host: config.host,
            port: config.port,
            base_url,
            auth,
            timeout: config.timeout,
            default_timeout: config.default_timeout,
            wallet_name: config.wallet_name,
            next_id: AtomicU64::new(0),
        })
    }

    /// A client for `/wallet/{name}` on the same node. The receiver is left
    /// untouched; an empty `name` addresses the node root again.
    pub fn wallet(&self, name: &str) -> Self {
        Self {
            client: self.client.clone(),
            host: self.host.clone(),
            port: self.port,
            base_url: self.base_url.clone(),
            url: endpoint_url(&self.base_url, name),
            auth: self.auth.clone(),
            timeout: self.timeout,
            default_timeout: self.default_timeout.clone(),
            wallet_name: name.to_owned(),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn wallet_name(&self) -> &str {
        &self.wallet_name
    }

    /// The endpoint calls are posted to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Set or clear the instance timeout for subsequent calls.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn default_timeout(&self) -> &DefaultTimeout {
        &self.default_timeout
    }

    /// The timeout the next call without a per-call override would use.
    pub fn effective_timeout(&self) -> Duration {
        resolve_timeout(None, self.timeout, &self.default_timeout).0
    }

    /// Like [`BitcoinRpc::call`], but `timeout` wins over every other source
    /// for this one call.
    pub async fn call_with_timeout(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
        timeout: Duration,
    ) -> Result<serde_json::Value, CoreError> {
        self.execute(method, params, Some(timeout)).await
    }

    async fn execute(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
        per_call_timeout: Option<Duration>,
    ) -> Result<serde_json::Value, CoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (timeout, timeout_source) =
            resolve_timeout(per_call_timeout, self.timeout, &self.default_timeout);
        let params_json = render_params(&params);
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = %params_json,
            rpc.wallet = %self.wallet_name,
            rpc.timeout = %format_timeout(timeout),
            rpc.timeout_source = timeout_source.as_str(),
            "rpc call"
        );
        let req = JsonRpcRequest {
            method,
            params: &params,
            jsonrpc: "2.0",
            id,
        };

        let mut builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .timeout(timeout)
            .json(&req);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_failure(method, &params_json, timeout, e))?;
        let raw = read_raw_response(response)
            .await
            .map_err(|e| self.transport_failure(method, &params_json, timeout, e))?;

        let body_len = raw.body().map_or(0, <[u8]>::len);
        debug!(
            rpc.id = id,
            rpc.method = method,
            status = raw.status_code().unwrap_or_default(),
            body_len,
            "rpc response"
        );
        trace!(
            rpc.id = id,
            rpc.method = method,
            body = %String::from_utf8_lossy(raw.body().unwrap_or_default()),
            "rpc response body"
        );

        interpret_response(method, &raw)
    }

    /// Log a failed round trip at error level and wrap it. A timeout message
    /// always carries the effective timeout, e.g. `Timeout after 0.001`.
    fn transport_failure(
        &self,
        method: &str,
        params_json: &str,
        timeout: Duration,
        source: reqwest::Error,
    ) -> CoreError {
        let message = if source.is_timeout() {
            format!(
                "Timeout after {} while calling `{method}` on {}",
                format_timeout(timeout),
                self.url
            )
        } else if source.is_connect() {
            format!(
                "Connection to {} failed while calling `{method}`",
                self.url
            )
        } else {
            format!("Transport failure while calling `{method}` on {}", self.url)
        };
        error!(
            rpc.method = method,
            rpc.params = %params_json,
            rpc.timeout = %format_timeout(timeout),
            error = %source,
            "{message}"
        );
        CoreError::Transport { message, source }
    }
}

#[async_trait]
impl BitcoinRpc for HttpRpcClient {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.execute(method, params, None).await
    }
}

async fn read_raw_response(response: reqwest::Response) -> Result<RawResponse, reqwest::Error> {
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;
    let body = (!bytes.is_empty()).then(|| bytes.to_vec());
    Ok(RawResponse::new(Some(status), body).with_headers(headers))
}

fn render_params(params: &[serde_json::Value]) -> String {
    serde_json::to_string(params).unwrap_or_else(|e| format!("<unrenderable params: {e}>"))
}
