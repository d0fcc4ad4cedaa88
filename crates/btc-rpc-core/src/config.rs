//! Connection parameters for [`crate::rpc::HttpRpcClient`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::rpc::DefaultTimeout;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8332;

/// Everything needed to reach a node.
///
/// Authentication precedence:
/// 1. explicit `user` + `password`
/// 2. cookie file (`username:password`) from `cookie_file`
/// 3. no auth
#[derive(Clone)]
pub struct RpcConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cookie_file: Option<PathBuf>,
    /// Instance timeout; overrides `default_timeout` when set.
    pub timeout: Option<Duration>,
    pub default_timeout: DefaultTimeout,
    /// Empty means calls go to the node root rather than a wallet endpoint.
    pub wallet_name: String,
}

impl RpcConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            user: None,
            password: None,
            cookie_file: None,
            timeout: None,
            default_timeout: DefaultTimeout::new(),
            wallet_name: String::new(),
        }
    }

    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share a default-timeout handle with other clients.
    pub fn with_default_timeout(mut self, default_timeout: DefaultTimeout) -> Self {
        self.default_timeout = default_timeout;
        self
    }

    pub fn with_wallet(mut self, wallet_name: impl Into<String>) -> Self {
        self.wallet_name = wallet_name.into();
        self
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cookie_file", &self.cookie_file)
            .field("timeout", &self.timeout)
            .field("default_timeout", &self.default_timeout.get())
            .field("wallet_name", &self.wallet_name)
            .finish()
    }
}
