use std::path::PathBuf;

use clap::Parser;

/// btc-rpc — call any Bitcoin Core JSON-RPC method by name.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Bitcoin Core RPC host.
    #[arg(long, default_value = "127.0.0.1", env = "BTC_RPC_HOST")]
    pub rpc_host: String,

    /// Bitcoin Core RPC port.
    #[arg(long, default_value = "8332", env = "BTC_RPC_PORT")]
    pub rpc_port: u16,

    /// RPC username.
    #[arg(long, env = "BTC_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "BTC_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Cookie file to read credentials from when no user/password is given.
    #[arg(long, env = "BTC_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Send the call to `/wallet/<NAME>` instead of the node root.
    #[arg(long)]
    pub rpc_wallet: Option<String>,

    /// Request timeout in seconds (fractions allowed).
    #[arg(long, value_parser = parse_timeout_secs)]
    pub timeout: Option<f64>,

    /// RPC method name, e.g. `getblockchaininfo`.
    pub method: String,

    /// Positional parameters. Each is sent as JSON when it parses as JSON,
    /// otherwise as a string. Negative numbers are values, not flags.
    #[arg(allow_negative_numbers = true)]
    pub params: Vec<String>,
}

fn parse_timeout_secs(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|e| format!("invalid timeout `{raw}`: {e}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got `{raw}`"));
    }
    Ok(secs)
}

/// Interpret a command line argument the way `bitcoin-cli` does: JSON when
/// it parses, a plain string otherwise.
pub fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}
