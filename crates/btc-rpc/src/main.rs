mod cli;

use std::time::Duration;

use btc_rpc_core::{BitcoinRpc, CoreError, HttpRpcClient, RpcConfig};
use clap::Parser;
use eyre::{eyre, WrapErr};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = RpcConfig::new(args.rpc_host.clone(), args.rpc_port);
    config.user = args.rpc_user.clone();
    config.password = args.rpc_pass.clone();
    config.cookie_file = args.rpc_cookie_file.clone();
    config.timeout = args.timeout.map(Duration::from_secs_f64);
    if let Some(wallet) = &args.rpc_wallet {
        config.wallet_name = wallet.clone();
    }

    let rpc = HttpRpcClient::new(config).context("configure RPC client")?;
    let params = args.params.iter().map(|p| cli::parse_param(p)).collect();

    tracing::debug!(url = %rpc.url(), method = %args.method, "dispatching rpc call");
    let result = rpc
        .call(&args.method, params)
        .await
        .map_err(|err| describe_failure(&args.method, err))?;

    println!("{}", render_result(&result)?);
    Ok(())
}

/// Results are always printed as pretty JSON, strings included.
fn render_result(result: &serde_json::Value) -> eyre::Result<String> {
    serde_json::to_string_pretty(result).context("render result")
}

/// Node-reported failures print the node's own code and message first, the
/// way `bitcoin-cli` does; everything else keeps its error chain.
fn describe_failure(method: &str, err: CoreError) -> eyre::Report {
    if let CoreError::Rpc(rpc) = &err {
        return eyre!(
            "error code: {}\nerror message:\n{}",
            rpc.error_code(),
            rpc.error_msg()
        )
        .wrap_err(format!(
            "rpc call `{method}` failed (http status {})",
            rpc.status_code()
        ));
    }
    eyre::Report::new(err).wrap_err(format!("rpc call `{method}` failed"))
}
