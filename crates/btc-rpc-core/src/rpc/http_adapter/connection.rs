use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// Basic-auth credentials for the node, if any.
///
/// Explicit user and password win; otherwise the cookie file bitcoind writes
/// next to its data directory is read. Neither means anonymous requests.
pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<(String, String)>, CoreError> {
    match (user, pass, cookie_file) {
        (Some(user), Some(pass), _) => Ok(Some((user.to_owned(), pass.to_owned()))),
        (Some(_), None, _) => Err(CoreError::Config("rpc user given without a password".into())),
        (None, Some(_), _) => Err(CoreError::Config("rpc password given without a user".into())),
        (None, None, Some(path)) => read_cookie(path).map(Some),
        (None, None, None) => Ok(None),
    }
}

/// Parse the `user:password` pair from the first line of a cookie file.
fn read_cookie(path: &Path) -> Result<(String, String), CoreError> {
    let invalid = |reason: &str| {
        CoreError::Config(format!("cookie file {}: {reason}", path.display()))
    };

    let content = std::fs::read_to_string(path).map_err(|e| invalid(&e.to_string()))?;
    let first_line = content.lines().next().unwrap_or_default().trim();
    match first_line.split_once(':') {
        Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
            Ok((user.to_owned(), pass.to_owned()))
        }
        Some(_) => Err(invalid("user and password must both be non-empty")),
        None if first_line.is_empty() => Err(invalid("no credentials on the first line")),
        None => Err(invalid("expected `user:password`")),
    }
}

/// `http://{host}:{port}/`
pub(super) fn base_url(host: &str, port: u16) -> Result<Url, CoreError> {
    if host.is_empty() {
        return Err(CoreError::Config("rpc host must not be empty".to_owned()));
    }
    let raw = format!("http://{host}:{port}/");
    Url::parse(&raw)
        .map_err(|e| CoreError::Config(format!("invalid rpc endpoint `{raw}`: {e}")))
}

/// The endpoint a call is posted to. An empty wallet name means the node root.
pub(super) fn endpoint_url(base: &Url, wallet_name: &str) -> Url {
    let mut url = base.clone();
    if wallet_name.is_empty() {
        return url;
    }
    // http(s) URLs always have a path, so this cannot be a cannot-be-a-base URL.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("wallet").push(wallet_name);
    }
    url
}
