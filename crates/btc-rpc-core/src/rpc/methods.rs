use std::fmt;
use std::str::FromStr;

/// Node methods with a convenience accessor on [`super::BitcoinRpc`].
///
/// Each variant maps 1:1 to the literal RPC method name; calling the
/// accessor is the same as `call(method.as_str(), params)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetBlockchainInfo,
    GetBlockCount,
    GetBestBlockHash,
    GetBlockHash,
    GetNetworkInfo,
    Uptime,
    GetWalletInfo,
    ListWallets,
    CreateWallet,
    LoadWallet,
    UnloadWallet,
}

impl Method {
    pub const ALL: [Method; 11] = [
        Method::GetBlockchainInfo,
        Method::GetBlockCount,
        Method::GetBestBlockHash,
        Method::GetBlockHash,
        Method::GetNetworkInfo,
        Method::Uptime,
        Method::GetWalletInfo,
        Method::ListWallets,
        Method::CreateWallet,
        Method::LoadWallet,
        Method::UnloadWallet,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Method::GetBlockchainInfo => "getblockchaininfo",
            Method::GetBlockCount => "getblockcount",
            Method::GetBestBlockHash => "getbestblockhash",
            Method::GetBlockHash => "getblockhash",
            Method::GetNetworkInfo => "getnetworkinfo",
            Method::Uptime => "uptime",
            Method::GetWalletInfo => "getwalletinfo",
            Method::ListWallets => "listwallets",
            Method::CreateWallet => "createwallet",
            Method::LoadWallet => "loadwallet",
            Method::UnloadWallet => "unloadwallet",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no convenience accessor for rpc method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}
