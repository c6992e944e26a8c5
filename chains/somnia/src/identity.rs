use anyhow::{Context, Result};
use core_logic::{ProxyConfig, ProxyManager, WalletKey};
use ethers::prelude::*;

/// One entry of the dispatch queue: the raw key at its file position plus the
/// proxy picked for that position.
#[derive(Debug, Clone)]
pub struct QueuedWallet {
    pub position: usize,
    pub key: WalletKey,
    pub proxy: Option<ProxyConfig>,
    pub proxy_index: Option<usize>,
}

impl QueuedWallet {
    /// `[P:003]` style id for logs; never includes the proxy URL or credentials.
    pub fn proxy_id(&self) -> String {
        self.proxy_index
            .map(|i| format!("{:03}", i + 1))
            .unwrap_or_else(|| "DIR".to_string())
    }
}

/// Pairs every key with the proxy at `position mod proxies.len()`.
pub fn build_queue(keys: Vec<WalletKey>, proxies: &[ProxyConfig]) -> Vec<QueuedWallet> {
    keys.into_iter()
        .enumerate()
        .map(|(position, key)| QueuedWallet {
            position,
            key,
            proxy: ProxyManager::assign(proxies, position).cloned(),
            proxy_index: (!proxies.is_empty()).then(|| position % proxies.len()),
        })
        .collect()
}

/// A signing wallet and its address.
#[derive(Debug, Clone)]
pub struct Identity {
    pub position: usize,
    pub wallet: LocalWallet,
}

impl Identity {
    pub fn from_key(position: usize, key: &WalletKey) -> Result<Self> {
        let hex = key
            .validated()
            .with_context(|| format!("Private key #{} is malformed", position + 1))?;
        let wallet = hex
            .parse::<LocalWallet>()
            .with_context(|| format!("Private key #{} is not a valid secp256k1 key", position + 1))?;
        Ok(Self { position, wallet })
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
