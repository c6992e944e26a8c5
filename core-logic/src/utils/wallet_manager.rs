use crate::error::{ConfigError, WalletError};
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw private key as read from disk. Wiped on drop, never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WalletKey(String);

impl WalletKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the key without `0x` prefix after checking it is 32 bytes of hex.
    pub fn validated(&self) -> Result<&str, WalletError> {
        let hex = self.0.strip_prefix("0x").unwrap_or(&self.0);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKeyFormat);
        }
        if hex.len() != 64 {
            return Err(WalletError::InvalidKeyLength { length: hex.len() });
        }
        Ok(hex)
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WalletKey(***REDACTED***)")
    }
}

pub struct WalletManager {
    keys: Vec<WalletKey>,
}

impl WalletManager {
    pub const PV_FILE: &'static str = "private_keys.txt";

    /// Loads one key per line; blank lines and `#` comments are skipped.
    /// Keys are not validated here so queue positions match file order.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            })
            .context("Failed to load private keys");
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        let manager = Self::parse(&content);
        info!("Loaded {} keys from {}", manager.count(), path.display());
        Ok(manager)
    }

    pub fn parse(content: &str) -> Self {
        let keys = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(WalletKey::new)
            .collect();
        Self { keys }
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<WalletKey> {
        self.keys
    }
}
