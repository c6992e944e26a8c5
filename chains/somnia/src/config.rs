use crate::tokens::TestToken;
use crate::utils::random::MAX_START_DELAY_SECS;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use core_logic::config::ChainConfig;
use core_logic::ConfigError;
use ethers::types::Address;
use serde::Deserialize;

/// Runtime settings. Every field has a default pointing at the public Somnia
/// testnet, so an empty `config.toml` is a valid configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SomniaConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub faucet_url: String,
    pub ping_token_address: String,
    pub pong_token_address: String,
    pub swap_router_address: String,
    /// Explorer prefix; a transaction hash is appended to build a link.
    pub tx_link_prefix: String,
    pub max_concurrency: usize,
    /// Upper bound of the random per-wallet startup delay, in seconds.
    pub max_start_delay_secs: f64,
    /// Fixed pause between workflow stages.
    pub step_delay_ms: u64,
    /// Whole tokens minted per mint call (18 decimals).
    pub mint_amount: u64,
    /// Pool fee tier passed to `exactInputSingle`.
    pub swap_fee: u32,
    pub private_key_file: String,
    pub proxy_file: String,
}

impl Default for SomniaConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://dream-rpc.somnia.network".to_string(),
            chain_id: 50312,
            faucet_url: "https://testnet.somnia.network/api/faucet".to_string(),
            ping_token_address: "0xbecd9b5f373877881d91cbdbaf013d97eb532154".to_string(),
            pong_token_address: "0x7968ac15a72629e05f41b8271e4e7292e0cc9f90".to_string(),
            swap_router_address: "0x6aac14f090a35eea150705f72d90e4cdc4a49b2c".to_string(),
            tx_link_prefix: "https://shannon-explorer.somnia.network/tx/".to_string(),
            max_concurrency: 1,
            max_start_delay_secs: 60.0,
            step_delay_ms: 5000,
            mint_amount: 1000,
            swap_fee: 500,
            private_key_file: core_logic::WalletManager::PV_FILE.to_string(),
            proxy_file: core_logic::ProxyManager::PROXY_FILE.to_string(),
        }
    }
}

impl SomniaConfig {
    /// Layers the TOML file (optional) under `SOMNIA_*` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SOMNIA").try_parsing(true))
            .build()?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=MAX_START_DELAY_SECS).contains(&self.max_start_delay_secs) {
            return Err(ConfigError::InvalidValue {
                field: "max_start_delay_secs".to_string(),
                reason: format!(
                    "{} is outside 0..={} seconds",
                    self.max_start_delay_secs, MAX_START_DELAY_SECS
                ),
            });
        }
        if reqwest::Url::parse(&self.rpc_url).is_err() {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.rpc_url.clone(),
            });
        }
        if reqwest::Url::parse(&self.faucet_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "faucet_url".to_string(),
                reason: format!("'{}' is not a URL", self.faucet_url),
            });
        }
        for (field, value) in [
            ("ping_token_address", &self.ping_token_address),
            ("pong_token_address", &self.pong_token_address),
            ("swap_router_address", &self.swap_router_address),
        ] {
            parse_address(field, value)?;
        }
        Ok(())
    }

    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            name: "Somnia Shannon Testnet".to_string(),
            rpc_endpoint: self.rpc_url.clone(),
            chain_id: self.chain_id,
        }
    }

    pub fn token_address(&self, token: TestToken) -> Result<Address, ConfigError> {
        match token {
            TestToken::Ping => parse_address("ping_token_address", &self.ping_token_address),
            TestToken::Pong => parse_address("pong_token_address", &self.pong_token_address),
        }
    }

    pub fn router_address(&self) -> Result<Address, ConfigError> {
        parse_address("swap_router_address", &self.swap_router_address)
    }

    pub fn step_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.step_delay_ms)
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    value.parse::<Address>().map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{}' is not an address: {}", value, e),
    })
}
