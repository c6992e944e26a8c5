use crate::abi::{SWAP_ROUTER_ABI, TEST_TOKEN_ABI};
use crate::config::SomniaConfig;
use crate::identity::Identity;
use crate::tokens::{SwapDirection, TestToken};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use core_logic::{NetworkError, ProxyConfig};
use ethers::prelude::*;
use ethers::utils::{parse_ether, parse_units, to_checksum};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const TOKEN_DECIMALS: u32 = 18;
const FAUCET_TIMEOUT: Duration = Duration::from_secs(10);
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Every side effect a wallet workflow can trigger.
///
/// On-chain methods return only after the transaction is mined with a
/// success status.
#[async_trait]
pub trait ChainActions: Send + Sync {
    fn address(&self) -> Address;

    async fn native_balance(&self) -> Result<U256>;

    /// POSTs the wallet address to the native-token faucet; returns the body.
    async fn claim_faucet(&self) -> Result<String>;

    async fn mint(&self, token: TestToken) -> Result<TxHash>;

    /// Swaps `amount` whole tokens through the router.
    async fn swap(&self, direction: SwapDirection, amount: u64) -> Result<TxHash>;

    /// Sends `amount` (decimal string in ether units) to `to`.
    async fn send_native(&self, to: Address, amount: &str) -> Result<TxHash>;
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Per-wallet connection: JSON-RPC provider with signer, faucet HTTP client and
/// contract handles, all routed through the wallet's proxy.
pub struct SomniaClient {
    client: Arc<SignerClient>,
    http: Client,
    faucet_url: String,
    log_tag: String,
    mint_amount: U256,
    swap_fee: u32,
    ping: Contract<SignerClient>,
    pong: Contract<SignerClient>,
    router: Contract<SignerClient>,
}

impl SomniaClient {
    pub fn connect(
        config: &SomniaConfig,
        identity: &Identity,
        proxy_config: Option<&ProxyConfig>,
        log_tag: String,
    ) -> Result<Self> {
        let http = build_http_client(proxy_config)?;

        let provider = Provider::new(Http::new_with_client(
            reqwest::Url::parse(&config.rpc_url)?,
            http.clone(),
        ))
        .interval(RECEIPT_POLL_INTERVAL);

        let wallet = identity.wallet.clone().with_chain_id(config.chain_id);
        let client = Arc::new(SignerMiddleware::new(provider, wallet));

        let token_abi: abi::Abi = serde_json::from_str(TEST_TOKEN_ABI)?;
        let router_abi: abi::Abi = serde_json::from_str(SWAP_ROUTER_ABI)?;

        let ping = Contract::new(
            config.token_address(TestToken::Ping)?,
            token_abi.clone(),
            client.clone(),
        );
        let pong = Contract::new(
            config.token_address(TestToken::Pong)?,
            token_abi,
            client.clone(),
        );
        let router = Contract::new(config.router_address()?, router_abi, client.clone());

        let mint_amount = parse_units(config.mint_amount, TOKEN_DECIMALS)
            .context("Invalid mint amount")?
            .into();

        Ok(Self {
            client,
            http,
            faucet_url: config.faucet_url.clone(),
            log_tag,
            mint_amount,
            swap_fee: config.swap_fee,
            ping,
            pong,
            router,
        })
    }

    fn token(&self, token: TestToken) -> &Contract<SignerClient> {
        match token {
            TestToken::Ping => &self.ping,
            TestToken::Pong => &self.pong,
        }
    }

    /// Logs the submitted hash, then blocks until the receipt arrives.
    async fn confirm(&self, pending: PendingTransaction<'_, Http>, what: &str) -> Result<TxHash> {
        let tx_hash = *pending;
        info!(
            "{} 🔄 {} submitted: {:?}, waiting for receipt",
            self.log_tag, what, tx_hash
        );

        let receipt = pending
            .await
            .with_context(|| format!("Failed waiting for {} receipt", what))?
            .with_context(|| format!("{} transaction {:?} was dropped", what, tx_hash))?;

        if receipt.status != Some(U64::from(1)) {
            bail!("{} transaction {:?} reverted", what, tx_hash);
        }
        Ok(tx_hash)
    }
}

#[async_trait]
impl ChainActions for SomniaClient {
    fn address(&self) -> Address {
        self.client.address()
    }

    async fn native_balance(&self) -> Result<U256> {
        self.client
            .get_balance(self.address(), None)
            .await
            .context("Failed to query native balance")
    }

    async fn claim_faucet(&self) -> Result<String> {
        let body = serde_json::json!({ "address": to_checksum(&self.address(), None) });

        let response = self
            .http
            .post(&self.faucet_url)
            .headers(faucet_headers())
            .json(&body)
            .timeout(FAUCET_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::Error::new(NetworkError::Timeout {
                        timeout_ms: FAUCET_TIMEOUT.as_millis() as u64,
                        endpoint: self.faucet_url.clone(),
                    })
                } else {
                    anyhow::Error::new(e).context("Faucet request failed")
                }
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(text);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NetworkError::RateLimited {
                endpoint: self.faucet_url.clone(),
                retry_after,
            }
            .into());
        }
        Err(NetworkError::HttpError {
            status_code: status.as_u16(),
            endpoint: self.faucet_url.clone(),
            reason: faucet_error_reason(&text),
        }
        .into())
    }

    async fn mint(&self, token: TestToken) -> Result<TxHash> {
        let call = self
            .token(token)
            .method::<_, ()>("mint", (self.address(), self.mint_amount))?;
        let pending = call
            .send()
            .await
            .with_context(|| format!("{} mint rejected", token))?;
        self.confirm(pending, &format!("{} mint", token)).await
    }

    async fn swap(&self, direction: SwapDirection, amount: u64) -> Result<TxHash> {
        let token_in = self.token(direction.token_in()).address();
        let token_out = self.token(direction.token_out()).address();
        let amount_in: U256 = parse_units(amount, TOKEN_DECIMALS)
            .context("Invalid swap amount")?
            .into();

        // (tokenIn, tokenOut, fee, recipient, amountIn, amountOutMinimum, sqrtPriceLimitX96)
        let params = (
            token_in,
            token_out,
            self.swap_fee,
            self.address(),
            amount_in,
            U256::zero(),
            U256::zero(),
        );
        let call = self
            .router
            .method::<_, U256>("exactInputSingle", (params,))?;
        let pending = call
            .send()
            .await
            .with_context(|| format!("Swap {} rejected", direction))?;
        self.confirm(pending, &format!("Swap {}", direction)).await
    }

    async fn send_native(&self, to: Address, amount: &str) -> Result<TxHash> {
        let value = parse_ether(amount).with_context(|| format!("Invalid amount {}", amount))?;
        let tx = TransactionRequest::new()
            .to(to)
            .value(value)
            .from(self.address());

        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .context("Transfer rejected")?;
        self.confirm(pending, "Transfer").await
    }
}

pub(crate) fn build_http_client(proxy_config: Option<&ProxyConfig>) -> Result<Client> {
    let mut client_builder = Client::builder();
    if let Some(proxy_conf) = proxy_config {
        let mut proxy = reqwest::Proxy::all(&proxy_conf.url).context("Invalid proxy URL")?;
        if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
            proxy = proxy.basic_auth(u, p);
        }
        client_builder = client_builder.proxy(proxy);
    }
    Ok(client_builder.build()?)
}

fn faucet_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("priority", HeaderValue::from_static("u=1, i"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            r#""Not)A;Brand";v="99", "Google Chrome";v="133", "Chromium";v="133""#,
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static(r#""Windows""#));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36",
        ),
    );
    headers
}

/// Faucet rejections carry `{"error": "..."}`; fall back to the raw body.
pub(crate) fn faucet_error_reason(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

    match parsed {
        Some(reason) => reason,
        None if body.trim().is_empty() => "empty response".to_string(),
        None => body.chars().take(200).collect(),
    }
}
