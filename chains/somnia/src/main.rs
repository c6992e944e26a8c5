use somnia_project::config::SomniaConfig;
use somnia_project::identity::build_queue;
use somnia_project::workflow::run_wallet;

use anyhow::{bail, Result};
use clap::Parser;
use core_logic::{setup_logger, ProxyManager, WalletManager, WorkerRunner};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    /// Maximum number of wallets processed at the same time
    #[arg(short, long)]
    workers: Option<usize>,
    /// Private key file, one hex key per line
    #[arg(short, long)]
    keys: Option<String>,
    /// Proxy file, `ip:port[:user:pass]` or full URL per line
    #[arg(short, long)]
    proxies: Option<String>,
    /// Upper bound of the random startup delay per wallet, in seconds
    #[arg(long)]
    max_start_delay: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();

    info!("==================================================");
    info!("   Somnia Testnet Bot");
    info!("==================================================");
    info!("Loading config from: {}", args.config);

    let mut config = SomniaConfig::load(&args.config)?;
    if let Some(workers) = args.workers {
        config.max_concurrency = workers;
    }
    if let Some(keys) = args.keys {
        config.private_key_file = keys;
    }
    if let Some(proxies) = args.proxies {
        config.proxy_file = proxies;
    }
    if let Some(delay) = args.max_start_delay {
        config.max_start_delay_secs = delay;
    }
    config.validate()?;

    let chain = config.chain_config();
    info!(
        "Configuration loaded for {} (chain ID: {}, RPC: {})",
        chain.name, chain.chain_id, chain.rpc_endpoint
    );

    let manager = WalletManager::from_file(&config.private_key_file)?;
    if manager.is_empty() {
        error!(
            "No private keys found in {}. Add one hex key per line.",
            config.private_key_file
        );
        bail!("no wallets to process");
    }
    info!("Found {} wallets.", manager.count());

    let proxies = ProxyManager::load_proxies(&config.proxy_file)?;
    if proxies.is_empty() {
        info!("No proxies loaded, wallets will connect directly.");
    } else {
        info!("Loaded {} proxies for rotation.", proxies.len());
    }

    let queue = build_queue(manager.into_keys(), &proxies);
    let max_workers = config.max_concurrency;
    let config = Arc::new(config);

    let report = WorkerRunner::run(queue, max_workers, move |worker_id, wallet| {
        run_wallet(worker_id, config.clone(), wallet)
    })
    .await?;

    info!(
        "Done: {} wallets finished, {} not started.",
        report.finished(),
        report.skipped
    );
    Ok(())
}
