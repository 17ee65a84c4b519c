//! # prpc CLI Entry Point
//!
//! Command-line front-end for querying pods over their JSON-RPC interface.
//!
//! ## Usage
//!
//! ```bash
//! # List the pods known to a node
//! prpc pods 192.0.2.10
//!
//! # Same, with per-pod stats embedded
//! prpc pods 192.0.2.10 --with-stats
//!
//! # Runtime counters of one node
//! prpc stats 192.0.2.10
//!
//! # Locate a pod by pubkey through the default seeds
//! prpc find 7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU
//!
//! # Locate a pod through a custom seed list
//! prpc find <pubkey> --seed 198.51.100.7 --seed 198.51.100.8
//! ```
//!
//! Results are printed as raw JSON on stdout. Logs go to stderr and are
//! silent below `warn` unless `RUST_LOG` says otherwise.

use anyhow::Result;
use argh::FromArgs;
use prpc_client::{ClientConfig, Discovery, DiscoveryOptions, PrpcClient, DEFAULT_TIMEOUT_MS};
use std::time::Duration;

/// Environment variable supplying the default timeout
const TIMEOUT_ENV: &str = "PRPC_TIMEOUT_MS";

#[derive(FromArgs)]
/// prpc - query pods over JSON-RPC
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Pods(PodsArgs),
    Stats(StatsArgs),
    Find(FindArgs),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "pods")]
/// list the pods known to a node
struct PodsArgs {
    /// address of the node to query (bare host, port 6000 is implied)
    #[argh(positional)]
    address: String,

    /// use get-pods-with-stats instead of get-pods
    #[argh(switch)]
    with_stats: bool,

    /// per-call timeout in milliseconds
    ///
    /// Defaults to $PRPC_TIMEOUT_MS, then 5000.
    #[argh(option, long = "timeout-ms")]
    timeout_ms: Option<u64>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "stats")]
/// show a node's runtime counters
struct StatsArgs {
    /// address of the node to query (bare host, port 6000 is implied)
    #[argh(positional)]
    address: String,

    /// per-call timeout in milliseconds
    #[argh(option, long = "timeout-ms")]
    timeout_ms: Option<u64>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "find")]
/// locate a pod by pubkey through the seed nodes
struct FindArgs {
    /// pubkey of the pod to find
    #[argh(positional)]
    pubkey: String,

    /// seed to query instead of the default list (repeatable)
    ///
    /// When given, any --add-seed is ignored.
    #[argh(option, long = "seed")]
    seeds: Vec<String>,

    /// seed to query in addition to the default list (repeatable)
    #[argh(option, long = "add-seed")]
    add_seeds: Vec<String>,

    /// per-seed timeout in milliseconds
    #[argh(option, long = "timeout-ms")]
    timeout_ms: Option<u64>,
}

impl FindArgs {
    fn options(&self, timeout: Duration) -> DiscoveryOptions {
        let options = DiscoveryOptions::default()
            .with_added_seeds(self.add_seeds.iter().cloned())
            .with_timeout(timeout);

        if self.seeds.is_empty() {
            options
        } else {
            options.with_replaced_seeds(self.seeds.iter().cloned())
        }
    }
}

/// Resolves the call timeout: flag, then environment, then the default.
fn resolve_timeout(flag: Option<u64>, env: Option<String>) -> Result<Duration> {
    let millis = match (flag, env) {
        (Some(ms), _) => ms,
        (None, Some(raw)) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", TIMEOUT_ENV, raw, e))?,
        (None, None) => DEFAULT_TIMEOUT_MS,
    };

    if millis == 0 {
        return Err(anyhow::anyhow!("Timeout must be greater than zero"));
    }

    Ok(Duration::from_millis(millis))
}

fn client_for(address: &str, timeout_ms: Option<u64>) -> Result<PrpcClient> {
    let timeout = resolve_timeout(timeout_ms, std::env::var(TIMEOUT_ENV).ok())?;
    let client = PrpcClient::with_config(address, ClientConfig::default().with_timeout(timeout))?;
    tracing::debug!("Querying {} (timeout {:?})", client.endpoint(), timeout);
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Logs go to stderr so stdout stays pipeable JSON
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Pods(args) => {
            let client = client_for(&args.address, args.timeout_ms)?;
            let pods = if args.with_stats {
                client.get_pods_with_stats().await?
            } else {
                client.get_pods().await?
            };
            tracing::info!("Received {} of {} pods", pods.pods.len(), pods.total_count);
            println!("{}", serde_json::to_string(&pods)?);
        }
        Commands::Stats(args) => {
            let client = client_for(&args.address, args.timeout_ms)?;
            let stats = client.get_stats().await?;
            println!("{}", serde_json::to_string(&stats)?);
        }
        Commands::Find(args) => {
            let timeout = resolve_timeout(args.timeout_ms, std::env::var(TIMEOUT_ENV).ok())?;
            let options = args.options(timeout);
            let discovery = Discovery::default();
            tracing::info!(
                "Searching {} seeds for {}",
                discovery.effective_seeds(&options).len(),
                args.pubkey
            );
            let pod = discovery.find_pnode(&args.pubkey, &options).await?;
            println!("{}", serde_json::to_string(&pod)?);
        }
    }

    Ok(())
}
