//! Seed-Based Pod Discovery
//!
//! Locates a pod by its public key without knowing its address, by asking a
//! set of well-known seed nodes for their pod lists.
//!
//! # Algorithm
//!
//! 1. Resolve the effective seed list: `replace_seeds` if given, otherwise
//!    the base seeds followed by `add_seeds`
//! 2. Query every seed concurrently with `get-pods`, one [`PrpcClient`] per
//!    seed
//! 3. Return the first pod, from whichever seed answers first, whose pubkey
//!    matches; the remaining attempts are aborted
//! 4. Fail with [`PrpcError::NodeNotFound`] once every seed has failed or
//!    answered without a match
//!
//! A failing seed (unreachable, timed out, malformed reply, no match) never
//! fails the discovery on its own, and is never retried.
//!
//! # Example
//!
//! ```no_run
//! use prpc_client::discovery::{find_pnode, DiscoveryOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> prpc_common::Result<()> {
//! let options = DiscoveryOptions::default()
//!     .with_added_seeds(["198.51.100.7"])
//!     .with_timeout(Duration::from_secs(2));
//! let pod = find_pnode("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", &options).await?;
//! println!("found at {:?}", pod.address);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use prpc_common::protocol::error::{PrpcError, Result};
use prpc_common::Pod;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::client::{ClientConfig, PrpcClient};

/// Bootstrap pods of the public network
pub const DEFAULT_SEEDS: &[&str] = &[
    "173.212.203.145",
    "173.212.220.65",
    "161.97.97.41",
    "192.190.136.36",
    "192.190.136.37",
    "192.190.136.38",
    "192.190.136.28",
    "192.190.136.29",
    "207.244.255.1",
];

/// Per-call options for [`Discovery::find_pnode`].
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Seeds queried in addition to the base list
    pub add_seeds: Vec<String>,
    /// Seeds queried instead of the base list; takes precedence over
    /// `add_seeds`, which is then ignored
    pub replace_seeds: Option<Vec<String>>,
    /// Timeout for each seed's call; the client default when unset
    pub timeout: Option<Duration>,
}

impl DiscoveryOptions {
    pub fn with_added_seeds<I, S>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_seeds.extend(seeds.into_iter().map(Into::into));
        self
    }

    pub fn with_replaced_seeds<I, S>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_seeds = Some(seeds.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn client_config(&self) -> ClientConfig {
        match self.timeout {
            Some(timeout) => ClientConfig::default().with_timeout(timeout),
            None => ClientConfig::default(),
        }
    }
}

/// Pod discovery over a fixed base list of seeds.
///
/// The base list is set at construction and never changes; per-call
/// variations go through [`DiscoveryOptions`].
#[derive(Debug, Clone)]
pub struct Discovery {
    seeds: Arc<[String]>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new(DEFAULT_SEEDS.iter().copied())
    }
}

impl Discovery {
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seeds: seeds.into_iter().map(Into::into).collect(),
        }
    }

    /// Base seed list.
    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    /// Seeds a discovery with `options` will query, in order.
    pub fn effective_seeds(&self, options: &DiscoveryOptions) -> Vec<String> {
        match &options.replace_seeds {
            Some(replacement) => replacement.clone(),
            None => self
                .seeds
                .iter()
                .chain(options.add_seeds.iter())
                .cloned()
                .collect(),
        }
    }

    /// Find the pod whose pubkey equals `pubkey`.
    ///
    /// Must be called within a Tokio runtime: each seed is queried on its own
    /// task.
    pub async fn find_pnode(&self, pubkey: &str, options: &DiscoveryOptions) -> Result<Pod> {
        let seeds = self.effective_seeds(options);
        let seeds_tried = seeds.len();
        if seeds.is_empty() {
            warn!(pubkey, "No seeds to query");
        }

        let config = options.client_config();
        let pubkey: Arc<str> = Arc::from(pubkey);
        let mut attempts = JoinSet::new();

        for seed in seeds {
            let config = config.clone();
            let pubkey = Arc::clone(&pubkey);
            attempts.spawn(async move {
                let outcome = query_seed(&seed, &pubkey, config).await;
                (seed, outcome)
            });
        }

        while let Some(joined) = attempts.join_next().await {
            match joined {
                Ok((seed, Ok(pod))) => {
                    info!(pubkey = %pubkey, seed = %seed, address = ?pod.address, "Found pNode");
                    attempts.abort_all();
                    return Ok(pod);
                }
                Ok((seed, Err(e))) => {
                    debug!(pubkey = %pubkey, seed = %seed, error = %e, "Seed attempt failed");
                }
                Err(e) => {
                    debug!(pubkey = %pubkey, error = %e, "Seed task did not complete");
                }
            }
        }

        Err(PrpcError::NodeNotFound {
            pubkey: pubkey.to_string(),
            seeds_tried,
        })
    }
}

/// Find a pod using the default seed list.
pub async fn find_pnode(pubkey: &str, options: &DiscoveryOptions) -> Result<Pod> {
    Discovery::default().find_pnode(pubkey, options).await
}

/// Ask one seed for its pods and pick the first one matching `pubkey`.
async fn query_seed(seed: &str, pubkey: &str, config: ClientConfig) -> Result<Pod> {
    let client = PrpcClient::with_config(seed, config)?;
    let pods = client.get_pods().await?;

    pods.into_pod(pubkey).ok_or_else(|| PrpcError::NotFoundOnSeed {
        seed: seed.to_string(),
        pubkey: pubkey.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery() -> Discovery {
        Discovery::new(["seed-a", "seed-b"])
    }

    #[test]
    fn test_default_uses_builtin_seeds() {
        let discovery = Discovery::default();
        assert_eq!(discovery.seeds().len(), DEFAULT_SEEDS.len());
        assert_eq!(discovery.seeds()[0], DEFAULT_SEEDS[0]);
    }

    #[test]
    fn test_effective_seeds_without_options() {
        let seeds = discovery().effective_seeds(&DiscoveryOptions::default());
        assert_eq!(seeds, vec!["seed-a", "seed-b"]);
    }

    #[test]
    fn test_effective_seeds_appends() {
        let options = DiscoveryOptions::default().with_added_seeds(["seed-z"]);
        let seeds = discovery().effective_seeds(&options);
        assert_eq!(seeds, vec!["seed-a", "seed-b", "seed-z"]);
    }

    #[test]
    fn test_effective_seeds_replace_wins_over_append() {
        let options = DiscoveryOptions::default()
            .with_added_seeds(["seed-y"])
            .with_replaced_seeds(["seed-z"]);
        let seeds = discovery().effective_seeds(&options);
        assert_eq!(seeds, vec!["seed-z"]);
    }

    #[test]
    fn test_effective_seeds_do_not_touch_base_list() {
        let discovery = discovery();
        let options = DiscoveryOptions::default().with_added_seeds(["seed-z"]);
        let _ = discovery.effective_seeds(&options);
        assert_eq!(discovery.seeds(), &["seed-a".to_string(), "seed-b".to_string()]);
    }

    #[test]
    fn test_options_forward_timeout() {
        let options = DiscoveryOptions::default().with_timeout(Duration::from_millis(750));
        assert_eq!(options.client_config().timeout, Duration::from_millis(750));
        assert_eq!(
            DiscoveryOptions::default().client_config().timeout,
            ClientConfig::default().timeout
        );
    }

    #[tokio::test]
    async fn test_empty_seed_list_fails_with_aggregate_error() {
        let options = DiscoveryOptions::default().with_replaced_seeds(Vec::<String>::new());
        let err = discovery().find_pnode("X", &options).await.unwrap_err();
        match err {
            PrpcError::NodeNotFound { pubkey, seeds_tried } => {
                assert_eq!(pubkey, "X");
                assert_eq!(seeds_tried, 0);
            }
            other => panic!("Expected NodeNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_seed_counts_as_failed_seed() {
        let options = DiscoveryOptions::default().with_replaced_seeds(["http://bad/"]);
        let err = discovery().find_pnode("X", &options).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not find pNode X on any seed");
    }
}
