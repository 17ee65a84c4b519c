//! Pod RPC Data Model
//!
//! Result payloads returned by the pod methods. Every value is a transient
//! snapshot decoded fresh from each response.
//!
//! Pods emit plain JSON numbers with no integer guarantee, so every numeric
//! field is an `f64`. A single fractional or negative counter would otherwise
//! fail the whole page it arrived in.

use serde::{Deserialize, Serialize};

/// A participant node of the network.
///
/// Only `last_seen_timestamp` is guaranteed; the remaining fields depend on
/// the node type and on which method produced the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    /// Gossip address of the pod (e.g. "192.0.2.10:9001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Base58 public key identifying the pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,
    /// Software version string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Last time the pod was seen (Unix time in milliseconds)
    pub last_seen_timestamp: f64,
    /// Whether the pod accepts public RPC traffic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Port of the pod's RPC endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_port: Option<f64>,
    /// Storage capacity committed to the network, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_committed: Option<f64>,
    /// Storage in use, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_used: Option<f64>,
    /// Storage in use as a percentage of the committed capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_usage_percent: Option<f64>,
    /// Uptime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

impl Pod {
    /// Creates a pod record carrying only the required timestamp.
    pub fn new(last_seen_timestamp: f64) -> Self {
        Self {
            address: None,
            pubkey: None,
            version: None,
            last_seen_timestamp,
            is_public: None,
            rpc_port: None,
            storage_committed: None,
            storage_used: None,
            storage_usage_percent: None,
            uptime: None,
        }
    }

    pub fn with_pubkey(mut self, pubkey: impl Into<String>) -> Self {
        self.pubkey = Some(pubkey.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn matches_pubkey(&self, pubkey: &str) -> bool {
        self.pubkey.as_deref() == Some(pubkey)
    }
}

/// A page of pods.
///
/// `total_count` may exceed `pods.len()` when the server paginates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodsResponse {
    pub pods: Vec<Pod>,
    pub total_count: f64,
}

impl PodsResponse {
    /// Returns the first pod, in list order, whose pubkey equals `pubkey`.
    pub fn find_by_pubkey(&self, pubkey: &str) -> Option<&Pod> {
        self.pods.iter().find(|pod| pod.matches_pubkey(pubkey))
    }

    /// Consuming variant of [`PodsResponse::find_by_pubkey`].
    pub fn into_pod(self, pubkey: &str) -> Option<Pod> {
        self.pods.into_iter().find(|pod| pod.matches_pubkey(pubkey))
    }
}

/// Runtime counters of a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    pub active_streams: f64,
    pub cpu_percent: f64,
    pub current_index: f64,
    pub file_size: f64,
    pub last_updated: f64,
    pub packets_received: f64,
    pub packets_sent: f64,
    pub ram_total: f64,
    pub ram_used: f64,
    pub total_bytes: f64,
    pub total_pages: f64,
    pub uptime: f64,
}
