use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use prpc_common::protocol::error::{PrpcError, Result};
use prpc_common::transport::HttpTransport;
use prpc_common::{Method, NodeStats, PodsResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default per-call timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for one call, covering connect, send and body read
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JSON-RPC client bound to a single pod.
///
/// Each call opens a fresh HTTP/1 connection; idle connections are never
/// kept, so calls on one client are independent of each other.
#[derive(Clone)]
pub struct PrpcClient {
    endpoint: String,
    config: ClientConfig,
    http: Client<HttpConnector, Full<Bytes>>,
}

impl PrpcClient {
    /// Create a client for the pod at `address` with the default timeout.
    ///
    /// `address` is a bare host such as `"192.0.2.10"`; the RPC port and
    /// path are appended.
    pub fn new(address: &str) -> Result<Self> {
        Self::with_config(address, ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(address: &str, config: ClientConfig) -> Result<Self> {
        let endpoint = HttpTransport::endpoint_url(address)?;
        let http = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build_http();

        Ok(Self {
            endpoint,
            config,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Call an RPC method and decode its result as `T`.
    ///
    /// The whole exchange races the configured timeout. When the timer wins
    /// the in-flight request is dropped and [`PrpcError::Timeout`] is
    /// returned.
    pub async fn call<T: DeserializeOwned>(&self, method: Method) -> Result<T> {
        let request = HttpTransport::build_request(&self.endpoint, method)?;
        debug!(endpoint = %self.endpoint, %method, "Sending RPC call");

        let exchange = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| PrpcError::Transport(format!("HTTP request failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(PrpcError::Http(status.as_u16()));
            }

            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| PrpcError::Transport(format!("Failed to read response: {}", e)))?
                .to_bytes();

            Ok::<_, PrpcError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| {
                debug!(endpoint = %self.endpoint, %method, "RPC call timed out");
                PrpcError::Timeout
            })??;

        HttpTransport::decode_response(status, &body)
    }

    /// Fetch the pods known to this node (`get-pods`).
    pub async fn get_pods(&self) -> Result<PodsResponse> {
        self.call(Method::GetPods).await
    }

    /// Fetch the pods known to this node with per-pod stats embedded
    /// (`get-pods-with-stats`).
    pub async fn get_pods_with_stats(&self) -> Result<PodsResponse> {
        self.call(Method::GetPodsWithStats).await
    }

    /// Fetch this node's own runtime counters (`get-stats`).
    pub async fn get_stats(&self) -> Result<NodeStats> {
        self.call(Method::GetStats).await
    }
}

impl std::fmt::Debug for PrpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrpcClient")
            .field("endpoint", &self.endpoint)
            .field("config", &self.config)
            .finish()
    }
}
