//! HTTP Transport Utilities
//!
//! This module maps the JSON-RPC envelope onto HTTP for pod calls.
//!
//! # Architecture
//!
//! The HTTP transport layer provides:
//! - Resolving a pod address into its RPC endpoint URL
//! - Building the POST request carrying a JSON-RPC envelope
//! - Turning an HTTP status and body back into a typed result
//!
//! Sending the request is left to the client crate, which owns the
//! connection and the timeout.
//!
//! # Example
//!
//! ```
//! use prpc_common::transport::http::HttpTransport;
//! use prpc_common::Method;
//!
//! let endpoint = HttpTransport::endpoint_url("192.0.2.10").unwrap();
//! assert_eq!(endpoint, "http://192.0.2.10:6000/rpc");
//!
//! let request = HttpTransport::build_request(&endpoint, Method::GetPods).unwrap();
//! assert_eq!(request.method(), hyper::Method::POST);
//! ```

use std::net::{Ipv6Addr, SocketAddr};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use serde::de::DeserializeOwned;

use crate::protocol::error::{PrpcError, Result};
use crate::protocol::jsonrpc::{RpcRequest, RpcResponse};
use crate::protocol::methods::Method;

/// Port every pod serves its RPC interface on
pub const RPC_PORT: u16 = 6000;

/// Path of the RPC endpoint
pub const RPC_PATH: &str = "/rpc";

/// Type alias for outgoing requests with a full body
pub type RpcHttpRequest = Request<Full<Bytes>>;

/// HTTP transport utility functions
pub struct HttpTransport;

impl HttpTransport {
    /// Resolves a pod address into its RPC endpoint.
    ///
    /// A bare host becomes `http://<host>:6000/rpc`. An address that already
    /// names a port (`host:port`, `[v6]:port`) keeps it, and a bare IPv6
    /// literal is bracketed.
    ///
    /// # Errors
    ///
    /// Returns [`PrpcError::InvalidAddress`] for empty input, input carrying
    /// a scheme or path, or an unparsable port.
    pub fn endpoint_url(address: &str) -> Result<String> {
        let address = address.trim();
        if address.is_empty() || address.contains('/') {
            return Err(PrpcError::InvalidAddress(address.to_string()));
        }

        let authority = if let Ok(socket) = address.parse::<SocketAddr>() {
            socket.to_string()
        } else if let Ok(ip) = address.parse::<Ipv6Addr>() {
            format!("[{}]:{}", ip, RPC_PORT)
        } else if let Some((host, port)) = address.rsplit_once(':') {
            if host.is_empty() || port.parse::<u16>().is_err() {
                return Err(PrpcError::InvalidAddress(address.to_string()));
            }
            address.to_string()
        } else {
            format!("{}:{}", address, RPC_PORT)
        };

        Ok(format!("http://{}{}", authority, RPC_PATH))
    }

    /// Builds the POST request for `method` against `endpoint`.
    pub fn build_request(endpoint: &str, method: Method) -> Result<RpcHttpRequest> {
        let body = serde_json::to_vec(&RpcRequest::new(method))?;

        let request = Request::builder()
            .method(hyper::Method::POST)
            .uri(endpoint)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body)))?;

        Ok(request)
    }

    /// Converts an HTTP status and body into the call's result.
    ///
    /// Non-success statuses fail before the body is looked at.
    pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
        if !status.is_success() {
            return Err(PrpcError::Http(status.as_u16()));
        }

        let envelope: RpcResponse<T> = serde_json::from_slice(body)?;
        envelope.into_result()
    }
}
