//! Pod RPC Transport Layer
//!
//! HTTP mapping of the JSON-RPC envelope.
//!
//! # Components
//!
//! - **[`HttpTransport`]**: endpoint resolution, request building and
//!   response decoding
//! - **[`RPC_PORT`]** / **[`RPC_PATH`]**: fixed endpoint coordinates
//!
//! # Example
//!
//! ```
//! use prpc_common::transport::HttpTransport;
//! use prpc_common::PodsResponse;
//! use hyper::StatusCode;
//!
//! let body = br#"{"jsonrpc":"2.0","result":{"pods":[],"total_count":0},"id":1}"#;
//! let pods: PodsResponse = HttpTransport::decode_response(StatusCode::OK, body).unwrap();
//! assert_eq!(pods.total_count, 0.0);
//! ```

pub mod http;

pub use http::{HttpTransport, RpcHttpRequest, RPC_PATH, RPC_PORT};
