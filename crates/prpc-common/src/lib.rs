//! Pod RPC Common Types
//!
//! This crate provides the wire protocol shared by the pod RPC client and
//! command-line tool.
//!
//! # Overview
//!
//! Pods are participant nodes of a distributed storage network. Every pod
//! exposes a small, read-only JSON-RPC 2.0 interface over HTTP on port 6000.
//! This crate contains:
//!
//! - **Protocol Layer**: request/response envelopes, the pod and stats data
//!   model, method names and the error type
//! - **Transport Layer**: helpers that turn envelopes into HTTP requests and
//!   HTTP responses back into typed results
//!
//! # Wire Format
//!
//! - **Transport**: HTTP POST to `http://<host>:6000/rpc`
//! - **Serialization**: JSON, `Content-Type: application/json`
//! - **Request**: `{"jsonrpc":"2.0","method":"<name>","id":1}`
//!
//! # Example
//!
//! ```
//! use prpc_common::{Method, RpcRequest};
//!
//! let request = RpcRequest::new(Method::GetPods);
//! let body = serde_json::to_string(&request).unwrap();
//! assert_eq!(body, r#"{"jsonrpc":"2.0","method":"get-pods","id":1}"#);
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::*;
