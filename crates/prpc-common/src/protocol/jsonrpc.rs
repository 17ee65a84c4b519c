//! JSON-RPC 2.0 Envelope Types
//!
//! Pods speak a deliberately small subset of JSON-RPC 2.0:
//! - Request format: `{"jsonrpc": "2.0", "method": "...", "id": 1}`
//! - Response format: `{"jsonrpc": "2.0", "result": ..., "error": ..., "id": ...}`
//! - Error format: `{"code": ..., "message": "..."}`
//!
//! No method takes parameters, so requests never carry a `params` member.
//! Only `result` and `error` decide the outcome of a response; `jsonrpc`
//! and `id` are decoded leniently since error replies may carry `"id": null`.
//!
//! # Request Id
//!
//! Every request uses the id `1`. A client issues its calls one at a time
//! over a fresh connection and never pipelines, so responses need no
//! correlation. Reusing a connection for concurrent calls would require an
//! id allocator and a response-to-id map instead.
//!
//! # Example
//!
//! ```
//! use prpc_common::protocol::jsonrpc::RpcResponse;
//! use prpc_common::PodsResponse;
//!
//! let body = r#"{"jsonrpc":"2.0","result":{"pods":[],"total_count":0},"id":1}"#;
//! let response: RpcResponse<PodsResponse> = serde_json::from_str(body).unwrap();
//! let pods = response.into_result().unwrap();
//! assert_eq!(pods.total_count, 0.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{PrpcError, Result};
use super::methods::Method;

/// Protocol version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Id sent with every request
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC request envelope
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Name of the method to invoke
    pub method: String,
    /// Request identifier (always 1)
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: Method) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.as_str().into(),
            id: REQUEST_ID,
        }
    }
}

/// JSON-RPC response envelope
///
/// A well-formed response carries exactly one of `result` or `error`.
/// Both members are optional on the wire so that malformed responses still
/// decode and can be reported precisely by [`RpcResponse::into_result`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse<T> {
    /// JSON-RPC version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    /// Result value on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Error object on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
    /// Request identifier echoed by the server (`null` when it could not
    /// read the request)
    #[serde(default)]
    pub id: Option<Value>,
}

/// Error member of a response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl<T> RpcResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.into()),
            result: Some(result),
            error: None,
            id: Some(Value::from(REQUEST_ID)),
        }
    }

    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.into()),
            result: None,
            error: Some(RpcErrorObject {
                code,
                message: message.into(),
            }),
            id: Some(Value::from(REQUEST_ID)),
        }
    }

    /// Unwraps the envelope.
    ///
    /// An error member takes precedence over a result; a response with
    /// neither fails with [`PrpcError::NoResult`].
    pub fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            return Err(PrpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        self.result.ok_or(PrpcError::NoResult)
    }
}
