use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrpcError {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(u16),

    /// Error object reported by the pod. Only the message is displayed.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("No result in response")]
    NoResult,

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("pNode {pubkey} not found on seed {seed}")]
    NotFoundOnSeed { seed: String, pubkey: String },

    #[error("Could not find pNode {pubkey} on any seed")]
    NodeNotFound { pubkey: String, seeds_tried: usize },
}

impl PrpcError {
    /// Returns true for failures raised by a single call's timer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PrpcError::Timeout)
    }
}

impl From<hyper::http::Error> for PrpcError {
    fn from(err: hyper::http::Error) -> Self {
        PrpcError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrpcError>;
