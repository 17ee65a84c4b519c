pub mod error;
pub mod jsonrpc;
pub mod methods;
pub mod types;


pub use error::{PrpcError, Result};
pub use jsonrpc::{RpcErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION, REQUEST_ID};
pub use methods::Method;
pub use types::{NodeStats, Pod, PodsResponse};
