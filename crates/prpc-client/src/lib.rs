//! Pod RPC Client
//!
//! Async client for the read-only JSON-RPC interface every pod serves on
//! `http://<host>:6000/rpc`, plus seed-based discovery of a pod by pubkey.
//!
//! - [`PrpcClient`]: one call per invocation against one pod, bounded by a
//!   timeout
//! - [`Discovery`] / [`find_pnode`]: races all seeds and returns the first
//!   pod matching a pubkey

pub mod client;
pub mod discovery;

pub use client::{ClientConfig, PrpcClient, DEFAULT_TIMEOUT_MS};
pub use discovery::{find_pnode, Discovery, DiscoveryOptions, DEFAULT_SEEDS};
