//! Method names understood by a pod.

use std::fmt;

/// Zero-argument methods exposed on a pod's `/rpc` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Pods known to the queried node
    GetPods,
    /// Pods known to the queried node, with per-pod stats embedded server-side
    GetPodsWithStats,
    /// Runtime counters of the queried node itself
    GetStats,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetPods => "get-pods",
            Method::GetPodsWithStats => "get-pods-with-stats",
            Method::GetStats => "get-stats",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
