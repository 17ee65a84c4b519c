//! In-process pod test server
//!
//! Serves canned JSON-RPC replies on `127.0.0.1:<random port>/rpc` and
//! records every request it receives. A request whose connection goes away
//! before its reply is handed back to hyper is counted as abandoned.

#![allow(dead_code)]

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prpc_common::{Pod, PodsResponse, RpcResponse};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

/// What the server answers with
#[derive(Clone, Debug)]
pub enum Reply {
    /// Well-formed envelope carrying `result`
    Result(Value),
    /// Raw status and body
    Raw(StatusCode, String),
    /// Wait, then answer with the inner reply
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn pods(pods: Vec<Pod>) -> Self {
        let total_count = pods.len() as f64;
        Reply::Result(serde_json::to_value(PodsResponse { pods, total_count }).unwrap())
    }

    pub fn rpc_error(code: i64, message: &str) -> Self {
        Reply::Raw(
            StatusCode::OK,
            serde_json::to_string(&RpcResponse::<Value>::error(code, message)).unwrap(),
        )
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Reply::Delayed(delay, Box::new(self))
    }
}

/// A request as seen by the server
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Counts the handler as abandoned unless it is disarmed first
struct AbandonGuard {
    abandoned: Arc<AtomicUsize>,
    armed: bool,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if self.armed {
            self.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct TestPodServer {
    addr: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    abandoned: Arc<AtomicUsize>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestPodServer {
    /// Starts a new test server on a random port
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let abandoned = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
        let recorded = requests.clone();
        let dropped = abandoned.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        let Ok((stream, _)) = result else { continue };
                        let io = TokioIo::new(stream);
                        let reply = reply.clone();
                        let recorded = recorded.clone();
                        let dropped = dropped.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let reply = reply.clone();
                                let recorded = recorded.clone();
                                let guard = AbandonGuard {
                                    abandoned: dropped.clone(),
                                    armed: true,
                                };
                                async move {
                                    Ok::<_, hyper::Error>(
                                        Self::handle(req, reply, recorded, guard).await,
                                    )
                                }
                            });

                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            requests,
            abandoned,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub async fn with_pods(pods: Vec<Pod>) -> Self {
        Self::start(Reply::pods(pods)).await
    }

    async fn handle(
        req: Request<Incoming>,
        reply: Reply,
        recorded: Arc<Mutex<Vec<RecordedRequest>>>,
        mut guard: AbandonGuard,
    ) -> Response<Full<Bytes>> {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let content_type = req
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = req.into_body().collect().await.unwrap().to_bytes().to_vec();

        recorded.lock().unwrap().push(RecordedRequest {
            method,
            path: path.clone(),
            content_type,
            body,
        });

        if path != "/rpc" {
            guard.armed = false;
            return Self::respond(StatusCode::NOT_FOUND, String::new());
        }

        let mut reply = reply;
        while let Reply::Delayed(delay, inner) = reply {
            tokio::time::sleep(delay).await;
            reply = *inner;
        }

        guard.armed = false;
        match reply {
            Reply::Result(result) => Self::respond(
                StatusCode::OK,
                json!({"jsonrpc": "2.0", "result": result, "id": 1}).to_string(),
            ),
            Reply::Raw(status, body) => Self::respond(status, body),
            Reply::Delayed(..) => unreachable!(),
        }
    }

    fn respond(status: StatusCode, body: String) -> Response<Full<Bytes>> {
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    /// Address in the `host:port` form accepted by the client
    pub fn address(&self) -> String {
        self.addr.clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests dropped by the server because the client went away first
    pub fn abandoned_count(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }

    /// Waits until `expected` requests have been abandoned, giving up after
    /// `within`. Returns the final count.
    pub async fn wait_for_abandoned(&self, expected: usize, within: Duration) -> usize {
        let deadline = Instant::now() + within;
        while self.abandoned_count() < expected && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.abandoned_count()
    }
}

impl Drop for TestPodServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An address nothing listens on
pub async fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    addr
}

pub fn pod(pubkey: &str, address: &str) -> Pod {
    Pod::new(1733900000000.0).with_pubkey(pubkey).with_address(address)
}
