//! Stub dashboard used by the transport-level tests.
//!
//! Serves a fixed number of requests on an ephemeral port and records every
//! request it sees, so tests can assert on call counts, methods, and bodies.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use talorik_api::TalorikClient;
use tiny_http::{Header, Response, Server};

/// One request observed by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: String,
    pub content_type: Option<String>,
}

pub struct StubDashboard {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubDashboard {
    /// Serve exactly `expected_requests` requests, answering each through
    /// `respond` (full URL including query → status code and JSON text).
    pub fn spawn<F>(expected_requests: usize, respond: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&recorded);

        let handle = thread::spawn(move || {
            for _ in 0..expected_requests {
                let Ok(mut request) = server.recv() else {
                    break;
                };

                let url = request.url().to_string();
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());

                seen.lock().unwrap().push(RecordedRequest {
                    method: request.method().to_string(),
                    url: url.clone(),
                    body,
                    content_type,
                });

                let (status, payload) = respond(&url);
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            recorded,
            handle,
        }
    }

    pub fn client(&self) -> TalorikClient {
        TalorikClient::new(self.base_url.clone(), Duration::from_secs(10)).unwrap()
    }

    /// Wait for the stub to serve everything it was told to expect and
    /// return the requests it saw, in arrival order.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap();
        Arc::try_unwrap(self.recorded).unwrap().into_inner().unwrap()
    }
}

/// A base URL no server is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}
