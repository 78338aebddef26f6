//! Test harness for running the HTTP server on an ephemeral port and
//! talking to it through a real HTTP client.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, Method};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use tunecraft_cli::commands::serve::{serve, AppState};
use tunecraft_cli::config::ServerConfig;

/// How long a single request may take before the test fails.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response read back from the server.
#[derive(Debug)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Headers with lowercased names. Repeated headers are joined with `, `.
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    async fn read(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Look up a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Response body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// Assert the status code, printing the body on mismatch.
    pub fn assert_status(&self, expected: u16) {
        assert_eq!(
            self.status,
            expected,
            "Unexpected status.\nbody: {}",
            String::from_utf8_lossy(&self.body)
        );
    }
}

/// A server running in the background of the current tokio runtime.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl TestServer {
    /// Start a server with default configuration.
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    /// Start a server with the given configuration. The configured port is
    /// ignored; an ephemeral port is bound instead.
    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let state = AppState::from_config(config).shared();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async move {
            let _ = rx.await;
        }));

        // Idle keep-alive connections would hold up graceful shutdown.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Send a `GET` request.
    pub async fn get(&self, path: &str) -> HttpResponse {
        self.send(self.client.get(self.url(path)), "GET", path).await
    }

    /// Send a `POST` request with a JSON body.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> HttpResponse {
        self.send(self.client.post(self.url(path)).json(body), "POST", path)
            .await
    }

    /// Send a `DELETE` request.
    pub async fn delete(&self, path: &str) -> HttpResponse {
        self.send(self.client.delete(self.url(path)), "DELETE", path)
            .await
    }

    /// Send an arbitrary request and read the full response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> HttpResponse {
        let parsed = Method::from_bytes(method.as_bytes())
            .unwrap_or_else(|_| panic!("Invalid HTTP method: {}", method));
        let mut builder = self.client.request(parsed, self.url(path));
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }
        self.send(builder, method, path).await
    }

    /// Signal shutdown and wait for the server task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let result = timeout(REQUEST_TIMEOUT, handle)
                .await
                .expect("Server did not shut down in time")
                .expect("Server task panicked");
            result.expect("Server returned an error");
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> HttpResponse {
        let response = builder
            .send()
            .await
            .unwrap_or_else(|e| panic!("{} {} failed: {}", method, path, e));
        HttpResponse::read(response)
            .await
            .unwrap_or_else(|e| panic!("{} {} body could not be read: {}", method, path, e))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
