//! Shared JSON-over-HTTP client for the backend adapters.
//!
//! Every request is bounded by the client-wide timeout. Failures are
//! classified into [`BackendError`] here so the use cases never see a
//! `reqwest::Error`.

use kbsearch_application::BackendError;
use kbsearch_domain::util::truncate_str;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Longest raw (non-JSON) error body carried into an error detail.
const MAX_DETAIL_LEN: usize = 500;

#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Thin wrapper around a [`reqwest::Client`] speaking JSON.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    timeout: Duration,
}

impl JsonClient {
    pub fn new(timeout: Duration) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kbsearch-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `body` as JSON and decode the JSON response.
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(classify)?;
        read_json(response).await
    }

    /// GET `url` with query parameters and decode the JSON response.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        debug!(url, ?query, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify)?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(classify)?;
    trace!(status = status.as_u16(), bytes = body.len(), "Response received");

    if !status.is_success() {
        return Err(BackendError::Http {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    serde_json::from_slice(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

/// Map a request failure onto the transport taxonomy.
///
/// Timeout is checked first: a connect that times out reports both.
fn classify(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout
    } else if error.is_connect() {
        BackendError::Connection(error.to_string())
    } else if error.is_decode() {
        BackendError::InvalidResponse(error.to_string())
    } else {
        BackendError::Transport(error.to_string())
    }
}

/// Pull an explanation out of an error body.
///
/// Prefers a JSON `detail` field (the convention of the NL2SQL backend),
/// otherwise the trimmed raw text.
fn error_detail(body: &[u8]) -> Option<String> {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body)
        && let Some(detail) = json.get("detail")
    {
        return Some(match detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(truncate_str(text, MAX_DETAIL_LEN).to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP/1.1 responder for adapter tests.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// A captured request: request line plus body.
    #[derive(Debug)]
    pub struct Captured {
        pub request_line: String,
        pub body: String,
    }

    impl Captured {
        pub fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// Accept one connection, answer with `status` and `body`, and hand back
    /// what the client sent. Returns the base URL (`http://127.0.0.1:port`).
    pub async fn respond_once(status: u16, body: &str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let captured = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            captured
        });

        (base, handle)
    }

    /// Accept one connection and never answer.
    pub async fn hang() -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            drop(socket);
        });
        (base, handle)
    }

    /// A base URL nothing is listening on.
    pub async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> Captured {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        Captured {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
        }
    }
}
