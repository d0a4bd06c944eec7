//! # Catalog Client
//!
//! The one network read the station performs.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    fetch_products()                                     │
//! │                                                                         │
//! │  GET <catalog url>                                                     │
//! │       │                                                                 │
//! │       ├── transport error / timeout ──► CatalogError                   │
//! │       ├── non-2xx status            ──► CatalogError::HttpStatus       │
//! │       ├── body not JSON             ──► CatalogError::Malformed        │
//! │       ▼                                                                 │
//! │  serde_json::Value (shape checked by the lookup layer)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries. A failure surfaces immediately on the status line.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://cart-backend-one.vercel.app/products";

/// Seam between the session and the catalog service.
///
/// Tests substitute a stub that serves canned payloads and counts calls.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches the whole product set as raw JSON.
    async fn fetch_products(&self) -> CatalogResult<serde_json::Value>;
}

/// Parses and checks a catalog URL (http/https only).
pub fn parse_catalog_url(raw: &str) -> CatalogResult<Url> {
    let url = Url::parse(raw).map_err(|e| CatalogError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CatalogError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// reqwest-backed catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: Url,
    http: Client,
}

impl HttpCatalog {
    /// Creates a client for `url`.
    ///
    /// `timeout` of `None` means the request may wait forever, which keeps
    /// the scanner disarmed for as long as the call hangs.
    pub fn new(url: &str, timeout: Option<Duration>) -> CatalogResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Self::with_client(url, http)
    }

    /// Creates a client for `url` over an already configured `reqwest`
    /// client (proxy, TLS and timeout settings are taken as-is).
    pub fn with_client(url: &str, http: Client) -> CatalogResult<Self> {
        Ok(HttpCatalog {
            url: parse_catalog_url(url)?,
            http,
        })
    }

    /// The endpoint this client reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn fetch_products(&self) -> CatalogResult<serde_json::Value> {
        debug!(url = %self.url, "Fetching catalog");

        let response = self.http.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Catalog request rejected");
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let payload: serde_json::Value = serde_json::from_slice(&body)?;

        debug!(bytes = body.len(), "Catalog payload received");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{lookup_product, LookupOutcome, NotFoundReason};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on an ephemeral port and returns the
    /// URL to request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/products", addr)
    }

    /// Client for the local test server; bypasses any proxy from the
    /// environment.
    fn local_catalog(url: &str, timeout: Duration) -> HttpCatalog {
        let http = Client::builder().no_proxy().timeout(timeout).build().unwrap();
        HttpCatalog::with_client(url, http).unwrap()
    }

    fn failure_message(outcome: LookupOutcome) -> String {
        match outcome {
            LookupOutcome::NotFound {
                reason: NotFoundReason::Failed(message),
                ..
            } => message,
            other => panic!("expected a failed lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_catalog_url() {
        assert!(parse_catalog_url(DEFAULT_CATALOG_URL).is_ok());
        assert!(parse_catalog_url("http://localhost:8080/products").is_ok());
        assert!(matches!(
            parse_catalog_url("ftp://example.com/products"),
            Err(CatalogError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_catalog_url("not a url"),
            Err(CatalogError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_http_catalog_new() {
        let client = HttpCatalog::new(DEFAULT_CATALOG_URL, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.url().as_str(), DEFAULT_CATALOG_URL);
        assert!(HttpCatalog::new("mailto:x@example.com", None).is_err());
    }

    #[tokio::test]
    async fn test_server_error_is_a_failure() {
        let url = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let catalog = local_catalog(&url, Duration::from_secs(5));

        assert!(matches!(
            catalog.fetch_products().await,
            Err(CatalogError::HttpStatus { status: 500 })
        ));

        let url = serve_once("500 Internal Server Error", "").await;
        let catalog = local_catalog(&url, Duration::from_secs(5));
        let outcome = lookup_product(&catalog, "123").await;
        assert_eq!(outcome.barcode(), "123");
        assert_eq!(failure_message(outcome), "Catalog returned HTTP 500");
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_failure() {
        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let catalog = local_catalog(&url, Duration::from_secs(5));

        assert!(matches!(
            catalog.fetch_products().await,
            Err(CatalogError::Malformed(_))
        ));

        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let catalog = local_catalog(&url, Duration::from_secs(5));
        let message = failure_message(lookup_product(&catalog, "123").await);
        assert!(message.starts_with("Malformed catalog response"));
    }

    #[tokio::test]
    async fn test_json_array_is_returned() {
        let url = serve_once("200 OK", r#"[{"barcode":"123","name":"Water","price":1.5}]"#).await;
        let catalog = local_catalog(&url, Duration::from_secs(5));

        match lookup_product(&catalog, "123").await {
            LookupOutcome::Found(product) => {
                assert_eq!(product.name, "Water");
                assert_eq!(product.price.cents(), 150);
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_configured_timeout_fires() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/products", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let catalog = local_catalog(&url, Duration::from_millis(200));
        assert!(matches!(
            catalog.fetch_products().await,
            Err(CatalogError::Timeout)
        ));
        server.abort();
    }
}
