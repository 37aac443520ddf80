//! Read-only baseline dataset (events + categories).
//!
//! The baseline comes from the published site data: either an HTTP endpoint
//! or a JSON file. It is never written to; local changes live in the
//! override log.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RolezinhosError, RolezinhosResult};
use crate::event::{Category, Role, fixed_categories};

const FETCH_TIMEOUT_SECS: u64 = 10;

/// A snapshot of the baseline dataset, owned for the lifetime of one load.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub events: Vec<Role>,
    pub categories: Vec<Category>,
}

impl Baseline {
    /// No events, only the fixed categories.
    pub fn empty() -> Self {
        Baseline {
            events: Vec::new(),
            categories: fixed_categories(),
        }
    }

    fn from_document(document: BaselineDocument) -> Self {
        let (events, categories) = match document {
            BaselineDocument::Collections { events, categories } => (events, categories),
            BaselineDocument::Events(events) => (events, Vec::new()),
        };

        Baseline {
            events,
            categories: if categories.is_empty() {
                fixed_categories()
            } else {
                categories
            },
        }
    }
}

/// Accepted document shapes. Collection names vary between site versions.
#[derive(Deserialize)]
#[serde(untagged)]
enum BaselineDocument {
    Collections {
        #[serde(alias = "roles", alias = "eventos")]
        events: Vec<Role>,
        #[serde(default, alias = "categorias", alias = "categorias_principais")]
        categories: Vec<Category>,
    },
    Events(Vec<Role>),
}

/// Where the baseline is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselineSource {
    Http(String),
    File(PathBuf),
    /// No published data: empty events, fixed categories
    Embedded,
}

impl BaselineSource {
    /// Fetch and parse the baseline document.
    pub async fn fetch(&self) -> RolezinhosResult<Baseline> {
        let content = match self {
            BaselineSource::Http(url) => fetch_http(url).await?,
            BaselineSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                RolezinhosError::SourceUnavailable(format!("{}: {}", path.display(), e))
            })?,
            BaselineSource::Embedded => return Ok(Baseline::empty()),
        };

        let document: BaselineDocument = serde_json::from_str(&content).map_err(|e| {
            RolezinhosError::SourceUnavailable(format!("invalid baseline document: {}", e))
        })?;

        Ok(Baseline::from_document(document))
    }

    /// Fetch the baseline, falling back to [`Baseline::empty`] on any failure.
    ///
    /// The listing must stay usable without its data source, so the error
    /// is logged and swallowed here.
    pub async fn load(&self) -> Baseline {
        match self.fetch().await {
            Ok(baseline) => {
                tracing::debug!(
                    events = baseline.events.len(),
                    categories = baseline.categories.len(),
                    "baseline loaded"
                );
                baseline
            }
            Err(e) => {
                tracing::warn!(error = %e, baseline = %self, "using empty baseline");
                Baseline::empty()
            }
        }
    }
}

impl std::fmt::Display for BaselineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaselineSource::Http(url) => write!(f, "{}", url),
            BaselineSource::File(path) => write!(f, "{}", path.display()),
            BaselineSource::Embedded => write!(f, "embedded"),
        }
    }
}

async fn fetch_http(url: &str) -> RolezinhosResult<String> {
    let unavailable = |e: reqwest::Error| RolezinhosError::SourceUnavailable(e.to_string());

    let parsed = reqwest::Url::parse(url)
        .map_err(|e| RolezinhosError::SourceUnavailable(format!("invalid URL '{}': {}", url, e)))?;

    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(FETCH_TIMEOUT_SECS));
    // A local dev server (json-server and friends) is never behind the proxy
    if is_loopback(&parsed) {
        builder = builder.no_proxy();
    }
    let client = builder.build().map_err(unavailable)?;

    let resp = client.get(parsed).send().await.map_err(unavailable)?;

    if !resp.status().is_success() {
        return Err(RolezinhosError::SourceUnavailable(format!(
            "GET {} returned {}",
            url,
            resp.status()
        )));
    }

    resp.text().await.map_err(unavailable)
}

fn is_loopback(url: &reqwest::Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain == "localhost",
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RecordId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/db.json", addr)
    }

    #[tokio::test]
    async fn file_source_reads_named_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(
            &path,
            r#"{
                "roles": [{"id": 1, "nome": "A", "destaque": true}],
                "categorias_principais": [{"id": 1, "nome": "Festas", "descricao": "Noite"}]
            }"#,
        )
        .unwrap();

        let baseline = BaselineSource::File(path).fetch().await.unwrap();

        assert_eq!(baseline.events.len(), 1);
        assert_eq!(baseline.events[0].id, RecordId::from("1"));
        assert_eq!(baseline.categories.len(), 1);
        assert_eq!(baseline.categories[0].description.as_deref(), Some("Noite"));
    }

    #[tokio::test]
    async fn bare_event_array_gets_fixed_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        std::fs::write(&path, r#"[{"id": "1", "nome": "A"}]"#).unwrap();

        let baseline = BaselineSource::File(path).fetch().await.unwrap();

        assert_eq!(baseline.events.len(), 1);
        assert_eq!(baseline.categories, fixed_categories());
    }

    #[tokio::test]
    async fn invalid_shape_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{"something": []}"#).unwrap();

        let result = BaselineSource::File(path).fetch().await;
        assert!(matches!(result, Err(RolezinhosError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = BaselineSource::File(dir.path().join("absent.json"));

        assert!(matches!(
            source.fetch().await,
            Err(RolezinhosError::SourceUnavailable(_))
        ));
        assert_eq!(source.load().await, Baseline::empty());
    }

    #[tokio::test]
    async fn http_source_parses_success_response() {
        let url = serve_once("200 OK", r#"{"events": [{"id": 2, "nome": "B"}]}"#).await;

        let baseline = BaselineSource::Http(url).fetch().await.unwrap();

        assert_eq!(baseline.events.len(), 1);
        assert_eq!(baseline.events[0].name, "B");
    }

    #[tokio::test]
    async fn http_error_status_is_unavailable() {
        let url = serve_once("503 Service Unavailable", "").await;
        let source = BaselineSource::Http(url);

        assert!(matches!(
            source.fetch().await,
            Err(RolezinhosError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn loopback_detection() {
        let local = |u: &str| is_loopback(&reqwest::Url::parse(u).unwrap());
        assert!(local("http://localhost:3000/roles"));
        assert!(local("http://127.0.0.1:3000/db.json"));
        assert!(local("http://[::1]/db.json"));
        assert!(!local("https://mapadosrolezinhos.web.app/db.json"));
    }

    #[tokio::test]
    async fn http_error_status_degrades_to_empty() {
        let url = serve_once("500 Internal Server Error", "").await;

        assert_eq!(BaselineSource::Http(url).load().await, Baseline::empty());
    }
}
