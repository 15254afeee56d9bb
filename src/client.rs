//! HTTP client implementation for the Livy sessions API

use std::io::BufReader;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Method, Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use tracing::{error, info};
use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::types::{SessionKind, SessionOptions};

/// Default Livy REST port
const DEFAULT_PORT: u16 = 8998;

/// Highest HTTP status treated as success. Anything above it, including
/// 204 No Content and redirects, is reported as a failure.
const SUCCESS_STATUS_CEILING: u16 = 201;

/// Configuration options for the Livy client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Livy server host name or address (default: "localhost")
    pub host: String,
    /// Livy server port (default: 8998)
    pub port: u16,
    /// Connect over TLS instead of plain HTTP (default: false)
    pub https: bool,
    /// PEM-encoded private key for mutual TLS, passed as the key text
    /// rather than a file path. Only used when `cert` is also set.
    pub key: Option<String>,
    /// PEM-encoded client certificate for mutual TLS. Only used when
    /// `key` is also set.
    pub cert: Option<String>,
    /// PEM-encoded certificate authority used to verify the server.
    /// When set it replaces the built-in webpki trust roots.
    pub ca: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            https: false,
            key: None,
            cert: None,
            ca: None,
        }
    }
}

/// Build a rustls ClientConfig from the PEM material in the client
/// configuration.
fn build_tls_config(config: &ClientConfig) -> Result<rustls::ClientConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let mut roots = rustls::RootCertStore::empty();
    if let Some(ca_pem) = &config.ca {
        let certs = rustls_pemfile::certs(&mut BufReader::new(ca_pem.as_bytes()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::Tls(format!("Failed to parse ca: {}", e)))?;
        if certs.is_empty() {
            return Err(Error::Tls("No certificates found in ca".to_string()));
        }
        for cert in certs {
            roots
                .add(cert)
                .map_err(|e| Error::Tls(format!("Invalid ca certificate: {}", e)))?;
        }
    } else {
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    let builder = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Tls(e.to_string()))?
        .with_root_certificates(roots);

    match (&config.key, &config.cert) {
        (Some(key_pem), Some(cert_pem)) => {
            let certs = rustls_pemfile::certs(&mut BufReader::new(cert_pem.as_bytes()))
                .collect::<std::io::Result<Vec<_>>>()
                .map_err(|e| Error::Tls(format!("Failed to parse cert: {}", e)))?;
            if certs.is_empty() {
                return Err(Error::Tls("No certificates found in cert".to_string()));
            }
            let key = rustls_pemfile::private_key(&mut BufReader::new(key_pem.as_bytes()))
                .map_err(|e| Error::Tls(format!("Failed to parse key: {}", e)))?
                .ok_or_else(|| Error::Tls("No private key found in key".to_string()))?;
            builder
                .with_client_auth_cert(certs, key)
                .map_err(|e| Error::Tls(format!("Invalid client key/certificate: {}", e)))
        }
        // A lone key or certificate is ignored; a client identity needs both.
        _ => Ok(builder.with_no_client_auth()),
    }
}

/// Query parameters for the session listing endpoint. Absent values are
/// omitted from the query string entirely, never sent as empty or zero.
fn sessions_query(from: Option<usize>, size: Option<usize>) -> Option<Vec<(String, String)>> {
    let mut params = Vec::new();
    if let Some(from) = from {
        params.push(("from".to_string(), from.to_string()));
    }
    if let Some(size) = size {
        params.push(("size".to_string(), size.to_string()));
    }
    if params.is_empty() {
        None
    } else {
        Some(params)
    }
}

/// JSON body for the session creation endpoint. The caller's options are
/// copied and `kind` falls back to `spark` when unset.
fn create_session_body(options: &SessionOptions) -> Result<String> {
    let mut options = options.clone();
    options.kind.get_or_insert(SessionKind::Spark);
    Ok(serde_json::to_string(&options)?)
}

type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

/// HTTP client for the Apache Livy sessions REST API
///
/// Supports plain HTTP and HTTPS connections, including mutual TLS with
/// PEM material supplied as strings. All requests issued through one
/// client share a keep-alive connection pool, so concurrent calls reuse
/// established connections instead of paying a handshake per request.
///
/// # Example
/// ```rust,no_run
/// use livy_client::{Client, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), livy_client::Error> {
///     // Plain HTTP on the default port 8998
///     let client = Client::new("localhost")?;
///
///     // HTTPS with a private certificate authority
///     # let ca_pem = String::new();
///     let client = Client::with_config(ClientConfig {
///         host: "livy.example.com".to_string(),
///         port: 443,
///         https: true,
///         ca: Some(ca_pem),
///         ..Default::default()
///     })?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http_client: HttpClient<HttpsConnector, Full<Bytes>>,
}

impl Client {
    /// Create a client for a plain-HTTP Livy server on the default port
    ///
    /// # Arguments
    /// * `host` - Livy server host name or address
    ///
    /// # Errors
    /// Returns an error if the host is empty or does not form a valid URL
    pub fn new(host: &str) -> Result<Self> {
        let config = ClientConfig {
            host: host.to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a client with custom configuration
    ///
    /// Allocates the connection pool and, for HTTPS, builds the TLS
    /// context from the supplied PEM material. No network I/O happens
    /// until the first request.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "host must be a non-empty string".to_string(),
            ));
        }

        // Catch malformed host/port combinations before the first request
        let scheme = if config.https { "https" } else { "http" };
        let base_url = format!("{}://{}:{}", scheme, config.host, config.port);
        let _: Uri = base_url
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid server address: {}", e)))?;

        let tls_config = build_tls_config(&config)?;

        let mut connector = HttpConnector::new();
        connector.enforce_http(false);
        // Livy exchanges are small; don't let them sit in Nagle's buffer
        connector.set_nodelay(true);

        let https_connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .wrap_connector(connector);

        let http_client = HttpClient::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Get the configured server host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Get the configured server port
    pub fn port(&self) -> u16 {
        self.config.port
    }

    fn base_url(&self) -> String {
        let scheme = if self.config.https { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.config.host, self.config.port)
    }

    /// List sessions on the server
    ///
    /// # Arguments
    /// * `from` - Index of the first session to fetch (optional)
    /// * `size` - Number of sessions to fetch (optional)
    ///
    /// Parameters left as `None` are omitted from the query string and
    /// the server applies its own defaults.
    ///
    /// # Returns
    /// The raw JSON session list as returned by the server
    ///
    /// # Example
    /// ```rust,no_run
    /// # use livy_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), livy_client::Error> {
    /// # let client = Client::new("localhost")?;
    /// let sessions = client.list_sessions(Some(0), Some(20)).await?;
    /// println!("{}", sessions);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_sessions(&self, from: Option<usize>, size: Option<usize>) -> Result<String> {
        self.request(Method::GET, "/sessions", sessions_query(from, size), None)
            .await
    }

    /// Create a new session
    ///
    /// # Arguments
    /// * `options` - Session parameters; `kind` defaults to
    ///   [`SessionKind::Spark`] when unset
    ///
    /// # Returns
    /// The raw JSON descriptor of the created session
    ///
    /// # Example
    /// ```rust,no_run
    /// # use livy_client::{Client, SessionKind, SessionOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), livy_client::Error> {
    /// # let client = Client::new("localhost")?;
    /// let options = SessionOptions {
    ///     kind: Some(SessionKind::PySpark),
    ///     name: Some("nightly-etl".to_string()),
    ///     ..Default::default()
    /// };
    /// let created = client.create_session(&options).await?;
    /// println!("{}", created);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_session(&self, options: &SessionOptions) -> Result<String> {
        let body = create_session_body(options)?;
        self.request(Method::POST, "/sessions", None, Some(body))
            .await
    }

    /// Delete a session by its ID
    ///
    /// # Arguments
    /// * `session_id` - Integer ID of the session to delete
    ///
    /// # Returns
    /// The raw JSON deletion acknowledgement
    ///
    /// # Example
    /// ```rust,no_run
    /// # use livy_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), livy_client::Error> {
    /// # let client = Client::new("localhost")?;
    /// client.delete_session(42).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete_session(&self, session_id: u32) -> Result<String> {
        self.request(Method::DELETE, &format!("/sessions/{}", session_id), None, None)
            .await
    }

    /// Issue a request against an arbitrary path on the server
    ///
    /// This is the engine behind the session operations, exposed for
    /// endpoints the typed surface doesn't cover. The method must be
    /// one of GET, POST or DELETE; anything else is rejected before any
    /// I/O happens. A body, when present, is sent with an exact
    /// `content-length` and a `content-type` of
    /// `application/octet-stream`; without one `content-length` is an
    /// explicit zero.
    ///
    /// # Returns
    /// The response body text when the status code is at most 201. Any
    /// higher status becomes [`Error::Remote`], which still carries the
    /// body so server-side diagnostics are never lost.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use livy_client::{Client, Method};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), livy_client::Error> {
    /// # let client = Client::new("localhost")?;
    /// let version = client.request(Method::GET, "/version", None, None).await?;
    /// println!("{}", version);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<Vec<(String, String)>>,
        body: Option<String>,
    ) -> Result<String> {
        if !matches!(method, Method::GET | Method::POST | Method::DELETE) {
            return Err(Error::InvalidArgument(format!(
                "Unsupported HTTP method: {}",
                method
            )));
        }

        info!("Executing request: {} {}, params: {:?}", method, path, params);

        let url = match &params {
            Some(params) if !params.is_empty() => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                for (name, value) in params {
                    query.append_pair(name, value);
                }
                format!("{}{}?{}", self.base_url(), path, query.finish())
            }
            _ => format!("{}{}", self.base_url(), path),
        };
        let uri: Uri = url
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid request URL: {}", e)))?;

        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            // content-length is the byte length of the encoded payload,
            // not the character count
            Some(text) => builder
                .header(CONTENT_TYPE, "application/octet-stream")
                .header(CONTENT_LENGTH, text.len())
                .body(Full::new(Bytes::from(text))),
            None => builder
                .header(CONTENT_LENGTH, 0)
                .body(Full::new(Bytes::new())),
        }
        .map_err(|e| Error::InvalidArgument(format!("Failed to build request: {}", e)))?;

        let response = match self.http_client.request(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error executing request: {}", e);
                return Err(Error::Connection(format!("Request failed: {}", e)));
            }
        };

        Self::collect_response(response).await
    }

    /// Drain the response body and classify the outcome by status code
    async fn collect_response(response: Response<Incoming>) -> Result<String> {
        let status = response.status();
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());

        let collected = match response.into_body().collect().await {
            Ok(collected) => collected,
            Err(e) => {
                error!("Error reading response: {}", e);
                return Err(Error::Connection(format!(
                    "Failed to read response body: {}",
                    e
                )));
            }
        };
        let body = String::from_utf8_lossy(&collected.to_bytes()).into_owned();

        if status.as_u16() <= SUCCESS_STATUS_CEILING {
            info!("Request succeeded: {}", status);
            Ok(body)
        } else {
            info!("Request failed: {} {} - {}", status.as_u16(), reason, body);
            Err(Error::Remote {
                status: status.as_u16(),
                reason,
                body,
            })
        }
    }
}
