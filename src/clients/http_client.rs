//! HTTP transport for the resource API.
//!
//! This module provides the [`HttpClient`] type, the [`RestClient`]
//! implementation that talks to an API server over HTTP.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::rest::{EventStream, FrameBuffer, RawEvent, RestClient};
use crate::config::ClientConfig;

/// Library version from Cargo.toml.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of decoded watch events buffered ahead of the consumer.
const WATCH_BUFFER: usize = 32;

/// HTTP client for the resource API.
///
/// The client handles:
/// - Base URI and API root construction from [`ClientConfig`]
/// - Default `User-Agent` and `Accept` headers
/// - Mapping non-2xx responses to [`HttpResponseError`](crate::clients::HttpResponseError)
/// - Streaming watch responses into an [`EventStream`]
///
/// Each request is attempted exactly once.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use resource_helper::{ClientConfig, HostUrl};
/// use resource_helper::clients::HttpClient;
///
/// let config = ClientConfig::builder()
///     .host(HostUrl::new("https://kube.example.com:6443").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config).unwrap();
/// assert_eq!(client.base_path(), "/api/v1");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://kube.example.com:6443`).
    base_uri: String,
    /// API root path (e.g., "/api/v1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Per-request timeout applied to non-watch requests.
    timeout: Option<std::time::Duration>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let base_uri = config.host().as_ref().to_string();
        let base_path = config.api_version().api_path();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}resource-helper v{LIBRARY_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
            timeout: config.timeout(),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the API root path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request is sent to, without query parameters.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, request.path())
    }

    /// Sends a request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let res = self.dispatch(&request, self.timeout).await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Opens a watch request and streams its events.
    ///
    /// A background task reads the body and forwards each frame. The task
    /// stops at end of body, on the first read error, or when the returned
    /// stream is closed or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid, cannot be sent, or the
    /// server answers with a non-2xx status.
    pub async fn stream(&self, request: HttpRequest) -> Result<EventStream, HttpError> {
        let mut res = self.dispatch(&request, None).await?;

        let code = res.status().as_u16();
        if !(200..=299).contains(&code) {
            let headers = Self::parse_response_headers(res.headers());
            let body = res.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            return Err(HttpResponse::new(code, headers, body).to_error().into());
        }

        let (sender, stream) = EventStream::channel(WATCH_BUFFER);
        let path = request.path();

        tokio::spawn(async move {
            let mut frames = FrameBuffer::default();
            loop {
                let chunk = tokio::select! {
                    () = sender.closed() => {
                        tracing::debug!("Watch on {} stopped by consumer", path);
                        return;
                    }
                    chunk = res.chunk() => chunk,
                };

                match chunk {
                    Ok(Some(chunk)) => {
                        if let Err(e) = frames.push_chunk(&chunk) {
                            tracing::warn!("Watch on {} sent an oversized frame: {}", path, e);
                            let _ = sender.send(Err(e)).await;
                            return;
                        }
                        while let Some(frame) = frames.next_frame() {
                            if sender.send(RawEvent::parse(&frame)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Ok(None) => {
                        if let Some(frame) = frames.finish() {
                            let _ = sender.send(RawEvent::parse(&frame)).await;
                        }
                        tracing::debug!("Watch on {} ended by server", path);
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("Watch on {} failed while reading: {}", path, e);
                        let _ = sender.send(Err(HttpError::Network(e))).await;
                        return;
                    }
                }
            }
        });

        Ok(stream)
    }

    /// Validates, builds, and sends the reqwest request.
    async fn dispatch(
        &self,
        request: &HttpRequest,
        timeout: Option<std::time::Duration>,
    ) -> Result<reqwest::Response, HttpError> {
        request.verify()?;

        let url = self.url_for(request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_type) = &request.body_type {
            req_builder = req_builder.header("Content-Type", body_type.as_content_type());
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        if let Some(timeout) = timeout {
            req_builder = req_builder.timeout(timeout);
        }

        tracing::debug!("Sending {} request to {}", request.http_method, url);

        Ok(req_builder.send().await?)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl RestClient for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Vec<u8>, HttpError> {
        let response = self.request(request).await?;
        if response.is_ok() {
            Ok(response.body)
        } else {
            Err(response.to_error().into())
        }
    }

    async fn watch(&self, request: HttpRequest) -> Result<EventStream, HttpError> {
        self.stream(request).await
    }
}
