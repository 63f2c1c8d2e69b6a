//! HTTP transport over `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::errors::TransportError;
use crate::http::HttpConfig;
use crate::interfaces::{Method, RequestBody, Transport, TransportResponse};

/// HTTP transport implementation.
///
/// Sends requests to the search backend over HTTP with optional basic
/// authentication. The endpoint URL is validated at construction time.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
}

impl HttpTransport {
    /// Create a new HTTP transport from the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpTransport)` - A transport ready to send requests
    /// * `Err(TransportError)` - If the endpoint URL is invalid or the HTTP
    ///   client could not be built
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let parsed = Url::parse(&config.endpoint)
            .map_err(|e| TransportError::invalid_url(format!("{}: {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::connection(e.to_string()))?;

        info!(endpoint = %parsed, "Created HTTP transport");

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => self.client.get(url),
            Method::Head => self.client.head(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_deref()),
            None => builder,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse, TransportError> {
        let url = format!("{}{}", self.endpoint, path);

        let mut request = self.builder(method, &url);
        request = match body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Bulk(payload)) => request
                .header(CONTENT_TYPE, "application/x-ndjson")
                .body(payload),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| TransportError::parse(format!("Invalid JSON response: {}", e)))?
        };

        debug!(method = %method, path = %path, status = status, "Request completed");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_validates_endpoint() {
        let result = HttpTransport::new(HttpConfig::new("not a url"));

        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let transport = HttpTransport::new(HttpConfig::new("http://localhost:9200/")).unwrap();

        assert_eq!(transport.endpoint, "http://localhost:9200");
    }

    #[test]
    fn test_new_accepts_credentials() {
        let config = HttpConfig::new("http://localhost:9200")
            .with_credentials("admin", "secret")
            .with_timeout(Duration::from_secs(5));
        let transport = HttpTransport::new(config).unwrap();

        assert_eq!(transport.username.as_deref(), Some("admin"));
        assert_eq!(transport.password.as_deref(), Some("secret"));
    }
}
