//! HTTP config source for remote JSON documents.
//!
//! [`HttpSource`] implements [`ConfigSource`] by issuing `GET <url>` through
//! a connection-pooled hyper client (rustls, webpki roots) and parsing the
//! body as a flat JSON object of key → value. The version hash is computed
//! over the decoded values, so formatting-only changes on the server do not
//! count as updates.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use url::Url;

use super::{parse_values_str, values_version};
use crate::config::{ConfigSource, ConfigVersion, RemoteValues};
use crate::error::ResolverError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring` as the default.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

/// Validate a remote config URL. Returns `Ok(())` or a human-readable error.
pub fn validate_remote_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

pub struct HttpSource {
    url: String,
    uri: hyper::Uri,
    client: HttpClient,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, ResolverError> {
        validate_remote_url(url).map_err(|msg| ResolverError::UriParse { source: msg.into() })?;
        let uri: hyper::Uri = url.parse().map_err(
            |e: hyper::http::uri::InvalidUri| ResolverError::UriParse {
                source: Box::new(e),
            },
        )?;

        Ok(Self {
            url: url.to_string(),
            uri,
            client: build_http_client(),
        })
    }

    async fn read_values(&self) -> Result<RemoteValues, ResolverError> {
        let req = hyper::Request::builder()
            .uri(self.uri.clone())
            .header(hyper::header::ACCEPT, "application/json")
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .map_err(|e| ResolverError::HttpRequest {
                source: Box::new(e),
            })?;

        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.client.request(req))
            .await
            .map_err(|_| ResolverError::HttpRequest {
                source: format!("request to {} timed out after 10s", self.url).into(),
            })?
            .map_err(|e| ResolverError::HttpRequest {
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::RemoteStatus(status));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ResolverError::HttpRequest {
                source: Box::new(e),
            })?
            .to_bytes();

        parse_values_str("json", &String::from_utf8_lossy(&body), &self.url)
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn load(&self) -> Result<(RemoteValues, ConfigVersion), ResolverError> {
        let values = self.read_values().await?;
        let version = values_version(&values);
        Ok((values, version))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ResolverError> {
        let values = self.read_values().await?;
        Ok(*current != values_version(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_remote_url("http://localhost:8080/config").is_ok());
        assert!(validate_remote_url("https://config.example.com/v1/app").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate_remote_url("ftp://example.com/config").unwrap_err();
        assert!(err.contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn rejects_garbage() {
        let err = validate_remote_url("not a url").unwrap_err();
        assert!(err.contains("not a valid URL"));
    }
}
