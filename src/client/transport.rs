//! HTTP transport boundary
//!
//! The client only ever issues GET requests and only needs the status and the
//! body text back, so the transport is a single-method trait. `HttpTransport`
//! is the real implementation; tests substitute their own.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Proxy;
use tracing::info;

use super::{ApiError, ClientConfig};

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can perform an authenticated GET request
pub trait Transport {
    /// Performs a blocking GET of `url`
    ///
    /// Returns `Err` only when no response was received at all; any status,
    /// including errors, is reported through `HttpResponse`.
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        (**self).get(url)
    }
}

/// Blocking `reqwest` transport holding one pooled connection handle
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from `config`
    ///
    /// Auth and accept headers are installed as defaults so every request
    /// carries them.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&config.bearer()).map_err(|_| {
            ApiError::InvalidApiToken("token contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        info!(url, "sending request");
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_builds_from_default_config() {
        assert!(HttpTransport::new(&ClientConfig::new("token")).is_ok());
    }

    #[test]
    fn test_http_transport_accepts_proxy() {
        let config = ClientConfig::new("token").with_proxy("http://127.0.0.1:3128");
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn test_http_transport_rejects_newline_in_token() {
        let config = ClientConfig::new("bad\ntoken");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(ApiError::InvalidApiToken(_))
        ));
    }

    #[test]
    fn test_transport_is_usable_through_a_reference() {
        struct Fixed;
        impl Transport for Fixed {
            fn get(&self, _url: &str) -> Result<HttpResponse, ApiError> {
                Ok(HttpResponse::new(200, "{}"))
            }
        }

        let fixed = Fixed;
        let by_ref: &dyn Transport = &fixed;
        assert_eq!(by_ref.get("x").unwrap().status, 200);
        assert_eq!((&fixed).get("x").unwrap().body, "{}");
    }
}
