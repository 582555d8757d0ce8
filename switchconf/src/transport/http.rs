//! HTTP transport implementation using reqwest.

use log::debug;
use reqwest::{Client, Response};

use super::config::HttpConfig;
use super::{Params, Transport};
use crate::error::{Result, TransportError};

/// HTTP transport wrapping a reqwest client.
pub struct HttpTransport {
    client: Client,

    /// Configuration used for this connection.
    config: HttpConfig,
}

impl HttpTransport {
    /// Build the HTTP client. No request is sent.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;

        Ok(Self { client, config })
    }

    /// Get the connection configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Check the status and read the body.
    async fn read_body(url: String, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request { url, source })?;
        Ok(body)
    }
}

impl Transport for HttpTransport {
    fn host(&self) -> &str {
        &self.config.host
    }

    async fn get(&self, path: &str, query: &Params) -> Result<String> {
        let url = self.config.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        Self::read_body(url, response).await
    }

    async fn post_form(&self, path: &str, form: &Params) -> Result<String> {
        let url = self.config.url(path);
        // Form bodies carry credentials; log field names only.
        debug!(
            "POST {} [{}]",
            url,
            form.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>().join(", ")
        );

        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        Self::read_body(url, response).await
    }
}
