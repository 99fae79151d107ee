//! Blocking reqwest implementation of [`Sender`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::Method;

use nexup_util::errors::{NexusError, NexusResult};

use crate::auth;
use crate::transport::{ClientOptions, HttpResponse, Sender, TransportError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP transport used for real uploads.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    options: ClientOptions,
}

impl HttpClient {
    pub fn new() -> NexusResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("nexup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NexusError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            options: ClientOptions::default(),
        })
    }
}

impl Sender for HttpClient {
    fn send_request(
        &mut self,
        method: Method,
        url: &str,
        body: Vec<u8>,
        headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("{method} {url} ({} bytes)", body.len());

        let mut req = self
            .client
            .request(method, url)
            .headers(headers.clone())
            .timeout(self.options.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .body(body);
        req = auth::apply_auth(req, &self.options);

        let resp = req
            .send()
            .map_err(|e| TransportError(format!("Request to {url} failed: {e}")))?;

        tracing::debug!("{url} -> {}", resp.status());
        Ok(HttpResponse::new(resp.status()))
    }

    fn set_options(&mut self, options: ClientOptions) {
        if auth::has_auth(&options) {
            tracing::debug!("Using credentials for upload requests");
        }
        self.options = options;
    }
}
