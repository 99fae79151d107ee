//! The HTTP capability the upload session is driven through.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Options passed to a transport once, before any request is sent.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<Duration>,
}

/// The part of a response the uploader looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }
}

/// A request that never produced a response (connect failure, timeout, ...).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends HTTP requests on behalf of an upload session.
pub trait Sender {
    fn send_request(
        &mut self,
        method: Method,
        url: &str,
        body: Vec<u8>,
        headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError>;

    fn set_options(&mut self, options: ClientOptions);
}
