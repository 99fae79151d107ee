//! Repository authentication.
//!
//! Credentials come from `--username`/`--password`, the `NEXUS_USERNAME` /
//! `NEXUS_PASSWORD` environment variables or the `[server]` table of
//! `Nexup.toml`. They reach this module through [`ClientOptions`] and are
//! never stored by the upload session.

use reqwest::blocking::RequestBuilder;

use crate::transport::ClientOptions;

/// Apply authentication to a request if credentials are configured.
pub fn apply_auth(request: RequestBuilder, options: &ClientOptions) -> RequestBuilder {
    match (&options.username, &options.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}

/// Whether any credential is configured.
pub fn has_auth(options: &ClientOptions) -> bool {
    options.username.is_some() || options.password.is_some()
}
