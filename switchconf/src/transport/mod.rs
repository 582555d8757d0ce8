//! HTTP transport layer wrapping reqwest.
//!
//! The driver speaks to the device through the [`Transport`] trait, one
//! request at a time. [`HttpTransport`] is the real implementation; tests
//! substitute a recording transport that serves captured pages.

pub mod config;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use config::{Credentials, HttpConfig};
pub use http::HttpTransport;

use std::future::Future;

use crate::error::Result;

/// Request parameters, sent as a query string or form body.
pub type Params = [(String, String)];

/// A request/response channel to one device's web interface.
pub trait Transport: Send + Sync {
    /// Host this transport talks to, for messages.
    fn host(&self) -> &str;

    /// GET `path` with query parameters and return the body.
    fn get(&self, path: &str, query: &Params) -> impl Future<Output = Result<String>> + Send;

    /// POST `form` as `application/x-www-form-urlencoded` and return the body.
    fn post_form(
        &self,
        path: &str,
        form: &Params,
    ) -> impl Future<Output = Result<String>> + Send;
}
