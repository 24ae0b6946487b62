//! Client-wide configuration and how it is resolved.
//!
//! Resolution order: hard-coded defaults, then environment variables, then
//! builder setters in call order. The last writer of a field wins.

use crate::{auth::Credentials, error::Error, providers::Endpoint};

/// Name of the environment variable holding the default bucket.
pub const BUCKET_ENV: &str = "TIGRIS_STORAGE_BUCKET";

/// Default signing region for Tigris.
pub const DEFAULT_REGION: &str = "auto";

/// Resolved client configuration.
///
/// Fields are public so callers can resolve configuration their own way and
/// hand the result to [`crate::ClientBuilder::with_options`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Endpoint to connect to.
    pub endpoint: Endpoint,
    /// Signing region. Tigris uses `auto`.
    pub region: String,
    /// Path-style (`https://host/bucket/key`) instead of virtual-hosted addressing.
    pub path_style: bool,
    /// Static key pair. `None` defers to the SDK credential chain.
    pub credentials: Option<Credentials>,
    /// Default bucket for single-bucket clients.
    pub bucket: Option<String>,
}

impl Options {
    /// Hard-coded defaults with nothing read from the environment.
    pub fn defaults() -> Self {
        Self {
            endpoint: Endpoint::Global,
            region: DEFAULT_REGION.to_string(),
            path_style: false,
            credentials: None,
            bucket: None,
        }
    }

    /// Defaults overlaid with `TIGRIS_STORAGE_*` environment variables.
    pub fn from_env() -> Self {
        let mut options = Self::defaults();
        options.credentials = Credentials::from_env();
        options.bucket = std::env::var(BUCKET_ENV).ok().filter(|b| !b.is_empty());
        options
    }

    /// Returns the configured bucket, treating an empty name as unset.
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket.as_deref().filter(|b| !b.is_empty())
    }

    /// Checks everything the base client needs.
    pub(crate) fn validate(&self) -> Vec<Error> {
        let mut errors = Vec::new();
        if let Err(err) = self.endpoint.url() {
            errors.push(err);
        }
        if self.region.trim().is_empty() {
            errors.push(Error::invalid_config("region must not be empty"));
        }
        errors
    }

    /// Checks everything a single-bucket client needs.
    pub(crate) fn validate_simple(&self) -> Vec<Error> {
        let mut errors = self.validate();
        if self.bucket_name().is_none() {
            errors.push(Error::NoBucketName);
        }
        errors
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::defaults()
    }
}
