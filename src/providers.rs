//! Endpoint presets for Tigris.

use std::fmt;

use url::Url;

use crate::{Error, Result};

/// Tigris' globally available endpoint.
pub const GLOBAL_ENDPOINT: &str = "https://t3.storage.dev";
/// Tigris' fly.io optimized endpoint.
pub const FLY_ENDPOINT: &str = "https://fly.storage.tigris.dev";

/// Which Tigris endpoint a client talks to.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
    /// `https://t3.storage.dev`, usable from anywhere.
    #[default]
    Global,
    /// `https://fly.storage.tigris.dev`. Traffic from fly.io machines is zero-rated here.
    Fly,
    /// Any other endpoint, such as a proxy or a local development server.
    Custom(String),
}

impl Endpoint {
    /// Returns the endpoint URL string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Global => GLOBAL_ENDPOINT,
            Self::Fly => FLY_ENDPOINT,
            Self::Custom(v) => v,
        }
    }

    /// Parses and validates the endpoint.
    pub fn url(&self) -> Result<Url> {
        let endpoint = Url::parse(self.as_str())
            .map_err(|_| Error::invalid_config("endpoint must be a valid absolute URL"))?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(Error::invalid_config(
                "endpoint scheme must be http or https",
            ));
        }
        if endpoint.host_str().is_none() {
            return Err(Error::invalid_config("endpoint must include host"));
        }
        if endpoint.query().is_some() || endpoint.fragment().is_some() {
            return Err(Error::invalid_config(
                "endpoint must not include query or fragment",
            ));
        }

        Ok(endpoint)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        match value {
            GLOBAL_ENDPOINT => Self::Global,
            FLY_ENDPOINT => Self::Fly,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}
