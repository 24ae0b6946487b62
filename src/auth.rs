use std::fmt;

use crate::error::Error;

/// Name of the environment variable holding the access key id.
pub const ACCESS_KEY_ID_ENV: &str = "TIGRIS_STORAGE_ACCESS_KEY_ID";
/// Name of the environment variable holding the secret access key.
pub const SECRET_ACCESS_KEY_ENV: &str = "TIGRIS_STORAGE_SECRET_ACCESS_KEY";

/// A Tigris access key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, Error> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();

        if access_key_id.trim().is_empty() {
            return Err(Error::invalid_config("access_key_id must not be empty"));
        }
        if secret_access_key.trim().is_empty() {
            return Err(Error::invalid_config("secret_access_key must not be empty"));
        }

        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }

    /// Reads the key pair from `TIGRIS_STORAGE_ACCESS_KEY_ID` and
    /// `TIGRIS_STORAGE_SECRET_ACCESS_KEY`.
    ///
    /// Returns `None` when either variable is unset or empty; callers then fall
    /// back to the SDK's own credential chain.
    pub fn from_env() -> Option<Self> {
        let access_key_id = std::env::var(ACCESS_KEY_ID_ENV).ok()?;
        let secret_access_key = std::env::var(SECRET_ACCESS_KEY_ENV).ok()?;
        Self::new(access_key_id, secret_access_key).ok()
    }

    pub(crate) fn to_sdk(&self) -> aws_sdk_s3::config::Credentials {
        aws_sdk_s3::config::Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
            None,
            "tigris-storage",
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key_id",
                &crate::util::redact::redact_value(&self.access_key_id),
            )
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
