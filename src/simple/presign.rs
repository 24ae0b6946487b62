use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;

use super::{SimpleClient, options::PresignOptions};
use crate::{
    client::Client,
    error::{Error, Result},
    util::observe::observe,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PresignMethod {
    Get,
    Put,
    Delete,
}

impl PresignMethod {
    fn parse(method: &str) -> Result<Self> {
        match method {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(Error::invalid_input(format!(
                "unsupported HTTP method {other:?} for presigned URL (supported: GET, PUT, DELETE)"
            ))),
        }
    }
}

pub struct PresignRequest {
    client: Client,
    bucket: String,
    method: String,
    key: String,
    expiry: Duration,
    options: PresignOptions,
}

impl PresignRequest {
    pub(super) fn new(simple: &SimpleClient, method: String, key: String, expiry: Duration) -> Self {
        Self {
            client: simple.client.clone(),
            bucket: simple.bucket.to_string(),
            method,
            key,
            expiry,
            options: PresignOptions::default(),
        }
    }

    /// Presigns against another bucket for this call only.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Content type the uploader must send. PUT only.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.options.content_type = Some(content_type.into());
        self
    }

    /// Content disposition the uploader must send. PUT only.
    pub fn content_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.options.content_disposition = Some(disposition.into());
        self
    }

    pub fn options(mut self, options: PresignOptions) -> Self {
        self.options = options;
        self
    }

    /// Checks the method, then the key, then the expiry, and only then signs.
    pub async fn send(self) -> Result<String> {
        let method = PresignMethod::parse(&self.method)?;
        if self.key.is_empty() {
            return Err(Error::invalid_input("key cannot be empty for presigned URL"));
        }
        if self.expiry.is_zero() {
            return Err(Error::invalid_input(format!(
                "invalid expiry duration {:?} for presigned URL (must be positive)",
                self.expiry
            )));
        }

        let config = PresigningConfig::expires_in(self.expiry).map_err(|err| {
            Error::invalid_input(format!("invalid expiry for presigned URL: {err}"))
        })?;

        let sdk = self.client.sdk();
        let bucket = &self.bucket;
        let key = &self.key;
        let target = format!("{bucket}/{key}");

        observe("presign", bucket, Some(key), async {
            let presigned = match method {
                PresignMethod::Get => sdk
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .presigned(config)
                    .await
                    .map_err(|err| Error::service("presign get", &target, err))?,
                PresignMethod::Put => sdk
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .set_content_type(self.options.content_type.clone())
                    .set_content_disposition(self.options.content_disposition.clone())
                    .presigned(config)
                    .await
                    .map_err(|err| Error::service("presign put", &target, err))?,
                PresignMethod::Delete => sdk
                    .delete_object()
                    .bucket(bucket)
                    .key(key)
                    .presigned(config)
                    .await
                    .map_err(|err| Error::service("presign delete", &target, err))?,
            };
            Ok(presigned.uri().to_string())
        })
        .await
    }
}
