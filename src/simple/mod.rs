//! A single-bucket client for the common cases.
//!
//! ```no_run
//! # async fn demo() -> Result<(), tigris_storage::Error> {
//! use tigris_storage::{Object, SimpleClient};
//!
//! // Reads TIGRIS_STORAGE_BUCKET and the access key pair from the environment.
//! let client = SimpleClient::builder().build_simple().await?;
//!
//! client
//!     .put(Object::new("hello.txt").with_body("hi").with_content_type("text/plain"))
//!     .send()
//!     .await?;
//!
//! let mut obj = client.get("hello.txt").send().await?;
//! assert_eq!(obj.bytes().await?.as_ref(), b"hi");
//! # Ok(())
//! # }
//! ```

mod buckets;
mod objects;
pub mod options;
mod presign;

use std::{sync::Arc, time::Duration};

pub use buckets::{
    BucketInfoRequest, CreateBucketRequest, CreateSnapshotRequest, DeleteBucketRequest,
    ForkBucketRequest, ListBucketsRequest, ListSnapshotsRequest,
};
pub use objects::{DeleteRequest, GetRequest, HeadRequest, ListRequest, PutRequest};
pub use presign::PresignRequest;

use crate::{
    client::{Client, ClientBuilder},
    types::Object,
};

/// A client bound to one default bucket.
///
/// Object calls use the default bucket unless a request overrides it.
/// Clones and [`for_bucket`](Self::for_bucket) share the SDK handle.
#[derive(Clone, Debug)]
pub struct SimpleClient {
    client: Client,
    bucket: Arc<str>,
}

impl SimpleClient {
    /// Same as [`Client::builder`]; finish with
    /// [`build_simple`](ClientBuilder::build_simple).
    pub fn builder() -> ClientBuilder {
        Client::builder()
    }

    pub(crate) fn from_client(client: Client, bucket: String) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// A client for another default bucket, sharing this one's connection.
    pub fn for_bucket(&self, bucket: impl Into<String>) -> Self {
        Self::from_client(self.client.clone(), bucket.into())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The full client, for Tigris calls the simple API does not cover.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches an object with its body.
    pub fn get(&self, key: impl Into<String>) -> GetRequest {
        GetRequest::new(self, key.into())
    }

    /// Fetches object metadata without the body.
    pub fn head(&self, key: impl Into<String>) -> HeadRequest {
        HeadRequest::new(self, key.into())
    }

    /// Uploads an object. The body is consumed by the call.
    pub fn put(&self, object: Object) -> PutRequest {
        PutRequest::new(self, object)
    }

    pub fn delete(&self, key: impl Into<String>) -> DeleteRequest {
        DeleteRequest::new(self, key.into())
    }

    /// Lists one page of objects. Follow `next_token` for more.
    pub fn list(&self) -> ListRequest {
        ListRequest::new(self)
    }

    /// Presigns a `GET`, `PUT` or `DELETE` URL for `key`, valid for `expiry`.
    pub fn presign_url(
        &self,
        method: impl Into<String>,
        key: impl Into<String>,
        expiry: Duration,
    ) -> PresignRequest {
        PresignRequest::new(self, method.into(), key.into(), expiry)
    }

    pub fn create_bucket(&self, bucket: impl Into<String>) -> CreateBucketRequest {
        CreateBucketRequest::new(self, bucket.into())
    }

    /// Deletes a bucket. Non-empty buckets fail unless `force` is set.
    pub fn delete_bucket(&self, bucket: impl Into<String>) -> DeleteBucketRequest {
        DeleteBucketRequest::new(self, bucket.into())
    }

    pub fn list_buckets(&self) -> ListBucketsRequest {
        ListBucketsRequest::new(self)
    }

    /// Reads bucket metadata including snapshot and fork state.
    pub fn bucket_info(&self, bucket: impl Into<String>) -> BucketInfoRequest {
        BucketInfoRequest::new(self, bucket.into())
    }

    /// Takes a snapshot of a snapshot-enabled bucket.
    pub fn create_bucket_snapshot(
        &self,
        bucket: impl Into<String>,
        description: impl Into<String>,
    ) -> CreateSnapshotRequest {
        CreateSnapshotRequest::new(self, bucket.into(), description.into())
    }

    pub fn list_bucket_snapshots(&self, bucket: impl Into<String>) -> ListSnapshotsRequest {
        ListSnapshotsRequest::new(self, bucket.into())
    }

    /// Forks `source` into a new bucket `target`.
    pub fn fork_bucket(
        &self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> ForkBucketRequest {
        ForkBucketRequest::new(self, source.into(), target.into())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    use super::*;

    /// A client that never connects; enough to build and presign requests.
    pub(crate) fn offline_client(bucket: &str) -> SimpleClient {
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("auto"))
            .endpoint_url("http://127.0.0.1:9")
            .force_path_style(true)
            .credentials_provider(Credentials::new("tid_test", "tsec_test", None, None, "test"))
            .build();
        let client = Client::from_sdk(aws_sdk_s3::Client::from_conf(config));
        SimpleClient::from_client(client, bucket.to_string())
    }
}
