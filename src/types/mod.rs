//! Records returned by the simplified client.

use std::collections::HashMap;

pub use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// Content type reported when the service does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An object read from or written to Tigris.
///
/// Not every call fills every field. `body` is only set by
/// [`get`](crate::SimpleClient::get) and by callers preparing a put, and it
/// can be read once.
#[derive(Debug, Default)]
pub struct Object {
    /// Bucket the object is in.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// MIME type.
    pub content_type: Option<String>,
    /// `inline` or `attachment`, when set.
    pub content_disposition: Option<String>,
    /// Entity tag, usually a checksum.
    pub etag: Option<String>,
    /// Version id.
    pub version: Option<String>,
    /// Size in bytes.
    pub size: Option<i64>,
    /// Last modification time.
    pub last_modified: Option<OffsetDateTime>,
    /// User metadata (`x-amz-meta-*`).
    pub metadata: HashMap<String, String>,
    /// Object body.
    pub body: Option<ByteStream>,
}

impl Object {
    /// An object with a key and nothing else, ready to be filled for a put.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the body. The size is taken from in-memory bodies.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.size = i64::try_from(body.len()).ok();
        self.body = Some(ByteStream::from(body));
        self
    }

    /// Sets a body whose length is not known up front.
    pub fn with_stream(mut self, body: ByteStream) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Reads the whole body into memory, consuming it.
    ///
    /// Fails if the body was already taken or never set.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        let body = self
            .body
            .take()
            .ok_or_else(|| Error::invalid_input("object body was already consumed or not set"))?;
        let data = body.collect().await.map_err(Error::body)?;
        Ok(data.into_bytes())
    }

    /// Takes the body stream, leaving `None` behind.
    pub fn take_body(&mut self) -> Option<ByteStream> {
        self.body.take()
    }
}

/// One page of a [`list`](crate::SimpleClient::list) call.
#[derive(Debug, Default)]
pub struct ListResult {
    /// Objects in key order. Only metadata is set.
    pub items: Vec<Object>,
    /// Key prefixes rolled up by the delimiter.
    pub prefixes: Vec<String>,
    /// Token for the next page.
    pub next_token: Option<String>,
    /// True exactly when `next_token` is set.
    pub has_more: bool,
}

/// Metadata about a bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
    /// Creation time. For buckets this crate just created it is the local clock.
    pub created: Option<OffsetDateTime>,
    pub snapshots_enabled: bool,
    /// True if other buckets were forked from this one.
    pub is_fork_parent: bool,
    /// Set only when this bucket is a fork.
    pub source_bucket: Option<String>,
    /// Set only when this bucket was forked from a specific snapshot.
    pub source_snapshot: Option<String>,
}

/// One page of buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketList {
    pub buckets: Vec<BucketInfo>,
    pub next_token: Option<String>,
    /// True exactly when `next_token` is set.
    pub truncated: bool,
}

/// A point-in-time snapshot of a bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// Description given when the snapshot was taken.
    pub name: String,
    /// Version id. `None` right after creation; list snapshots to learn it.
    pub version: Option<String>,
    pub created: Option<OffsetDateTime>,
    /// Bucket the snapshot belongs to.
    pub bucket: String,
}

/// Snapshots of one bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotList {
    pub snapshots: Vec<SnapshotInfo>,
    pub bucket: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn body_reads_exactly_once() {
        let mut obj = Object::new("a.txt").with_body("hello");
        assert_eq!(obj.size, Some(5));
        assert_eq!(obj.bytes().await.unwrap(), Bytes::from_static(b"hello"));

        let err = obj.bytes().await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn builder_style_setters_fill_fields() {
        let obj = Object::new("k")
            .with_content_type("text/plain")
            .with_size(10)
            .with_metadata("owner", "me");
        assert_eq!(obj.key, "k");
        assert_eq!(obj.content_type.as_deref(), Some("text/plain"));
        assert_eq!(obj.size, Some(10));
        assert_eq!(obj.metadata.get("owner").map(String::as_str), Some("me"));
        assert!(obj.body.is_none());
    }
}
