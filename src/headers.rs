//! Tigris-specific request directives and response headers.
//!
//! Tigris extends the S3 API through HTTP headers rather than new endpoints.
//! Each [`Directive`] maps to exactly one request header; apply them to any
//! SDK call with [`DirectiveExt`].

use std::{fmt, str::FromStr};

use aws_sdk_s3::client::customize::CustomizableOperation;
use http::{HeaderName, HeaderValue};
use time::OffsetDateTime;

use crate::{
    error::{Error, Result},
    util,
};

pub const ENABLE_SNAPSHOT: &str = "x-tigris-enable-snapshot";
pub const SNAPSHOT: &str = "x-tigris-snapshot";
pub const SNAPSHOT_VERSION: &str = "x-tigris-snapshot-version";
pub const FORK_SOURCE_BUCKET: &str = "x-tigris-fork-source-bucket";
pub const FORK_SOURCE_BUCKET_SNAPSHOT: &str = "x-tigris-fork-source-bucket-snapshot";
pub const IS_FORK_PARENT: &str = "x-tigris-is-fork-parent";
pub const REGIONS: &str = "x-tigris-regions";
pub const QUERY: &str = "x-tigris-query";
pub const CAS: &str = "x-tigris-cas";
pub const RENAME: &str = "x-tigris-rename";

/// A Tigris region.
///
/// See <https://www.tigrisdata.com/docs/concepts/regions/>.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Frankfurt, Germany
    Fra,
    /// São Paulo, Brazil
    Gru,
    /// Hong Kong, China
    Hkg,
    /// Ashburn, Virginia, USA
    Iad,
    /// Johannesburg, South Africa
    Jnb,
    /// London, UK
    Lhr,
    /// Madrid, Spain
    Mad,
    /// Tokyo (Narita), Japan
    Nrt,
    /// Chicago, Illinois, USA
    Ord,
    /// Singapore
    Sin,
    /// San Jose, California, USA
    Sjc,
    /// Sydney, Australia
    Syd,
    /// European datacenters
    Europe,
    /// American datacenters
    Usa,
}

impl Region {
    /// Every known region, in documentation order.
    pub const ALL: [Region; 14] = [
        Self::Fra,
        Self::Gru,
        Self::Hkg,
        Self::Iad,
        Self::Jnb,
        Self::Lhr,
        Self::Mad,
        Self::Nrt,
        Self::Ord,
        Self::Sin,
        Self::Sjc,
        Self::Syd,
        Self::Europe,
        Self::Usa,
    ];

    /// Returns the region code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fra => "fra",
            Self::Gru => "gru",
            Self::Hkg => "hkg",
            Self::Iad => "iad",
            Self::Jnb => "jnb",
            Self::Lhr => "lhr",
            Self::Mad => "mad",
            Self::Nrt => "nrt",
            Self::Ord => "ord",
            Self::Sin => "sin",
            Self::Sjc => "sjc",
            Self::Syd => "syd",
            Self::Europe => "eur",
            Self::Usa => "usa",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::invalid_input(format!("unknown Tigris region {value:?}")))
    }
}

/// A request header understood by Tigris.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Enable snapshots and forks on bucket creation.
    EnableSnapshot,
    /// Take a snapshot with this description (CreateBucket on an existing bucket).
    TakeSnapshot(String),
    /// Read from this snapshot version (ListObjectsV2, GetObject, HeadObject),
    /// or fork from it (CreateBucket with a fork source).
    SnapshotVersion(String),
    /// Create the new bucket as a fork of this source bucket.
    ForkSourceBucket(String),
    /// List the snapshots of this bucket (ListBuckets).
    ListSnapshots(String),
    /// Replicate the object to exactly these regions. Billed once per region.
    StaticReplicationRegions(Vec<Region>),
    /// Filter a ListObjectsV2 call by object metadata, like a SQL `WHERE`.
    Query(String),
    /// Only create the object if it does not exist yet.
    CreateIfNotExists,
    /// Proceed only if the object's ETag matches.
    IfEtagMatches(String),
    /// Proceed only if the object was modified after this time.
    ModifiedSince(OffsetDateTime),
    /// Proceed only if the object was not modified after this time.
    UnmodifiedSince(OffsetDateTime),
    /// Skip the cache and read from the object's designated region (GET only).
    CompareAndSwap,
    /// Rename in place instead of copying (CopyObject).
    Rename,
    /// Any other header.
    Custom { name: String, value: String },
}

impl Directive {
    /// Returns the header name this directive sets.
    pub fn name(&self) -> Result<HeaderName> {
        let name = match self {
            Self::EnableSnapshot => ENABLE_SNAPSHOT,
            Self::TakeSnapshot(_) | Self::ListSnapshots(_) => SNAPSHOT,
            Self::SnapshotVersion(_) => SNAPSHOT_VERSION,
            Self::ForkSourceBucket(_) => FORK_SOURCE_BUCKET,
            Self::StaticReplicationRegions(_) => REGIONS,
            Self::Query(_) => QUERY,
            Self::CreateIfNotExists | Self::IfEtagMatches(_) => "if-match",
            Self::ModifiedSince(_) => "if-modified-since",
            Self::UnmodifiedSince(_) => "if-unmodified-since",
            Self::CompareAndSwap => CAS,
            Self::Rename => RENAME,
            Self::Custom { name, .. } => {
                return HeaderName::from_bytes(name.trim().as_bytes())
                    .map_err(|_| Error::invalid_input(format!("invalid header name {name:?}")));
            }
        };
        Ok(HeaderName::from_static(name))
    }

    /// Returns the header value this directive sets.
    pub fn value(&self) -> Result<HeaderValue> {
        let value = match self {
            Self::EnableSnapshot | Self::CompareAndSwap | Self::Rename => "true".to_string(),
            Self::TakeSnapshot(desc) => {
                format!("true; name={}", util::encode::query_escape(desc))
            }
            Self::SnapshotVersion(v)
            | Self::ForkSourceBucket(v)
            | Self::ListSnapshots(v)
            | Self::Query(v)
            | Self::IfEtagMatches(v) => v.clone(),
            Self::StaticReplicationRegions(regions) => regions
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(","),
            Self::CreateIfNotExists => r#""""#.to_string(),
            Self::ModifiedSince(t) | Self::UnmodifiedSince(t) => util::time::http_date(*t)?,
            Self::Custom { value, .. } => value.clone(),
        };

        HeaderValue::from_str(&value).map_err(|_| {
            Error::invalid_input(format!("invalid header value for {self:?}"))
        })
    }

    /// Returns the validated header pair.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        Ok((self.name()?, self.value()?))
    }
}

/// Values Tigris reports on HeadBucket about snapshots and forks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForkOrSnapshotInfo {
    /// True if snapshots are enabled on the bucket.
    pub snapshots_enabled: bool,
    /// The bucket this bucket was forked from, empty if it is not a fork.
    pub source_bucket: String,
    /// The snapshot this bucket was forked from, empty if not applicable.
    pub source_bucket_snapshot: String,
    /// True if other buckets were forked from this one.
    pub is_fork_parent: bool,
}

impl ForkOrSnapshotInfo {
    /// Reads the fields from response headers through `get`, a
    /// case-insensitive lookup.
    pub(crate) fn from_lookup<'a>(get: impl Fn(&str) -> Option<&'a str>) -> Self {
        Self {
            snapshots_enabled: get(ENABLE_SNAPSHOT) == Some("true"),
            source_bucket: get(FORK_SOURCE_BUCKET).unwrap_or_default().to_string(),
            source_bucket_snapshot: get(FORK_SOURCE_BUCKET_SNAPSHOT)
                .unwrap_or_default()
                .to_string(),
            is_fork_parent: get(IS_FORK_PARENT) == Some("true"),
        }
    }
}

/// Adds Tigris directives to any `aws-sdk-s3` call.
///
/// ```no_run
/// # async fn demo(s3: aws_sdk_s3::Client) -> Result<(), Box<dyn std::error::Error>> {
/// use tigris_storage::headers::{Directive, DirectiveExt};
///
/// let out = s3
///     .get_object()
///     .bucket("my-bucket")
///     .key("a.txt")
///     .customize()
///     .with_directive(Directive::CompareAndSwap)?
///     .send()
///     .await?;
/// # drop(out);
/// # Ok(())
/// # }
/// ```
pub trait DirectiveExt: Sized {
    /// Adds every directive, in order. Fails without sending if a header is invalid.
    fn with_directives<I>(self, directives: I) -> Result<Self>
    where
        I: IntoIterator<Item = Directive>;

    /// Adds one directive.
    fn with_directive(self, directive: Directive) -> Result<Self> {
        self.with_directives([directive])
    }
}

impl<T, E, B> DirectiveExt for CustomizableOperation<T, E, B> {
    fn with_directives<I>(self, directives: I) -> Result<Self>
    where
        I: IntoIterator<Item = Directive>,
    {
        let pairs = util::headers::encode_directives(directives)?;
        Ok(util::headers::append_headers(self, pairs))
    }
}
