use aws_sdk_s3::types::Bucket;

use super::{
    SimpleClient,
    options::{BucketOptions, require_name},
};
use crate::{
    client::Client,
    error::{Error, Result},
    headers::{Directive, DirectiveExt, Region},
    types::{BucketInfo, BucketList, SnapshotInfo, SnapshotList},
    util::{self, observe::observe, time::from_smithy},
};

macro_rules! bucket_option_setters {
    () => {
        /// Adds a Tigris directive to this call.
        pub fn directive(mut self, directive: Directive) -> Self {
            self.options.directives.push(directive);
            self
        }

        /// Replaces every bucket option set so far.
        pub fn options(mut self, options: BucketOptions) -> Self {
            self.options = options;
            self
        }
    };
}

pub struct CreateBucketRequest {
    client: Client,
    bucket: String,
    options: BucketOptions,
}

impl CreateBucketRequest {
    pub(super) fn new(simple: &SimpleClient, bucket: String) -> Self {
        Self {
            client: simple.client.clone(),
            bucket,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    /// Creates the bucket with snapshots and forks enabled.
    pub fn enable_snapshot(mut self) -> Self {
        self.options.enable_snapshot = true;
        self
    }

    /// Replicates new objects to `region`. May be called more than once.
    pub fn region(mut self, region: Region) -> Self {
        self.options.regions.push(region);
        self
    }

    /// `created` is the local clock; the service does not echo a creation time.
    pub async fn send(self) -> Result<BucketInfo> {
        require_name("bucket", &self.bucket)?;
        let directives = self.options.create_directives();

        if self.options.enable_snapshot {
            let mut req = self.client.buckets().create_snapshot_enabled(&self.bucket);
            for directive in directives {
                req = req.directive(directive);
            }
            req.send().await?;
        } else {
            let call = self
                .client
                .sdk()
                .create_bucket()
                .bucket(&self.bucket)
                .customize()
                .with_directives(directives)?;
            observe("create bucket", &self.bucket, None, async {
                call.send()
                    .await
                    .map_err(|err| Error::service("create bucket", &self.bucket, err))
            })
            .await?;
        }

        Ok(BucketInfo {
            name: self.bucket,
            created: Some(util::time::now()),
            snapshots_enabled: self.options.enable_snapshot,
            ..BucketInfo::default()
        })
    }
}

pub struct DeleteBucketRequest {
    client: Client,
    bucket: String,
    options: BucketOptions,
}

impl DeleteBucketRequest {
    pub(super) fn new(simple: &SimpleClient, bucket: String) -> Self {
        Self {
            client: simple.client.clone(),
            bucket,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    /// Deletes every object first, one at a time, then the bucket.
    pub fn force(mut self, force: bool) -> Self {
        self.options.force_delete = force;
        self
    }

    /// Fails with [`Error::BucketNotEmpty`] when objects remain and `force`
    /// is off.
    pub async fn send(self) -> Result<()> {
        require_name("bucket", &self.bucket)?;
        let sdk = self.client.sdk();

        if self.options.force_delete {
            empty_bucket(sdk, &self.bucket, &self.options.directives).await?;
        }

        let call = sdk
            .delete_bucket()
            .bucket(&self.bucket)
            .customize()
            .with_directives(self.options.directives)?;
        observe("delete bucket", &self.bucket, None, async {
            call.send()
                .await
                .map_err(|err| Error::service("delete bucket", &self.bucket, err))
        })
        .await?;
        Ok(())
    }
}

async fn empty_bucket(
    sdk: &aws_sdk_s3::Client,
    bucket: &str,
    directives: &[Directive],
) -> Result<()> {
    observe("empty bucket", bucket, None, async {
        let mut token = None;
        loop {
            let page = sdk
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(token.take())
                .customize()
                .with_directives(directives.iter().cloned())?
                .send()
                .await
                .map_err(|err| Error::service("list", bucket, err))?;

            for key in page.contents().iter().filter_map(|entry| entry.key()) {
                sdk.delete_object()
                    .bucket(bucket)
                    .key(key)
                    .customize()
                    .with_directives(directives.iter().cloned())?
                    .send()
                    .await
                    .map_err(|err| Error::service("delete", format!("{bucket}/{key}"), err))?;
            }

            token = page
                .next_continuation_token()
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            if token.is_none() {
                return Ok(());
            }
        }
    })
    .await
}

pub struct ListBucketsRequest {
    client: Client,
    options: BucketOptions,
}

impl ListBucketsRequest {
    pub(super) fn new(simple: &SimpleClient) -> Self {
        Self {
            client: simple.client.clone(),
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    pub fn limit(mut self, limit: i32) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Continues from a previous page's `next_token`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.options.token = Some(token.into());
        self
    }

    pub async fn send(self) -> Result<BucketList> {
        let call = self
            .client
            .sdk()
            .list_buckets()
            .set_max_buckets(self.options.limit)
            .set_continuation_token(self.options.token)
            .customize()
            .with_directives(self.options.directives)?;

        let out = observe("list buckets", "", None, async {
            call.send()
                .await
                .map_err(|err| Error::service("list", "buckets", err))
        })
        .await?;

        let buckets = out
            .buckets
            .unwrap_or_default()
            .into_iter()
            .map(|b| BucketInfo {
                name: b.name.unwrap_or_default(),
                created: b.creation_date.as_ref().and_then(from_smithy),
                ..BucketInfo::default()
            })
            .collect();
        let next_token = out.continuation_token.filter(|t| !t.is_empty());

        Ok(BucketList {
            buckets,
            truncated: next_token.is_some(),
            next_token,
        })
    }
}

pub struct BucketInfoRequest {
    client: Client,
    bucket: String,
    options: BucketOptions,
}

impl BucketInfoRequest {
    pub(super) fn new(simple: &SimpleClient, bucket: String) -> Self {
        Self {
            client: simple.client.clone(),
            bucket,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    /// Returns only the name when the endpoint does not support the Tigris
    /// metadata headers. A missing bucket and transport failures are errors.
    pub async fn send(self) -> Result<BucketInfo> {
        require_name("bucket", &self.bucket)?;

        let mut req = self.client.buckets().head_fork_or_snapshot(&self.bucket);
        for directive in self.options.directives {
            req = req.directive(directive);
        }

        match req.send().await {
            Ok(info) => Ok(BucketInfo {
                name: self.bucket,
                created: None,
                snapshots_enabled: info.snapshots_enabled,
                is_fork_parent: info.is_fork_parent,
                source_bucket: non_empty(info.source_bucket),
                source_snapshot: non_empty(info.source_bucket_snapshot),
            }),
            Err(err) if err.is_unsupported() || matches!(err, Error::UnexpectedResponse { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    bucket = %self.bucket,
                    error = %err,
                    "fork and snapshot metadata unavailable, returning name only"
                );
                Ok(BucketInfo {
                    name: self.bucket,
                    ..BucketInfo::default()
                })
            }
            Err(err) => Err(err),
        }
    }
}

pub struct CreateSnapshotRequest {
    client: Client,
    bucket: String,
    description: String,
    options: BucketOptions,
}

impl CreateSnapshotRequest {
    pub(super) fn new(simple: &SimpleClient, bucket: String, description: String) -> Self {
        Self {
            client: simple.client.clone(),
            bucket,
            description,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    /// The bucket must have been created with snapshots enabled. The returned
    /// `version` is `None`; list snapshots to learn it.
    pub async fn send(self) -> Result<SnapshotInfo> {
        require_name("bucket", &self.bucket)?;

        let mut req = self
            .client
            .buckets()
            .create_snapshot(&self.bucket, &self.description);
        for directive in self.options.directives {
            req = req.directive(directive);
        }
        req.send().await?;

        Ok(SnapshotInfo {
            name: self.description,
            version: None,
            created: Some(util::time::now()),
            bucket: self.bucket,
        })
    }
}

pub struct ListSnapshotsRequest {
    client: Client,
    bucket: String,
    options: BucketOptions,
}

impl ListSnapshotsRequest {
    pub(super) fn new(simple: &SimpleClient, bucket: String) -> Self {
        Self {
            client: simple.client.clone(),
            bucket,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    pub async fn send(self) -> Result<SnapshotList> {
        require_name("bucket", &self.bucket)?;

        let mut req = self.client.buckets().list_snapshots(&self.bucket);
        for directive in self.options.directives {
            req = req.directive(directive);
        }
        let out = req.send().await?;

        let snapshots = out
            .buckets
            .unwrap_or_default()
            .into_iter()
            .map(|entry| snapshot_info(&self.bucket, entry))
            .collect();

        Ok(SnapshotList {
            snapshots,
            bucket: self.bucket,
        })
    }
}

/// Snapshot listings reuse the bucket list shape. The name is either
/// `<version>; name=<escaped description>` or a bare version.
fn snapshot_info(bucket: &str, entry: Bucket) -> SnapshotInfo {
    let raw = entry.name.unwrap_or_default();
    let (name, version) = match raw.split_once("; name=") {
        Some((version, escaped)) => (
            util::encode::query_unescape(escaped).unwrap_or_else(|_| escaped.to_string()),
            version.trim().to_string(),
        ),
        None => (raw.clone(), raw),
    };

    SnapshotInfo {
        name,
        version: non_empty(version),
        created: entry.creation_date.as_ref().and_then(from_smithy),
        bucket: bucket.to_string(),
    }
}

pub struct ForkBucketRequest {
    client: Client,
    source: String,
    target: String,
    options: BucketOptions,
}

impl ForkBucketRequest {
    pub(super) fn new(simple: &SimpleClient, source: String, target: String) -> Self {
        Self {
            client: simple.client.clone(),
            source,
            target,
            options: BucketOptions::default(),
        }
    }

    bucket_option_setters!();

    /// Forks from this snapshot instead of the live source. An empty version
    /// fails with [`Error::SnapshotRequired`].
    pub fn snapshot_version(mut self, version: impl Into<String>) -> Self {
        self.options.snapshot_version = Some(version.into());
        self
    }

    /// Enables snapshots on the new fork.
    pub fn enable_snapshot(mut self) -> Self {
        self.options.enable_snapshot = true;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.options.regions.push(region);
        self
    }

    pub async fn send(self) -> Result<BucketInfo> {
        require_name("source bucket", &self.source)?;
        require_name("target bucket", &self.target)?;

        let mut req = self.client.buckets().fork(&self.source, &self.target);
        if let Some(version) = &self.options.snapshot_version {
            req = req.snapshot_version(version);
        }
        if self.options.enable_snapshot {
            req = req.directive(Directive::EnableSnapshot);
        }
        for directive in self.options.create_directives() {
            req = req.directive(directive);
        }
        req.send().await?;

        Ok(BucketInfo {
            name: self.target,
            created: Some(util::time::now()),
            snapshots_enabled: self.options.enable_snapshot,
            is_fork_parent: false,
            source_bucket: Some(self.source),
            source_snapshot: self.options.snapshot_version,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
