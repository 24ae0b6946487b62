use aws_sdk_s3::operation::{
    create_bucket::CreateBucketOutput, list_buckets::ListBucketsOutput,
};

use crate::{
    client::Client,
    error::{Error, Result},
    headers::{Directive, DirectiveExt, ForkOrSnapshotInfo},
    util::{headers::HeaderCapture, observe::observe},
};

/// Tigris bucket extensions: forks, snapshots and their metadata.
#[derive(Clone, Debug)]
pub struct BucketsService {
    client: Client,
}

impl BucketsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates `target` as a fork of `source`.
    pub fn fork(&self, source: impl Into<String>, target: impl Into<String>) -> ForkBucketRequest {
        ForkBucketRequest {
            client: self.client.clone(),
            source: source.into(),
            target: target.into(),
            snapshot_version: None,
            directives: Vec::new(),
        }
    }

    /// Takes a snapshot of an existing, snapshot-enabled bucket.
    pub fn create_snapshot(
        &self,
        bucket: impl Into<String>,
        description: impl Into<String>,
    ) -> CreateBucketRequest {
        self.create(bucket, Directive::TakeSnapshot(description.into()))
    }

    /// Creates a bucket that can be snapshotted and forked.
    pub fn create_snapshot_enabled(&self, bucket: impl Into<String>) -> CreateBucketRequest {
        self.create(bucket, Directive::EnableSnapshot)
    }

    /// Reads snapshot and fork metadata with a HeadBucket call.
    pub fn head_fork_or_snapshot(&self, bucket: impl Into<String>) -> HeadForkOrSnapshotRequest {
        HeadForkOrSnapshotRequest {
            client: self.client.clone(),
            bucket: bucket.into(),
            directives: Vec::new(),
        }
    }

    /// Lists the snapshots of `bucket`. Each returned "bucket" is a snapshot.
    pub fn list_snapshots(&self, bucket: impl Into<String>) -> ListSnapshotsRequest {
        ListSnapshotsRequest {
            client: self.client.clone(),
            bucket: bucket.into(),
            directives: Vec::new(),
        }
    }

    fn create(&self, bucket: impl Into<String>, directive: Directive) -> CreateBucketRequest {
        CreateBucketRequest {
            client: self.client.clone(),
            bucket: bucket.into(),
            operation: match directive {
                Directive::TakeSnapshot(_) => "create snapshot of",
                _ => "create bucket",
            },
            directives: vec![directive],
        }
    }
}

pub struct ForkBucketRequest {
    client: Client,
    source: String,
    target: String,
    snapshot_version: Option<String>,
    directives: Vec<Directive>,
}

impl ForkBucketRequest {
    /// Forks from this snapshot of the source instead of its live state.
    pub fn snapshot_version(mut self, version: impl Into<String>) -> Self {
        self.snapshot_version = Some(version.into());
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub async fn send(self) -> Result<CreateBucketOutput> {
        let Self {
            client,
            source,
            target,
            snapshot_version,
            mut directives,
        } = self;

        directives.push(Directive::ForkSourceBucket(source.clone()));
        match snapshot_version {
            Some(v) if v.is_empty() => return Err(Error::SnapshotRequired),
            Some(v) => directives.push(Directive::SnapshotVersion(v)),
            None => {}
        }

        let call = client.sdk().create_bucket().bucket(&target).customize();
        let call = call.with_directives(directives)?;

        observe("fork bucket", &target, None, async {
            call.send().await.map_err(|err| {
                match Error::service("fork bucket", &target, err) {
                    // The target is being created, so a missing bucket is the source.
                    Error::BucketNotFound { .. } => Error::BucketNotFound {
                        bucket: source.clone(),
                    },
                    other => other,
                }
            })
        })
        .await
    }
}

pub struct CreateBucketRequest {
    client: Client,
    bucket: String,
    operation: &'static str,
    directives: Vec<Directive>,
}

impl CreateBucketRequest {
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub async fn send(self) -> Result<CreateBucketOutput> {
        let call = self
            .client
            .sdk()
            .create_bucket()
            .bucket(&self.bucket)
            .customize()
            .with_directives(self.directives)?;

        observe(self.operation, &self.bucket, None, async {
            call.send()
                .await
                .map_err(|err| Error::service(self.operation, &self.bucket, err))
        })
        .await
    }
}

pub struct HeadForkOrSnapshotRequest {
    client: Client,
    bucket: String,
    directives: Vec<Directive>,
}

impl HeadForkOrSnapshotRequest {
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Fails with [`Error::UnexpectedResponse`] if the raw response headers
    /// could not be observed.
    pub async fn send(self) -> Result<ForkOrSnapshotInfo> {
        let capture = HeaderCapture::default();
        let call = self
            .client
            .sdk()
            .head_bucket()
            .bucket(&self.bucket)
            .customize()
            .with_directives(self.directives)?
            .interceptor(capture.clone());

        let bucket = self.bucket;
        observe("head bucket", &bucket, None, async {
            call.send().await.map_err(|err| {
                let err = Error::service("head bucket", &bucket, err);
                // HEAD responses carry no error body, so a missing bucket is a bare 404.
                if err.status() == Some(404) {
                    Error::BucketNotFound {
                        bucket: bucket.clone(),
                    }
                } else {
                    err
                }
            })?;

            let headers = capture.take().ok_or_else(|| {
                Error::unexpected_response("raw response headers were not captured for head bucket")
            })?;
            Ok(ForkOrSnapshotInfo::from_lookup(|name| {
                headers.get(name).map(String::as_str)
            }))
        })
        .await
    }
}

pub struct ListSnapshotsRequest {
    client: Client,
    bucket: String,
    directives: Vec<Directive>,
}

impl ListSnapshotsRequest {
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub async fn send(self) -> Result<ListBucketsOutput> {
        let mut directives = self.directives;
        directives.push(Directive::ListSnapshots(self.bucket.clone()));

        let call = self
            .client
            .sdk()
            .list_buckets()
            .customize()
            .with_directives(directives)?;

        observe("list snapshots", &self.bucket, None, async {
            call.send()
                .await
                .map_err(|err| Error::service("list snapshots for", &self.bucket, err))
        })
        .await
    }
}
