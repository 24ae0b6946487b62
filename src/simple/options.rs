//! Per-call options for [`SimpleClient`](super::SimpleClient) requests.
//!
//! A request builder starts from these defaults, derived from the client, and
//! its setters change only that request. Nothing here outlives one call.

use crate::{
    error::{Error, Result},
    headers::{Directive, Region},
};

/// Options shared by every object call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Bucket for this call. Starts as the client's default bucket.
    pub bucket: String,
    /// Read from this snapshot instead of the live bucket.
    pub snapshot_version: Option<String>,
    /// Extra Tigris directives, applied in order after the ones above.
    pub directives: Vec<Directive>,
}

impl CallOptions {
    pub(crate) fn defaults(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            ..Self::default()
        }
    }

    /// Checks the options and returns the directives to send.
    pub(crate) fn resolve(&self) -> Result<Vec<Directive>> {
        if self.bucket.is_empty() {
            return Err(Error::invalid_input("bucket name must not be empty"));
        }

        let mut directives = Vec::with_capacity(self.directives.len() + 1);
        match self.snapshot_version.as_deref() {
            Some("") => return Err(Error::SnapshotRequired),
            Some(v) => directives.push(Directive::SnapshotVersion(v.to_string())),
            None => {}
        }
        directives.extend(self.directives.iter().cloned());
        Ok(directives)
    }
}

/// Filters and pagination for list calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub start_after: Option<String>,
    pub max_keys: Option<i32>,
    /// `next_token` from the previous page.
    pub pagination_token: Option<String>,
}

/// Headers embedded into presigned PUT URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresignOptions {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// Options for bucket management calls. Each call reads only the fields that
/// apply to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketOptions {
    /// Create the bucket with snapshots and forks enabled.
    pub enable_snapshot: bool,
    /// Fork from this snapshot version instead of the live source.
    pub snapshot_version: Option<String>,
    /// Static replication regions for a new bucket.
    pub regions: Vec<Region>,
    /// Empty every object before deleting the bucket.
    pub force_delete: bool,
    /// Page size for bucket listings.
    pub limit: Option<i32>,
    /// `next_token` from the previous bucket listing.
    pub token: Option<String>,
    /// Extra Tigris directives.
    pub directives: Vec<Directive>,
}

impl BucketOptions {
    /// Directives for a call that creates a bucket.
    pub(crate) fn create_directives(&self) -> Vec<Directive> {
        let mut directives = self.directives.clone();
        if !self.regions.is_empty() {
            directives.push(Directive::StaticReplicationRegions(self.regions.clone()));
        }
        directives
    }
}

pub(crate) fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_input(format!(
            "{kind} name required for bucket management operations"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_options_start_from_client_bucket() {
        let o = CallOptions::defaults("default-bucket");
        assert_eq!(o.bucket, "default-bucket");
        assert!(o.resolve().unwrap().is_empty());
    }

    #[test]
    fn snapshot_version_comes_first() {
        let o = CallOptions {
            bucket: "b".into(),
            snapshot_version: Some("42".into()),
            directives: vec![Directive::CompareAndSwap],
        };
        assert_eq!(
            o.resolve().unwrap(),
            vec![Directive::SnapshotVersion("42".into()), Directive::CompareAndSwap]
        );
    }

    #[test]
    fn empty_snapshot_version_is_rejected() {
        let o = CallOptions {
            bucket: "b".into(),
            snapshot_version: Some(String::new()),
            directives: Vec::new(),
        };
        assert!(o.resolve().unwrap_err().is_snapshot_required());
    }

    #[test]
    fn empty_bucket_override_is_rejected() {
        let o = CallOptions::defaults("");
        assert!(matches!(o.resolve(), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn create_directives_add_regions() {
        let o = BucketOptions {
            regions: vec![Region::Fra, Region::Sjc],
            directives: vec![Directive::EnableSnapshot],
            ..BucketOptions::default()
        };
        assert_eq!(
            o.create_directives(),
            vec![
                Directive::EnableSnapshot,
                Directive::StaticReplicationRegions(vec![Region::Fra, Region::Sjc]),
            ]
        );
        assert!(BucketOptions::default().create_directives().is_empty());
    }

    #[test]
    fn names_must_not_be_empty() {
        assert!(require_name("bucket", "").is_err());
        assert!(require_name("bucket", "b").is_ok());
    }
}
