mod buckets;
mod objects;

pub use buckets::{
    BucketsService, CreateBucketRequest, ForkBucketRequest, HeadForkOrSnapshotRequest,
    ListSnapshotsRequest,
};
pub use objects::{ObjectsService, RenameObjectRequest};
