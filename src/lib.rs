//! Tigris helpers on top of `aws-sdk-s3`.
//!
//! Tigris speaks the S3 API and adds snapshots, forks, in-place renames and
//! replication controls through extra HTTP headers. This crate keeps the SDK
//! for transport, signing and retries and adds:
//!
//! - [`Client`]: the SDK client plus Tigris bucket and object extensions,
//! - [`SimpleClient`]: a single-bucket client for everyday object and bucket work,
//! - [`headers`]: typed request directives usable on any SDK call.
//!
//! ## Quick start
//!
//! ```no_run
//! # async fn demo() -> Result<(), tigris_storage::Error> {
//! use tigris_storage::Client;
//!
//! let client = Client::builder()
//!     .access_keypair("tid_...", "tsec_...")
//!     .build()
//!     .await?;
//!
//! client
//!     .buckets()
//!     .create_snapshot_enabled("my-bucket")
//!     .send()
//!     .await?;
//! client
//!     .buckets()
//!     .create_snapshot("my-bucket", "before migration")
//!     .send()
//!     .await?;
//! client.buckets().fork("my-bucket", "my-experiment").send().await?;
//!
//! let info = client
//!     .buckets()
//!     .head_fork_or_snapshot("my-experiment")
//!     .send()
//!     .await?;
//! assert_eq!(info.source_bucket, "my-bucket");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Builders start from the `TIGRIS_STORAGE_BUCKET`,
//! `TIGRIS_STORAGE_ACCESS_KEY_ID` and `TIGRIS_STORAGE_SECRET_ACCESS_KEY`
//! environment variables. Without a key pair the SDK's own credential chain
//! is used.

/// Service entry points and request builders.
pub mod api;
/// Tigris request directives and response headers.
pub mod headers;
/// Endpoint presets.
pub mod providers;
/// The single-bucket client and its per-call options.
pub mod simple;
/// Records returned by the simplified client.
pub mod types;

mod auth;
mod client;
mod config;
mod error;
mod util;

pub use auth::Credentials;
pub use client::{Client, ClientBuilder};
pub use config::Options;
pub use error::{Error, Result};
pub use headers::{Directive, DirectiveExt, ForkOrSnapshotInfo, Region};
pub use providers::Endpoint;
pub use simple::SimpleClient;
pub use types::{
    BucketInfo, BucketList, ByteStream, ListResult, Object, SnapshotInfo, SnapshotList,
};
