use aws_sdk_s3::operation::{
    list_objects_v2::builders::ListObjectsV2FluentBuilder,
    put_object::builders::PutObjectFluentBuilder,
};

use super::{
    SimpleClient,
    options::{CallOptions, ListOptions},
};
use crate::{
    client::Client,
    error::{Error, Result},
    headers::{Directive, DirectiveExt},
    types::{DEFAULT_CONTENT_TYPE, ListResult, Object},
    util::{observe::observe, time::from_smithy},
};

/// Setters every object request shares.
macro_rules! call_option_setters {
    () => {
        /// Uses another bucket for this call only.
        pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
            self.options.bucket = bucket.into();
            self
        }

        /// Reads from a bucket snapshot instead of the live bucket.
        pub fn snapshot_version(mut self, version: impl Into<String>) -> Self {
            self.options.snapshot_version = Some(version.into());
            self
        }

        /// Adds a Tigris directive to this call.
        pub fn directive(mut self, directive: Directive) -> Self {
            self.options.directives.push(directive);
            self
        }

        /// Replaces every call option set so far.
        pub fn options(mut self, options: CallOptions) -> Self {
            self.options = options;
            self
        }
    };
}

pub struct GetRequest {
    client: Client,
    key: String,
    options: CallOptions,
}

impl GetRequest {
    pub(super) fn new(simple: &SimpleClient, key: String) -> Self {
        Self {
            client: simple.client.clone(),
            key,
            options: CallOptions::defaults(&simple.bucket),
        }
    }

    call_option_setters!();

    pub async fn send(self) -> Result<Object> {
        let directives = self.options.resolve()?;
        let bucket = self.options.bucket;
        let key = self.key;

        let call = self
            .client
            .sdk()
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .customize()
            .with_directives(directives)?;

        let out = observe("get object", &bucket, Some(&key), async {
            call.send()
                .await
                .map_err(|err| Error::service("get", format!("{bucket}/{key}"), err))
        })
        .await?;

        Ok(Object {
            content_type: Some(
                out.content_type
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            ),
            content_disposition: out.content_disposition,
            etag: out.e_tag,
            version: out.version_id,
            size: out.content_length,
            last_modified: out.last_modified.as_ref().and_then(from_smithy),
            metadata: out.metadata.unwrap_or_default(),
            body: Some(out.body),
            bucket,
            key,
        })
    }
}

pub struct HeadRequest {
    client: Client,
    key: String,
    options: CallOptions,
}

impl HeadRequest {
    pub(super) fn new(simple: &SimpleClient, key: String) -> Self {
        Self {
            client: simple.client.clone(),
            key,
            options: CallOptions::defaults(&simple.bucket),
        }
    }

    call_option_setters!();

    pub async fn send(self) -> Result<Object> {
        let directives = self.options.resolve()?;
        let bucket = self.options.bucket;
        let key = self.key;

        let call = self
            .client
            .sdk()
            .head_object()
            .bucket(&bucket)
            .key(&key)
            .customize()
            .with_directives(directives)?;

        let out = observe("head object", &bucket, Some(&key), async {
            call.send()
                .await
                .map_err(|err| Error::service("head", format!("{bucket}/{key}"), err))
        })
        .await?;

        Ok(Object {
            content_type: Some(
                out.content_type
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            ),
            content_disposition: out.content_disposition,
            etag: out.e_tag,
            version: out.version_id,
            size: out.content_length,
            last_modified: out.last_modified.as_ref().and_then(from_smithy),
            metadata: out.metadata.unwrap_or_default(),
            body: None,
            bucket,
            key,
        })
    }
}

pub struct PutRequest {
    client: Client,
    object: Object,
    options: CallOptions,
}

impl PutRequest {
    pub(super) fn new(simple: &SimpleClient, object: Object) -> Self {
        Self {
            client: simple.client.clone(),
            object,
            options: CallOptions::defaults(&simple.bucket),
        }
    }

    call_option_setters!();

    /// Returns the object with `bucket`, `etag` and `version` filled in. The
    /// body has been consumed.
    pub async fn send(self) -> Result<Object> {
        let directives = self.options.resolve()?;
        let bucket = self.options.bucket;
        let mut object = self.object;

        let call = put_object_call(self.client.sdk(), &bucket, &mut object)
            .customize()
            .with_directives(directives)?;

        let target = format!("{bucket}/{}", object.key);
        let out = observe("put object", &bucket, Some(&object.key), async {
            call.send()
                .await
                .map_err(|err| Error::service("put", &target, err))
        })
        .await?;

        object.bucket = bucket;
        object.etag = out.e_tag;
        object.version = out.version_id;
        Ok(object)
    }
}

/// Moves the body out of `object`. An empty content type and a zero size are
/// left off the request.
fn put_object_call(
    sdk: &aws_sdk_s3::Client,
    bucket: &str,
    object: &mut Object,
) -> PutObjectFluentBuilder {
    sdk.put_object()
        .bucket(bucket)
        .key(&object.key)
        .set_body(object.body.take())
        .set_content_type(object.content_type.clone().filter(|t| !t.is_empty()))
        .set_content_disposition(object.content_disposition.clone().filter(|d| !d.is_empty()))
        .set_content_length(object.size.filter(|&s| s > 0))
        .set_metadata((!object.metadata.is_empty()).then(|| object.metadata.clone()))
}

pub struct DeleteRequest {
    client: Client,
    key: String,
    options: CallOptions,
}

impl DeleteRequest {
    pub(super) fn new(simple: &SimpleClient, key: String) -> Self {
        Self {
            client: simple.client.clone(),
            key,
            options: CallOptions::defaults(&simple.bucket),
        }
    }

    call_option_setters!();

    /// Deleting a missing key is left to the service, which reports success.
    pub async fn send(self) -> Result<()> {
        let directives = self.options.resolve()?;
        let bucket = self.options.bucket;
        let key = self.key;

        let call = self
            .client
            .sdk()
            .delete_object()
            .bucket(&bucket)
            .key(&key)
            .customize()
            .with_directives(directives)?;

        observe("delete object", &bucket, Some(&key), async {
            call.send()
                .await
                .map_err(|err| Error::service("delete", format!("{bucket}/{key}"), err))
        })
        .await?;
        Ok(())
    }
}

pub struct ListRequest {
    client: Client,
    options: CallOptions,
    list: ListOptions,
}

impl ListRequest {
    pub(super) fn new(simple: &SimpleClient) -> Self {
        Self {
            client: simple.client.clone(),
            options: CallOptions::defaults(&simple.bucket),
            list: ListOptions::default(),
        }
    }

    call_option_setters!();

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.list.prefix = Some(prefix.into());
        self
    }

    /// Groups keys sharing a prefix up to the delimiter into `prefixes`.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list.delimiter = Some(delimiter.into());
        self
    }

    pub fn start_after(mut self, key: impl Into<String>) -> Self {
        self.list.start_after = Some(key.into());
        self
    }

    pub fn max_keys(mut self, max_keys: i32) -> Self {
        self.list.max_keys = Some(max_keys);
        self
    }

    /// Continues from a previous page's `next_token`.
    pub fn pagination_token(mut self, token: impl Into<String>) -> Self {
        self.list.pagination_token = Some(token.into());
        self
    }

    /// Replaces every list filter set so far.
    pub fn list_options(mut self, list: ListOptions) -> Self {
        self.list = list;
        self
    }

    pub async fn send(self) -> Result<ListResult> {
        let directives = self.options.resolve()?;
        let bucket = self.options.bucket;

        let call = list_objects_call(self.client.sdk(), &bucket, &self.list)
            .customize()
            .with_directives(directives)?;

        let out = observe("list objects", &bucket, None, async {
            call.send()
                .await
                .map_err(|err| Error::service("list", &bucket, err))
        })
        .await?;

        let items = out
            .contents
            .unwrap_or_default()
            .into_iter()
            .map(|entry| Object {
                bucket: bucket.clone(),
                key: entry.key.unwrap_or_default(),
                etag: entry.e_tag,
                size: entry.size,
                last_modified: entry.last_modified.as_ref().and_then(from_smithy),
                ..Object::default()
            })
            .collect();
        let prefixes = out
            .common_prefixes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.prefix)
            .collect();
        let next_token = out.next_continuation_token.filter(|t| !t.is_empty());

        Ok(ListResult {
            items,
            prefixes,
            has_more: next_token.is_some(),
            next_token,
        })
    }
}

fn list_objects_call(
    sdk: &aws_sdk_s3::Client,
    bucket: &str,
    list: &ListOptions,
) -> ListObjectsV2FluentBuilder {
    sdk.list_objects_v2()
        .bucket(bucket)
        .set_prefix(list.prefix.clone())
        .set_delimiter(list.delimiter.clone())
        .set_start_after(list.start_after.clone())
        .set_max_keys(list.max_keys)
        .set_continuation_token(list.pagination_token.clone())
}
