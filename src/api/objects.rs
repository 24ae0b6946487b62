use aws_sdk_s3::operation::copy_object::CopyObjectOutput;

use crate::{
    client::Client,
    error::{Error, Result},
    headers::{Directive, DirectiveExt},
    util::{self, observe::observe},
};

/// Tigris object extensions.
#[derive(Clone, Debug)]
pub struct ObjectsService {
    client: Client,
}

impl ObjectsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Renames `source_key` to `destination_key` in place, without copying data.
    pub fn rename(
        &self,
        bucket: impl Into<String>,
        source_key: impl Into<String>,
        destination_key: impl Into<String>,
    ) -> RenameObjectRequest {
        RenameObjectRequest {
            client: self.client.clone(),
            bucket: bucket.into(),
            source_key: source_key.into(),
            destination_key: destination_key.into(),
            directives: Vec::new(),
        }
    }
}

pub struct RenameObjectRequest {
    client: Client,
    bucket: String,
    source_key: String,
    destination_key: String,
    directives: Vec<Directive>,
}

impl RenameObjectRequest {
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub async fn send(self) -> Result<CopyObjectOutput> {
        if self.source_key.is_empty() || self.destination_key.is_empty() {
            return Err(Error::invalid_input(
                "source and destination keys are required for rename",
            ));
        }

        let mut directives = self.directives;
        directives.push(Directive::Rename);

        let call = self
            .client
            .sdk()
            .copy_object()
            .bucket(&self.bucket)
            .key(&self.destination_key)
            .copy_source(util::encode::copy_source(&self.bucket, &self.source_key))
            .customize()
            .with_directives(directives)?;

        let target = format!("{}/{}", self.bucket, self.source_key);
        observe("rename object", &self.bucket, Some(&self.source_key), async {
            call.send()
                .await
                .map_err(|err| Error::service("rename", &target, err))
        })
        .await
    }
}
