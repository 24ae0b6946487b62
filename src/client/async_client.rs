use std::{sync::Arc, time::Duration};

use aws_sdk_s3::config::{
    BehaviorVersion, Builder as SdkConfigBuilder, Region, retry::RetryConfig,
    timeout::TimeoutConfig,
};

use crate::{
    api,
    auth::Credentials,
    config::Options,
    error::{Error, Result},
    providers::Endpoint,
    simple::SimpleClient,
};

/// A Tigris client wrapping one `aws-sdk-s3` client.
///
/// Cloning is cheap and clones share the SDK handle.
#[derive(Clone, Debug)]
pub struct Client {
    sdk: aws_sdk_s3::Client,
    options: Arc<Options>,
}

/// Builds a [`Client`] or a [`SimpleClient`].
///
/// Starts from [`Options::from_env`]; each setter overrides one field and the
/// last call wins. Nothing is checked until `build`.
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    options: Options,
    max_attempts: Option<u32>,
    timeout: Option<Duration>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Wraps an SDK client configured elsewhere.
    pub fn from_sdk(sdk: aws_sdk_s3::Client) -> Self {
        Self {
            sdk,
            options: Arc::new(Options::defaults()),
        }
    }

    /// The underlying SDK client, for calls this crate does not wrap.
    pub fn sdk(&self) -> &aws_sdk_s3::Client {
        &self.sdk
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn buckets(&self) -> api::BucketsService {
        api::BucketsService::new(self.clone())
    }

    pub fn objects(&self) -> api::ObjectsService {
        api::ObjectsService::new(self.clone())
    }
}

impl ClientBuilder {
    fn new() -> Self {
        Self::from_options(Options::from_env())
    }

    /// Starts from caller-resolved options instead of the environment.
    pub fn from_options(options: Options) -> Self {
        Self {
            options,
            max_attempts: None,
            timeout: None,
        }
    }

    /// Replaces every option resolved so far.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Connects to a custom endpoint, such as a proxy or a local server.
    pub fn endpoint(mut self, endpoint: impl Into<Endpoint>) -> Self {
        self.options.endpoint = endpoint.into();
        self
    }

    /// Connects to the fly.io optimized endpoint. Only useful from fly.io machines.
    pub fn fly_endpoint(mut self) -> Self {
        self.options.endpoint = Endpoint::Fly;
        self
    }

    pub fn global_endpoint(mut self) -> Self {
        self.options.endpoint = Endpoint::Global;
        self
    }

    /// Overrides the signing region. Tigris itself only needs `auto`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.options.region = region.into();
        self
    }

    pub fn path_style(mut self, enabled: bool) -> Self {
        self.options.path_style = enabled;
        self
    }

    /// Uses a static key pair. A blank half clears the pair so the SDK
    /// credential chain is used instead.
    pub fn access_keypair(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.options.credentials = Credentials::new(access_key_id, secret_access_key).ok();
        self
    }

    /// Default bucket for [`SimpleClient`].
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.options.bucket = Some(bucket.into());
        self
    }

    /// Attempts per request, handed to the SDK retry strategy.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts.max(1));
        self
    }

    /// Whole-operation timeout, handed to the SDK.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn build(self) -> Result<Client> {
        let errors = self.options.validate();
        if !errors.is_empty() {
            return Err(Error::Construction { errors });
        }
        self.connect().await
    }

    /// Builds a single-bucket client. Fails with [`Error::NoBucketName`]
    /// (inside [`Error::Construction`]) when no bucket is configured.
    pub async fn build_simple(self) -> Result<SimpleClient> {
        let errors = self.options.validate_simple();
        if !errors.is_empty() {
            return Err(Error::Construction { errors });
        }
        let bucket = self.options.bucket_name().unwrap_or_default().to_string();
        let client = self.connect().await?;
        Ok(SimpleClient::from_client(client, bucket))
    }

    async fn connect(self) -> Result<Client> {
        let mut config = match &self.options.credentials {
            Some(creds) => SdkConfigBuilder::new()
                .behavior_version(BehaviorVersion::latest())
                .credentials_provider(creds.to_sdk()),
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
                SdkConfigBuilder::from(&shared)
            }
        };

        config = config
            .region(Region::new(self.options.region.clone()))
            .endpoint_url(self.options.endpoint.as_str().trim_end_matches('/'))
            .force_path_style(self.options.path_style);

        if let Some(max_attempts) = self.max_attempts {
            config = config.retry_config(RetryConfig::standard().with_max_attempts(max_attempts));
        }
        if let Some(timeout) = self.timeout {
            config = config.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            endpoint = %self.options.endpoint,
            region = %self.options.region,
            path_style = self.options.path_style,
            static_credentials = self.options.credentials.is_some(),
            "tigris client configured"
        );

        Ok(Client {
            sdk: aws_sdk_s3::Client::from_conf(config.build()),
            options: Arc::new(self.options),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
