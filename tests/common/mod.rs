#![allow(dead_code)]

use std::{
    collections::HashMap,
    env,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use tigris_storage::{Client, ClientBuilder, Error, Options, SimpleClient};

static BUCKET_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A request as the mock endpoint saw it.
#[derive(Clone, Debug)]
pub(crate) struct Recorded {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: String,
    pub(crate) headers: HashMap<String, String>,
}

impl Recorded {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub(crate) fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }

    pub(crate) fn has_query(&self, needle: &str) -> bool {
        self.query.split('&').any(|pair| pair == needle || pair.starts_with(&format!("{needle}=")))
    }
}

/// A canned response.
#[derive(Clone, Debug)]
pub(crate) struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    pub(crate) fn ok() -> Self {
        Self::status(200)
    }

    pub(crate) fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub(crate) fn xml(body: impl Into<String>) -> Self {
        Self::ok()
            .header("content-type", "application/xml")
            .body(body)
    }

    /// An S3 error document.
    pub(crate) fn error(status: u16, code: &str) -> Self {
        Self::status(status)
            .header("content-type", "application/xml")
            .body(format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                 <Error><Code>{code}</Code><Message>{code}</Message><RequestId>req</RequestId></Error>"
            ))
    }

    pub(crate) fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

type Responder = dyn Fn(&Recorded) -> Reply + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Arc<Responder>,
}

/// An in-process S3 endpoint that records every request and answers from a
/// test-supplied closure.
pub(crate) struct MockS3 {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockS3 {
    pub(crate) async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Builder aimed at this endpoint with static test credentials.
    pub(crate) fn builder(&self) -> ClientBuilder {
        ClientBuilder::from_options(Options::defaults())
            .endpoint(self.endpoint())
            .path_style(true)
            .access_keypair("tid_mock_access_key", "tsec_mock_secret_key")
            .max_attempts(1)
    }

    pub(crate) async fn client(&self) -> Client {
        self.builder().build().await.unwrap()
    }

    pub(crate) async fn simple(&self, bucket: &str) -> SimpleClient {
        self.builder().bucket(bucket).build_simple().await.unwrap()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    _body: Bytes,
) -> Response {
    let recorded = Recorded {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect(),
    };
    state.requests.lock().unwrap().push(recorded.clone());

    let reply = (state.responder)(&recorded);
    let mut response = Response::builder().status(reply.status);
    for (name, value) in &reply.headers {
        response = response.header(name.as_str(), value.as_str());
    }
    response.body(Body::from(reply.body)).unwrap()
}

pub(crate) fn list_objects_xml(bucket: &str, keys: &[&str], next_token: Option<&str>) -> String {
    let contents = keys
        .iter()
        .map(|key| {
            format!(
                "<Contents><Key>{key}</Key><LastModified>2024-05-01T12:00:00.000Z</LastModified>\
                 <ETag>\"etag-{key}\"</ETag><Size>3</Size><StorageClass>STANDARD</StorageClass></Contents>"
            )
        })
        .collect::<String>();
    let tail = match next_token {
        Some(token) => format!(
            "<IsTruncated>true</IsTruncated><NextContinuationToken>{token}</NextContinuationToken>"
        ),
        None => "<IsTruncated>false</IsTruncated>".to_string(),
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListBucketResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
         <Name>{bucket}</Name><Prefix></Prefix><KeyCount>{}</KeyCount><MaxKeys>1000</MaxKeys>\
         {tail}{contents}</ListBucketResult>",
        keys.len()
    )
}

pub(crate) fn list_buckets_xml(names: &[&str], continuation_token: Option<&str>) -> String {
    let buckets = names
        .iter()
        .map(|name| {
            format!(
                "<Bucket><Name>{name}</Name><CreationDate>2024-05-01T12:00:00.000Z</CreationDate></Bucket>"
            )
        })
        .collect::<String>();
    let token = continuation_token
        .map(|t| format!("<ContinuationToken>{t}</ContinuationToken>"))
        .unwrap_or_default();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListAllMyBucketsResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
         <Owner><ID>owner</ID><DisplayName>owner</DisplayName></Owner>\
         <Buckets>{buckets}</Buckets>{token}</ListAllMyBucketsResult>"
    )
}

/// Live Tigris settings. Tests return early when these are unset.
pub(crate) struct LiveConfig {
    pub(crate) bucket_prefix: String,
}

pub(crate) fn load_live_config() -> Option<LiveConfig> {
    let bucket_prefix = env::var("TIGRIS_STORAGE_TEST_BUCKET_PREFIX").ok()?;
    env::var("TIGRIS_STORAGE_ACCESS_KEY_ID").ok()?;
    env::var("TIGRIS_STORAGE_SECRET_ACCESS_KEY").ok()?;
    Some(LiveConfig { bucket_prefix })
}

pub(crate) fn unique_bucket(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let n = BUCKET_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{now}-{n}")
}

/// Force-deletes a bucket, ignoring buckets that are already gone.
pub(crate) async fn cleanup_bucket(client: &SimpleClient, bucket: &str) -> Result<(), Error> {
    match client.delete_bucket(bucket).force(true).send().await {
        Ok(()) => Ok(()),
        Err(err) if err.is_bucket_not_found() => Ok(()),
        Err(err) => Err(err),
    }
}
