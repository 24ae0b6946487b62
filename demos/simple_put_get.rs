use std::env;

use tigris_storage::{Object, SimpleClient};

#[tokio::main]
async fn main() -> Result<(), tigris_storage::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if env::var("TIGRIS_STORAGE_BUCKET").is_err() {
        eprintln!("Set TIGRIS_STORAGE_BUCKET and a Tigris key pair to run this example.");
        return Ok(());
    }

    let client = SimpleClient::builder().build_simple().await?;

    let put = client
        .put(
            Object::new("hello.txt")
                .with_body("hello from tigris")
                .with_content_type("text/plain")
                .with_metadata("owner", "demo"),
        )
        .send()
        .await?;
    println!("stored {}/{} etag={:?}", put.bucket, put.key, put.etag);

    let mut got = client.get("hello.txt").send().await?;
    let body = got.bytes().await?;
    println!("read back {} bytes: {}", body.len(), String::from_utf8_lossy(&body));

    client.delete("hello.txt").send().await?;
    Ok(())
}
