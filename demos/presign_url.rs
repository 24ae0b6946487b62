use std::{env, time::Duration};

use tigris_storage::SimpleClient;

#[tokio::main]
async fn main() -> Result<(), tigris_storage::Error> {
    if env::var("TIGRIS_STORAGE_BUCKET").is_err() {
        eprintln!("Set TIGRIS_STORAGE_BUCKET and a Tigris key pair to run this example.");
        return Ok(());
    }
    let key = env::args().nth(1).unwrap_or_else(|| "hello.txt".to_string());

    let client = SimpleClient::builder().build_simple().await?;

    let get = client
        .presign_url("GET", &key, Duration::from_secs(15 * 60))
        .send()
        .await?;
    println!("GET {get}");

    let put = client
        .presign_url("PUT", &key, Duration::from_secs(15 * 60))
        .content_type("text/plain")
        .send()
        .await?;
    println!("PUT {put}");
    Ok(())
}
