use std::env;

use tigris_storage::SimpleClient;

#[tokio::main]
async fn main() -> Result<(), tigris_storage::Error> {
    if env::var("TIGRIS_STORAGE_BUCKET").is_err() {
        eprintln!("Set TIGRIS_STORAGE_BUCKET to the bucket you want to list.");
        return Ok(());
    }
    let prefix = env::args().nth(1).unwrap_or_default();

    let client = SimpleClient::builder().build_simple().await?;

    let mut token = None;
    let mut pages = 0u32;
    loop {
        let mut req = client.list().prefix(&prefix).delimiter("/").max_keys(1000);
        if let Some(t) = token.take() {
            req = req.pagination_token(t);
        }
        let page = req.send().await?;
        pages += 1;

        for obj in &page.items {
            println!("{} ({} bytes)", obj.key, obj.size.unwrap_or_default());
        }
        for prefix in &page.prefixes {
            println!("{prefix}");
        }

        if !page.has_more || pages >= 3 {
            break;
        }
        token = page.next_token;
    }
    Ok(())
}
