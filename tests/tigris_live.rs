mod common;

use std::time::Duration;

use common::{LiveConfig, cleanup_bucket, load_live_config, unique_bucket};
use tigris_storage::{Error, Object, SimpleClient};

async fn live_client(cfg: &LiveConfig) -> Result<SimpleClient, Error> {
    SimpleClient::builder()
        .bucket(format!("{}default", cfg.bucket_prefix))
        .build_simple()
        .await
}

#[tokio::test]
async fn live_put_get_roundtrip() -> Result<(), Error> {
    let Some(cfg) = load_live_config() else {
        return Ok(());
    };
    let client = live_client(&cfg).await?;
    let bucket = unique_bucket(&format!("{}t-", cfg.bucket_prefix));

    client.create_bucket(&bucket).send().await?;
    let result = async {
        let client = client.for_bucket(&bucket);
        client
            .put(Object::new("a.txt").with_body("hello").with_content_type("text/plain"))
            .send()
            .await?;
        let mut got = client.get("a.txt").send().await?;
        assert_eq!(got.bytes().await?.as_ref(), b"hello");
        assert!(got.etag.as_deref().is_some_and(|e| !e.is_empty()));
        Ok::<_, Error>(())
    }
    .await;

    cleanup_bucket(&client, &bucket).await?;
    result
}

#[tokio::test]
async fn live_snapshot_listing() -> Result<(), Error> {
    let Some(cfg) = load_live_config() else {
        return Ok(());
    };
    let client = live_client(&cfg).await?;
    let bucket = unique_bucket(&format!("{}snap-", cfg.bucket_prefix));

    client.create_bucket(&bucket).enable_snapshot().send().await?;
    let result = async {
        client
            .create_bucket_snapshot(&bucket, "Backup before migration")
            .send()
            .await?;
        let list = client.list_bucket_snapshots(&bucket).send().await?;
        assert_eq!(list.snapshots.len(), 1);
        assert_eq!(list.snapshots[0].name, "Backup before migration");
        Ok::<_, Error>(())
    }
    .await;

    cleanup_bucket(&client, &bucket).await?;
    result
}

#[tokio::test]
async fn live_presign_rejects_patch_offline() -> Result<(), Error> {
    let Some(cfg) = load_live_config() else {
        return Ok(());
    };
    let client = live_client(&cfg).await?;

    let err = client
        .presign_url("PATCH", "a.txt", Duration::from_secs(60))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }), "{err}");
    Ok(())
}

#[tokio::test]
async fn live_fork_from_live_source() -> Result<(), Error> {
    let Some(cfg) = load_live_config() else {
        return Ok(());
    };
    let client = live_client(&cfg).await?;
    let source = unique_bucket(&format!("{}source-", cfg.bucket_prefix));
    let target = unique_bucket(&format!("{}target-", cfg.bucket_prefix));

    client.create_bucket(&source).enable_snapshot().send().await?;
    let result = async {
        let fork = client.fork_bucket(&source, &target).send().await?;
        assert_eq!(fork.source_bucket.as_deref(), Some(source.as_str()));
        assert_eq!(fork.source_snapshot, None);

        let info = client.bucket_info(&target).send().await?;
        assert_eq!(info.source_bucket.as_deref(), Some(source.as_str()));
        Ok::<_, Error>(())
    }
    .await;

    cleanup_bucket(&client, &target).await?;
    cleanup_bucket(&client, &source).await?;
    result
}
