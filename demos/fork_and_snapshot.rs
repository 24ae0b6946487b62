use std::env;

use tigris_storage::{Object, SimpleClient};

#[tokio::main]
async fn main() -> Result<(), tigris_storage::Error> {
    let Ok(source) = env::var("TIGRIS_DEMO_SOURCE_BUCKET") else {
        eprintln!("Set TIGRIS_DEMO_SOURCE_BUCKET to a new bucket name to run this example.");
        return Ok(());
    };
    let target = format!("{source}-fork");

    let client = SimpleClient::builder().bucket(&source).build_simple().await?;

    client.create_bucket(&source).enable_snapshot().send().await?;
    client
        .put(Object::new("config.json").with_body("{\"version\":1}"))
        .send()
        .await?;

    client
        .create_bucket_snapshot(&source, "Backup before migration")
        .send()
        .await?;
    let snapshots = client.list_bucket_snapshots(&source).send().await?;
    for snap in &snapshots.snapshots {
        println!("snapshot {:?} of {}: {}", snap.version, snap.bucket, snap.name);
    }

    let mut fork = client.fork_bucket(&source, &target);
    if let Some(version) = snapshots.snapshots.first().and_then(|s| s.version.clone()) {
        fork = fork.snapshot_version(version);
    }
    fork.send().await?;

    let info = client.bucket_info(&target).send().await?;
    println!(
        "{} forked from {:?} at {:?}",
        info.name, info.source_bucket, info.source_snapshot
    );
    Ok(())
}
