use std::future::Future;

#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::error::Result;

/// Runs one logical Tigris operation inside a `tigris.request` span and
/// records request/error counters for it.
pub(crate) async fn observe<T, F>(
    operation: &'static str,
    bucket: &str,
    key: Option<&str>,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    #[cfg(feature = "metrics")]
    metrics::counter!("tigris_requests_total", "operation" => operation).increment(1);
    #[cfg(feature = "metrics")]
    let start = Instant::now();

    #[cfg(feature = "tracing")]
    let fut = tracing::Instrument::instrument(
        fut,
        tracing::debug_span!(
            "tigris.request",
            operation,
            bucket,
            key = key.unwrap_or_default(),
        ),
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (bucket, key);

    let result = fut.await;

    #[cfg(feature = "metrics")]
    {
        metrics::histogram!("tigris_request_duration_seconds", "operation" => operation)
            .record(start.elapsed().as_secs_f64());
        if result.is_err() {
            metrics::counter!("tigris_request_errors_total", "operation" => operation)
                .increment(1);
        }
    }

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::debug!(operation, bucket, error = %err, "tigris request failed");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn passes_results_through() {
        let ok = observe("get", "b", Some("k"), async { Ok::<_, Error>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = observe("get", "b", None, async {
            Err::<(), _>(Error::SnapshotRequired)
        })
        .await;
        assert!(err.unwrap_err().is_snapshot_required());
    }
}
