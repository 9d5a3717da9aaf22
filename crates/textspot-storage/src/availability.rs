//! Bounded polling for freshly uploaded objects.
//!
//! Upload notifications can arrive before the object is readable. Instead of
//! sleeping a fixed amount of time, the object is probed with `exists` and
//! backed off exponentially until it shows up or the attempts run out.

use textspot_core::{FetchPolicy, UploadTarget};
use tokio::time::sleep;

use crate::traits::{ObjectStorage, StorageError, StorageResult};

/// Wait until the object is readable, then download it.
///
/// Returns `StorageError::NotFound` once `policy.max_attempts` probes have
/// all reported the object missing. Backend errors are not retried.
pub async fn fetch_when_available(
    storage: &dyn ObjectStorage,
    target: &UploadTarget,
    policy: &FetchPolicy,
) -> StorageResult<Vec<u8>> {
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 0..max_attempts {
        if storage.exists(&target.bucket, &target.key).await? {
            if attempt > 0 {
                tracing::info!(
                    bucket = %target.bucket,
                    key = %target.key,
                    attempts = attempt + 1,
                    "Object became available"
                );
            }
            return storage.download(&target.bucket, &target.key).await;
        }

        if attempt + 1 < max_attempts {
            let delay = policy.backoff(attempt);
            tracing::debug!(
                bucket = %target.bucket,
                key = %target.key,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Object not yet available, backing off"
            );
            sleep(delay).await;
        }
    }

    tracing::warn!(
        bucket = %target.bucket,
        key = %target.key,
        attempts = max_attempts,
        "Object never became available"
    );
    Err(StorageError::NotFound(target.key.clone()))
}
