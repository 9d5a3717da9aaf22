//! Extraction of the upload target from S3 notifications

use aws_lambda_events::event::s3::S3Event;
use textspot_core::UploadTarget;

use crate::error::DetectorError;

/// Bucket and decoded key of the first record in the event.
///
/// Only the first record is considered; callers decide what to do about the
/// rest.
pub fn first_upload_target(event: &S3Event) -> Result<UploadTarget, DetectorError> {
    let record = event.records.first().ok_or(DetectorError::EmptyEvent)?;

    let bucket = record
        .s3
        .bucket
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(DetectorError::MissingField("bucket name"))?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(DetectorError::MissingField("object key"))?;

    Ok(UploadTarget::from_notification(bucket, raw_key))
}

/// Raw (still encoded) key of the first record, if any.
pub fn first_raw_key(event: &S3Event) -> Option<&str> {
    event
        .records
        .first()
        .and_then(|record| record.s3.object.key.as_deref())
}
