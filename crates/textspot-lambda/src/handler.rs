//! Upload text detector
//!
//! One invocation: read the uploaded object, look for the target word in up
//! to four orientations, publish the verdict.

use aws_lambda_events::event::s3::S3Event;
use image::DynamicImage;
use std::sync::Arc;
use tokio::time::sleep;

use textspot_core::{DetectionReport, DetectorConfig, InvocationOutcome, UploadTarget};
use textspot_detection::{matches_target, TextDetector};
use textspot_infra::{detection_message, NotificationPublisher};
use textspot_processing::{ImageCodec, ImageOrientation};
use textspot_storage::{fetch_when_available, ObjectStorage};

use crate::error::DetectorError;
use crate::event::{first_raw_key, first_upload_target};

/// Detects the configured target text in uploaded images.
///
/// Clients are injected once and reused for every invocation.
pub struct UploadTextDetector {
    config: DetectorConfig,
    storage: Arc<dyn ObjectStorage>,
    detector: Arc<dyn TextDetector>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl UploadTextDetector {
    pub fn new(
        config: DetectorConfig,
        storage: Arc<dyn ObjectStorage>,
        detector: Arc<dyn TextDetector>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            config,
            storage,
            detector,
            publisher,
        }
    }

    /// Handle one S3 notification.
    ///
    /// Never fails: every error is logged and reported as
    /// `InvocationOutcome::Failure` carrying the object key.
    pub async fn handle(&self, event: &S3Event) -> InvocationOutcome {
        let target = match first_upload_target(event) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error_code = e.error_code(),
                    record_count = event.records.len(),
                    raw_key = first_raw_key(event).unwrap_or_default(),
                    "Unusable S3 event"
                );
                return InvocationOutcome::Failure {
                    key: first_raw_key(event).unwrap_or_default().to_string(),
                    reason: e.to_string(),
                };
            }
        };

        tracing::info!(
            bucket = %target.bucket,
            key = %target.key,
            record_count = event.records.len(),
            "Received event"
        );

        if event.records.len() > 1 {
            tracing::warn!(
                bucket = %target.bucket,
                key = %target.key,
                ignored_records = event.records.len() - 1,
                "Event carries several records, only the first is processed"
            );
        }

        match self.process(&target).await {
            Ok(report) => {
                tracing::info!(
                    bucket = %target.bucket,
                    key = %target.key,
                    detected = report.detected,
                    attempts = report.attempts,
                    matched_rotation = ?report.matched_rotation,
                    "Detection finished"
                );
                InvocationOutcome::Success {
                    bucket: target.bucket,
                    key: target.key,
                    detected: report.detected,
                }
            }
            Err(e) => {
                if matches!(e, DetectorError::Storage(_)) {
                    tracing::error!(
                        error = %e,
                        error_code = e.error_code(),
                        recoverable = e.is_recoverable(),
                        bucket = %target.bucket,
                        key = %target.key,
                        "Error getting object {} from bucket {}. Make sure they exist and your \
                         bucket is in the same region as this function.",
                        target.key,
                        target.bucket
                    );
                } else {
                    tracing::error!(
                        error = %e,
                        error_code = e.error_code(),
                        recoverable = e.is_recoverable(),
                        bucket = %target.bucket,
                        key = %target.key,
                        "Detection failed"
                    );
                }
                InvocationOutcome::Failure {
                    key: target.key,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Fetch, scan and publish for one object.
    pub async fn process(&self, target: &UploadTarget) -> Result<DetectionReport, DetectorError> {
        if !self.config.settle_delay.is_zero() {
            tracing::debug!(
                delay_ms = self.config.settle_delay.as_millis() as u64,
                "Waiting before first read"
            );
            sleep(self.config.settle_delay).await;
        }

        let data = fetch_when_available(self.storage.as_ref(), target, &self.config.fetch).await?;
        ImageCodec::validate_size(&data, self.config.max_image_size_bytes)?;
        let image = ImageCodec::decode(&data)?;

        let report = self.scan_rotations(image).await?;

        let message = detection_message(&self.config.target_text, report.detected);
        self.publisher
            .publish(&self.config.topic_arn, &message)
            .await?;

        Ok(report)
    }

    /// Look for the target text, rotating 90° clockwise between attempts.
    ///
    /// Stops at the first orientation that matches. A rejected detection
    /// request counts as "not found" for that orientation; any other
    /// detection error aborts the scan.
    pub async fn scan_rotations(
        &self,
        mut image: DynamicImage,
    ) -> Result<DetectionReport, DetectorError> {
        let attempts = self
            .config
            .rotation_attempts
            .clamp(1, textspot_core::MAX_ROTATION_ATTEMPTS);

        for attempt in 0..attempts {
            let rotation = ImageOrientation::degrees(attempt);
            let encoded = ImageCodec::encode_jpeg(&image, self.config.jpeg_quality)?;

            match self.detector.detect_text(encoded).await {
                Ok(fragments) => {
                    if matches_target(&fragments, &self.config.target_text) {
                        tracing::info!(rotation, attempt = attempt + 1, "Target text found");
                        return Ok(DetectionReport {
                            detected: true,
                            attempts: attempt + 1,
                            matched_rotation: Some(rotation),
                        });
                    }
                    tracing::debug!(
                        rotation,
                        fragment_count = fragments.len(),
                        "Target text not found in this orientation"
                    );
                }
                Err(e) if e.is_rejection() => {
                    tracing::warn!(
                        error = %e,
                        rotation,
                        detector = self.detector.name(),
                        "Text detection rejected, treating orientation as no match"
                    );
                }
                Err(e) => return Err(e.into()),
            }

            if attempt + 1 < attempts {
                image = ImageOrientation::rotate_clockwise_90(&image);
            }
        }

        Ok(DetectionReport {
            detected: false,
            attempts,
            matched_rotation: None,
        })
    }
}
