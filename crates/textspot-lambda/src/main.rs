use anyhow::Context;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::Instrument;

use textspot_core::{DetectorConfig, InvocationOutcome};
use textspot_detection::RekognitionTextDetector;
use textspot_infra::{init_telemetry, load_aws_config, SnsPublisher};
use textspot_lambda::UploadTextDetector;
use textspot_storage::S3Storage;

async fn function_handler(
    detector: &UploadTextDetector,
    event: LambdaEvent<S3Event>,
) -> Result<InvocationOutcome, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    Ok(detector.handle(&event.payload).instrument(span).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load configuration
    let config = DetectorConfig::from_env().context("Failed to load configuration")?;
    init_telemetry(config.log_json)?;

    tracing::info!(
        target_text = %config.target_text,
        topic_arn = %config.topic_arn,
        rotation_attempts = config.rotation_attempts,
        environment = %config.environment,
        production = config.is_production(),
        "Starting upload text detector"
    );

    let aws_config = load_aws_config(config.aws_region.clone()).await;
    let detector = UploadTextDetector::new(
        config,
        Arc::new(S3Storage::new(&aws_config)),
        Arc::new(RekognitionTextDetector::new(&aws_config)),
        Arc::new(SnsPublisher::new(&aws_config)),
    );

    run(service_fn(|event| function_handler(&detector, event))).await
}
