use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client as SnsClient;

use super::{NotificationPublisher, PublishError};

/// Amazon SNS publisher
#[derive(Clone, Debug)]
pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: SnsClient::new(config),
        }
    }

    pub fn from_client(client: SnsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    #[tracing::instrument(skip(self, message), fields(
        aws.service.name = "sns",
        aws.sns.operation = "Publish",
        sns.topic_arn = %topic_arn
    ))]
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<Option<String>, PublishError> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    topic_arn = %topic_arn,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "SNS publish failed"
                );
                PublishError::Failed {
                    topic_arn: topic_arn.to_string(),
                    reason: DisplayErrorContext(&e).to_string(),
                }
            })?;

        let message_id = output.message_id().map(str::to_string);

        tracing::info!(
            topic_arn = %topic_arn,
            message_id = message_id.as_deref().unwrap_or("-"),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "SNS publish successful"
        );

        Ok(message_id)
    }
}
