//! Result notifications
//!
//! The detection outcome is announced as a short human-readable message on a
//! single topic. Delivery is attempted once.

#[cfg(feature = "notify-sns")]
mod sns;

#[cfg(feature = "notify-sns")]
pub use sns::SnsPublisher;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to publish to {topic_arn}: {reason}")]
    Failed { topic_arn: String, reason: String },
}

/// Destination for detection outcomes
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Deliver `message` to `topic_arn`, returning the transport's message
    /// id when it provides one
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<Option<String>, PublishError>;
}

/// Message announcing whether `target` was found, e.g.
/// `Was Steve detected : true`.
pub fn detection_message(target: &str, detected: bool) -> String {
    format!("Was {} detected : {}", target, detected)
}
