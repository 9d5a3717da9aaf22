//! Textspot Infrastructure Library
//!
//! Cross-cutting pieces of the detector:
//! - Tracing subscriber setup
//! - Shared AWS SDK configuration
//! - Result notifications

pub mod aws;
pub mod notify;
pub mod telemetry;

pub use aws::load_aws_config;
#[cfg(feature = "notify-sns")]
pub use notify::SnsPublisher;
pub use notify::{detection_message, NotificationPublisher, PublishError};
pub use telemetry::init_telemetry;
