//! Configuration module
//!
//! This module provides the handler configuration: the target text, the
//! notification topic, the rotation loop bound and the retrieval policy.
//! Defaults reproduce the constants the detector was first deployed with.

use std::env;
use std::time::Duration;

/// Number of distinct 90° orientations of an image.
pub const MAX_ROTATION_ATTEMPTS: u32 = 4;

// Defaults
const TARGET_TEXT: &str = "Steve";
const SNS_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:049648601596:SteveDetectedTopic";
const SETTLE_DELAY_MS: u64 = 0;
const FETCH_MAX_ATTEMPTS: u32 = 5;
const FETCH_BACKOFF_BASE_MS: u64 = 250;
const FETCH_BACKOFF_MAX_MS: u64 = 2000;
const JPEG_QUALITY: u8 = 75;
const MAX_IMAGE_SIZE_MB: usize = 15;

/// Bounded polling policy used while waiting for an uploaded object to
/// become readable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl FetchPolicy {
    /// Delay to wait after the given zero-based failed attempt.
    ///
    /// Exponential (`base * 2^attempt`), capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Policy that tries exactly once and never sleeps.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: FETCH_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(FETCH_BACKOFF_BASE_MS),
            max_delay: Duration::from_millis(FETCH_BACKOFF_MAX_MS),
        }
    }
}

/// Upload text detector configuration
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Text searched for in the image, compared case-insensitively
    pub target_text: String,
    /// SNS topic receiving the detection outcome
    pub topic_arn: String,
    /// Orientations tried before giving up (1..=4)
    pub rotation_attempts: u32,
    /// Fixed wait before the first read of the object. Zero disables it.
    pub settle_delay: Duration,
    pub fetch: FetchPolicy,
    pub jpeg_quality: u8,
    pub max_image_size_bytes: usize,
    pub aws_region: Option<String>,
    pub environment: String,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_text: TARGET_TEXT.to_string(),
            topic_arn: SNS_TOPIC_ARN.to_string(),
            rotation_attempts: MAX_ROTATION_ATTEMPTS,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            fetch: FetchPolicy::default(),
            jpeg_quality: JPEG_QUALITY,
            max_image_size_bytes: MAX_IMAGE_SIZE_MB * 1024 * 1024,
            aws_region: None,
            environment: "development".to_string(),
            log_json: true,
        }
    }
}

impl DetectorConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let rotation_attempts = match lookup("ROTATION_ATTEMPTS") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("ROTATION_ATTEMPTS must be a valid number"))?,
            None => MAX_ROTATION_ATTEMPTS,
        };

        let max_image_size_mb = lookup("MAX_IMAGE_SIZE_MB")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_IMAGE_SIZE_MB);

        let config = DetectorConfig {
            target_text: lookup("TARGET_TEXT").unwrap_or_else(|| TARGET_TEXT.to_string()),
            topic_arn: lookup("SNS_TOPIC_ARN").unwrap_or_else(|| SNS_TOPIC_ARN.to_string()),
            rotation_attempts,
            settle_delay: Duration::from_millis(
                lookup("SETTLE_DELAY_MS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(SETTLE_DELAY_MS),
            ),
            fetch: FetchPolicy {
                max_attempts: lookup("FETCH_MAX_ATTEMPTS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(FETCH_MAX_ATTEMPTS),
                base_delay: Duration::from_millis(
                    lookup("FETCH_BACKOFF_BASE_MS")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(FETCH_BACKOFF_BASE_MS),
                ),
                max_delay: Duration::from_millis(
                    lookup("FETCH_BACKOFF_MAX_MS")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(FETCH_BACKOFF_MAX_MS),
                ),
            },
            jpeg_quality: lookup("JPEG_QUALITY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(JPEG_QUALITY),
            max_image_size_bytes: max_image_size_mb * 1024 * 1024,
            aws_region: lookup("AWS_REGION").filter(|s| !s.trim().is_empty()),
            environment,
            log_json: lookup("LOG_FORMAT")
                .map(|s| !s.trim().eq_ignore_ascii_case("text"))
                .unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.target_text.trim().is_empty() {
            return Err(anyhow::anyhow!("TARGET_TEXT cannot be empty"));
        }
        if !self.topic_arn.starts_with("arn:") {
            return Err(anyhow::anyhow!(
                "SNS_TOPIC_ARN must be a topic ARN, got '{}'",
                self.topic_arn
            ));
        }
        if self.rotation_attempts == 0 || self.rotation_attempts > MAX_ROTATION_ATTEMPTS {
            return Err(anyhow::anyhow!(
                "ROTATION_ATTEMPTS must be between 1 and {}, got {}",
                MAX_ROTATION_ATTEMPTS,
                self.rotation_attempts
            ));
        }
        if self.fetch.max_attempts == 0 {
            return Err(anyhow::anyhow!("FETCH_MAX_ATTEMPTS must be at least 1"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }

    /// Check if the function is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
