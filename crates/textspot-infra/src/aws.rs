use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the AWS configuration shared by the S3, Rekognition and SNS clients.
///
/// An explicit region wins over the provider chain, which falls back to
/// `us-east-1`.
pub async fn load_aws_config(region: Option<String>) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(region.map(Region::new))
        .or_default_provider()
        .or_else(Region::new("us-east-1"));

    let retry_config = RetryConfig::standard()
        .with_max_attempts(3)
        .with_retry_mode(RetryMode::Standard);

    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .retry_config(retry_config)
        .load()
        .await
}
