//! Textspot Detection
//!
//! Text detection seam: the `TextDetector` trait, the matching rule applied
//! to detected fragments, and the Amazon Rekognition implementation.

pub mod detector;
pub mod matcher;
#[cfg(feature = "detector-aws-rekognition")]
pub mod rekognition;

pub use detector::{DetectionError, TextDetector};
pub use matcher::matches_target;
#[cfg(feature = "detector-aws-rekognition")]
pub use rekognition::RekognitionTextDetector;
