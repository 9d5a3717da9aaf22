//! Upload text detector
//!
//! Lambda function that looks for a target word in images uploaded to S3,
//! trying each quarter-turn orientation, and announces the result on SNS.

pub mod error;
pub mod event;
pub mod handler;

pub use error::DetectorError;
pub use event::first_upload_target;
pub use handler::UploadTextDetector;
