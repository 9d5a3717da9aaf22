//! Textspot Core Library
//!
//! This crate provides the configuration and domain models shared by the
//! storage, processing, detection and handler crates.

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{DetectorConfig, FetchPolicy, MAX_ROTATION_ATTEMPTS};
pub use models::{decode_object_key, DetectionReport, InvocationOutcome, UploadTarget};
