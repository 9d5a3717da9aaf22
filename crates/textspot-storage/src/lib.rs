//! Textspot Storage Library
//!
//! This crate provides read access to uploaded objects: the `ObjectStorage`
//! trait, its S3 implementation, and the polling fetch used while an upload
//! is still becoming readable.

pub mod availability;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use availability::fetch_when_available;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
