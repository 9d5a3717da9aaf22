//! Image processing module
//!
//! - Decoding, size validation and JPEG encoding (codec)
//! - Quarter-turn rotation (orientation)

pub mod codec;
pub mod orientation;

pub use codec::{ImageCodec, ImageError};
pub use orientation::ImageOrientation;
