//! Textspot Processing Library
//!
//! Raster handling for the detector: decoding uploaded objects, re-encoding
//! them for the vision service, and rotating them between attempts.

pub mod image;

pub use crate::image::{ImageCodec, ImageError, ImageOrientation};
