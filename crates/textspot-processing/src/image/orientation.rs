use image::DynamicImage;

/// Image orientation operations
pub struct ImageOrientation;

impl ImageOrientation {
    /// Rotate an image 90 degrees clockwise.
    ///
    /// A W×H raster becomes H×W and the source pixel at (x, y) lands at
    /// (H-1-y, x). The color model of the input is kept.
    pub fn rotate_clockwise_90(img: &DynamicImage) -> DynamicImage {
        img.rotate90()
    }

    /// Clockwise rotation in degrees after `quarter_turns` applications
    pub fn degrees(quarter_turns: u32) -> u16 {
        ((quarter_turns % 4) * 90) as u16
    }
}
