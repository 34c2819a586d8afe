use image::GrayImage;
use crate::{error::Result, traits::Binarizer, types::BinaryMask};

/// Luminance cutoff; pixels strictly brighter become foreground.
pub const DEFAULT_THRESHOLD: u8 = 120;

/// Fixed-threshold binarizer with an optional Gaussian blur in front
#[derive(Debug, Clone)]
pub struct ThresholdBinarizer {
    pub threshold: u8,
    pub blur_sigma: Option<f32>,
}

impl Default for ThresholdBinarizer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            blur_sigma: None,
        }
    }
}

impl ThresholdBinarizer {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            blur_sigma: None,
        }
    }

    pub fn with_blur(mut self, sigma: f32) -> Self {
        self.blur_sigma = Some(sigma);
        self
    }
}

impl Binarizer for ThresholdBinarizer {
    fn binarize(&self, image: &GrayImage) -> Result<BinaryMask> {
        let mut binary = match self.blur_sigma {
            Some(sigma) if sigma > 0.0 => {
                let blurred = imageproc::filter::gaussian_blur_f32(image, sigma);
                imageproc::contrast::threshold(&blurred, self.threshold)
            }
            _ => imageproc::contrast::threshold(image, self.threshold),
        };
        image::imageops::flip_vertical_in_place(&mut binary);
        Ok(BinaryMask::from_flipped(binary))
    }
}
