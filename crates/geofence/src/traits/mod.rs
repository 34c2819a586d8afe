use image::GrayImage;
use crate::{
    error::Result,
    types::{BinaryMask, Pixel, RawContour, Shape},
};

/// Trait for turning a decoded grayscale raster into a bottom-up binary mask
pub trait Binarizer: Send + Sync {
    fn binarize(&self, image: &GrayImage) -> Result<BinaryMask>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Lazily yield one closed boundary per traced region of the mask
    fn extract_contours<'a>(&'a self, mask: &'a BinaryMask) -> Box<dyn Iterator<Item = RawContour> + 'a>;
}

/// Trait for polygon vertex reduction
pub trait ShapeSimplifier: Send + Sync {
    /// Simplify a pixel-space shape; the result may self-intersect
    fn simplify(&self, shape: &Shape<Pixel>, tolerance: f64) -> Shape<Pixel>;
}
