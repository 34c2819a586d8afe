pub mod builder;

use image::GrayImage;
use tracing::{debug, info, warn};
use crate::{
    error::Result,
    fence::{assemble, FenceRecord, HemisphereLabeling},
    io::load_grayscale,
    placement::{place, reproject},
    projection::{resolve_anchor, UtmZone},
    traits::{Binarizer, ContourExtractor, ShapeSimplifier},
    types::{ImageSource, Pixel, Shape},
};

/// Image to fence records: binarize, trace, simplify, place, reproject, assemble.
pub struct FencePipeline {
    binarizer: Box<dyn Binarizer>,
    contour_extractor: Box<dyn ContourExtractor>,
    simplifier: Box<dyn ShapeSimplifier>,
    tolerance: f64,
    hemisphere: HemisphereLabeling,
}

/// Fence records produced from one image, in detection order.
#[derive(Debug, Clone)]
pub struct ImageRun {
    pub records: Vec<FenceRecord>,
    pub zone: UtmZone,
    /// Contours traced in the mask
    pub traced: usize,
    /// Contours dropped as degenerate after simplification
    pub discarded: usize,
}

/// Every record of a batch, in image order then detection order.
#[derive(Debug, Clone, Default)]
pub struct FenceBatch {
    records: Vec<FenceRecord>,
}

impl FenceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed run.
    pub fn append(&mut self, run: ImageRun) {
        self.records.extend(run.records);
    }

    pub fn records(&self) -> &[FenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<FenceRecord> for FenceBatch {
    fn extend<I: IntoIterator<Item = FenceRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FencePipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        binarizer: Box<dyn Binarizer>,
        contour_extractor: Box<dyn ContourExtractor>,
        simplifier: Box<dyn ShapeSimplifier>,
        tolerance: f64,
        hemisphere: HemisphereLabeling,
    ) -> Self {
        Self {
            binarizer,
            contour_extractor,
            simplifier,
            tolerance,
            hemisphere,
        }
    }

    /// Convert an already decoded image placed at `source`'s anchor.
    pub fn process(&self, image: &GrayImage, source: &ImageSource) -> Result<ImageRun> {
        let scale = source.checked_scale()?;
        let resolved = resolve_anchor(source.lat, source.lon)?;
        let mask = self.binarizer.binarize(image)?;

        let mut records = Vec::new();
        let mut traced = 0;
        let mut discarded = 0;

        for contour in self.contour_extractor.extract_contours(&mask) {
            traced += 1;
            let shape = Shape::<Pixel>::from_contour(&contour);
            if shape.is_degenerate() {
                warn!("Skipping degenerate contour in '{}' ({} points)", source.desc, contour.len());
                discarded += 1;
                continue;
            }

            let simplified = self.simplifier.simplify(&shape, self.tolerance);
            debug!(
                points = contour.len(),
                vertices = simplified.vertex_count(),
                hole = contour.is_hole,
                "Simplified contour"
            );

            if simplified.is_degenerate() {
                warn!(
                    "Skipping degenerate shape in '{}' ({} vertices after simplification)",
                    source.desc,
                    simplified.vertex_count()
                );
                discarded += 1;
                continue;
            }

            let planar = place(&simplified, scale, &resolved.anchor)?;
            let geographic = reproject(&planar, &resolved.projector)?;
            records.push(assemble(&geographic, &source.desc, records.len(), self.hemisphere));
        }

        info!(
            "'{}': {} fences from {} contours ({} discarded), zone {}",
            source.desc,
            records.len(),
            traced,
            discarded,
            resolved.anchor.zone
        );

        Ok(ImageRun {
            records,
            zone: resolved.anchor.zone,
            traced,
            discarded,
        })
    }

    /// Load `source.file` and convert it.
    pub fn convert(&self, source: &ImageSource) -> Result<ImageRun> {
        let image = load_grayscale(&source.file)?;
        self.process(&image, source)
    }

    /// Convert every source in order; the first failure aborts the batch.
    pub fn convert_all(&self, sources: &[ImageSource]) -> Result<FenceBatch> {
        let mut batch = FenceBatch::new();
        for source in sources {
            info!("Converting {:?} ('{}')", source.file, source.desc);
            let run = self.convert(source)?;
            batch.append(run);
        }
        Ok(batch)
    }
}
