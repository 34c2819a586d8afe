use crate::{
    algorithms::{ImageprocContourExtractor, SimplificationMethod, ThresholdBinarizer, DEFAULT_TOLERANCE},
    fence::HemisphereLabeling,
    pipeline::FencePipeline,
    settings::ConversionSettings,
    traits::{Binarizer, ContourExtractor, ShapeSimplifier},
};

/// Builder for creating fence pipelines with a fluent API
pub struct PipelineBuilder {
    binarizer: Option<Box<dyn Binarizer>>,
    threshold: ThresholdBinarizer,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn ShapeSimplifier>>,
    tolerance: f64,
    hemisphere: HemisphereLabeling,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            binarizer: None,
            threshold: ThresholdBinarizer::default(),
            contour_extractor: None,
            simplifier: None,
            tolerance: DEFAULT_TOLERANCE,
            hemisphere: HemisphereLabeling::default(),
        }
    }

    /// Start from batch settings
    pub fn from_settings(settings: &ConversionSettings) -> Self {
        let builder = Self::new()
            .with_threshold(settings.threshold)
            .with_tolerance(settings.tolerance)
            .with_simplifier(settings.simplification)
            .with_hemisphere_labeling(settings.hemisphere);

        match settings.blur_sigma {
            Some(sigma) => builder.with_blur(sigma),
            None => builder,
        }
    }

    /// Luminance cutoff of the default binarizer
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold.threshold = threshold;
        self
    }

    /// Blur the image before the default binarizer thresholds it
    pub fn with_blur(mut self, sigma: f32) -> Self {
        self.threshold.blur_sigma = Some(sigma);
        self
    }

    /// Simplification tolerance in pixels
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_simplifier(mut self, method: SimplificationMethod) -> Self {
        self.simplifier = Some(method.simplifier());
        self
    }

    pub fn with_hemisphere_labeling(mut self, labeling: HemisphereLabeling) -> Self {
        self.hemisphere = labeling;
        self
    }

    /// Set the binarizer (replaces the threshold binarizer)
    pub fn set_binarizer<B>(mut self, binarizer: B) -> Self
    where
        B: Binarizer + 'static,
    {
        self.binarizer = Some(Box::new(binarizer));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set a custom simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: ShapeSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> FencePipeline {
        let binarizer = self.binarizer
            .unwrap_or_else(|| Box::new(self.threshold));

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ImageprocContourExtractor));

        let simplifier = self.simplifier
            .unwrap_or_else(|| SimplificationMethod::default().simplifier());

        FencePipeline::new(
            binarizer,
            contour_extractor,
            simplifier,
            self.tolerance,
            self.hemisphere,
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
