pub mod builder;

use image::GrayImage;
use tracing::debug;

use crate::{
    traits::{ContourExtractor, ContourSelector, ImagePreprocessor, ShapeMeasurer},
    types::ShapeMeasurement,
};

/// A measurement pipeline: preprocess, extract contours, select one, measure it
pub struct ShapePipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    selector: Box<dyn ContourSelector>,
}

impl ShapePipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::ShapePipelineBuilder {
        builder::ShapePipelineBuilder::new()
    }

    /// The fixed leaf measurement pipeline
    pub fn leaf() -> Self {
        builder::ShapePipelineBuilder::build_leaf()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        selector: Box<dyn ContourSelector>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            selector,
        }
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, 1 contour extractor, 1 contour selector",
            self.preprocessors.len()
        )
    }
}

impl ShapeMeasurer for ShapePipeline {
    fn measure(&self, image: &GrayImage) -> ShapeMeasurement {
        let mut processed = image.clone();
        for preprocessor in &self.preprocessors {
            processed = preprocessor.preprocess(&processed);
        }

        let contours = self.contour_extractor.extract_contours(&processed);
        debug!(contours = contours.len(), "extracted contours");

        match self.selector.select(&contours) {
            Some(contour) => {
                if let Some(bounds) = contour.bounding_box() {
                    debug!(
                        vertices = contour.vertices.len(),
                        x = bounds.min_x,
                        y = bounds.min_y,
                        "selected largest contour"
                    );
                }
                ShapeMeasurement::from_contour(contour)
            }
            None => ShapeMeasurement::NoFeature,
        }
    }
}
