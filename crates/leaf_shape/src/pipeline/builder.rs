use crate::{
    algorithms::{ExternalContourExtractor, InverseThresholdPreprocessor, LargestAreaSelector},
    pipeline::ShapePipeline,
    traits::{ContourExtractor, ContourSelector, ImagePreprocessor},
};

/// Builder for creating measurement pipelines with a fluent API
pub struct ShapePipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    selector: Option<Box<dyn ContourSelector>>,
}

impl ShapePipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
            selector: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
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

    /// Set the contour selector (replaces any existing one)
    pub fn set_selector<S>(mut self, selector: S) -> Self
    where
        S: ContourSelector + 'static,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> ShapePipeline {
        let contour_extractor = self
            .contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor::default()));

        let selector = self
            .selector
            .unwrap_or_else(|| Box::new(LargestAreaSelector));

        ShapePipeline::new(self.preprocessors, contour_extractor, selector)
    }

    /// Build the fixed leaf pipeline: inverted threshold at 127, external
    /// contours with simple compression, largest area wins
    pub fn build_leaf() -> ShapePipeline {
        Self::new()
            .add_preprocessor(InverseThresholdPreprocessor::default())
            .set_contour_extractor(ExternalContourExtractor::default())
            .set_selector(LargestAreaSelector)
            .build()
    }
}

impl Default for ShapePipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
