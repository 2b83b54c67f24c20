use image::GrayImage;
use crate::types::{ShapeContour, ShapeMeasurement};

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., threshold)
    fn preprocess(&self, image: &GrayImage) -> GrayImage;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary image, in traversal order
    fn extract_contours(&self, image: &GrayImage) -> Vec<ShapeContour>;
}

/// Trait for picking the contour that gets measured
pub trait ContourSelector: Send + Sync {
    fn select<'a>(&self, contours: &'a [ShapeContour]) -> Option<&'a ShapeContour>;
}

/// Main trait for shape measurement
pub trait ShapeMeasurer: Send + Sync {
    /// Measure the most prominent shape in a grayscale image
    fn measure(&self, image: &GrayImage) -> ShapeMeasurement;
}
