//! # Leaf Shape Measurement Library
//!
//! Measures the most prominent dark shape in a leaf photograph: bounding
//! width and height, enclosed area, perimeter and aspect ratio.
//!
//! ## Algorithm
//!
//! 1. Decode the image and convert it to BT.601 grayscale
//! 2. Inverted global threshold at [`LEAF_THRESHOLD`] (dark pixels are the leaf)
//! 3. Trace the outer borders of top-level foreground regions, keeping only
//!    the vertices where the boundary changes direction
//! 4. Measure the contour with the largest enclosed area
//!
//! An image that decodes but has nothing to measure yields
//! [`ShapeMeasurement::NoFeature`]; only unreadable files are errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leaf_shape::{extract_features, ShapeMeasurement};
//!
//! match extract_features("dataset/algal_leaf/IMG_0001.jpg")? {
//!     ShapeMeasurement::Shape(record) => {
//!         println!("{}x{} px, aspect {:.2}", record.width, record.height, record.aspect_ratio);
//!     }
//!     ShapeMeasurement::NoFeature => println!("Could not extract leaf features."),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust
//! use leaf_shape::{ShapePipeline, ShapeMeasurer, algorithms::*};
//!
//! let pipeline = ShapePipeline::builder()
//!     .add_preprocessor(InverseThresholdPreprocessor { threshold: 90 })
//!     .set_contour_extractor(ExternalContourExtractor { approximation: ChainApproximation::None })
//!     .build();
//! let blank = image::GrayImage::from_pixel(8, 8, image::Luma([255u8]));
//! let measurement = pipeline.measure(&blank);
//! assert!(measurement.is_no_feature());
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;

pub use error::{Result, ShapeError};
pub use types::{FeatureRecord, PixelBounds, ShapeContour, ShapeMeasurement};
pub use traits::*;
pub use algorithms::{luma_bt601, LEAF_THRESHOLD};
pub use pipeline::{builder::ShapePipelineBuilder, ShapePipeline};

use std::path::Path;
use std::sync::OnceLock;

use image::{DynamicImage, ImageDecoder, ImageError, ImageReader};
use rayon::prelude::*;
use tracing::{debug, instrument};

fn leaf_pipeline() -> &'static ShapePipeline {
    static PIPELINE: OnceLock<ShapePipeline> = OnceLock::new();
    PIPELINE.get_or_init(|| {
        let pipeline = ShapePipeline::leaf();
        debug!("{}", pipeline.info());
        pipeline
    })
}

/// Decode an image, sniffing the format from its content before falling back
/// to the file extension. EXIF orientation is applied, so phone photos come
/// out upright.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let decode_error = |source: ImageError| ShapeError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| decode_error(ImageError::IoError(err)))?
        .into_decoder()
        .map_err(decode_error)?;
    let orientation = decoder.orientation().map_err(decode_error)?;

    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Measure the leaf in an already decoded image
pub fn extract_from_image(image: &DynamicImage) -> ShapeMeasurement {
    let gray = luma_bt601(image);
    leaf_pipeline().measure(&gray)
}

/// Decode the image at `path` and measure its most prominent shape
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_features<P: AsRef<Path>>(path: P) -> Result<ShapeMeasurement> {
    let image = load_image(&path)?;
    debug!(width = image.width(), height = image.height(), "decoded image");
    Ok(extract_from_image(&image))
}

/// Measure many images in parallel. Results keep the input order and each
/// one succeeds or fails on its own.
pub fn extract_features_batch<P>(paths: &[P]) -> Vec<Result<ShapeMeasurement>>
where
    P: AsRef<Path> + Sync,
{
    paths.par_iter().map(extract_features).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn create_test_image() -> DynamicImage {
        let mut img = GrayImage::from_pixel(100, 100, Luma([230u8]));
        for y in 20..80 {
            for x in 30..60 {
                img.put_pixel(x, y, Luma([40u8]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_extract_from_image() {
        let measurement = extract_from_image(&create_test_image());
        let record = measurement.record().expect("should find the dark block");

        assert_eq!((record.width, record.height), (30, 60));
        assert_eq!(record.aspect_ratio, 0.5);
        assert_eq!(record.area, 29.0 * 59.0);
        assert_eq!(record.perimeter, 2.0 * (29.0 + 59.0));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = extract_features("/definitely/not/here.png").expect_err("missing file");
        assert!(matches!(err, ShapeError::Decode { .. }));
        assert_eq!(err.path(), Path::new("/definitely/not/here.png"));
    }
}
