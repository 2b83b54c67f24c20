use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::map::map_colors;

use crate::traits::ImagePreprocessor;

/// Global threshold separating leaf pixels from background
pub const LEAF_THRESHOLD: u8 = 127;

// BT.601 luma weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert to grayscale with ITU-R BT.601 weights (0.299, 0.587, 0.114).
///
/// Uses fixed-point arithmetic with round-half-up so results match the
/// conventional 8-bit BGR-to-gray conversion exactly. Alpha is dropped.
pub fn luma_bt601(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    map_colors(&rgb, |Rgb([r, g, b])| {
        let weighted = u32::from(r) * R_WEIGHT + u32::from(g) * G_WEIGHT + u32::from(b) * B_WEIGHT;
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Inverted binary threshold: pixels at or below `threshold` become
/// foreground (255), brighter pixels become background (0).
#[derive(Debug, Clone)]
pub struct InverseThresholdPreprocessor {
    pub threshold: u8,
}

impl Default for InverseThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: LEAF_THRESHOLD }
    }
}

impl ImagePreprocessor for InverseThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> GrayImage {
        let threshold = self.threshold;
        map_colors(image, |Luma([value])| {
            if value <= threshold {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }
}
