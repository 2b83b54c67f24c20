use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType};

use crate::{traits::ContourExtractor, types::ShapeContour};

/// How many boundary pixels each contour keeps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainApproximation {
    /// Every boundary pixel
    None,
    /// Only the pixels where the boundary changes direction
    #[default]
    Simple,
}

/// Outer borders of top-level foreground regions only.
///
/// Borders of holes, and of regions nested inside holes, are discarded.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor {
    pub approximation: ChainApproximation,
}

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Vec<ShapeContour> {
        find_contours::<i32>(&pad_with_background(binary_image))
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
            .map(|contour| {
                let points: Vec<[i32; 2]> = contour.points.iter().map(|p| [p.x - 1, p.y - 1]).collect();
                match self.approximation {
                    ChainApproximation::None => ShapeContour::new(points),
                    ChainApproximation::Simple => ShapeContour::new(compress_chain(&points)),
                }
            })
            .collect()
    }
}

/// Surround the image with a one-pixel background frame.
///
/// Border following never starts a contour in column 0, so regions touching
/// the image edge would otherwise be missed. Traced points are shifted back
/// by one pixel.
fn pad_with_background(image: &GrayImage) -> GrayImage {
    let mut padded = GrayImage::new(image.width() + 2, image.height() + 2);
    imageops::replace(&mut padded, image, 1, 1);
    padded
}

/// Drop every point that continues the previous step's direction.
///
/// Consecutive border pixels are 8-neighbours, so equal steps mean the same
/// chain code. The ring is treated as closed, so the first point is only kept
/// when the direction changes there too.
pub fn compress_chain(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: [i32; 2], to: [i32; 2]| [to[0] - from[0], to[1] - from[1]];

    let compressed: Vec<[i32; 2]> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if compressed.is_empty() {
        points.to_vec()
    } else {
        compressed
    }
}
