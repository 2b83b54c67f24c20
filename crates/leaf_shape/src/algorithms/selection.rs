use crate::{traits::ContourSelector, types::ShapeContour};

/// Picks the contour with the largest enclosed area.
///
/// Ties go to the contour that comes first in traversal order, which for the
/// external extractor is raster-scan order of each region's top-left pixel.
#[derive(Debug, Clone, Default)]
pub struct LargestAreaSelector;

impl ContourSelector for LargestAreaSelector {
    fn select<'a>(&self, contours: &'a [ShapeContour]) -> Option<&'a ShapeContour> {
        let mut best: Option<(&ShapeContour, f64)> = None;
        for contour in contours {
            let area = contour.area();
            if best.map_or(true, |(_, best_area)| area > best_area) {
                best = Some((contour, area));
            }
        }
        best.map(|(contour, _)| contour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, side: i32) -> ShapeContour {
        ShapeContour::new(vec![[x, y], [x, y + side], [x + side, y + side], [x + side, y]])
    }

    #[test]
    fn test_selects_largest() {
        let contours = vec![square(0, 0, 4), square(10, 10, 8), square(30, 0, 2)];
        let selected = LargestAreaSelector.select(&contours).expect("non-empty");
        assert_eq!(selected, &contours[1]);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let contours = vec![square(20, 0, 5), square(0, 20, 5)];
        let selected = LargestAreaSelector.select(&contours).expect("non-empty");
        assert!(std::ptr::eq(selected, &contours[0]));
    }

    #[test]
    fn test_zero_area_contour_is_still_selected() {
        let contours = vec![ShapeContour::new(vec![[4, 4]])];
        assert!(LargestAreaSelector.select(&contours).is_some());
    }

    #[test]
    fn test_no_contours() {
        assert!(LargestAreaSelector.select(&[]).is_none());
    }
}
