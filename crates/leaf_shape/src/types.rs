use geo_types::{Coord, LineString, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed boundary polygon of one foreground region, in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeContour {
    /// Polygon vertices in traversal order; the ring closes implicitly
    pub vertices: Vec<[i32; 2]>,
}

/// Inclusive pixel bounds of a contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub width: u32,
    pub height: u32,
}

impl ShapeContour {
    pub fn new(vertices: Vec<[i32; 2]>) -> Self {
        Self { vertices }
    }

    /// Convert to a geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .vertices
            .iter()
            .map(|&[x, y]| Coord {
                x: f64::from(x),
                y: f64::from(y),
            })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed polygon area (shoelace), not the bounding box area
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Length of the closed ring, including the segment back to the first vertex
    pub fn perimeter(&self) -> f64 {
        use geo::EuclideanLength;
        self.to_geo_polygon().exterior().euclidean_length()
    }

    /// Smallest axis-aligned pixel rectangle containing every vertex.
    ///
    /// Pixel extents are inclusive, so a single pixel is 1x1.
    pub fn bounding_box(&self) -> Option<PixelBounds> {
        let (first, rest) = self.vertices.split_first()?;
        let (mut min_x, mut min_y) = (first[0], first[1]);
        let (mut max_x, mut max_y) = (first[0], first[1]);

        for &[x, y] in rest {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(PixelBounds {
            min_x,
            min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

/// Geometric descriptors of the most prominent foreground shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureRecord {
    /// Bounding rectangle width in pixels
    pub width: u32,
    /// Bounding rectangle height in pixels
    pub height: u32,
    /// Enclosed contour area in square pixels
    pub area: f64,
    /// Closed contour arc length in pixels
    pub perimeter: f64,
    /// `width / height`
    pub aspect_ratio: f64,
}

/// Outcome of measuring one decoded image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "features", rename_all = "snake_case")]
pub enum ShapeMeasurement {
    /// A foreground shape was found and measured
    Shape(FeatureRecord),
    /// The image decoded but nothing in it could be measured
    NoFeature,
}

impl ShapeMeasurement {
    /// Measure a selected contour. A zero-height contour yields `NoFeature`
    /// rather than an undefined aspect ratio.
    pub fn from_contour(contour: &ShapeContour) -> Self {
        let Some(bounds) = contour.bounding_box() else {
            return Self::NoFeature;
        };
        if bounds.height == 0 {
            return Self::NoFeature;
        }

        Self::Shape(FeatureRecord {
            width: bounds.width,
            height: bounds.height,
            area: contour.area(),
            perimeter: contour.perimeter(),
            aspect_ratio: f64::from(bounds.width) / f64::from(bounds.height),
        })
    }

    pub fn record(&self) -> Option<&FeatureRecord> {
        match self {
            Self::Shape(record) => Some(record),
            Self::NoFeature => None,
        }
    }

    pub fn is_no_feature(&self) -> bool {
        matches!(self, Self::NoFeature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(x0: i32, y0: i32, x1: i32, y1: i32) -> ShapeContour {
        ShapeContour::new(vec![[x0, y0], [x0, y1], [x1, y1], [x1, y0]])
    }

    #[test]
    fn test_rectangle_geometry() {
        let contour = rectangle(10, 10, 49, 29);

        assert_eq!(contour.area(), 39.0 * 19.0);
        assert_eq!(contour.perimeter(), 2.0 * (39.0 + 19.0));

        let bounds = contour.bounding_box().expect("non-empty contour");
        assert_eq!((bounds.min_x, bounds.min_y), (10, 10));
        assert_eq!((bounds.width, bounds.height), (40, 20));
    }

    #[test]
    fn test_single_pixel_contour() {
        let contour = ShapeContour::new(vec![[3, 4]]);

        let measurement = ShapeMeasurement::from_contour(&contour);
        let record = measurement.record().expect("a single pixel is still a shape");
        assert_eq!((record.width, record.height), (1, 1));
        assert_eq!(record.area, 0.0);
        assert_eq!(record.perimeter, 0.0);
        assert_eq!(record.aspect_ratio, 1.0);
    }

    #[test]
    fn test_empty_contour_has_no_feature() {
        let contour = ShapeContour::new(Vec::new());
        assert!(contour.bounding_box().is_none());
        assert!(ShapeMeasurement::from_contour(&contour).is_no_feature());
    }

    #[test]
    fn test_aspect_ratio_is_width_over_height() {
        let measurement = ShapeMeasurement::from_contour(&rectangle(0, 0, 9, 39));
        let record = measurement.record().expect("shape");
        assert_eq!((record.width, record.height), (10, 40));
        assert_eq!(record.aspect_ratio, 0.25);
    }

    #[test]
    fn test_measurement_serialization() {
        let json = serde_json::to_value(ShapeMeasurement::NoFeature).expect("serialize");
        assert_eq!(json["status"], "no_feature");

        let measurement = ShapeMeasurement::from_contour(&rectangle(0, 0, 3, 1));
        let json = serde_json::to_value(measurement).expect("serialize");
        assert_eq!(json["status"], "shape");
        assert_eq!(json["features"]["width"], 4);
        assert_eq!(json["features"]["height"], 2);
    }
}
