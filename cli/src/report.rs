use leaf_shape::ShapeMeasurement;

/// Human-readable description of a measurement, one field per line
pub fn render_measurement(measurement: &ShapeMeasurement) -> String {
    match measurement {
        ShapeMeasurement::Shape(record) => format!(
            "Leaf Width: {} pixels\n\
             Leaf Height: {} pixels\n\
             Leaf Area: {:.2} pixels²\n\
             Leaf Perimeter: {:.2} pixels\n\
             Aspect Ratio: {:.2}",
            record.width, record.height, record.area, record.perimeter, record.aspect_ratio
        ),
        ShapeMeasurement::NoFeature => "Could not extract leaf features.".to_string(),
    }
}
