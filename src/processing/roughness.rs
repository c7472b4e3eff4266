use crate::error::AnalysisError;
use crate::io::input::Point;

/// Upper/lower separations at or below this many pixels count as closed
/// (internalized) columns.
pub const INTERNALIZATION_THRESHOLD_PX: f64 = 3.0;

/// Mean windowed roughness of a rotated boundary sequence.
///
/// The sequence is cut into contiguous non-overlapping windows of
/// `segment_size` points; a trailing remainder shorter than a window is
/// dropped. All windows measure vertical deviation against one common
/// reference: the y value of the sequence's very first point. Per window,
/// with h_j = |y_j − y_ref|:
///
///   h̄ = (1/S)·Σ h_j,   w² = (1/S)·Σ (h_j − h̄)²,   roughness = √w²
///
/// The result is the arithmetic mean of the window roughness values.
pub fn mean_roughness(points: &[Point], segment_size: usize) -> Result<f64, AnalysisError> {
    if segment_size == 0 || points.len() < segment_size {
        return Err(AnalysisError::DegenerateGeometry(format!(
            "no full roughness window: segment size {} over {} points",
            segment_size,
            points.len()
        )));
    }

    let reference = points[0].y;
    let num_windows = points.len() / segment_size;

    let mut total = 0.0;
    for w in 0..num_windows {
        let window = &points[w * segment_size..(w + 1) * segment_size];
        let h_bar = window
            .iter()
            .map(|p| (p.y - reference).abs())
            .sum::<f64>()
            / segment_size as f64;
        let w2 = window
            .iter()
            .map(|p| {
                let h = (p.y - reference).abs();
                (h - h_bar) * (h - h_bar)
            })
            .sum::<f64>()
            / segment_size as f64;
        total += w2.sqrt();
    }

    Ok(total / num_windows as f64)
}

/// Fraction of columns where the upper and lower boundary have closed to
/// within the internalization threshold.
///
/// Separation is the elementwise difference of the row coordinates (upper
/// minus lower); the column coordinate is discarded. Both sequences must
/// have the same column count.
pub fn internalization_fraction(upper: &[Point], lower: &[Point]) -> Result<f64, AnalysisError> {
    if upper.len() != lower.len() || upper.is_empty() {
        return Err(AnalysisError::InputShape(format!(
            "upper/lower sequences must align: {} vs {} columns",
            upper.len(),
            lower.len()
        )));
    }

    let closed = upper
        .iter()
        .zip(lower)
        .filter(|(u, l)| u.y - l.y <= INTERNALIZATION_THRESHOLD_PX)
        .count();
    Ok(closed as f64 / upper.len() as f64)
}

#[cfg(test)]
mod roughness_tests {
    use super::*;
    use crate::utils::test_utils::flat_sequence;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_sequence_has_zero_roughness() {
        let points = flat_sequence(300, 7.5);
        assert_relative_eq!(mean_roughness(&points, 150).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_alternating_window_matches_hand_calculation() {
        // y = [1, -1, 1, -1], reference = 1, so h = [0, 2, 0, 2]:
        // h̄ = 1, w² = 1, roughness = 1.
        let points: Vec<Point> = (0..4)
            .map(|i| Point::new(i as f64, if i % 2 == 0 { 1.0 } else { -1.0 }))
            .collect();
        assert_relative_eq!(mean_roughness(&points, 4).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_remainder_is_dropped() {
        // 10 flat points, then 3 wild ones inside the dropped remainder.
        let mut points = flat_sequence(10, 2.0);
        points.push(Point::new(10.0, 50.0));
        points.push(Point::new(11.0, -50.0));
        points.push(Point::new(12.0, 100.0));
        assert_relative_eq!(mean_roughness(&points, 5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_oversized_window_is_degenerate() {
        let points = flat_sequence(10, 0.0);
        assert!(matches!(
            mean_roughness(&points, 11),
            Err(AnalysisError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            mean_roughness(&points, 0),
            Err(AnalysisError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_internalization_closed_everywhere() {
        let upper = flat_sequence(20, 12.0);
        let lower = flat_sequence(20, 10.0);
        // Constant separation 2 ≤ 3: fully internalized.
        assert_relative_eq!(
            internalization_fraction(&upper, &lower).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_internalization_open_everywhere() {
        let upper = flat_sequence(20, 20.0);
        let lower = flat_sequence(20, 10.0);
        assert_relative_eq!(
            internalization_fraction(&upper, &lower).unwrap(),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_internalization_mixed_columns() {
        let upper: Vec<Point> = (0..4)
            .map(|i| Point::new(i as f64, if i < 2 { 12.0 } else { 20.0 }))
            .collect();
        let lower = flat_sequence(4, 10.0);
        assert_relative_eq!(
            internalization_fraction(&upper, &lower).unwrap(),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_internalization_rejects_mismatched_lengths() {
        let upper = flat_sequence(5, 0.0);
        let lower = flat_sequence(4, 0.0);
        assert!(matches!(
            internalization_fraction(&upper, &lower),
            Err(AnalysisError::InputShape(_))
        ));
    }
}
