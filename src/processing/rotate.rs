use nalgebra::{Rotation2, Vector2};

use crate::error::AnalysisError;
use crate::io::input::Point;

/// Rotation angle that levels a boundary sequence, computed from its first
/// and last point only.
///
/// The angle is `atan(slope)`, negated for a negative slope. That keeps the
/// magnitude in [0, π/2) and corrects for the slope sign but not for the
/// left/right ordering of the endpoints, matching the reference output this
/// pipeline is compared against.
pub fn alignment_angle(points: &[Point]) -> Result<f64, AnalysisError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AnalysisError::InputShape(
                "cannot align an empty boundary sequence".to_string(),
            ))
        }
    };

    let dx = last.x - first.x;
    if dx == 0.0 {
        return Err(AnalysisError::DegenerateGeometry(format!(
            "endpoint columns coincide at x = {}, slope undefined",
            first.x
        )));
    }

    let slope = (last.y - first.y) / dx;
    let theta = slope.atan();
    Ok(if slope < 0.0 { -theta } else { theta })
}

/// Applies a single rigid rotation about the origin to every point of a
/// sequence.
pub fn rotate_sequence(points: &[Point], theta: f64) -> Vec<Point> {
    let rotation = Rotation2::new(theta);
    points
        .iter()
        .map(|p| {
            let v = rotation * Vector2::new(p.x, p.y);
            Point::new(v.x, v.y)
        })
        .collect()
}

/// Rotates the upper and lower boundary sequences independently, each by its
/// own endpoint-slope angle.
pub fn rotate_boundaries(
    upper: &[Point],
    lower: &[Point],
) -> Result<(Vec<Point>, Vec<Point>), AnalysisError> {
    let rotated_upper = rotate_sequence(upper, alignment_angle(upper)?);
    let rotated_lower = rotate_sequence(lower, alignment_angle(lower)?);
    Ok((rotated_upper, rotated_lower))
}
