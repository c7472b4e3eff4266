use crate::io::input::{Point, Segment};

/// Shortest-path representation of the segment between two points on the
/// square periodic box: either the direct segment, or the two wrapped halves
/// on either side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinimumImage {
    Direct(Segment),
    Wrapped(Segment, Segment),
}

impl MinimumImage {
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            MinimumImage::Direct(seg) => vec![*seg],
            MinimumImage::Wrapped(first, second) => vec![*first, *second],
        }
    }
}

/// Minimum-image correction for the segment from `p1` to `p2` on a square
/// periodic box of side `box_side`.
///
/// If the direct distance is already below half the box side, no image can
/// be shorter and the direct segment is returned. Otherwise each axis of the
/// displacement is wrapped independently by one box length, and the two
/// halves `[p1, p1 - d]` and `[p2, p2 + d]` of the wrapped line are
/// returned.
pub fn minimum_image(p1: Point, p2: Point, box_side: f64) -> MinimumImage {
    let mut dx = p1.x - p2.x;
    let mut dy = p1.y - p2.y;
    let half = box_side / 2.0;

    if (dx * dx + dy * dy).sqrt() < half {
        return MinimumImage::Direct(Segment::new(p1, p2));
    }

    if dx > half {
        dx -= box_side;
    }
    if dx < -half {
        dx += box_side;
    }
    if dy > half {
        dy -= box_side;
    }
    if dy < -half {
        dy += box_side;
    }

    MinimumImage::Wrapped(
        Segment::new(p1, Point::new(p1.x - dx, p1.y - dy)),
        Segment::new(p2, Point::new(p2.x + dx, p2.y + dy)),
    )
}
