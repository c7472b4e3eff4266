use image::GrayImage;

use crate::error::AnalysisError;
use crate::io::input::Point;

/// Global binarization threshold: pixels darker than this count as boundary
/// foreground.
pub const FOREGROUND_THRESHOLD: u8 = 127;

fn is_foreground(luma: u8) -> bool {
    luma < FOREGROUND_THRESHOLD
}

/// Sweeps a rendered two-tone frame image column by column and returns the
/// upper and lower boundary point sequences, one point per column.
///
/// Scanning rows top to bottom, the first foreground pixel of a column goes
/// to the upper sequence and the last to the lower one. Columns without any
/// foreground pixel are gaps and get resolved afterwards by
/// [`resolve_gaps`]. An image with no foreground column at all is an
/// invariant violation.
pub fn sweep_boundaries(img: &GrayImage) -> Result<(Vec<Point>, Vec<Point>), AnalysisError> {
    let (width, height) = img.dimensions();

    let mut upper: Vec<Option<Point>> = Vec::with_capacity(width as usize);
    let mut lower: Vec<Option<Point>> = Vec::with_capacity(width as usize);
    for col in 0..width {
        let mut first = None;
        let mut last = None;
        for row in 0..height {
            if is_foreground(img.get_pixel(col, row)[0]) {
                if first.is_none() {
                    first = Some(row);
                }
                last = Some(row);
            }
        }
        upper.push(first.map(|r| Point::new(col as f64, r as f64)));
        lower.push(last.map(|r| Point::new(col as f64, r as f64)));
    }

    Ok((resolve_gaps(&upper)?, resolve_gaps(&lower)?))
}

/// Fills gap columns left to right.
///
/// Column 0, if a gap, reuses the first detected point to its right verbatim
/// and receives no further adjustment. An interior gap takes the already
/// resolved column to its left as `previous` and the nearest detected column
/// to its right as `future`: with no future the previous value is reused,
/// with `future == previous` (the run right of a seeded column 0) likewise,
/// and otherwise the row advances by one column-axis slope step from
/// `previous` towards `future`.
fn resolve_gaps(raw: &[Option<Point>]) -> Result<Vec<Point>, AnalysisError> {
    let seed = raw
        .iter()
        .flatten()
        .next()
        .copied()
        .ok_or(AnalysisError::EmptyColumnRun)?;

    let mut resolved: Vec<Point> = Vec::with_capacity(raw.len());
    for (i, slot) in raw.iter().enumerate() {
        if let Some(p) = slot {
            resolved.push(*p);
            continue;
        }
        if i == 0 {
            resolved.push(seed);
            continue;
        }

        let previous = resolved[i - 1];
        let value = match raw[i..].iter().flatten().next() {
            None => previous,
            Some(future) if *future == previous => previous,
            Some(future) => Point::new(
                i as f64,
                previous.y + (future.y - previous.y) / (future.x - previous.x),
            ),
        };
        resolved.push(value);
    }
    Ok(resolved)
}
