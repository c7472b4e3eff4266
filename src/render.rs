use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use std::path::Path;

use crate::config::Viewport;
use crate::io::input::{Point, Segment};

pub const BACKGROUND: u8 = 255;
pub const FOREGROUND: u8 = 0;

/// Rasterizes boundary segments as black lines on a white background, with
/// world coordinates mapped through the viewport. Segments (or parts of
/// them) outside the viewport are clipped pixel by pixel.
pub fn render_segments(
    segments: &[Segment],
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
    for segment in segments {
        draw_segment(&mut img, segment, viewport);
    }
    img
}

/// Continuous pixel coordinates of a world point: x maps left to right, y
/// flips so larger world y sits nearer the top of the image.
fn to_pixel(p: Point, viewport: &Viewport, width: u32, height: u32) -> (f64, f64) {
    let u = (p.x - viewport.x_min) / viewport.width();
    let v = (p.y - viewport.y_min) / viewport.height();
    (u * (width - 1) as f64, (1.0 - v) * (height - 1) as f64)
}

fn draw_segment(img: &mut GrayImage, segment: &Segment, viewport: &Viewport) {
    let (width, height) = img.dimensions();
    let (x0, y0) = to_pixel(segment.a, viewport, width, height);
    let (x1, y1) = to_pixel(segment.b, viewport, width, height);

    // Dense sampling along the segment, two samples per pixel of extent.
    let extent = (x1 - x0).abs().max((y1 - y0).abs());
    let steps = (extent.ceil() as usize) * 2 + 1;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 + t * (x1 - x0)).round();
        let y = (y0 + t * (y1 - y0)).round();
        if x >= 0.0 && y >= 0.0 && (x as u32) < width && (y as u32) < height {
            img.put_pixel(x as u32, y as u32, Luma([FOREGROUND]));
        }
    }
}

/// Writes the rendered frame image to disk. The save completes before this
/// returns, so the sweep can re-open the file immediately afterwards.
pub fn save_frame_image<P: AsRef<Path>>(img: &GrayImage, path: P) -> Result<()> {
    img.save(&path)
        .with_context(|| format!("failed to write frame image {:?}", path.as_ref()))?;
    Ok(())
}
