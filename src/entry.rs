use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::io::output::{read_series_csv, write_series_csv, RoughnessTable};
use crate::io::Frame;
use crate::processing::boundary::find_mesectoderm_boundary;
use crate::processing::periodic::minimum_image;
use crate::processing::rotate::rotate_boundaries;
use crate::processing::roughness::{internalization_fraction, mean_roughness};
use crate::processing::sweep::sweep_boundaries;
use crate::render::{render_segments, save_frame_image};
use crate::utils::utils::sorted_frame_dirs;

/// Scalar measurements extracted from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub roughness: f64,
    pub internalization: f64,
}

/// Runs the full per-frame chain: boundary detection, periodic correction,
/// rendering, sweep, rotation and the two statistics.
///
/// The rendered image is written to `image_path` and read back before the
/// sweep; the write is a blocking step, so the sweep never sees a partial
/// image. Roughness is measured on the rotated upper boundary, the
/// internalization fraction on the unrotated pixel sequences.
pub fn analyze_frame(
    frame: &Frame,
    config: &AnalysisConfig,
    image_path: &Path,
) -> Result<FrameMetrics> {
    frame.validate()?;

    let boundary = find_mesectoderm_boundary(frame);
    let mut segments = Vec::with_capacity(boundary.segments.len());
    for edge in &boundary.segments {
        segments.extend(minimum_image(edge.a, edge.b, frame.box_side).segments());
    }

    let rendered = render_segments(
        &segments,
        &config.viewport,
        config.image_width,
        config.image_height,
    );
    save_frame_image(&rendered, image_path)?;

    let reloaded = image::open(image_path)
        .with_context(|| format!("failed to re-open frame image {:?}", image_path))?
        .to_luma8();
    let (upper, lower) = sweep_boundaries(&reloaded)?;

    let internalization = internalization_fraction(&upper, &lower)?;
    let (rotated_upper, _rotated_lower) = rotate_boundaries(&upper, &lower)?;
    let roughness = mean_roughness(&rotated_upper, config.segment_size)?;

    Ok(FrameMetrics {
        roughness,
        internalization,
    })
}

/// Processes every frame directory of one run in order and exports the
/// per-run roughness and internalization series.
///
/// A frame that violates an invariant is reported and skipped; the batch
/// continues with the next frame.
pub fn process_run(
    run_name: &str,
    run_dir: &Path,
    config: &AnalysisConfig,
    image_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<f64>> {
    let frame_dirs = sorted_frame_dirs(run_dir)?;
    println!("run {}: {} frames", run_name, frame_dirs.len());

    let mut roughness_series = Vec::with_capacity(frame_dirs.len());
    let mut internalization_series = Vec::with_capacity(frame_dirs.len());
    for (index, frame_dir) in frame_dirs.iter().enumerate() {
        let image_path = image_dir.join(format!("{}_{:04}.png", run_name, index));
        let result = Frame::load(frame_dir)
            .and_then(|frame| analyze_frame(&frame, config, &image_path));
        match result {
            Ok(metrics) => {
                roughness_series.push(metrics.roughness);
                internalization_series.push(metrics.internalization);
            }
            Err(err) => {
                eprintln!("skipping frame {} of run {}: {:#}", index, run_name, err);
            }
        }
    }

    write_series_csv(
        output_dir.join(format!("roughness_{}.csv", run_name)),
        &roughness_series,
    )?;
    write_series_csv(
        output_dir.join(format!("internalization_{}.csv", run_name)),
        &internalization_series,
    )?;
    println!(
        "run {} done ({} of {} frames analysed)",
        run_name,
        roughness_series.len(),
        frame_dirs.len()
    );
    Ok(roughness_series)
}

/// Drives the whole batch: previously exported run series are merged first,
/// then every run directory is processed sequentially, and the cross-run
/// mean roughness curve is exported.
///
/// A run whose series does not match the expected frame count (because
/// frames were skipped) is excluded from the mean with a warning.
pub fn run_batch(
    run_dirs: &[PathBuf],
    previous_series: &[PathBuf],
    config: &AnalysisConfig,
    image_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<f64>> {
    fs::create_dir_all(image_dir)
        .with_context(|| format!("failed to create image directory {:?}", image_dir))?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {:?}", output_dir))?;

    let mut table = RoughnessTable::new(config.frames_per_run);
    for path in previous_series {
        let series = read_series_csv(path)?;
        table
            .push_run(series)
            .with_context(|| format!("previous series {:?} does not fit the table", path))?;
    }

    for run_dir in run_dirs {
        let run_name = run_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "run".to_string());
        let series = process_run(&run_name, run_dir, config, image_dir, output_dir)?;
        if let Err(err) = table.push_run(series) {
            eprintln!("excluding run {} from the mean curve: {}", run_name, err);
        }
    }

    let mean = table.mean_curve();
    write_series_csv(output_dir.join("roughness_mean.csv"), &mean)?;
    println!("batch done: {} runs averaged", table.num_runs());
    Ok(mean)
}
