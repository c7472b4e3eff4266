//! Post-processing pipeline for 2D cell-vertex simulation snapshots.
//!
//! Each frame goes through the same chain: detect the mesectoderm tissue
//! boundary on the vertex-cell mesh, correct its edges for the periodic box,
//! render them to a two-tone image, sweep that image for the upper and lower
//! boundary pixel per column, rotate each sequence level, and reduce it to a
//! windowed roughness value plus an internalization fraction. Per-run series
//! are exported as CSV and averaged across runs into a mean roughness curve.

pub mod config;
pub mod entry;
pub mod error;
pub mod io;
pub mod processing;
pub mod render;
pub mod utils;

pub use config::{AnalysisConfig, Viewport};
pub use entry::{analyze_frame, process_run, run_batch, FrameMetrics};
pub use error::AnalysisError;
pub use io::input::{Cell, CellType, Point, Segment};
pub use io::output::RoughnessTable;
pub use io::Frame;
