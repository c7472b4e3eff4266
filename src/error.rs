use thiserror::Error;

/// Errors raised by the analysis stages themselves, as opposed to I/O
/// failures, which travel as `anyhow` errors with context attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An input table or point sequence has the wrong shape or an
    /// out-of-range index.
    #[error("input shape violation: {0}")]
    InputShape(String),

    /// The geometry admits no meaningful result, e.g. a vertical endpoint
    /// slope or a window larger than the sequence.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A swept image contained no foreground pixel in any column.
    #[error("no foreground pixels found in any image column")]
    EmptyColumnRun,
}
