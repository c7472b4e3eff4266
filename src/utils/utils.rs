use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Frame subdirectories of a run directory, in name order. Frame directories
/// are expected to sort chronologically by name (zero-padded indices).
pub fn sorted_frame_dirs<P: AsRef<Path>>(run_dir: P) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(&run_dir)
        .with_context(|| format!("failed to read run directory {:?}", run_dir.as_ref()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
