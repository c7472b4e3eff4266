use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AnalysisError;

/// Utility: detect whether the file uses comma or tab as delimiter.
fn detect_delimiter<P: AsRef<Path>>(path: P) -> Result<u8> {
    let file = File::open(&path).with_context(|| {
        format!(
            "failed to open file for delimiter sniffing: {:?}",
            path.as_ref()
        )
    })?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader
        .read_line(&mut first_line)
        .with_context(|| "failed to read first line for delimiter detection")?;

    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();

    if tabs > commas {
        Ok(b'\t')
    } else {
        Ok(b',')
    }
}

/// A 2D point in either simulation (world) or image (column/row) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Segment { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }
}

/// Cell-type label of the simulation: ordinary ectoderm tissue (label 0) or
/// the tracked mesectoderm region (label 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Ordinary,
    Mesectoderm,
}

impl CellType {
    pub fn from_label(label: i64) -> Result<Self, AnalysisError> {
        match label {
            0 => Ok(CellType::Ordinary),
            1 => Ok(CellType::Mesectoderm),
            other => Err(AnalysisError::InputShape(format!(
                "unknown cell type label {}",
                other
            ))),
        }
    }
}

/// One cell of the vertex-cell mesh with its ordered, variable-length vertex
/// list. The on-disk format is long (one row per cell/vertex pair), so no
/// sentinel padding survives into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: usize,
    pub cell_type: CellType,
    pub vertices: Vec<usize>,
}

/// Per-frame scalars: counts and the periodic box side length.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameMeta {
    pub num_vertices: usize,
    pub num_cells: usize,
    pub box_side: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VertexRecord {
    pub x: f64,
    pub y: f64,
}

/// One vertex's adjacency: its three neighbouring vertices and its three
/// incident cells.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TopologyRecord {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub c0: usize,
    pub c1: usize,
    pub c2: usize,
}

impl TopologyRecord {
    pub fn vertex_neighbors(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn cell_neighbors(&self) -> [usize; 3] {
        [self.c0, self.c1, self.c2]
    }
}

/// Long-format cell row: one vertex membership of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CellRecord {
    pub cell_id: usize,
    pub cell_type: i64,
    pub vertex_id: usize,
}

/// Reads the single-row frame metadata table.
pub fn read_meta<P: AsRef<Path>>(path: P) -> Result<FrameMeta> {
    let delim = detect_delimiter(&path)?;
    let file = File::open(&path)
        .with_context(|| format!("failed to open frame meta file {:?}", path.as_ref()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delim)
        .from_reader(file);

    let first = rdr.deserialize().next().ok_or_else(|| {
        anyhow!(
            "frame meta file {:?} was empty — this data is required",
            path.as_ref()
        )
    })?;
    let meta: FrameMeta = first.with_context(|| "failed to deserialize frame meta record")?;
    Ok(meta)
}

/// Reads vertex positions, one row per vertex in index order.
pub fn read_vertices<P: AsRef<Path>>(path: P) -> Result<Vec<VertexRecord>> {
    let delim = detect_delimiter(&path)?;
    let file = File::open(&path)
        .with_context(|| format!("failed to open vertex file {:?}", path.as_ref()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delim)
        .from_reader(file);

    let mut vertices = Vec::new();
    for result in rdr.deserialize() {
        let record: VertexRecord = result?;
        vertices.push(record);
    }
    Ok(vertices)
}

/// Reads per-vertex adjacency triples, one row per vertex in index order.
pub fn read_topology<P: AsRef<Path>>(path: P) -> Result<Vec<TopologyRecord>> {
    let delim = detect_delimiter(&path)?;
    let file = File::open(&path)
        .with_context(|| format!("failed to open topology file {:?}", path.as_ref()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delim)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: TopologyRecord = result?;
        rows.push(record);
    }
    Ok(rows)
}

/// Reads the long-format cell table and groups it into `Cell`s, ordered by
/// cell id. Vertex order within a cell follows row order in the file.
pub fn read_cells<P: AsRef<Path>>(path: P) -> Result<Vec<Cell>> {
    let delim = detect_delimiter(&path)?;
    let file = File::open(&path)
        .with_context(|| format!("failed to open cell file {:?}", path.as_ref()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delim)
        .from_reader(file);

    let mut groups: HashMap<usize, (i64, Vec<usize>)> = HashMap::new();
    for result in rdr.deserialize() {
        let record: CellRecord = result?;
        let entry = groups
            .entry(record.cell_id)
            .or_insert((record.cell_type, Vec::new()));
        if entry.0 != record.cell_type {
            bail!(
                "cell {} appears with conflicting type labels {} and {}",
                record.cell_id,
                entry.0,
                record.cell_type
            );
        }
        entry.1.push(record.vertex_id);
    }

    let mut cells = Vec::with_capacity(groups.len());
    for (id, (label, vertices)) in groups {
        cells.push(Cell {
            id,
            cell_type: CellType::from_label(label)?,
            vertices,
        });
    }
    cells.sort_by_key(|c| c.id);
    Ok(cells)
}

#[cfg(test)]
mod input_tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_relative_eq!(p1.distance_to(&p2), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 4.0));
        assert_relative_eq!(seg.length(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cell_type_labels() {
        assert_eq!(CellType::from_label(0).unwrap(), CellType::Ordinary);
        assert_eq!(CellType::from_label(1).unwrap(), CellType::Mesectoderm);
        assert!(matches!(
            CellType::from_label(7),
            Err(AnalysisError::InputShape(_))
        ));
    }

    #[test]
    fn test_topology_record_triples() {
        let row = TopologyRecord {
            v0: 1,
            v1: 2,
            v2: 3,
            c0: 0,
            c1: 4,
            c2: 5,
        };
        assert_eq!(row.vertex_neighbors(), [1, 2, 3]);
        assert_eq!(row.cell_neighbors(), [0, 4, 5]);
    }
}
