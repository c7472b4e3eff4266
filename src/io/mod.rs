pub mod input;
pub mod output;

use anyhow::{bail, Context};
use std::path::Path;

use crate::error::AnalysisError;
use input::{read_cells, read_meta, read_topology, read_vertices, Cell, CellType, Point};

/// A single timestep's snapshot of the vertex-cell mesh. Immutable once
/// loaded; the processing functions only borrow it.
#[derive(Debug, Clone)]
pub struct Frame {
    pub num_vertices: usize,
    pub num_cells: usize,
    pub vertex_x: Vec<f64>,
    pub vertex_y: Vec<f64>,
    /// Three neighbouring vertices per vertex.
    pub vertex_neighbors: Vec<[usize; 3]>,
    /// Three incident cells per vertex.
    pub cell_neighbors: Vec<[usize; 3]>,
    pub cells: Vec<Cell>,
    /// Side length of the square periodic box.
    pub box_side: f64,
}

impl Frame {
    /// Loads a frame from a directory containing the four delimited tables
    /// `meta.csv`, `vertices.csv`, `topology.csv` and `cells.csv`, and
    /// validates the assembled shape.
    pub fn load<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref();

        let meta = read_meta(dir.join("meta.csv"))
            .with_context(|| format!("failed to load frame meta from {}", dir.display()))?;

        let vertices = read_vertices(dir.join("vertices.csv"))
            .with_context(|| format!("failed to load vertices from {}", dir.display()))?;
        if vertices.is_empty() {
            bail!("vertex table in {} was empty — this data is required", dir.display());
        }

        let topology = read_topology(dir.join("topology.csv"))
            .with_context(|| format!("failed to load topology from {}", dir.display()))?;

        let cells = read_cells(dir.join("cells.csv"))
            .with_context(|| format!("failed to load cells from {}", dir.display()))?;

        let frame = Frame {
            num_vertices: meta.num_vertices,
            num_cells: meta.num_cells,
            vertex_x: vertices.iter().map(|v| v.x).collect(),
            vertex_y: vertices.iter().map(|v| v.y).collect(),
            vertex_neighbors: topology.iter().map(|t| t.vertex_neighbors()).collect(),
            cell_neighbors: topology.iter().map(|t| t.cell_neighbors()).collect(),
            cells,
            box_side: meta.box_side,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Checks the shape invariants every processing step relies on: array
    /// lengths match the declared counts and all indices are in range.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.vertex_x.len() != self.num_vertices || self.vertex_y.len() != self.num_vertices {
            return Err(AnalysisError::InputShape(format!(
                "expected {} vertex positions, got {}/{}",
                self.num_vertices,
                self.vertex_x.len(),
                self.vertex_y.len()
            )));
        }
        if self.vertex_neighbors.len() != self.num_vertices
            || self.cell_neighbors.len() != self.num_vertices
        {
            return Err(AnalysisError::InputShape(format!(
                "expected {} adjacency triples, got {}/{}",
                self.num_vertices,
                self.vertex_neighbors.len(),
                self.cell_neighbors.len()
            )));
        }
        if self.cells.len() != self.num_cells {
            return Err(AnalysisError::InputShape(format!(
                "expected {} cells, got {}",
                self.num_cells,
                self.cells.len()
            )));
        }
        if self.box_side <= 0.0 {
            return Err(AnalysisError::InputShape(format!(
                "periodic box side must be positive, got {}",
                self.box_side
            )));
        }
        for (i, triple) in self.vertex_neighbors.iter().enumerate() {
            if triple.iter().any(|&v| v >= self.num_vertices) {
                return Err(AnalysisError::InputShape(format!(
                    "vertex {} has a neighbour index out of range: {:?}",
                    i, triple
                )));
            }
        }
        for (i, triple) in self.cell_neighbors.iter().enumerate() {
            if triple.iter().any(|&c| c >= self.num_cells) {
                return Err(AnalysisError::InputShape(format!(
                    "vertex {} has an incident-cell index out of range: {:?}",
                    i, triple
                )));
            }
        }
        for (pos, cell) in self.cells.iter().enumerate() {
            if cell.id != pos {
                return Err(AnalysisError::InputShape(format!(
                    "cell ids must be contiguous from 0: found id {} at position {}",
                    cell.id, pos
                )));
            }
            if cell.vertices.iter().any(|&v| v >= self.num_vertices) {
                return Err(AnalysisError::InputShape(format!(
                    "cell {} lists a vertex index out of range",
                    cell.id
                )));
            }
        }
        Ok(())
    }

    /// Coordinates of a single vertex. Indices are trusted after `validate`.
    pub fn vertex(&self, i: usize) -> Point {
        Point::new(self.vertex_x[i], self.vertex_y[i])
    }

    /// Batch coordinate lookup for a list of vertex indices.
    pub fn vertices_of(&self, indices: &[usize]) -> Vec<Point> {
        indices.iter().map(|&i| self.vertex(i)).collect()
    }

    pub fn cell_type(&self, cell: usize) -> CellType {
        self.cells[cell].cell_type
    }
}
