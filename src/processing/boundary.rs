use std::collections::HashSet;

use crate::io::input::{CellType, Segment};
use crate::io::Frame;

/// Boundary of the mesectoderm region: the set of vertices on label-crossing
/// edges, plus the coordinate segments of those edges.
///
/// The vertex set is deduplicated. The segment list is not: every crossing
/// edge is found once from each endpoint, so it appears twice. The renderer
/// just draws the duplicate onto the same pixels.
#[derive(Debug, Clone, Default)]
pub struct BoundaryEdges {
    pub vertices: HashSet<usize>,
    pub segments: Vec<Segment>,
}

/// Finds every mesh edge separating a mesectoderm cell from an ordinary
/// cell.
///
/// For each vertex and each of its three neighbours, the two incident-cell
/// triples are intersected (an edge is incident to at most two cells in the
/// planar mesh). The edge crosses the boundary exactly when the shared cells
/// are one mesectoderm and one ordinary cell. O(V·3) intersection tests.
pub fn find_mesectoderm_boundary(frame: &Frame) -> BoundaryEdges {
    let mut boundary = BoundaryEdges::default();

    for i in 0..frame.num_vertices {
        let cells_i = frame.cell_neighbors[i];
        for &n in &frame.vertex_neighbors[i] {
            let cells_n = frame.cell_neighbors[n];

            let mut mesectoderm = 0;
            let mut ordinary = 0;
            for (pos, &cell) in cells_i.iter().enumerate() {
                // Set semantics: skip repeats within the triple.
                if cells_i[..pos].contains(&cell) || !cells_n.contains(&cell) {
                    continue;
                }
                match frame.cell_type(cell) {
                    CellType::Mesectoderm => mesectoderm += 1,
                    CellType::Ordinary => ordinary += 1,
                }
            }

            if mesectoderm == 1 && ordinary == 1 {
                boundary.vertices.insert(i);
                boundary.vertices.insert(n);
                boundary
                    .segments
                    .push(Segment::new(frame.vertex(i), frame.vertex(n)));
            }
        }
    }

    boundary
}

/// Indices of all mesectoderm cells of a frame.
pub fn mesectoderm_cell_indices(frame: &Frame) -> Vec<usize> {
    frame
        .cells
        .iter()
        .filter(|c| c.cell_type == CellType::Mesectoderm)
        .map(|c| c.id)
        .collect()
}

/// Indices of all vertices incident to at least one mesectoderm cell.
pub fn mesectoderm_vertex_indices(frame: &Frame) -> Vec<usize> {
    (0..frame.num_vertices)
        .filter(|&i| {
            frame.cell_neighbors[i]
                .iter()
                .any(|&c| frame.cell_type(c) == CellType::Mesectoderm)
        })
        .collect()
}
