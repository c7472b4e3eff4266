use image::{GrayImage, Luma};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::io::input::{Cell, CellType, Point};
use crate::io::Frame;

/// Minimal synthetic frame: one ordinary square cell (vertices 0..3) and one
/// mesectoderm cell sharing exactly the edge between vertices 1 and 2.
pub fn two_cell_frame() -> Frame {
    Frame {
        num_vertices: 4,
        num_cells: 2,
        vertex_x: vec![1.0, 2.0, 2.0, 1.0],
        vertex_y: vec![1.0, 1.0, 2.0, 2.0],
        vertex_neighbors: vec![[1, 3, 2], [0, 2, 3], [1, 3, 0], [0, 2, 1]],
        cell_neighbors: vec![[0, 0, 0], [0, 1, 1], [0, 1, 1], [0, 0, 0]],
        cells: vec![
            Cell {
                id: 0,
                cell_type: CellType::Ordinary,
                vertices: vec![0, 1, 2, 3],
            },
            Cell {
                id: 1,
                cell_type: CellType::Mesectoderm,
                vertices: vec![1, 2],
            },
        ],
        box_side: 10.0,
    }
}

/// A 2×4 vertex grid forming three quad cells in a row, with the middle cell
/// mesectoderm. The label boundary is the two vertical edges (1,5) and
/// (2,6).
pub fn striped_frame() -> Frame {
    Frame {
        num_vertices: 8,
        num_cells: 3,
        vertex_x: vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0],
        vertex_y: vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        vertex_neighbors: vec![
            [1, 4, 4],
            [0, 2, 5],
            [1, 3, 6],
            [2, 7, 7],
            [5, 0, 0],
            [4, 6, 1],
            [5, 7, 2],
            [6, 3, 3],
        ],
        cell_neighbors: vec![
            [0, 0, 0],
            [0, 1, 1],
            [1, 2, 2],
            [2, 2, 2],
            [0, 0, 0],
            [0, 1, 1],
            [1, 2, 2],
            [2, 2, 2],
        ],
        cells: vec![
            Cell {
                id: 0,
                cell_type: CellType::Ordinary,
                vertices: vec![0, 1, 5, 4],
            },
            Cell {
                id: 1,
                cell_type: CellType::Mesectoderm,
                vertices: vec![1, 2, 6, 5],
            },
            Cell {
                id: 2,
                cell_type: CellType::Ordinary,
                vertices: vec![2, 3, 7, 6],
            },
        ],
        box_side: 10.0,
    }
}

/// Writes a frame as the four delimited tables `Frame::load` expects.
pub fn write_frame_dir(frame: &Frame, dir: &Path) {
    fs::create_dir_all(dir).unwrap();

    let mut meta = String::from("num_vertices,num_cells,box_side\n");
    writeln!(
        meta,
        "{},{},{}",
        frame.num_vertices, frame.num_cells, frame.box_side
    )
    .unwrap();
    fs::write(dir.join("meta.csv"), meta).unwrap();

    let mut vertices = String::from("x,y\n");
    for i in 0..frame.num_vertices {
        writeln!(vertices, "{},{}", frame.vertex_x[i], frame.vertex_y[i]).unwrap();
    }
    fs::write(dir.join("vertices.csv"), vertices).unwrap();

    let mut topology = String::from("v0,v1,v2,c0,c1,c2\n");
    for i in 0..frame.num_vertices {
        let v = frame.vertex_neighbors[i];
        let c = frame.cell_neighbors[i];
        writeln!(
            topology,
            "{},{},{},{},{},{}",
            v[0], v[1], v[2], c[0], c[1], c[2]
        )
        .unwrap();
    }
    fs::write(dir.join("topology.csv"), topology).unwrap();

    let mut cells = String::from("cell_id,cell_type,vertex_id\n");
    for cell in &frame.cells {
        let label = match cell.cell_type {
            CellType::Ordinary => 0,
            CellType::Mesectoderm => 1,
        };
        for &vertex in &cell.vertices {
            writeln!(cells, "{},{},{}", cell.id, label, vertex).unwrap();
        }
    }
    fs::write(dir.join("cells.csv"), cells).unwrap();
}

/// Convenience wrapper: writes the striped synthetic frame to `dir`.
pub fn write_striped_frame_dir(dir: &Path) {
    write_frame_dir(&striped_frame(), dir);
}

/// White image with a single black horizontal line at `row`, spanning every
/// column.
pub fn horizontal_line_image(width: u32, height: u32, row: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    for col in 0..width {
        img.put_pixel(col, row, Luma([0]));
    }
    img
}

/// Boundary point sequence with one point per column at a constant row.
pub fn flat_sequence(len: usize, y: f64) -> Vec<Point> {
    (0..len).map(|i| Point::new(i as f64, y)).collect()
}
