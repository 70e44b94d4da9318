#![allow(dead_code)]
use mesh_geo_search::prelude::*;

/// `n` nodes at x = 0, 1, ..., n-1 joined by line elements.
pub fn collinear_mesh(n: usize) -> Mesh {
    let nodes = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
    let elements = (0..n.saturating_sub(1))
        .map(|i| Element::new(i, CellType::Segment, vec![i, i + 1]))
        .collect();
    Mesh::try_new("collinear", nodes, elements).unwrap()
}

/// Structured `nx` by `ny` grid of quads with spacing `h` in the z = 0 plane.
/// Node `(i, j)` has id `j * (nx + 1) + i`.
pub fn quad_grid(nx: usize, ny: usize, h: f64) -> Mesh {
    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            nodes.push([i as f64 * h, j as f64 * h, 0.0]);
        }
    }
    let mut elements = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let n0 = j * (nx + 1) + i;
            elements.push(Element::new(
                elements.len(),
                CellType::Quadrilateral,
                vec![n0, n0 + 1, n0 + nx + 2, n0 + nx + 1],
            ));
        }
    }
    Mesh::try_new("grid", nodes, elements).unwrap()
}

pub fn grid_id(nx: usize, i: usize, j: usize) -> usize {
    j * (nx + 1) + i
}

pub fn fixed(eps: f64) -> SearcherOptions {
    SearcherOptions {
        search_length: SearchLength::fixed(eps).unwrap(),
        ..SearcherOptions::default()
    }
}

pub fn polyline(coords: &[[f64; 3]]) -> Polyline {
    Polyline::from_coords(coords.iter().copied()).unwrap()
}
