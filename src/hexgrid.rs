//! Flat-top hexagonal grid topology.
//!
//! Scans the map rectangle on a fixed pixel raster, snaps every sample to
//! its hex cell and emits the dual mesh: one center per cell, six shared
//! corners, six shared ring edges. Centers and corners are deduplicated by
//! rounded pixel position so neighboring cells reference the same entities.

use std::collections::HashMap;

use crate::geometry::Vec2;
use crate::mesh::{CenterId, CornerId, Mesh};

/// Hex cell pixel size on both axes.
pub const HEX_SIZE: f64 = 10.0;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Pixel position of a hex center in axial coordinates.
pub fn hex_to_pixel(q: i32, r: i32) -> Vec2 {
    let x = HEX_SIZE * 1.5 * q as f64;
    let y = HEX_SIZE * (SQRT_3 / 2.0 * q as f64 + SQRT_3 * r as f64);
    Vec2::new(x, y)
}

/// Fractional axial coordinates of a pixel position.
pub fn pixel_to_hex(p: Vec2) -> (f64, f64) {
    let q = (2.0 / 3.0) * p.x / HEX_SIZE;
    let r = (-1.0 / 3.0 * p.x + SQRT_3 / 3.0 * p.y) / HEX_SIZE;
    (q, r)
}

/// Snap fractional axial coordinates to the containing hex.
pub fn hex_round(q: f64, r: f64) -> (i32, i32) {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    (rq as i32, rr as i32)
}

/// Offset from a flat-top hex center to its i-th corner (i in 0..6).
pub fn corner_offset(i: usize) -> Vec2 {
    let angle = std::f64::consts::PI / 180.0 * (60.0 * i as f64);
    Vec2::new(HEX_SIZE * angle.cos(), HEX_SIZE * angle.sin())
}

fn position_key(p: Vec2) -> (i64, i64) {
    (p.x.round() as i64, p.y.round() as i64)
}

/// Build the dual mesh for every hex cell touched by a `HEX_SIZE`-stepped
/// scan of `[0, width) × [0, height)`.
pub fn build(width: u32, height: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let mut centers_by_pos: HashMap<(i64, i64), CenterId> = HashMap::new();
    let mut corners_by_pos: HashMap<(i64, i64), CornerId> = HashMap::new();

    let mut x = 0.0;
    while x < width as f64 {
        let mut y = 0.0;
        while y < height as f64 {
            let (fq, fr) = pixel_to_hex(Vec2::new(x, y));
            let (q, r) = hex_round(fq, fr);
            let center_pos = hex_to_pixel(q, r);

            // Cells already built from an earlier sample are skipped whole.
            if !centers_by_pos.contains_key(&position_key(center_pos)) {
                let center = mesh.add_center(center_pos);
                centers_by_pos.insert(position_key(center_pos), center);
                build_cell(&mut mesh, &mut corners_by_pos, center, center_pos);
            }

            y += HEX_SIZE;
        }
        x += HEX_SIZE;
    }

    mesh.finish();
    mesh
}

/// Attach the six corners and six ring edges of one cell, reusing any
/// corner or edge a neighboring cell has already created.
fn build_cell(
    mesh: &mut Mesh,
    corners_by_pos: &mut HashMap<(i64, i64), CornerId>,
    center: CenterId,
    center_pos: Vec2,
) {
    let mut ring = [CornerId(0); 6];
    for (i, slot) in ring.iter_mut().enumerate() {
        let pos = center_pos + corner_offset(i);
        let corner = *corners_by_pos
            .entry(position_key(pos))
            .or_insert_with(|| mesh.add_corner(pos));
        *slot = corner;
        mesh.corners[corner.index()].centers.push(center);
        mesh.centers[center.index()].corners.push(corner);
    }

    for i in 0..6 {
        let a = ring[i];
        let b = ring[(i + 1) % 6];
        match mesh.edge_between(a, b) {
            Some(e) => {
                let edge = &mut mesh.edges[e.index()];
                if edge.d1.is_none() && edge.d0 != Some(center) {
                    edge.d1 = Some(center);
                }
                mesh.centers[center.index()].edges.push(e);
            }
            None => {
                let e = mesh.add_edge(a, b, center);
                mesh.corners[a.index()].edges.push(e);
                mesh.corners[b.index()].edges.push(e);
                mesh.centers[center.index()].edges.push(e);
            }
        }
    }
}
