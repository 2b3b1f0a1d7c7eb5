//! Corner and cell elevation: border-seeded BFS, redistribution, downslopes.

use std::collections::VecDeque;

use crate::mesh::{CornerId, Mesh};

/// Redistribution curve scale; keeps the remapped histogram biased low.
const SCALE_FACTOR: f64 = 1.05;

/// Relax corner elevations outward from the border.
///
/// Border corners start at zero, everything else at infinity; each hop costs
/// 0.01, plus 1.0 when both endpoints are land so the interior climbs
/// steeply away from the coast. Distances only ever shrink, so re-enqueueing
/// without a visited set is fine. Water corners are clamped to sea level
/// afterwards.
pub fn assign_corner_elevations(mesh: &mut Mesh) {
    let mut queue: VecDeque<CornerId> = VecDeque::new();
    for corner in &mut mesh.corners {
        if corner.border {
            corner.elevation = 0.0;
            queue.push_back(corner.id);
        } else {
            corner.elevation = f64::INFINITY;
        }
    }

    while let Some(q) = queue.pop_front() {
        let (q_elevation, q_water, neighbors) = {
            let corner = &mesh.corners[q.index()];
            (corner.elevation, corner.water, corner.neighbors.clone())
        };

        for s in neighbors {
            let neighbor = &mut mesh.corners[s.index()];
            let mut new_elevation = q_elevation + 0.01;
            if !q_water && !neighbor.water {
                new_elevation += 1.0;
            }
            if new_elevation < neighbor.elevation {
                neighbor.elevation = new_elevation;
                queue.push_back(s);
            }
        }
    }

    for corner in &mut mesh.corners {
        if corner.water {
            corner.elevation = 0.0;
        }
    }
}

/// Remap land corner elevations onto `√S − √(S·(1−y))` by ascending rank.
///
/// Monotone, so the relative order from the BFS survives; the result lands
/// in `[0, 1]` with most corners low.
pub fn redistribute_elevations(mesh: &mut Mesh) {
    let mut land = mesh.land_corners();
    land.sort_by(|a, b| {
        mesh.corners[a.index()]
            .elevation
            .total_cmp(&mesh.corners[b.index()].elevation)
    });

    let denom = land.len().saturating_sub(1).max(1) as f64;
    for (i, id) in land.iter().enumerate() {
        let y = i as f64 / denom;
        let x = SCALE_FACTOR.sqrt() - (SCALE_FACTOR * (1.0 - y)).sqrt();
        mesh.corners[id.index()].elevation = x.min(1.0);
    }
}

/// Cell elevation is the mean of its corner elevations.
pub fn assign_polygon_elevations(mesh: &mut Mesh) {
    for i in 0..mesh.centers.len() {
        let corners = mesh.centers[i].corners.clone();
        if corners.is_empty() {
            continue;
        }
        let sum: f64 = corners
            .iter()
            .map(|q| mesh.corners[q.index()].elevation)
            .sum();
        mesh.centers[i].elevation = sum / corners.len() as f64;
    }
}

/// Point every corner at its lowest neighbor (or itself at a local minimum).
pub fn calculate_downslopes(mesh: &mut Mesh) {
    for i in 0..mesh.corners.len() {
        let mut best = CornerId(i as u32);
        let mut best_elevation = mesh.corners[i].elevation;
        for &q in &mesh.corners[i].neighbors {
            let elevation = mesh.corners[q.index()].elevation;
            if elevation < best_elevation {
                best = q;
                best_elevation = elevation;
            }
        }
        mesh.corners[i].downslope = best;
    }
}
