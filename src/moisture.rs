//! Moisture labelling: fresh- and salt-water spreading plus redistribution.

use std::collections::VecDeque;

use crate::mesh::{CornerId, Mesh};

/// Moisture kept by a neighbor one hop from a fresh-water source.
const FRESH_WATER_DECAY: f64 = 0.9;
/// Salt water humidifies far less per hop.
const SALT_WATER_DECAY: f64 = 0.3;

/// Spread moisture across corners in two waves.
///
/// Fresh water first: every lake or river corner (ocean excluded) seeds
/// `min(3.0, 0.2·river_volume)` — plain lakes seed 1.0 — and decays by 0.9
/// per hop. Salt water second: every ocean corner seeds 1.0 and decays by
/// 0.3. A corner only ever adopts a larger value, so both waves terminate.
pub fn assign_corner_moisture(mesh: &mut Mesh) {
    let mut queue: VecDeque<CornerId> = VecDeque::new();

    for corner in &mut mesh.corners {
        if (corner.water || corner.river_volume > 0.0) && !corner.ocean {
            corner.moisture = if corner.river_volume > 0.0 {
                (0.2 * corner.river_volume).min(3.0)
            } else {
                1.0
            };
            queue.push_back(corner.id);
        } else {
            corner.moisture = 0.0;
        }
    }
    spread_moisture(mesh, &mut queue, FRESH_WATER_DECAY);

    for corner in &mut mesh.corners {
        if corner.ocean {
            corner.moisture = 1.0;
            queue.push_back(corner.id);
        }
    }
    spread_moisture(mesh, &mut queue, SALT_WATER_DECAY);
}

fn spread_moisture(mesh: &mut Mesh, queue: &mut VecDeque<CornerId>, decay: f64) {
    while let Some(c) = queue.pop_front() {
        let (moisture, neighbors) = {
            let corner = &mesh.corners[c.index()];
            (corner.moisture, corner.neighbors.clone())
        };

        for r in neighbors {
            let new_moisture = moisture * decay;
            let neighbor = &mut mesh.corners[r.index()];
            if new_moisture > neighbor.moisture {
                neighbor.moisture = new_moisture;
                queue.push_back(r);
            }
        }
    }
}

/// Flatten land corner moisture onto a linear ramp by ascending rank.
pub fn redistribute_moisture(mesh: &mut Mesh) {
    let mut land = mesh.land_corners();
    land.sort_by(|a, b| {
        mesh.corners[a.index()]
            .moisture
            .total_cmp(&mesh.corners[b.index()].moisture)
    });

    let denom = land.len().saturating_sub(1).max(1) as f64;
    for (i, id) in land.iter().enumerate() {
        mesh.corners[id.index()].moisture = i as f64 / denom;
    }
}

/// Cell moisture is the mean of its corner moistures, each clamped to 1.
pub fn assign_polygon_moisture(mesh: &mut Mesh) {
    for i in 0..mesh.centers.len() {
        let corners = mesh.centers[i].corners.clone();
        if corners.is_empty() {
            continue;
        }

        let mut sum = 0.0;
        for &q in &corners {
            let corner = &mut mesh.corners[q.index()];
            if corner.moisture > 1.0 {
                corner.moisture = 1.0;
            }
            sum += corner.moisture;
        }
        mesh.centers[i].moisture = sum / corners.len() as f64;
    }
}
