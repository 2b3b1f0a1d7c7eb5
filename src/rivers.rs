//! River generation: downslope walks from randomly drawn spring corners.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::mesh::{CornerId, Mesh};

/// Spring candidates must sit in this elevation band.
const SPRING_MIN_ELEVATION: f64 = 0.3;
const SPRING_MAX_ELEVATION: f64 = 0.9;

/// Trace one river per accepted draw, one draw per attempt.
///
/// `|centers| / 3` corners are drawn uniformly with replacement; draws on
/// ocean corners or outside the spring band are discarded (the draw itself
/// still consumes one PRNG sample, which keeps the stream reproducible).
/// Each accepted spring walks its downslope chain until it reaches a coast
/// corner or a local minimum, incrementing the volume of every corner and
/// edge it passes.
pub fn generate_rivers(mesh: &mut Mesh, rng: &mut ChaCha8Rng) {
    if mesh.corners.is_empty() {
        return;
    }

    let attempts = mesh.centers.len() / 3;
    for _ in 0..attempts {
        let pick = CornerId(rng.gen_range(0..mesh.corners.len()) as u32);
        {
            let corner = &mesh.corners[pick.index()];
            if corner.ocean
                || corner.elevation < SPRING_MIN_ELEVATION
                || corner.elevation > SPRING_MAX_ELEVATION
            {
                continue;
            }
        }

        let mut q = pick;
        while !mesh.corners[q.index()].coast {
            let down = mesh.corners[q.index()].downslope;
            if down == q {
                break;
            }
            let Some(edge) = mesh.edge_between(q, down) else {
                break;
            };
            mesh.edges[edge.index()].river_volume += 1.0;
            mesh.corners[q.index()].river_volume += 1.0;
            mesh.corners[down.index()].river_volume += 1.0;
            q = down;
        }
    }
}
