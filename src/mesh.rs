//! Dual-graph mesh entities: polygon centers, corners and edges.
//!
//! The three entity kinds live in parallel arenas owned by [`Mesh`] and
//! reference each other through dense `u32` index handles. Indices are never
//! reused; a handle stays valid for the life of the mesh.

use std::cmp::Ordering;

use crate::biomes::Biome;
use crate::geometry::Vec2;
use crate::quadtree::Aabb;

/// Handle to a [`Center`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CenterId(pub u32);

/// Handle to a [`Corner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerId(pub u32);

/// Handle to an [`Edge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

impl CenterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl CornerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interior reference point of one polygonal cell.
#[derive(Clone, Debug)]
pub struct Center {
    pub id: CenterId,
    pub position: Vec2,

    pub water: bool,
    pub ocean: bool,
    pub coast: bool,
    pub border: bool,
    pub elevation: f64,
    pub moisture: f64,
    pub biome: Biome,

    /// Incident edges (polygon sides).
    pub edges: Vec<EdgeId>,
    /// Polygon corners, counter-clockwise around `position` once the mesh is
    /// finished.
    pub corners: Vec<CornerId>,
    /// Opposite centers across each incident edge.
    pub neighbors: Vec<CenterId>,
}

impl Center {
    fn new(id: CenterId, position: Vec2) -> Self {
        Self {
            id,
            position,
            water: false,
            ocean: false,
            coast: false,
            border: false,
            elevation: 0.0,
            moisture: 0.0,
            biome: Biome::None,
            edges: Vec::new(),
            corners: Vec::new(),
            neighbors: Vec::new(),
        }
    }
}

/// Polygon vertex shared by up to three cells.
#[derive(Clone, Debug)]
pub struct Corner {
    pub id: CornerId,
    pub position: Vec2,

    pub water: bool,
    pub ocean: bool,
    pub coast: bool,
    pub border: bool,
    pub elevation: f64,
    pub moisture: f64,
    pub river_volume: f64,
    /// Lowest-elevation neighbor corner; a local minimum points at itself.
    pub downslope: CornerId,

    /// Incident cells (1 to 3).
    pub centers: Vec<CenterId>,
    pub edges: Vec<EdgeId>,
    /// Neighbor corners across shared edges.
    pub neighbors: Vec<CornerId>,
}

impl Corner {
    fn new(id: CornerId, position: Vec2) -> Self {
        Self {
            id,
            position,
            water: false,
            ocean: false,
            coast: false,
            border: false,
            elevation: 0.0,
            moisture: 0.0,
            river_volume: 0.0,
            downslope: id,
            centers: Vec::new(),
            edges: Vec::new(),
            neighbors: Vec::new(),
        }
    }
}

/// Polygon side: a segment between two corners (`v0`, `v1`) that separates
/// two cells (`d0`, `d1`). Border edges have no second cell.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub d0: Option<CenterId>,
    pub d1: Option<CenterId>,
    pub v0: Option<CornerId>,
    pub v1: Option<CornerId>,
    pub river_volume: f64,
    pub voronoi_midpoint: Vec2,
}

/// Arena owner of all centers, corners and edges.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub centers: Vec<Center>,
    pub corners: Vec<Corner>,
    pub edges: Vec<Edge>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_center(&mut self, position: Vec2) -> CenterId {
        let id = CenterId(self.centers.len() as u32);
        self.centers.push(Center::new(id, position));
        id
    }

    pub fn add_corner(&mut self, position: Vec2) -> CornerId {
        let id = CornerId(self.corners.len() as u32);
        self.corners.push(Corner::new(id, position));
        id
    }

    /// Create an edge between two corners, owned on one side by `d0`.
    pub fn add_edge(&mut self, v0: CornerId, v1: CornerId, d0: CenterId) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        let midpoint =
            (self.corners[v0.index()].position + self.corners[v1.index()].position) / 2.0;
        self.edges.push(Edge {
            id,
            d0: Some(d0),
            d1: None,
            v0: Some(v0),
            v1: Some(v1),
            river_volume: 0.0,
            voronoi_midpoint: midpoint,
        });
        id
    }

    /// The edge joining corners `a` and `b`, if one exists.
    pub fn edge_between(&self, a: CornerId, b: CornerId) -> Option<EdgeId> {
        self.corners[a.index()]
            .edges
            .iter()
            .copied()
            .find(|&e| {
                let edge = &self.edges[e.index()];
                edge.v0 == Some(b) || edge.v1 == Some(b)
            })
    }

    /// The center on the far side of `edge` from `from`.
    pub fn opposite_center(&self, edge: EdgeId, from: CenterId) -> Option<CenterId> {
        let e = &self.edges[edge.index()];
        if e.d0 == Some(from) {
            e.d1
        } else if e.d1 == Some(from) {
            e.d0
        } else {
            None
        }
    }

    /// The corner on the far side of `edge` from `from`.
    pub fn opposite_corner(&self, edge: EdgeId, from: CornerId) -> Option<CornerId> {
        let e = &self.edges[edge.index()];
        if e.v0 == Some(from) {
            e.v1
        } else if e.v1 == Some(from) {
            e.v0
        } else {
            None
        }
    }

    /// Tight bounding box of a cell's polygon, as center plus half-diagonal.
    pub fn polygon_aabb(&self, id: CenterId) -> Aabb {
        let center = &self.centers[id.index()];
        let Some(&first) = center.corners.first() else {
            return Aabb::new(center.position, Vec2::ZERO);
        };

        let p = self.corners[first.index()].position;
        let (mut min, mut max) = (p, p);
        for &corner in &center.corners[1..] {
            let p = self.corners[corner.index()].position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let half = (max - min) / 2.0;
        Aabb::new(min + half, half)
    }

    /// Indices of all corners currently flagged as land.
    pub fn land_corners(&self) -> Vec<CornerId> {
        self.corners
            .iter()
            .filter(|q| !q.water)
            .map(|q| q.id)
            .collect()
    }

    /// Finalize topology: order every cell's corners counter-clockwise and
    /// fill the same-kind adjacency lists from the incident edges.
    pub fn finish(&mut self) {
        for i in 0..self.centers.len() {
            self.sort_corners_ccw(CenterId(i as u32));
        }

        for i in 0..self.centers.len() {
            let id = CenterId(i as u32);
            let neighbors: Vec<CenterId> = self.centers[i]
                .edges
                .iter()
                .filter_map(|&e| self.opposite_center(e, id))
                .collect();
            self.centers[i].neighbors = neighbors;
        }

        for i in 0..self.corners.len() {
            let id = CornerId(i as u32);
            let neighbors: Vec<CornerId> = self.corners[i]
                .edges
                .iter()
                .filter_map(|&e| self.opposite_corner(e, id))
                .collect();
            self.corners[i].neighbors = neighbors;
        }
    }

    fn sort_corners_ccw(&mut self, id: CenterId) {
        let pivot = self.centers[id.index()].position;
        let mut order: Vec<(CornerId, Vec2)> = self.centers[id.index()]
            .corners
            .iter()
            .map(|&q| (q, self.corners[q.index()].position))
            .collect();
        order.sort_by(|a, b| ccw_order(pivot, a.1, b.1));
        self.centers[id.index()].corners = order.into_iter().map(|(q, _)| q).collect();
    }
}

/// Angular order of `a` and `b` around `pivot`.
///
/// Points in the right half-plane come first; within a half-plane the cross
/// product decides, with ties on the vertical axis broken by y.
fn ccw_order(pivot: Vec2, a: Vec2, b: Vec2) -> Ordering {
    let da = a - pivot;
    let db = b - pivot;

    match (da.x >= 0.0, db.x >= 0.0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            if da.x == 0.0 && db.x == 0.0 {
                return da.y.partial_cmp(&db.y).unwrap_or(Ordering::Equal);
            }
            let cross = da.cross(db);
            if cross > 0.0 {
                Ordering::Less
            } else if cross < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
    }
}

/// Whether a point lies inside the half-open map rectangle
/// `[0, width) × [0, height)`.
pub fn in_rectangle(p: Vec2, width: f64, height: f64) -> bool {
    p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_mesh() -> (Mesh, CenterId) {
        let mut mesh = Mesh::new();
        let c = mesh.add_center(Vec2::new(0.0, 0.0));
        // Deliberately unsorted diamond around the origin.
        for p in [
            Vec2::new(0.0, 3.0),
            Vec2::new(-2.0, 0.0),
            Vec2::new(0.0, -3.0),
            Vec2::new(2.0, 0.0),
        ] {
            let q = mesh.add_corner(p);
            mesh.centers[c.index()].corners.push(q);
            mesh.corners[q.index()].centers.push(c);
        }
        (mesh, c)
    }

    #[test]
    fn test_ccw_sort() {
        let (mut mesh, c) = diamond_mesh();
        mesh.finish();

        let positions: Vec<Vec2> = mesh.centers[c.index()]
            .corners
            .iter()
            .map(|&q| mesh.corners[q.index()].position)
            .collect();

        // Successive cross products around the pivot stay non-negative,
        // including the wrap-around pair.
        let pivot = mesh.centers[c.index()].position;
        for i in 0..positions.len() {
            let a = positions[i] - pivot;
            let b = positions[(i + 1) % positions.len()] - pivot;
            assert!(a.cross(b) >= 0.0, "{:?} -> {:?} is not ccw", a, b);
        }
    }

    #[test]
    fn test_polygon_aabb() {
        let (mut mesh, c) = diamond_mesh();
        mesh.finish();

        let aabb = mesh.polygon_aabb(c);
        assert_eq!(aabb.center, Vec2::new(0.0, 0.0));
        assert_eq!(aabb.half, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_edge_lookup_and_opposites() {
        let mut mesh = Mesh::new();
        let ca = mesh.add_center(Vec2::new(0.0, 0.0));
        let cb = mesh.add_center(Vec2::new(10.0, 0.0));
        let v0 = mesh.add_corner(Vec2::new(5.0, -5.0));
        let v1 = mesh.add_corner(Vec2::new(5.0, 5.0));

        let e = mesh.add_edge(v0, v1, ca);
        mesh.edges[e.index()].d1 = Some(cb);
        mesh.corners[v0.index()].edges.push(e);
        mesh.corners[v1.index()].edges.push(e);

        assert_eq!(mesh.edge_between(v0, v1), Some(e));
        assert_eq!(mesh.edge_between(v1, v0), Some(e));
        assert_eq!(mesh.opposite_center(e, ca), Some(cb));
        assert_eq!(mesh.opposite_center(e, cb), Some(ca));
        assert_eq!(mesh.opposite_corner(e, v0), Some(v1));
        assert_eq!(mesh.edges[e.index()].voronoi_midpoint, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_in_rectangle_is_half_open() {
        assert!(in_rectangle(Vec2::new(0.0, 0.0), 100.0, 100.0));
        assert!(in_rectangle(Vec2::new(99.9, 99.9), 100.0, 100.0));
        assert!(!in_rectangle(Vec2::new(100.0, 50.0), 100.0, 100.0));
        assert!(!in_rectangle(Vec2::new(-0.1, 50.0), 100.0, 100.0));
    }
}
