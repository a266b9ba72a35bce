//! Bisectors, their intersections, and the vertex/edge factory.
//!
//! - `bisect`: perpendicular bisector of two sites as `a·x + b·y = c`, scaled so
//!   the dominant direction component becomes 1.
//! - `intersect`: meeting point of two neighbouring beach-line boundaries, if
//!   they converge.
//! - `Factory`: owns every edge and vertex of one sweep and hands out
//!   sequential ids.
//!
//! Code cross-refs: `beach::BeachLine`, `clip::Clipper`

use nalgebra::Vector2;

use super::beach::{BeachLine, HalfEdgeId};
use super::types::{sweep_precedes, Edge, EdgeId, Side, Site};

/// Bisector of `s1` (lower) and `s2` (upper).
pub fn bisect(id: EdgeId, s1: Site, s2: Site) -> Edge {
    let d = s2.pos - s1.pos;
    let c = s1.pos.dot(&d) + d.norm_squared() * 0.5;
    let (a, b, c) = if d.x.abs() > d.y.abs() {
        (1.0, d.y / d.x, c / d.x)
    } else {
        (d.x / d.y, 1.0, c / d.y)
    };
    Edge {
        id,
        a,
        b,
        c,
        region: [s1, s2],
        endpoints: [None, None],
        clipped: false,
    }
}

/// Intersection of the boundaries `he1` and `he2`, or `None` when they do not
/// converge (sentinel involved, same upper site, near-parallel, or diverging).
pub fn intersect(
    line: &BeachLine,
    edges: &[Edge],
    he1: HalfEdgeId,
    he2: HalfEdgeId,
    eps_det: f64,
) -> Option<Vector2<f64>> {
    let e1 = &edges[line.node(he1).edge?.0];
    let e2 = &edges[line.node(he2).edge?.0];
    if e1.upper().index == e2.upper().index {
        return None;
    }
    let det = e1.a * e2.b - e1.b * e2.a;
    if det.is_nan() || det.abs() < eps_det {
        return None;
    }
    let x = (e1.c * e2.b - e2.c * e1.b) / det;
    let y = (e2.c * e1.a - e1.c * e2.a) / det;

    let (he, e) = if sweep_precedes(e1.upper().pos, e2.upper().pos) {
        (he1, e1)
    } else {
        (he2, e2)
    };
    let right_of_site = x >= e.upper().x();
    match (right_of_site, line.node(he).side) {
        (true, Side::Left) | (false, Side::Right) => None,
        _ => Some(Vector2::new(x, y)),
    }
}

/// Allocator for the edges and vertices of one sweep.
#[derive(Clone, Debug, Default)]
pub struct Factory {
    edges: Vec<Edge>,
    vertices: Vec<Site>,
}

impl Factory {
    /// Create the bisector of `s1` and `s2` with the next edge id.
    pub fn bisect(&mut self, s1: Site, s2: Site) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(bisect(id, s1, s2));
        id
    }

    /// Register a Voronoi vertex at `pos` with the next vertex id.
    pub fn new_vertex(&mut self, pos: Vector2<f64>) -> Site {
        let v = Site {
            index: self.vertices.len(),
            pos,
        };
        self.vertices.push(v);
        v
    }

    /// Fill endpoint slot `side` of `id`; returns true once both slots are set.
    pub fn set_endpoint(&mut self, id: EdgeId, side: Side, v: Site) -> bool {
        let e = &mut self.edges[id.0];
        debug_assert!(e.endpoints[side.index()].is_none(), "endpoint set twice");
        e.endpoints[side.index()] = Some(v);
        e.endpoints[side.opposite().index()].is_some()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }
    #[inline]
    pub fn vertices(&self) -> &[Site] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Site> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_line(e: &Edge, p: Vector2<f64>) -> bool {
        (e.a * p.x + e.b * p.y - e.c).abs() < 1e-9
    }

    #[test]
    fn bisector_normalization_picks_dominant_axis() {
        let s0 = Site::new(0, 0.0, 0.0);
        let wide = bisect(EdgeId(0), s0, Site::new(1, 10.0, 2.0));
        assert_eq!(wide.a, 1.0);
        assert!(wide.b.abs() <= 1.0);
        let tall = bisect(EdgeId(1), s0, Site::new(2, 2.0, 10.0));
        assert_eq!(tall.b, 1.0);
        assert!(tall.a.abs() <= 1.0);
        // Midpoints lie on their bisectors.
        assert!(on_line(&wide, Vector2::new(5.0, 1.0)));
        assert!(on_line(&tall, Vector2::new(1.0, 5.0)));
    }

    #[test]
    fn bisector_points_are_equidistant() {
        let s1 = Site::new(0, -3.0, 1.5);
        let s2 = Site::new(1, 4.0, 7.25);
        let e = bisect(EdgeId(0), s1, s2);
        for t in [-10.0, 0.0, 3.5] {
            let p = if e.is_x_major() {
                Vector2::new(e.c - e.b * t, t)
            } else {
                Vector2::new(t, e.c - e.a * t)
            };
            let d1 = (p - s1.pos).norm();
            let d2 = (p - s2.pos).norm();
            assert!((d1 - d2).abs() < 1e-9);
        }
    }

    #[test]
    fn parallel_bisectors_do_not_intersect() {
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 10.0, 0.0);
        let s2 = Site::new(2, 20.0, 0.0);
        let mut f = Factory::default();
        let e0 = f.bisect(s0, s1);
        let e1 = f.bisect(s1, s2);
        let mut line = BeachLine::new(4, 0.0, 20.0, s0);
        let a = line.create(e0, Side::Left);
        let b = line.create(e1, Side::Left);
        line.insert_after(line.left_end(), a);
        line.insert_after(a, b);
        assert!(intersect(&line, f.edges(), a, b, 1e-10).is_none());
        assert!(intersect(&line, f.edges(), line.left_end(), a, 1e-10).is_none());
    }

    #[test]
    fn converging_bisectors_meet_at_circumcenter() {
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 10.0, 0.0);
        let s2 = Site::new(2, 5.0, 8.66);
        let mut f = Factory::default();
        let e0 = f.bisect(s0, s1);
        let e1 = f.bisect(s0, s2);
        let mut line = BeachLine::new(4, 0.0, 10.0, s0);
        let r1 = line.create(e1, Side::Right);
        let l0 = line.create(e0, Side::Left);
        line.insert_after(line.left_end(), r1);
        line.insert_after(r1, l0);
        let p = intersect(&line, f.edges(), r1, l0, 1e-10).expect("vertex");
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!((p.y - 2.8868).abs() < 1e-3);
    }

    #[test]
    fn factory_ids_are_sequential_and_endpoints_close_edges() {
        let mut f = Factory::default();
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 1.0, 0.0);
        let e0 = f.bisect(s0, s1);
        let e1 = f.bisect(s1, s0);
        assert_eq!((e0, e1), (EdgeId(0), EdgeId(1)));
        let v0 = f.new_vertex(Vector2::new(0.5, 1.0));
        let v1 = f.new_vertex(Vector2::new(0.5, -1.0));
        assert_eq!((v0.index, v1.index), (0, 1));
        assert!(!f.set_endpoint(e0, Side::Right, v0));
        assert!(f.set_endpoint(e0, Side::Left, v1));
        assert!(f.edges()[0].is_closed());
        assert!(!f.edges()[1].is_closed());
    }
}
