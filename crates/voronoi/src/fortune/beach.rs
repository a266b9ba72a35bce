//! Beach line: arena-backed, left-to-right ordered list of half-edges.
//!
//! Purpose
//! - Hold the boundaries currently separating beach-line arcs, bounded by two
//!   sentinel half-edges (`left_end`, `right_end`) that carry no edge.
//! - Locate the boundary directly left of a new site (`find_left_boundary`).
//!
//! Why this design
//! - Half-edges live in a `Vec` and are addressed by `HalfEdgeId`; `prev`/`next`
//!   are handles, so splicing never aliases mutable references.
//! - Removed half-edges are tombstoned, never reused, so stale handles held by
//!   the bucket index can be detected and evicted on lookup.
//! - The bucket index over x is a cache only. Every hit is re-validated and the
//!   linked list walk decides the answer.
//!
//! Code cross-refs: `queue::EventQueue` (pending vertex fields), `bisect::intersect`

use nalgebra::Vector2;

use super::sites::bucket_of;
use super::types::{Edge, EdgeId, Side, Site};

/// Stable handle of a half-edge inside one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdgeId(pub usize);

/// One side of a boundary present on the beach line.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub prev: HalfEdgeId,
    pub next: HalfEdgeId,
    /// `None` only for the two sentinels.
    pub edge: Option<EdgeId>,
    pub side: Side,
    /// Pending circle-event vertex; `Some` iff queued in the event queue.
    pub vertex: Option<Vector2<f64>>,
    /// Sweep coordinate at which the pending circle event fires.
    pub ystar: f64,
    pub deleted: bool,
}

/// Ordered half-edge list plus its x-bucket index.
///
/// Invariants:
/// - `left_end` and `right_end` are always linked (directly or through live nodes).
/// - Sentinels link to themselves on their outer side and are never removed.
/// - `hash[0] == left_end` and `hash[last] == right_end` for the whole sweep.
#[derive(Clone, Debug)]
pub struct BeachLine {
    nodes: Vec<HalfEdge>,
    hash: Vec<Option<HalfEdgeId>>,
    left_end: HalfEdgeId,
    right_end: HalfEdgeId,
    min_x: f64,
    delta_x: f64,
    bottom: Site,
}

impl BeachLine {
    /// Empty beach line over sites spanning `[min_x, min_x + delta_x]`.
    ///
    /// `bottom` is the first site in sweep order; it is the region seen through
    /// either sentinel.
    pub fn new(hash_size: usize, min_x: f64, delta_x: f64, bottom: Site) -> Self {
        let hash_size = hash_size.max(2);
        let left_end = HalfEdgeId(0);
        let right_end = HalfEdgeId(1);
        let sentinel = |prev, next| HalfEdge {
            prev,
            next,
            edge: None,
            side: Side::Left,
            vertex: None,
            ystar: 0.0,
            deleted: false,
        };
        let nodes = vec![sentinel(left_end, right_end), sentinel(left_end, right_end)];
        let mut hash = vec![None; hash_size];
        hash[0] = Some(left_end);
        hash[hash_size - 1] = Some(right_end);
        Self {
            nodes,
            hash,
            left_end,
            right_end,
            min_x,
            delta_x,
            bottom,
        }
    }

    #[inline]
    pub fn left_end(&self) -> HalfEdgeId {
        self.left_end
    }
    #[inline]
    pub fn right_end(&self) -> HalfEdgeId {
        self.right_end
    }
    #[inline]
    pub fn node(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.nodes[he.0]
    }
    #[inline]
    pub(crate) fn node_mut(&mut self, he: HalfEdgeId) -> &mut HalfEdge {
        &mut self.nodes[he.0]
    }
    #[inline]
    pub fn left(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.nodes[he.0].prev
    }
    #[inline]
    pub fn right(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.nodes[he.0].next
    }

    /// Allocate an unlinked half-edge.
    pub fn create(&mut self, edge: EdgeId, side: Side) -> HalfEdgeId {
        let id = HalfEdgeId(self.nodes.len());
        self.nodes.push(HalfEdge {
            prev: id,
            next: id,
            edge: Some(edge),
            side,
            vertex: None,
            ystar: 0.0,
            deleted: false,
        });
        id
    }

    /// Splice `he` immediately right of `boundary`.
    pub fn insert_after(&mut self, boundary: HalfEdgeId, he: HalfEdgeId) {
        let next = self.nodes[boundary.0].next;
        self.nodes[he.0].prev = boundary;
        self.nodes[he.0].next = next;
        self.nodes[next.0].prev = he;
        self.nodes[boundary.0].next = he;
    }

    /// Unlink `he` and tombstone it.
    pub fn remove(&mut self, he: HalfEdgeId) {
        debug_assert!(he != self.left_end && he != self.right_end);
        let HalfEdge { prev, next, .. } = self.nodes[he.0];
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
        self.nodes[he.0].deleted = true;
    }

    /// Site on the left of `he` (the bottom site for sentinels).
    pub fn region_left(&self, he: HalfEdgeId, edges: &[Edge]) -> Site {
        let node = &self.nodes[he.0];
        match node.edge {
            None => self.bottom,
            Some(e) => edges[e.0].region[node.side.index()],
        }
    }

    /// Site on the right of `he` (the bottom site for sentinels).
    pub fn region_right(&self, he: HalfEdgeId, edges: &[Edge]) -> Site {
        let node = &self.nodes[he.0];
        match node.edge {
            None => self.bottom,
            Some(e) => edges[e.0].region[node.side.opposite().index()],
        }
    }

    /// Live half-edges left to right, sentinels excluded.
    pub fn iter(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        let mut cur = self.right(self.left_end);
        std::iter::from_fn(move || {
            if cur == self.right_end {
                return None;
            }
            let he = cur;
            cur = self.right(cur);
            Some(he)
        })
    }

    /// Does `p` lie right of the boundary traced by `he`?
    pub fn is_right_of(&self, he: HalfEdgeId, p: Vector2<f64>, edges: &[Edge]) -> bool {
        let node = &self.nodes[he.0];
        let Some(eid) = node.edge else {
            // Everything is right of the left sentinel and nothing of the right one.
            return he != self.right_end;
        };
        let e = &edges[eid.0];
        let top = e.upper().pos;
        let right_of_site = p.x > top.x;
        if right_of_site && node.side == Side::Left {
            return true;
        }
        if !right_of_site && node.side == Side::Right {
            return false;
        }

        let above = if e.is_x_major() {
            let dxp = p.x - top.x;
            let dyp = p.y - top.y;
            let mut fast = false;
            let mut above;
            if (!right_of_site && e.b < 0.0) || (right_of_site && e.b >= 0.0) {
                above = dyp >= e.b * dxp;
                fast = above;
            } else {
                above = p.x + p.y * e.b > e.c;
                if e.b < 0.0 {
                    above = !above;
                }
                if !above {
                    fast = true;
                }
            }
            if !fast {
                let dxs = top.x - e.region[0].x();
                above = e.b * (dxp * dxp - dyp * dyp)
                    < dxs * dyp * (1.0 + 2.0 * dxp / dxs + e.b * e.b);
                if e.b < 0.0 {
                    above = !above;
                }
            }
            above
        } else {
            let yl = e.c - e.a * p.x;
            let t1 = p.y - yl;
            let t2 = p.x - top.x;
            let t3 = yl - top.y;
            t1 * t1 > t2 * t2 + t3 * t3
        };
        match node.side {
            Side::Left => above,
            Side::Right => !above,
        }
    }

    /// Live cache entry of bucket `i`; tombstoned entries are evicted.
    fn cached(&mut self, i: usize) -> Option<HalfEdgeId> {
        let he = self.hash.get(i).copied().flatten()?;
        if self.nodes[he.0].deleted {
            self.hash[i] = None;
            return None;
        }
        Some(he)
    }

    /// Half-edge immediately left of `p` on the beach line.
    pub fn find_left_boundary(&mut self, p: Vector2<f64>, edges: &[Edge]) -> HalfEdgeId {
        let size = self.hash.len();
        let bucket = bucket_of(p.x, self.min_x, self.delta_x, size);

        let mut start = self.cached(bucket);
        if start.is_none() {
            for i in 1..size {
                if let Some(lo) = bucket.checked_sub(i) {
                    start = self.cached(lo);
                    if start.is_some() {
                        break;
                    }
                }
                start = self.cached(bucket + i);
                if start.is_some() {
                    break;
                }
            }
        }
        let mut he = start.unwrap_or(self.left_end);

        if he == self.left_end || (he != self.right_end && self.is_right_of(he, p, edges)) {
            loop {
                he = self.right(he);
                if he == self.right_end || !self.is_right_of(he, p, edges) {
                    break;
                }
            }
            he = self.left(he);
        } else {
            loop {
                he = self.left(he);
                if he == self.left_end || self.is_right_of(he, p, edges) {
                    break;
                }
            }
        }

        if bucket > 0 && bucket < size - 1 {
            self.hash[bucket] = Some(he);
        }
        he
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::bisect::bisect;

    fn line_with(bottom: Site) -> BeachLine {
        BeachLine::new(4, 0.0, 10.0, bottom)
    }

    #[test]
    fn empty_line_is_two_linked_sentinels() {
        let line = line_with(Site::new(0, 0.0, 0.0));
        assert_eq!(line.right(line.left_end()), line.right_end());
        assert_eq!(line.left(line.right_end()), line.left_end());
        assert_eq!(line.iter().count(), 0);
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 10.0, 0.0);
        let edges = vec![bisect(EdgeId(0), s0, s1)];
        let mut line = line_with(s0);
        let a = line.create(EdgeId(0), Side::Left);
        let b = line.create(EdgeId(0), Side::Right);
        line.insert_after(line.left_end(), a);
        line.insert_after(a, b);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(line.region_left(a, &edges).index, 0);
        assert_eq!(line.region_right(a, &edges).index, 1);
        assert_eq!(line.region_left(b, &edges).index, 1);
        assert_eq!(line.region_right(b, &edges).index, 0);
        assert_eq!(line.region_right(line.left_end(), &edges).index, 0);

        line.remove(a);
        assert!(line.node(a).deleted);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![b]);
        assert_eq!(line.left(b), line.left_end());
    }

    #[test]
    fn side_test_against_vertical_bisector() {
        // Bisector of (0,0) and (10,0) is x = 5.
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 10.0, 0.0);
        let edges = vec![bisect(EdgeId(0), s0, s1)];
        let mut line = line_with(s0);
        let l = line.create(EdgeId(0), Side::Left);
        let r = line.create(EdgeId(0), Side::Right);
        line.insert_after(line.left_end(), l);
        line.insert_after(l, r);
        assert!(line.is_right_of(l, Vector2::new(7.0, 3.0), &edges));
        assert!(!line.is_right_of(l, Vector2::new(3.0, 3.0), &edges));
        assert!(!line.is_right_of(r, Vector2::new(3.0, 3.0), &edges));
        assert!(line.is_right_of(line.left_end(), Vector2::new(-1e9, 0.0), &edges));
        assert!(!line.is_right_of(line.right_end(), Vector2::new(1e9, 0.0), &edges));
    }

    #[test]
    fn find_left_boundary_skips_tombstoned_cache_entries() {
        let s0 = Site::new(0, 0.0, 0.0);
        let s1 = Site::new(1, 10.0, 0.0);
        let edges = vec![bisect(EdgeId(0), s0, s1)];
        let mut line = line_with(s0);
        let l = line.create(EdgeId(0), Side::Left);
        let r = line.create(EdgeId(0), Side::Right);
        line.insert_after(line.left_end(), l);
        line.insert_after(l, r);

        let p = Vector2::new(7.0, 5.0);
        assert_eq!(line.find_left_boundary(p, &edges), l);
        // Cached in bucket 2; tombstone it and ask again.
        line.remove(l);
        let q = Vector2::new(2.0, 5.0);
        assert_eq!(line.find_left_boundary(p, &edges), line.left_end());
        assert_eq!(line.find_left_boundary(q, &edges), line.left_end());
        assert!(line.hash.iter().flatten().all(|h| !line.node(*h).deleted));
    }
}
