//! Circle-event queue: half-edges bucketed by the sweep-y of their pending vertex.
//!
//! Each bucket keeps its entries ordered by `(ystar, x)` ascending; ties on `ystar`
//! go left to right so that simultaneous events are processed deterministically.
//!
//! The cached `min_bucket` only moves forward in `peek_min`/`pop_min`, and only
//! `insert` may lower it again. Every queued entry therefore sits in a bucket
//! `>= min_bucket`; the sweep relies on this to skip emptied buckets for good.

use nalgebra::Vector2;

use super::beach::{BeachLine, HalfEdgeId};
use super::sites::bucket_of;

#[derive(Clone, Copy, Debug)]
struct Pending {
    he: HalfEdgeId,
    x: f64,
    ystar: f64,
}

/// Bucketed priority queue of pending circle events.
#[derive(Clone, Debug)]
pub struct EventQueue {
    buckets: Vec<Vec<Pending>>,
    min_bucket: usize,
    len: usize,
    min_y: f64,
    delta_y: f64,
}

impl EventQueue {
    /// Queue over sweep coordinates starting at `min_y` with extent `delta_y`.
    pub fn new(size: usize, min_y: f64, delta_y: f64) -> Self {
        Self {
            buckets: vec![Vec::new(); size.max(1)],
            min_bucket: 0,
            len: 0,
            min_y,
            delta_y,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn bucket(&self, ystar: f64) -> usize {
        bucket_of(ystar, self.min_y, self.delta_y, self.buckets.len())
    }

    /// Schedule `he` to fire at `vertex.y + offset`.
    ///
    /// `offset` is the distance from `vertex` to the site that created the event,
    /// so the event fires when the sweep line touches the empty circle.
    pub fn insert(
        &mut self,
        line: &mut BeachLine,
        he: HalfEdgeId,
        vertex: Vector2<f64>,
        offset: f64,
    ) {
        let ystar = vertex.y + offset;
        let node = line.node_mut(he);
        debug_assert!(node.vertex.is_none(), "half-edge already queued");
        node.vertex = Some(vertex);
        node.ystar = ystar;

        let b = self.bucket(ystar);
        if b < self.min_bucket {
            self.min_bucket = b;
        }
        let list = &mut self.buckets[b];
        let at = list
            .iter()
            .position(|q| !(ystar > q.ystar || (ystar == q.ystar && vertex.x > q.x)))
            .unwrap_or(list.len());
        list.insert(
            at,
            Pending {
                he,
                x: vertex.x,
                ystar,
            },
        );
        self.len += 1;
    }

    /// Drop the pending event of `he`, if any.
    pub fn remove(&mut self, line: &mut BeachLine, he: HalfEdgeId) {
        let node = line.node_mut(he);
        if node.vertex.take().is_none() {
            return;
        }
        let b = self.bucket(node.ystar);
        if let Some(at) = self.buckets[b].iter().position(|q| q.he == he) {
            self.buckets[b].remove(at);
            self.len -= 1;
        }
    }

    /// Earliest pending event as `(x, ystar)`; advances the minimum bucket.
    pub fn peek_min(&mut self) -> Option<Vector2<f64>> {
        if self.len == 0 {
            return None;
        }
        while self.buckets[self.min_bucket].is_empty() {
            self.min_bucket += 1;
        }
        let head = self.buckets[self.min_bucket][0];
        Some(Vector2::new(head.x, head.ystar))
    }

    /// Pop the earliest event; returns its half-edge and vertex.
    pub fn pop_min(&mut self, line: &mut BeachLine) -> Option<(HalfEdgeId, Vector2<f64>)> {
        self.peek_min()?;
        let head = self.buckets[self.min_bucket].remove(0);
        self.len -= 1;
        let vertex = line.node_mut(head.he).vertex.take()?;
        Some((head.he, vertex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::types::{EdgeId, Side, Site};

    fn line_with(n: usize) -> (BeachLine, Vec<HalfEdgeId>) {
        let mut line = BeachLine::new(4, 0.0, 10.0, Site::new(0, 0.0, 0.0));
        let hs = (0..n).map(|_| line.create(EdgeId(0), Side::Left)).collect();
        (line, hs)
    }

    #[test]
    fn pops_in_sweep_order_with_x_tiebreak() {
        let (mut line, hs) = line_with(4);
        let mut q = EventQueue::new(8, 0.0, 10.0);
        q.insert(&mut line, hs[0], Vector2::new(3.0, 5.0), 1.0); // 6.0
        q.insert(&mut line, hs[1], Vector2::new(1.0, 1.0), 0.5); // 1.5
        q.insert(&mut line, hs[2], Vector2::new(2.0, 4.0), 2.0); // 6.0, smaller x
        q.insert(&mut line, hs[3], Vector2::new(0.0, 9.0), 3.0); // 12.0, clamps to last
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek_min(), Some(Vector2::new(1.0, 1.5)));

        let order: Vec<HalfEdgeId> =
            std::iter::from_fn(|| q.pop_min(&mut line).map(|(he, _)| he)).collect();
        assert_eq!(order, vec![hs[1], hs[2], hs[0], hs[3]]);
        assert!(q.is_empty());
        assert!(hs.iter().all(|&h| line.node(h).vertex.is_none()));
    }

    #[test]
    fn remove_clears_pending_vertex() {
        let (mut line, hs) = line_with(2);
        let mut q = EventQueue::new(8, 0.0, 10.0);
        q.insert(&mut line, hs[0], Vector2::new(0.0, 2.0), 1.0);
        q.insert(&mut line, hs[1], Vector2::new(0.0, 7.0), 1.0);
        q.remove(&mut line, hs[0]);
        assert!(line.node(hs[0]).vertex.is_none());
        assert_eq!(q.len(), 1);
        // Removing again is a no-op.
        q.remove(&mut line, hs[0]);
        assert_eq!(q.len(), 1);
        let (he, v) = q.pop_min(&mut line).unwrap();
        assert_eq!(he, hs[1]);
        assert_eq!(v, Vector2::new(0.0, 7.0));
    }

    #[test]
    fn insert_below_cached_minimum_lowers_it() {
        let (mut line, hs) = line_with(2);
        let mut q = EventQueue::new(8, 0.0, 10.0);
        q.insert(&mut line, hs[0], Vector2::new(0.0, 9.0), 0.0);
        assert_eq!(q.peek_min().map(|p| p.y), Some(9.0));
        q.insert(&mut line, hs[1], Vector2::new(0.0, 1.0), 0.0);
        assert_eq!(q.pop_min(&mut line).map(|(he, _)| he), Some(hs[1]));
        assert_eq!(q.pop_min(&mut line).map(|(he, _)| he), Some(hs[0]));
        assert!(q.pop_min(&mut line).is_none());
    }
}
