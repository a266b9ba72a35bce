//! Clipping of bisector edges against the output rectangle.
//!
//! An edge is a line `a·x + b·y = c` with up to two known endpoints. Missing
//! endpoints extend to the rectangle border. x-major lines (`a == 1`) are
//! parametrized by y, the others by x; the parameter range is clamped to the
//! rectangle first, then the dependent coordinate is clamped and the parameter
//! recomputed from the line equation.

use tracing::trace;

use super::types::{Edge, Rect, Segment, Site};

/// Clipping engine for one sweep.
#[derive(Clone, Copy, Debug)]
pub struct Clipper {
    rect: Rect,
    min_separation: f64,
}

impl Clipper {
    pub fn new(rect: Rect, min_separation: f64) -> Self {
        Self {
            rect,
            min_separation,
        }
    }

    /// Clip `edge` to the rectangle. `None` if its sites coincide or are closer
    /// than the minimum separation, or if the edge misses the rectangle.
    pub fn clip(&self, edge: &Edge) -> Option<Segment> {
        let [s0, s1] = edge.region;
        let dist = (s1.pos - s0.pos).norm();
        if dist == 0.0 || dist < self.min_separation {
            trace!(edge = edge.id.0, s0 = s0.index, s1 = s1.index, "drop: sites too close");
            return None;
        }
        if !(edge.a.is_finite() && edge.b.is_finite() && edge.c.is_finite()) {
            trace!(edge = edge.id.0, "drop: degenerate bisector");
            return None;
        }
        let r = &self.rect;
        let (a, b, c) = (edge.a, edge.b, edge.c);

        // Order the endpoints along the sweep parameter.
        let (first, second) = if edge.is_x_major() && b >= 0.0 {
            (edge.endpoints[1], edge.endpoints[0])
        } else {
            (edge.endpoints[0], edge.endpoints[1])
        };

        // Known endpoints bound the parameter range; a range beyond one side
        // of the rectangle leaves nothing to draw.
        let (lo, hi, param): (f64, f64, fn(&Site) -> f64) = if edge.is_x_major() {
            (r.min_y, r.max_y, Site::y)
        } else {
            (r.min_x, r.max_x, Site::x)
        };
        let outside = match (first.map(|v| param(&v)), second.map(|v| param(&v))) {
            (Some(t1), Some(t2)) => t1.max(t2) < lo || t1.min(t2) > hi,
            (t1, t2) => t1.is_some_and(|t| t > hi) || t2.is_some_and(|t| t < lo),
        };
        if outside {
            trace!(edge = edge.id.0, "drop: outside along the sweep parameter");
            return None;
        }

        let (mut x1, mut y1, mut x2, mut y2);
        if edge.is_x_major() {
            y1 = match first {
                Some(v) if v.y() > r.min_y => v.y(),
                _ => r.min_y,
            };
            y1 = y1.min(r.max_y);
            x1 = c - b * y1;
            y2 = match second {
                Some(v) if v.y() < r.max_y => v.y(),
                _ => r.max_y,
            };
            y2 = y2.max(r.min_y);
            x2 = c - b * y2;

            if (x1 > r.max_x && x2 > r.max_x) || (x1 < r.min_x && x2 < r.min_x) {
                trace!(edge = edge.id.0, "drop: outside in x");
                return None;
            }
            if x1 > r.max_x {
                x1 = r.max_x;
                y1 = (c - x1) / b;
            }
            if x1 < r.min_x {
                x1 = r.min_x;
                y1 = (c - x1) / b;
            }
            if x2 > r.max_x {
                x2 = r.max_x;
                y2 = (c - x2) / b;
            }
            if x2 < r.min_x {
                x2 = r.min_x;
                y2 = (c - x2) / b;
            }
        } else {
            x1 = match first {
                Some(v) if v.x() > r.min_x => v.x(),
                _ => r.min_x,
            };
            x1 = x1.min(r.max_x);
            y1 = c - a * x1;
            x2 = match second {
                Some(v) if v.x() < r.max_x => v.x(),
                _ => r.max_x,
            };
            x2 = x2.max(r.min_x);
            y2 = c - a * x2;

            if (y1 > r.max_y && y2 > r.max_y) || (y1 < r.min_y && y2 < r.min_y) {
                trace!(edge = edge.id.0, "drop: outside in y");
                return None;
            }
            if y1 > r.max_y {
                y1 = r.max_y;
                x1 = (c - y1) / a;
            }
            if y1 < r.min_y {
                y1 = r.min_y;
                x1 = (c - y1) / a;
            }
            if y2 > r.max_y {
                y2 = r.max_y;
                x2 = (c - y2) / a;
            }
            if y2 < r.min_y {
                y2 = r.min_y;
                x2 = (c - y2) / a;
            }
        }

        Some(Segment {
            x1,
            y1,
            x2,
            y2,
            first_site: s0.index,
            second_site: s1.index,
        })
    }
}
