//! Data types shared by the sweep: sites, edges, output segments, bounds, tolerances.
//!
//! - `VoronoiCfg`: centralizes the minimum site separation and the determinant epsilon.
//! - `Site`: an indexed point; used for input sites and for Voronoi vertices alike.
//! - `Edge`: implicit bisector line `a·x + b·y = c` with two optional endpoints.
//! - `Segment`: clipped, emit-ready output record.
//!
//! Code cross-refs: `bisect::bisect`, `clip::Clipper`, `sweep::Voronoi`

use std::fmt;

use nalgebra::Vector2;

/// Generator configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct VoronoiCfg {
    /// Sites closer than this do not generate an output segment.
    pub min_separation: f64,
    /// Bisector pairs with `|a1·b2 − b1·a2|` below this never intersect.
    pub eps_det: f64,
}

impl Default for VoronoiCfg {
    fn default() -> Self {
        Self {
            min_separation: 1e-9,
            eps_det: 1e-10,
        }
    }
}

/// Which side of a bisector a half-edge represents; also indexes edge slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Indexed point. For input sites `index` is the rank in sweep order;
/// for Voronoi vertices it is the vertex id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub index: usize,
    pub pos: Vector2<f64>,
}

impl Site {
    #[inline]
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self {
            index,
            pos: Vector2::new(x, y),
        }
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }
    /// Sweep order: ascending y, ties by ascending x.
    #[inline]
    pub fn precedes(&self, p: Vector2<f64>) -> bool {
        sweep_precedes(self.pos, p)
    }
}

/// `p` strictly before `q` in sweep order (y first, then x).
#[inline]
pub(crate) fn sweep_precedes(p: Vector2<f64>, q: Vector2<f64>) -> bool {
    p.y < q.y || (p.y == q.y && p.x < q.x)
}

/// Stable handle of an edge inside one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// Bisector of `region[0]` and `region[1]` as `a·x + b·y = c`.
///
/// Invariants:
/// - Either `a == 1` (|dx| dominates) or `b == 1` (|dy| dominates).
/// - `region[1]` is the upper site (later in sweep order at creation).
/// - Each endpoint slot is written at most once.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub region: [Site; 2],
    pub endpoints: [Option<Site>; 2],
    /// Set once the edge has been handed to the clipper.
    pub(crate) clipped: bool,
}

impl Edge {
    #[inline]
    pub fn upper(&self) -> &Site {
        &self.region[1]
    }
    #[inline]
    pub fn is_x_major(&self) -> bool {
        self.a == 1.0
    }
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.endpoints[0].is_some() && self.endpoints[1].is_some()
    }
}

/// Axis-aligned clipping rectangle (closed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rect {
    /// Reversed bounds are swapped so that `min <= max` on both axes.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        let (min_x, max_x) = if min_x > max_x {
            (max_x, min_x)
        } else {
            (min_x, max_x)
        };
        let (min_y, max_y) = if min_y > max_y {
            (max_y, min_y)
        } else {
            (min_y, max_y)
        };
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
    #[inline]
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        p.x >= self.min_x - eps
            && p.x <= self.max_x + eps
            && p.y >= self.min_y - eps
            && p.y <= self.max_y + eps
    }
}

/// Clipped Voronoi edge. Site indices refer to the sorted sweep order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub first_site: usize,
    pub second_site: usize,
}

impl Segment {
    #[inline]
    pub fn start(&self) -> Vector2<f64> {
        Vector2::new(self.x1, self.y1)
    }
    #[inline]
    pub fn end(&self) -> Vector2<f64> {
        Vector2::new(self.x2, self.y2)
    }
    #[inline]
    pub fn midpoint(&self) -> Vector2<f64> {
        (self.start() + self.end()) * 0.5
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end() - self.start()).norm()
    }
}

/// Caller-visible precondition failures.
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Coordinate arrays differ in length.
    LengthMismatch { xs: usize, ys: usize },
    /// A diagram needs at least two sites.
    TooFewSites { count: usize },
    /// NaN or infinite coordinate at the given input position.
    NonFiniteSite { index: usize },
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::LengthMismatch { xs, ys } => write!(
                f,
                "coordinate arrays differ in length ({xs} x-values, {ys} y-values)"
            ),
            VoronoiError::TooFewSites { count } => {
                write!(f, "need at least 2 sites, got {count}")
            }
            VoronoiError::NonFiniteSite { index } => {
                write!(f, "site {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for VoronoiError {}
