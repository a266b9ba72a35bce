//! Planar Voronoi diagrams via Fortune's sweep (bucketed, tolerance-based).
//!
//! Purpose
//! - Turn two coordinate arrays and a rectangle into the clipped Voronoi edges,
//!   each tagged with the two sites it separates.
//!
//! Why this design
//! - Classic bucketed sweep: a y-bucketed circle-event queue and an x-bucketed
//!   index over the beach line keep point location near O(1) for uniform input.
//! - Beach-line half-edges live in an arena addressed by handles; the bucket
//!   arrays are caches that may go stale and are re-validated on every lookup.
//! - Degeneracies are numeric policy, not errors: near-parallel bisectors never
//!   intersect, and edges between sites closer than `min_separation` are dropped.
//!
//! Assumptions and conventions
//! - Sweep order is ascending `(y, x)`; output site indices are ranks in that order.
//! - Bisectors are stored as `a·x + b·y = c` with `a == 1` or `b == 1`.
//!
//! Code cross-refs: `Voronoi`, `Diagram`, `Segment`, `Rect`, `VoronoiCfg`
//!
//! Note on layout
//! - `types.rs` (data), `sites.rs` (catalog), `queue.rs` (circle events),
//!   `beach.rs` (beach line), `bisect.rs` (bisectors + factory), `clip.rs`
//!   (rectangle clipping), `sweep.rs` (driver).

mod beach;
mod bisect;
mod clip;
mod queue;
mod sites;
mod sweep;
mod types;

pub use beach::{BeachLine, HalfEdge, HalfEdgeId};
pub use bisect::{bisect, intersect, Factory};
pub use clip::Clipper;
pub use queue::EventQueue;
pub use sites::SiteCatalog;
pub use sweep::{Diagram, Voronoi};
pub use types::{Edge, EdgeId, Rect, Segment, Side, Site, VoronoiCfg, VoronoiError};
