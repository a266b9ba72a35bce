//! Planar Voronoi diagrams clipped to a rectangle.
//!
//! The sweep lives in `fortune`; `sample` draws reproducible site sets for
//! tests, benches and the CLI.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API beyond
//!   `Voronoi::generate` and the types it returns.

pub mod fortune;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use fortune::{Diagram, Rect, Segment, Voronoi, VoronoiCfg, VoronoiError};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::fortune::{Diagram, Rect, Segment, Site, Voronoi, VoronoiCfg, VoronoiError};
    pub use crate::sample::{draw_sites, ReplayToken, SampleCfg, SiteLayout};
    pub use nalgebra::Vector2 as Vec2;
}
