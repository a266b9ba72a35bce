//! Reproducible random site sets (uniform or jittered grid) with replay tokens.
//!
//! Purpose
//! - Feed the sweep with deterministic inputs for tests, benchmarks and the CLI.
//!
//! Model
//! - `Uniform`: independent uniform draws over the bounds.
//! - `JitteredGrid`: one site per cell of a near-square grid, displaced inside
//!   its cell by at most `jitter` (fraction of the half cell size).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `fortune::Rect`, `fortune::Voronoi::generate`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fortune::Rect;

/// Spatial layout of the drawn sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SiteLayout {
    Uniform,
    /// `jitter` is clamped to [0, 1]; 0 gives the exact cell centers.
    JitteredGrid { jitter: f64 },
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    pub count: usize,
    pub bounds: Rect,
    pub layout: SiteLayout,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            count: 100,
            bounds: Rect::new(0.0, 1.0, 0.0, 1.0),
            layout: SiteLayout::Uniform,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` sites as parallel coordinate arrays.
///
/// All sites lie in the closed bounds. Uniform draws may coincide in principle;
/// the sweep tolerates that.
pub fn draw_sites(cfg: SampleCfg, tok: ReplayToken) -> (Vec<f64>, Vec<f64>) {
    let mut rng = tok.to_std_rng();
    let r = cfg.bounds;
    let n = cfg.count;
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    match cfg.layout {
        SiteLayout::Uniform => {
            for _ in 0..n {
                xs.push(r.min_x + rng.gen::<f64>() * r.width());
                ys.push(r.min_y + rng.gen::<f64>() * r.height());
            }
        }
        SiteLayout::JitteredGrid { jitter } => {
            let j = jitter.clamp(0.0, 1.0);
            let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
            let rows = n.div_ceil(cols).max(1);
            let (cw, ch) = (r.width() / cols as f64, r.height() / rows as f64);
            for k in 0..n {
                let (i, row) = (k % cols, k / cols);
                let u = (rng.gen::<f64>() * 2.0 - 1.0) * j;
                let v = (rng.gen::<f64>() * 2.0 - 1.0) * j;
                let x = r.min_x + (i as f64 + 0.5 + 0.5 * u) * cw;
                let y = r.min_y + (row as f64 + 0.5 + 0.5 * v) * ch;
                xs.push(x.clamp(r.min_x, r.max_x));
                ys.push(y.clamp(r.min_y, r.max_y));
            }
        }
    }
    (xs, ys)
}
