//! PyO3 bindings for the `voronoi` crate.
//!
//! Notes
//! - Keep bindings thin: plain lists and tuples in, tuples out.
//! - Site indices in returned segments refer to the `(y, x)`-sorted order.

mod common;

use common::{map_voronoi_err, rect_from_py, PySegment};
use pyo3::prelude::*;
use voronoi::sample::{draw_sites, ReplayToken, SampleCfg, SiteLayout};
use voronoi::Voronoi;

/// Clipped Voronoi edges of the sites `(xs[i], ys[i])` inside `rect`.
#[pyfunction]
#[pyo3(signature = (xs, ys, rect, min_separation = 0.1))]
fn generate(
    xs: Vec<f64>,
    ys: Vec<f64>,
    rect: (f64, f64, f64, f64),
    min_separation: f64,
) -> PyResult<Vec<PySegment>> {
    let rect = rect_from_py(rect)?;
    let segs = Voronoi::with_min_separation(min_separation)
        .generate(&xs, &ys, rect)
        .map_err(map_voronoi_err)?;
    Ok(segs
        .into_iter()
        .map(|s| (s.x1, s.y1, s.x2, s.y2, s.first_site, s.second_site))
        .collect())
}

/// Reproducible uniform sites on `[0, width] x [0, height]`.
#[pyfunction]
#[pyo3(signature = (count, seed, width, height))]
fn sample_sites(count: usize, seed: u64, width: f64, height: f64) -> (Vec<f64>, Vec<f64>) {
    let cfg = SampleCfg {
        count,
        bounds: voronoi::Rect::new(0.0, width, 0.0, height),
        layout: SiteLayout::Uniform,
    };
    draw_sites(cfg, ReplayToken { seed, index: 0 })
}

#[pymodule]
fn voronoi_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(sample_sites, m)?)?;
    m.add("VERSION", voronoi::VERSION)?;
    Ok(())
}
