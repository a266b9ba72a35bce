use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use voronoi::{Rect, VoronoiError};

/// Segment as seen from Python: `(x1, y1, x2, y2, first_site, second_site)`.
pub type PySegment = (f64, f64, f64, f64, usize, usize);

/// `(min_x, max_x, min_y, max_y)`; reversed pairs are accepted.
pub fn rect_from_py(rect: (f64, f64, f64, f64)) -> PyResult<Rect> {
    let (min_x, max_x, min_y, max_y) = rect;
    if [min_x, max_x, min_y, max_y].iter().any(|v| !v.is_finite()) {
        return Err(PyValueError::new_err("rectangle bounds must be finite"));
    }
    Ok(Rect::new(min_x, max_x, min_y, max_y))
}

pub fn map_voronoi_err(err: VoronoiError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
