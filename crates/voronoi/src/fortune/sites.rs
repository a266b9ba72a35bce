//! Site catalog: validated copy of the input, sorted into sweep order.
//!
//! Sites are ranked by ascending `(y, x)`; that rank is the site index reported
//! in every output segment. The caller's array position of each rank is kept in
//! `input_index` so callers can map results back onto their own arrays.

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::types::{Site, VoronoiError};

/// Sorted input sites plus the bounding box and hash sizing derived from them.
#[derive(Clone, Debug)]
pub struct SiteCatalog {
    sites: Vec<Site>,
    input_index: Vec<usize>,
    min: Vector2<f64>,
    max: Vector2<f64>,
    sqrt_n: usize,
    cursor: usize,
}

impl SiteCatalog {
    /// Copy and sort `(xs[i], ys[i])`.
    ///
    /// Errors on mismatched lengths, fewer than two sites, or non-finite input.
    pub fn load(xs: &[f64], ys: &[f64]) -> Result<Self, VoronoiError> {
        if xs.len() != ys.len() {
            return Err(VoronoiError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(VoronoiError::TooFewSites { count: xs.len() });
        }
        if let Some(index) = xs
            .iter()
            .zip(ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(VoronoiError::NonFiniteSite { index });
        }

        let mut order: Vec<usize> = (0..xs.len()).collect();
        // Stable: coincident sites keep their input order.
        order.sort_by(|&i, &j| {
            ys[i]
                .partial_cmp(&ys[j])
                .unwrap_or(Ordering::Equal)
                .then_with(|| xs[i].partial_cmp(&xs[j]).unwrap_or(Ordering::Equal))
        });

        let sites: Vec<Site> = order
            .iter()
            .enumerate()
            .map(|(rank, &i)| Site::new(rank, xs[i], ys[i]))
            .collect();

        let mut min = sites[0].pos;
        let mut max = sites[0].pos;
        for s in &sites[1..] {
            min = min.inf(&s.pos);
            max = max.sup(&s.pos);
        }

        let sqrt_n = ((sites.len() + 4) as f64).sqrt() as usize;
        Ok(Self {
            sites,
            input_index: order,
            min,
            max,
            sqrt_n,
            cursor: 0,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.sites.len()
    }
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }
    /// `input_index()[rank]` is the caller's array position of sorted site `rank`.
    #[inline]
    pub fn input_index(&self) -> &[usize] {
        &self.input_index
    }
    /// Lower-left corner of the site bounding box.
    #[inline]
    pub fn min(&self) -> Vector2<f64> {
        self.min
    }
    /// Extent of the site bounding box (may be zero on either axis).
    #[inline]
    pub fn delta(&self) -> Vector2<f64> {
        self.max - self.min
    }
    /// `floor(sqrt(N + 4))`, the base size of both bucket indices.
    #[inline]
    pub fn hash_sqrt(&self) -> usize {
        self.sqrt_n
    }

    /// Next unconsumed site in sweep order.
    pub(crate) fn next_site(&mut self) -> Option<Site> {
        let s = self.sites.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(s)
    }

    pub(crate) fn into_parts(self) -> (Vec<Site>, Vec<usize>) {
        (self.sites, self.input_index)
    }
}

/// Bucket of `v` when `[lo, lo + delta]` is split into `size` equal slots.
///
/// Out-of-range values clamp to the first or last bucket; a zero extent
/// sends the lower bound (and NaN) to bucket 0 and everything else to the last.
#[inline]
pub(crate) fn bucket_of(v: f64, lo: f64, delta: f64, size: usize) -> usize {
    let f = ((v - lo) / delta * size as f64).floor();
    // NaN.max(0.0) is 0.0; +inf saturates in the cast.
    (f.max(0.0) as usize).min(size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_y_then_x_and_keeps_input_positions() {
        let xs = [5.0, 1.0, 3.0, 0.0];
        let ys = [2.0, 1.0, 1.0, 3.0];
        let cat = SiteCatalog::load(&xs, &ys).unwrap();
        let got: Vec<(f64, f64)> = cat.sites().iter().map(|s| (s.x(), s.y())).collect();
        assert_eq!(got, vec![(1.0, 1.0), (3.0, 1.0), (5.0, 2.0), (0.0, 3.0)]);
        assert_eq!(cat.input_index(), &[1, 2, 0, 3]);
        for (rank, s) in cat.sites().iter().enumerate() {
            assert_eq!(s.index, rank);
        }
    }

    #[test]
    fn bounding_box_and_hash_size() {
        let xs = [-1.0, 4.0, 2.0, 0.5, 0.0];
        let ys = [3.0, -2.0, 0.0, 1.0, 7.0];
        let cat = SiteCatalog::load(&xs, &ys).unwrap();
        assert_eq!(cat.min(), Vector2::new(-1.0, -2.0));
        assert_eq!(cat.delta(), Vector2::new(5.0, 9.0));
        // floor(sqrt(9)) = 3
        assert_eq!(cat.hash_sqrt(), 3);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            SiteCatalog::load(&[0.0, 1.0], &[0.0]).unwrap_err(),
            VoronoiError::LengthMismatch { xs: 2, ys: 1 }
        );
        assert_eq!(
            SiteCatalog::load(&[0.0], &[0.0]).unwrap_err(),
            VoronoiError::TooFewSites { count: 1 }
        );
        assert_eq!(
            SiteCatalog::load(&[0.0, f64::NAN], &[0.0, 1.0]).unwrap_err(),
            VoronoiError::NonFiniteSite { index: 1 }
        );
    }

    #[test]
    fn does_not_alias_caller_arrays() {
        let mut xs = vec![2.0, 1.0];
        let ys = vec![0.0, 0.0];
        let cat = SiteCatalog::load(&xs, &ys).unwrap();
        xs[0] = 100.0;
        assert_eq!(cat.sites()[1].x(), 2.0);
    }

    #[test]
    fn cursor_walks_in_sweep_order() {
        let mut cat = SiteCatalog::load(&[0.0, 0.0, 0.0], &[2.0, 0.0, 1.0]).unwrap();
        let ys: Vec<f64> = std::iter::from_fn(|| cat.next_site()).map(|s| s.y()).collect();
        assert_eq!(ys, vec![0.0, 1.0, 2.0]);
        assert!(cat.next_site().is_none());
    }

    #[test]
    fn bucket_clamps_and_handles_zero_extent() {
        assert_eq!(bucket_of(-5.0, 0.0, 10.0, 4), 0);
        assert_eq!(bucket_of(2.4, 0.0, 10.0, 4), 0);
        assert_eq!(bucket_of(2.6, 0.0, 10.0, 4), 1);
        assert_eq!(bucket_of(10.0, 0.0, 10.0, 4), 3);
        assert_eq!(bucket_of(50.0, 0.0, 10.0, 4), 3);
        assert_eq!(bucket_of(0.0, 0.0, 0.0, 4), 0);
        assert_eq!(bucket_of(1.0, 0.0, 0.0, 4), 3);
        assert_eq!(bucket_of(-1.0, 0.0, 0.0, 4), 0);
    }
}
