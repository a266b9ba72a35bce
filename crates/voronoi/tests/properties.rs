//! Randomized checks of the clipped diagram on generic site sets.

use proptest::prelude::*;
use voronoi::prelude::*;

fn sites() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..60)
        .prop_map(|pts| pts.into_iter().unzip())
}

fn rect() -> Rect {
    Rect::new(-10.0, 110.0, -10.0, 110.0)
}

/// No site is strictly closer to `p` than site `own`, up to rounding.
fn owns_point(d: &Diagram, own: usize, p: Vec2<f64>) -> bool {
    let mine = (d.sites[own].pos - p).norm();
    d.sites
        .iter()
        .all(|s| (s.pos - p).norm() >= mine - 1e-7 * (1.0 + mine))
}

proptest! {
    #[test]
    fn segments_are_inside_and_equidistant((xs, ys) in sites()) {
        let d = Voronoi::default().diagram(&xs, &ys, rect()).unwrap();
        let n = d.sites.len();
        for s in &d.segments {
            prop_assert!(s.first_site < n && s.second_site < n);
            prop_assert!(s.first_site != s.second_site);
            prop_assert!(rect().contains_eps(s.start(), 1e-6), "{:?}", s);
            prop_assert!(rect().contains_eps(s.end(), 1e-6), "{:?}", s);
            let m = s.midpoint();
            let d1 = (d.sites[s.first_site].pos - m).norm();
            let d2 = (d.sites[s.second_site].pos - m).norm();
            prop_assert!((d1 - d2).abs() < 1e-6 * (1.0 + d1), "{:?}: {} vs {}", s, d1, d2);
        }
    }

    #[test]
    fn segment_points_belong_to_their_sites((xs, ys) in sites()) {
        // A rectangle inside the site cloud, so many edges end outside it.
        let inner = Rect::new(20.0, 80.0, 20.0, 80.0);
        let d = Voronoi::default().diagram(&xs, &ys, inner).unwrap();
        for s in &d.segments {
            prop_assert!(s.length() > 0.0, "{:?}", s);
            for p in [s.start(), s.end(), s.midpoint()] {
                prop_assert!(owns_point(&d, s.first_site, p), "{:?} at {:?}", s, p);
                prop_assert!(owns_point(&d, s.second_site, p), "{:?} at {:?}", s, p);
            }
        }
    }

    #[test]
    fn every_site_borders_some_segment((xs, ys) in sites()) {
        let d = Voronoi::default().diagram(&xs, &ys, rect()).unwrap();
        let mut seen = vec![false; d.sites.len()];
        for s in &d.segments {
            seen[s.first_site] = true;
            seen[s.second_site] = true;
        }
        prop_assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn repeated_runs_agree((xs, ys) in sites()) {
        let v = Voronoi::with_min_separation(0.1);
        let a = v.generate(&xs, &ys, rect()).unwrap();
        let b = v.generate(&xs, &ys, rect()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sorted_sites_follow_input_positions((xs, ys) in sites()) {
        let d = Voronoi::default().diagram(&xs, &ys, rect()).unwrap();
        for (rank, s) in d.sites.iter().enumerate() {
            let k = d.input_index[rank];
            prop_assert_eq!(s.pos, Vec2::new(xs[k], ys[k]));
        }
        for w in d.sites.windows(2) {
            prop_assert!(!w[1].precedes(w[0].pos));
        }
    }
}

#[test]
fn sampled_sites_produce_a_diagram() {
    let cfg = SampleCfg {
        count: 500,
        bounds: Rect::new(0.0, 1.0, 0.0, 1.0),
        layout: SiteLayout::Uniform,
    };
    let (xs, ys) = draw_sites(cfg, ReplayToken { seed: 7, index: 0 });
    let d = Voronoi::default().diagram(&xs, &ys, cfg.bounds).unwrap();
    // Planar graph bounds: at most 2n - 5 vertices and 3n - 6 edges.
    assert!(d.vertices.len() <= 2 * 500 - 5);
    assert!(d.edge_count <= 3 * 500 - 6);
    assert!(d.segments.len() > 500);
}
