//! Print a small random diagram as `x1,y1,x2,y2,i,j` lines.
//!
//! Usage:
//!   cargo run -p voronoi --example random_diagram -- [count] [seed]

use voronoi::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(16);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let cfg = SampleCfg {
        count,
        bounds: Rect::new(0.0, 100.0, 0.0, 100.0),
        layout: SiteLayout::Uniform,
    };
    let (xs, ys) = draw_sites(cfg, ReplayToken { seed, index: 0 });
    match Voronoi::default().generate(&xs, &ys, cfg.bounds) {
        Ok(segs) => {
            for s in segs {
                println!(
                    "{:.4},{:.4},{:.4},{:.4},{},{}",
                    s.x1, s.y1, s.x2, s.y2, s.first_site, s.second_site
                );
            }
        }
        Err(e) => eprintln!("error: {e}"),
    }
}
