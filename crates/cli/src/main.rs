use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use voronoi::sample::{draw_sites, ReplayToken, SampleCfg, SiteLayout};
use voronoi::{Rect, Voronoi};

mod io;
mod provenance;

use io::Sites;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Voronoi diagram runner: sample sites, build diagrams, record provenance")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw uniform random sites on a W×H canvas
    Sample {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Output file (.csv or .json)
        #[arg(long)]
        out: PathBuf,
    },
    /// Build the clipped diagram of a site file
    Run {
        /// Sites (.csv with x,y columns or .json {"x": [..], "y": [..]})
        #[arg(long)]
        input: PathBuf,
        /// Output file (.csv segments or .json diagram)
        #[arg(long)]
        out: PathBuf,
        /// Clipping bounds; each defaults to the sites' bounding box
        #[arg(long, allow_negative_numbers = true)]
        min_x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max_x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        min_y: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max_y: Option<f64>,
        /// Edges between sites closer than this are dropped
        #[arg(long, default_value_t = 0.1)]
        min_sep: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Sample {
            count,
            seed,
            width,
            height,
            out,
        } => sample(count, seed, width, height, out),
        Action::Run {
            input,
            out,
            min_x,
            max_x,
            min_y,
            max_y,
            min_sep,
        } => {
            let bounds = [min_x, max_x, min_y, max_y];
            run(input, out, bounds, min_sep)
        }
        Action::Report => report(),
    }
}

fn sample(count: usize, seed: u64, width: f64, height: f64, out: PathBuf) -> Result<()> {
    tracing::info!(count, seed, width, height, out = %out.display(), "sample");
    let cfg = SampleCfg {
        count,
        bounds: Rect::new(0.0, width, 0.0, height),
        layout: SiteLayout::Uniform,
    };
    let (x, y) = draw_sites(cfg, ReplayToken { seed, index: 0 });
    io::write_sites(&out, &Sites { x, y })?;
    provenance::write_sidecar(
        &out,
        json!({
            "command": "sample",
            "count": count,
            "seed": seed,
            "width": width,
            "height": height
        }),
    )?;
    Ok(())
}

fn run(input: PathBuf, out: PathBuf, bounds: [Option<f64>; 4], min_sep: f64) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), min_sep, "run");
    let sites = io::read_sites(&input)?;
    let rect = clip_rect(&sites, bounds);
    tracing::info!(
        sites = sites.x.len(),
        min_x = rect.min_x,
        max_x = rect.max_x,
        min_y = rect.min_y,
        max_y = rect.max_y,
        "input"
    );

    let d = Voronoi::with_min_separation(min_sep)
        .diagram(&sites.x, &sites.y, rect)
        .with_context(|| format!("building diagram of {}", input.display()))?;
    tracing::info!(
        vertices = d.vertices.len(),
        edges = d.edge_count,
        segments = d.segments.len(),
        "diagram"
    );

    io::write_diagram(&out, &d)?;
    provenance::write_sidecar(
        &out,
        json!({
            "command": "run",
            "input": input.to_string_lossy(),
            "sites": d.sites.len(),
            "rect": [rect.min_x, rect.max_x, rect.min_y, rect.max_y],
            "min_separation": min_sep,
            "segments": d.segments.len()
        }),
    )?;
    Ok(())
}

/// Explicit bounds win; missing ones come from the sites' bounding box.
fn clip_rect(sites: &Sites, [min_x, max_x, min_y, max_y]: [Option<f64>; 4]) -> Rect {
    let lo = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Rect::new(
        min_x.unwrap_or_else(|| lo(&sites.x)),
        max_x.unwrap_or_else(|| hi(&sites.x)),
        min_y.unwrap_or_else(|| lo(&sites.y)),
        max_y.unwrap_or_else(|| hi(&sites.y)),
    )
}

fn report() -> Result<()> {
    let obj = json!({
        "code": provenance::code_block(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
