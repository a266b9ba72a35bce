//! Site and segment files: CSV through polars, JSON through serde.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;
use voronoi::Diagram;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
            Some(e) if e.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => bail!("unsupported file type {} (want .csv or .json)", path.display()),
        }
    }
}

/// Column-oriented site list, as stored in JSON files.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Sites {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SegmentRow {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub first_site: usize,
    pub second_site: usize,
}

/// JSON output: sites in sweep order (segment indices refer to it) plus the
/// input row of each sorted site.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagramDoc {
    pub sites: Sites,
    pub input_index: Vec<usize>,
    pub vertex_count: usize,
    pub segments: Vec<SegmentRow>,
}

impl From<&Diagram> for DiagramDoc {
    fn from(d: &Diagram) -> Self {
        Self {
            sites: Sites {
                x: d.sites.iter().map(|s| s.x()).collect(),
                y: d.sites.iter().map(|s| s.y()).collect(),
            },
            input_index: d.input_index.clone(),
            vertex_count: d.vertices.len(),
            segments: d
                .segments
                .iter()
                .map(|s| SegmentRow {
                    x1: s.x1,
                    y1: s.y1,
                    x2: s.x2,
                    y2: s.y2,
                    first_site: s.first_site,
                    second_site: s.second_site,
                })
                .collect(),
        }
    }
}

pub fn read_sites(path: &Path) -> Result<Sites> {
    let sites = match Format::from_path(path)? {
        Format::Csv => {
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()
                .with_context(|| format!("opening {}", path.display()))?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            Sites {
                x: column_f64(&df, "x")?,
                y: column_f64(&df, "y")?,
            }
        }
        Format::Json => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?
        }
    };
    Ok(sites)
}

fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("empty `{name}` in row {row}")))
        .collect()
}

pub fn write_sites(path: &Path, sites: &Sites) -> Result<()> {
    ensure_parent(path)?;
    match Format::from_path(path)? {
        Format::Csv => {
            let mut df = df!("x" => &sites.x, "y" => &sites.y)?;
            write_csv(path, &mut df)
        }
        Format::Json => write_json(path, sites),
    }
}

pub fn write_diagram(path: &Path, d: &Diagram) -> Result<()> {
    ensure_parent(path)?;
    match Format::from_path(path)? {
        Format::Csv => {
            let segs = &d.segments;
            let mut df = df!(
                "x1" => segs.iter().map(|s| s.x1).collect::<Vec<_>>(),
                "y1" => segs.iter().map(|s| s.y1).collect::<Vec<_>>(),
                "x2" => segs.iter().map(|s| s.x2).collect::<Vec<_>>(),
                "y2" => segs.iter().map(|s| s.y2).collect::<Vec<_>>(),
                "first_site" => segs.iter().map(|s| s.first_site as u64).collect::<Vec<_>>(),
                "second_site" => segs.iter().map(|s| s.second_site as u64).collect::<Vec<_>>()
            )?;
            write_csv(path, &mut df)
        }
        Format::Json => write_json(path, &DiagramDoc::from(d)),
    }
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}
