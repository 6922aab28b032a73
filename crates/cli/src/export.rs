//! Conversions from a finished dissection into on-disk artifacts.
//!
//! - `DissectionDoc`: JSON summary of the final pieces.
//! - `frames_table`: long-format polars table, one row per (frame, part, vertex).

use anyhow::{bail, Context, Result};
use gerwien::animate::Frame;
use gerwien::{Point, Shape, TriangleDims};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct DimsDoc {
    pub base: f64,
    pub height: f64,
    pub peak_x: f64,
    pub area: f64,
}

impl From<&TriangleDims> for DimsDoc {
    fn from(d: &TriangleDims) -> Self {
        Self {
            base: d.base,
            height: d.height,
            peak_x: d.peak_x,
            area: d.area(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PieceDoc {
    pub rotation: f64,
    pub translation: [f64; 2],
    pub local: Vec<[f64; 2]>,
    pub placed: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct DissectionDoc {
    pub source: DimsDoc,
    pub target: DimsDoc,
    pub cut_count: usize,
    pub pieces: Vec<PieceDoc>,
}

fn xy(p: &Point) -> [f64; 2] {
    [p.x, p.y]
}

impl DissectionDoc {
    pub fn new(shape: &Shape, source: &TriangleDims, target: &TriangleDims) -> Self {
        let pieces = shape
            .parts()
            .iter()
            .map(|part| {
                let t = part.translation();
                PieceDoc {
                    rotation: part.rotation(),
                    translation: [t.x, t.y],
                    local: part.points().iter().map(xy).collect(),
                    placed: part.transformed_points(1.0).iter().map(xy).collect(),
                }
            })
            .collect();
        Self {
            source: source.into(),
            target: target.into(),
            cut_count: shape.cut_count(),
            pieces,
        }
    }
}

/// Flatten sampled frames into columns `frame, amount, part, vertex, x, y`.
pub fn frames_table(frames: &[Frame]) -> PolarsResult<DataFrame> {
    let mut frame_col: Vec<u32> = Vec::new();
    let mut amount_col: Vec<f64> = Vec::new();
    let mut part_col: Vec<u32> = Vec::new();
    let mut vertex_col: Vec<u32> = Vec::new();
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    for f in frames {
        for (pi, poly) in f.polygons.iter().enumerate() {
            for (vi, p) in poly.iter().enumerate() {
                frame_col.push(f.index as u32);
                amount_col.push(f.amount);
                part_col.push(pi as u32);
                vertex_col.push(vi as u32);
                xs.push(p.x);
                ys.push(p.y);
            }
        }
    }
    df!(
        "frame" => frame_col,
        "amount" => amount_col,
        "part" => part_col,
        "vertex" => vertex_col,
        "x" => xs,
        "y" => ys
    )
}

/// Write `df` as CSV or Parquet depending on the extension of `out`.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !matches!(ext.as_str(), "csv" | "parquet") {
        bail!("unsupported table extension {ext:?}; use .csv or .parquet");
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if ext == "csv" {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing csv {}", out.display()))?;
    } else {
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("writing parquet {}", out.display()))?;
    }
    Ok(())
}

/// Row and column count of a previously exported table.
pub fn table_shape(path: &Path) -> Result<(usize, usize)> {
    let lf = match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
        _ => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?,
    };
    let df = lf.collect()?;
    Ok(df.shape())
}
