use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gerwien::animate::FrameSchedule;
use gerwien::rand::{random_triangle_pair, ReplayToken};
use gerwien::{Shape, TriangleDims};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

use export::{frames_table, table_shape, write_table, DissectionDoc};
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Bolyai–Gerwien dissection runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Inputs shared by every command that draws a random triangle pair.
#[derive(clap::Args, Clone, Copy, Debug)]
struct DrawArgs {
    /// Common area of the source and target triangles
    #[arg(long, default_value_t = 10_000.0)]
    area: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    /// Source triangle as `base,height,peak_x`; overrides the random draw
    #[arg(long, value_parser = parse_dims, requires = "target")]
    source: Option<TriangleDims>,
    /// Target triangle as `base,height,peak_x`
    #[arg(long, value_parser = parse_dims, requires = "source")]
    target: Option<TriangleDims>,
}

#[derive(Subcommand)]
enum Action {
    /// Dissect a source triangle into a target and write the pieces as JSON
    Dissect {
        #[command(flatten)]
        draw: DrawArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Sample the interpolation and write a frame table (.csv or .parquet)
    Animate {
        #[command(flatten)]
        draw: DrawArgs,
        #[arg(long, default_value_t = 200)]
        frames: usize,
        #[arg(long, default_value_t = 100)]
        pause_frames: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Log the shape of an exported frame table
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Dissect { draw, out } => dissect(draw, &out),
        Action::Animate {
            draw,
            frames,
            pause_frames,
            out,
        } => animate(draw, FrameSchedule { frames, pause_frames }, &out),
        Action::Inspect { input } => inspect(&input),
        Action::Report => report(),
    }
}

fn parse_dims(s: &str) -> std::result::Result<TriangleDims, String> {
    let vals: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<std::result::Result<_, _>>()?;
    let [base, height, peak_x] = vals[..] else {
        return Err(format!("expected base,height,peak_x; got {} values", vals.len()));
    };
    TriangleDims::new(base, height, peak_x).map_err(|e| e.to_string())
}

fn dims_params(source: &TriangleDims, target: &TriangleDims) -> serde_json::Value {
    serde_json::json!({
        "source": [source.base, source.height, source.peak_x],
        "target": [target.base, target.height, target.peak_x],
    })
}

/// Resolve the triangle pair and run the full dissection.
fn solve(draw: DrawArgs) -> Result<(Shape, TriangleDims, TriangleDims, Option<ReplayToken>)> {
    let (source, target, tok) = match (draw.source, draw.target) {
        (Some(s), Some(t)) => (s, t, None),
        _ => {
            let tok = ReplayToken::new(draw.seed, draw.index);
            let (s, t) = random_triangle_pair(draw.area, tok)?;
            (s, t, Some(tok))
        }
    };
    tracing::info!(?source, ?target, "triangle_pair");
    let mut shape = Shape::triangle(source)?;
    shape
        .triangle_to_triangle(&target)
        .context("dissecting source into target")?;
    Ok((shape, source, target, tok))
}

fn dissect(draw: DrawArgs, out: &Path) -> Result<()> {
    tracing::info!(out = %out.display(), "dissect");
    let (shape, source, target, tok) = solve(draw)?;
    let doc = DissectionDoc::new(&shape, &source, &target);
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(pieces = doc.pieces.len(), cuts = doc.cut_count, "dissection_written");

    let mut payload = Payload::new("dissect", dims_params(&source, &target));
    if let Some(tok) = tok {
        payload = payload.with_replay(tok);
    }
    write_sidecar(out, payload)?;
    Ok(())
}

fn animate(draw: DrawArgs, schedule: FrameSchedule, out: &Path) -> Result<()> {
    tracing::info!(
        out = %out.display(),
        frames = schedule.frames,
        pause_frames = schedule.pause_frames,
        "animate"
    );
    let (shape, source, target, tok) = solve(draw)?;
    let frames = shape.frames(schedule);
    let mut df = frames_table(&frames)?;
    write_table(&mut df, out)?;
    tracing::info!(rows = df.height(), cols = df.width(), "frames_written");

    let mut params = dims_params(&source, &target);
    params["frames"] = schedule.frames.into();
    params["pause_frames"] = schedule.pause_frames.into();
    let mut payload = Payload::new("animate", params);
    if let Some(tok) = tok {
        payload = payload.with_replay(tok);
    }
    write_sidecar(out, payload)?;
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let (rows, cols) =
        table_shape(input).with_context(|| format!("reading {}", input.display()))?;
    tracing::info!(input = %input.display(), rows, cols, "table_shape");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "gerwien_version": gerwien::VERSION,
        "precision": gerwien::PRECISION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
