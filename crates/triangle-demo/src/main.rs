use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use triangle_engine::color::Color;
use triangle_engine::core::{App, AppControl, FrameCtx};
use triangle_engine::device::{GpuInit, HeadlessGpu};
use triangle_engine::logging::{init_logging, LoggingConfig};
use triangle_engine::render::{render_snapshot, TrianglePipeline};
use triangle_engine::window::{Runtime, RuntimeConfig};

/// Draws the triangle every frame.
#[derive(Default)]
struct TriangleApp {
    pipeline: TrianglePipeline,
}

impl App for TriangleApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        ctx.render(|rctx, target| self.pipeline.render(rctx, target))
    }
}

/// Buffer-free triangle demo.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Render offscreen and write a PNG to this path instead of opening a window.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Snapshot size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size, default_value = "256x256", requires = "snapshot")]
    size: SnapshotSize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct SnapshotSize {
    width: u32,
    height: u32,
}

fn parse_size(s: &str) -> Result<SnapshotSize> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("size \"{s}\" is not WIDTHxHEIGHT"))?;
    let width: u32 = w.parse().with_context(|| format!("bad width in \"{s}\""))?;
    let height: u32 = h.parse().with_context(|| format!("bad height in \"{s}\""))?;
    anyhow::ensure!(width > 0 && height > 0, "size \"{s}\" must be non-zero");
    Ok(SnapshotSize { width, height })
}

fn write_snapshot(path: PathBuf, size: SnapshotSize) -> Result<()> {
    let SnapshotSize { width, height } = size;
    let gpu = pollster::block_on(HeadlessGpu::new(&GpuInit::default()))?;
    let mut pipeline = TrianglePipeline::new();
    let snap = render_snapshot(&gpu, &mut pipeline, width, height, Color::DEFAULT_BACKGROUND)?;

    let image = image::RgbaImage::from_raw(snap.width, snap.height, snap.as_bytes().to_vec())
        .context("snapshot buffer does not match its dimensions")?;
    image
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!(
        "wrote {width}x{height} snapshot to {} ({})",
        path.display(),
        gpu.adapter_info().name
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let cli = Cli::parse();
    match cli.snapshot {
        Some(path) => write_snapshot(path, cli.size),
        None => Runtime::run(
            RuntimeConfig::default(),
            GpuInit::default(),
            TriangleApp::default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("triangle-demo").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_opens_window() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.snapshot, None);
    }

    #[test]
    fn snapshot_uses_default_size() {
        let cli = parse(&["--snapshot", "out.png"]).unwrap();
        assert_eq!(cli.snapshot, Some(PathBuf::from("out.png")));
        assert_eq!(cli.size, SnapshotSize { width: 256, height: 256 });
    }

    #[test]
    fn snapshot_with_size() {
        let cli = parse(&["--size", "640x480", "--snapshot", "t.png"]).unwrap();
        assert_eq!(cli.snapshot, Some(PathBuf::from("t.png")));
        assert_eq!(cli.size, SnapshotSize { width: 640, height: 480 });
    }

    #[test]
    fn size_requires_snapshot() {
        assert!(parse(&["--size", "64x64"]).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--snapshot"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--snapshot", "t.png", "--size", "64"]).is_err());
        assert!(parse_size("0x64").is_err());
        assert!(parse_size("ax64").is_err());
    }
}
