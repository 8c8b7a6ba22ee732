// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A terminal editor for `.icdw` path documents.
//!
//! With `--export OUT FILE` it converts `FILE` to an image and exits instead.

mod commands;
mod editor;
mod terminal;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use icdw::host::DEFAULT_RECENT_CAPACITY;
use icdw::{
    CpuRasterizer, DocumentController, Host, PickRequest, PreviewSize, RecentFiles, SaveChoice,
    ShapeStyle, TextBuffer,
};

use crate::editor::Editor;
use crate::terminal::TerminalHost;

#[derive(Parser, Debug)]
#[command(about, long_about = None, bin_name = "cargo run -p icdw_editor --")]
struct Args {
    /// Document to open at startup.
    file: Option<PathBuf>,
    /// Convert FILE to an image at OUT and exit. The extension picks the format.
    #[arg(long, value_name = "OUT", requires = "file")]
    export: Option<PathBuf>,
    /// Width of the preview when not zoomed.
    #[arg(long, default_value_t = 480.0)]
    preview_width: f64,
    /// Height of the preview when not zoomed. Exports keep this aspect ratio.
    #[arg(long, default_value_t = 480.0)]
    preview_height: f64,
    /// Fill color of the shape, as a CSS color.
    #[arg(long)]
    fill: Option<String>,
    /// Border color of the shape, as a CSS color or `none`.
    #[arg(long, default_value = "black")]
    stroke: String,
    /// Border thickness in the preview.
    #[arg(long, default_value_t = 1.0)]
    stroke_width: f64,
    /// How many recently opened documents to remember.
    #[arg(long, default_value_t = DEFAULT_RECENT_CAPACITY)]
    recent_capacity: usize,
}

impl Args {
    fn style(&self) -> Result<ShapeStyle> {
        let fill = match &self.fill {
            Some(fill) => commands::parse_paint(fill).context("parsing --fill")?,
            None => None,
        };
        let stroke = commands::parse_paint(&self.stroke).context("parsing --stroke")?;
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            bail!("--stroke-width must be a non-negative number");
        }
        Ok(ShapeStyle {
            fill,
            stroke,
            stroke_width: self.stroke_width,
        })
    }

    fn preview(&self) -> PreviewSize {
        PreviewSize::new(self.preview_width, self.preview_height)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let style = args.style()?;

    if let (Some(out), Some(file)) = (&args.export, &args.file) {
        return export(file, out, &style, args.preview());
    }

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let host = TerminalHost::new(
        stdin,
        stdout,
        RecentFiles::with_capacity(args.recent_capacity),
    );
    let mut editor = Editor::new(host, style, args.preview());
    if let Some(file) = &args.file {
        editor.open_at_startup(file);
    }
    editor.run()
}

/// Answers the export picker with a fixed destination and logs errors.
struct BatchHost {
    destination: Option<PathBuf>,
}

impl Host for BatchHost {
    fn choose_path(&mut self, _request: &PickRequest<'_>) -> Option<PathBuf> {
        self.destination.take()
    }

    fn ask_save_changes(&mut self, _document_name: &str) -> SaveChoice {
        SaveChoice::Cancel
    }

    fn show_error(&mut self, title: &str, message: &str) {
        log::error!("{title}: {message}");
    }

    fn record_recent(&mut self, _path: &Path) {}
}

fn export(file: &Path, out: &Path, style: &ShapeStyle, preview: PreviewSize) -> Result<()> {
    let host = BatchHost {
        destination: Some(out.to_path_buf()),
    };
    let mut controller = DocumentController::new(TextBuffer::new(), host, CpuRasterizer::new());
    controller
        .open_path(file)
        .with_context(|| format!("opening {}", file.display()))?;
    let description = controller.render_description(style);
    let exported = controller
        .export_image(&description, preview)
        .with_context(|| format!("exporting to {}", out.display()))?;
    log::info!(
        "wrote a {}x{} {} image",
        exported.canvas.width,
        exported.canvas.height,
        exported.format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn arguments() {
        let argv = ["icdw", "--fill", "teal", "--stroke", "none", "a.icdw"];
        let args = Args::try_parse_from(argv).unwrap();
        let style = args.style().unwrap();
        assert!(style.fill.is_some());
        assert_eq!(style.stroke, None);
        assert_eq!(args.preview(), PreviewSize::new(480.0, 480.0));
        assert_eq!(args.recent_capacity, DEFAULT_RECENT_CAPACITY);

        assert!(Args::try_parse_from(["icdw", "--export", "out.png"]).is_err());
        let args = Args::try_parse_from(["icdw", "--stroke", "sparkly"]).unwrap();
        assert!(args.style().is_err());
    }

    #[test]
    fn batch_export() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tri.icdw");
        let out = dir.path().join("tri.bmp");
        fs::write(&file, "M 10 10 L 80 10 L 45 80 Z").unwrap();

        let style = ShapeStyle::default();
        let preview = PreviewSize::new(8.0, 200.0);

        export(&file, &out, &style, preview).unwrap();

        assert!(fs::read(&out).unwrap().starts_with(b"BM"));
        let missing = dir.path().join("missing.icdw");
        assert!(export(&missing, &out, &style, preview).is_err());
    }
}
