// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! icdw is the document core of a small editor for vector path data.
//!
//! An `.icdw` document is the verbatim text of a text box holding path data in
//! the SVG path mini-language. The editor shows a live preview rendered from
//! that text, saves and opens documents, and exports the rendered shape as a
//! raster image.
//!
//! The UI around it is not part of this crate. Instead, the
//! [`DocumentController`] is handed its collaborators:
//!
//! - an [`EditingSurface`] holding the text, such as [`TextBuffer`],
//! - a [`Host`] providing file pickers, the save-changes prompt, error
//!   notifications and the recent-files registry,
//! - a [`Rasterizer`], such as the `vello_cpu` backed [`CpuRasterizer`].
//!
//! ```ignore
//! let mut controller = DocumentController::new(TextBuffer::new(), host, CpuRasterizer::new());
//! controller.surface_mut().set_text("M 10 10 L 80 10 L 45 70 Z");
//! assert!(controller.is_dirty());
//! controller.save()?; // Asks the host for a path, since the document is untitled.
//! assert!(!controller.is_dirty());
//!
//! let description = controller.render_description(&ShapeStyle::default());
//! controller.export_image(&description, PreviewSize::new(480.0, 320.0))?;
//! ```
//!
//! Every command reports its failures to the host itself; the returned
//! [`CommandError`] tells the caller how the command ended.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod controller;
mod error;
mod fs;
mod session;

pub mod format;
pub mod geometry;
pub mod host;
pub mod raster;
pub mod surface;
pub mod zoom;

/// Pixel buffers handed from the [`Rasterizer`] to the encoders.
pub use image;
/// Styling primitives.
pub use peniko;
/// 2D geometry, with a focus on curves.
pub use peniko::kurbo;

pub use controller::{CloseDecision, Decision, DocumentController, Exported, Opened, Saved};
pub use error::{Action, CommandError, Error, ErrorKind};
pub use format::ExportFormat;
pub use geometry::Geometry;
pub use host::{Host, PickRequest, PickerKind, RecentFiles, SaveChoice};
pub use raster::{
    CanvasSize, CpuRasterizer, PreviewSize, Rasterizer, RenderDescription, ShapeStyle,
};
pub use session::{Session, UNTITLED};
pub use surface::{EditingSurface, TextBuffer};
pub use zoom::Zoom;
