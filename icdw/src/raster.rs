// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterization of a document into a pixel buffer.

use image::RgbaImage;
use peniko::Color;
use peniko::color::palette;
use peniko::kurbo::{Affine, Stroke};
use vello_cpu::{Pixmap, RenderContext, RenderMode};

use crate::Error;
use crate::geometry::Geometry;

/// Height of every exported canvas, in pixels.
pub const EXPORT_HEIGHT: u32 = 2400;

/// Stroke width used for exports, in geometry units.
pub const EXPORT_STROKE_WIDTH: f64 = 5.0;

/// Geometry units per inch.
///
/// Geometry is laid out in device-independent units; the canvas maps this many
/// units onto its full width and its full height.
pub const UNITS_PER_INCH: f64 = 96.0;

/// Size of the on-screen preview, in device-independent units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

impl PreviewSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Size of a raster canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// The export canvas for a preview of the given size.
    ///
    /// The canvas is always [`EXPORT_HEIGHT`] pixels high and keeps the
    /// preview's aspect ratio. A preview without a positive width and height
    /// has no aspect ratio; the canvas is then a single pixel wide.
    pub fn for_export(preview: PreviewSize) -> Self {
        let width = if preview.width > 0.0 && preview.height > 0.0 {
            let scaled = f64::from(EXPORT_HEIGHT) * (preview.width / preview.height);
            // Float-to-int casts saturate, and truncation may reach zero.
            (scaled as u32).max(1)
        } else {
            1
        };
        Self {
            width,
            height: EXPORT_HEIGHT,
        }
    }
}

/// Paint applied to a [`Geometry`] when drawing it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Interior color; `None` leaves the interior transparent.
    pub fill: Option<Color>,
    /// Outline color; `None` draws no outline.
    pub stroke: Option<Color>,
    /// Outline width used by the preview. Exports use [`EXPORT_STROKE_WIDTH`].
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(palette::css::BLACK),
            stroke_width: 1.0,
        }
    }
}

/// What to draw: the geometry together with its colors.
#[derive(Clone, Debug)]
pub struct RenderDescription {
    pub geometry: Geometry,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

impl RenderDescription {
    pub fn new(geometry: Geometry, style: &ShapeStyle) -> Self {
        Self {
            geometry,
            fill: style.fill,
            stroke: style.stroke,
        }
    }
}

/// Renders a description into straight-alpha RGBA pixels.
pub trait Rasterizer {
    fn render(
        &mut self,
        description: &RenderDescription,
        stroke_width: f64,
        canvas: CanvasSize,
    ) -> Result<RgbaImage, Error>;
}

/// A [`Rasterizer`] backed by `vello_cpu`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuRasterizer;

impl CpuRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for CpuRasterizer {
    fn render(
        &mut self,
        description: &RenderDescription,
        stroke_width: f64,
        canvas: CanvasSize,
    ) -> Result<RgbaImage, Error> {
        let too_large = || Error::CanvasTooLarge {
            width: canvas.width,
            height: canvas.height,
        };
        let width = u16::try_from(canvas.width).map_err(|_| too_large())?;
        let height = u16::try_from(canvas.height).map_err(|_| too_large())?;

        let mut ctx = RenderContext::new(width, height);
        ctx.set_transform(Affine::scale_non_uniform(
            f64::from(width) / UNITS_PER_INCH,
            f64::from(height) / UNITS_PER_INCH,
        ));
        let path = &description.geometry.path;
        if let Some(fill) = description.fill {
            ctx.set_fill_rule(description.geometry.fill_rule);
            ctx.set_paint(fill);
            ctx.fill_path(path);
        }
        if let Some(stroke) = description.stroke {
            if stroke_width > 0.0 {
                ctx.set_stroke(Stroke::new(stroke_width));
                ctx.set_paint(stroke);
                ctx.stroke_path(path);
            }
        }

        let mut pixmap = Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap, RenderMode::default());

        let pixels = pixmap
            .take_unpremultiplied()
            .into_iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect();
        RgbaImage::from_raw(canvas.width, canvas.height, pixels).ok_or_else(too_large)
    }
}
