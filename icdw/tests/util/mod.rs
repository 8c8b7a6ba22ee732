// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fakes shared by the controller tests.

#![allow(dead_code, reason = "Not every test binary uses every helper.")]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use icdw::image::{Rgba, RgbaImage};
use icdw::{
    CanvasSize, DocumentController, Error, Host, PickRequest, PickerKind, Rasterizer,
    RenderDescription, SaveChoice, TextBuffer,
};

/// A host that answers from queues and records everything it was asked.
#[derive(Debug, Default)]
pub(crate) struct ScriptedHost {
    pub(crate) paths: VecDeque<Option<PathBuf>>,
    pub(crate) choices: VecDeque<SaveChoice>,
    pub(crate) pickers: Vec<(PickerKind, Option<String>)>,
    pub(crate) prompts: Vec<String>,
    pub(crate) errors: Vec<(String, String)>,
    pub(crate) recent: Vec<PathBuf>,
}

impl ScriptedHost {
    pub(crate) fn pick(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.paths.push_back(Some(path.into()));
        self
    }

    pub(crate) fn cancel_picker(&mut self) -> &mut Self {
        self.paths.push_back(None);
        self
    }

    pub(crate) fn answer(&mut self, choice: SaveChoice) -> &mut Self {
        self.choices.push_back(choice);
        self
    }
}

impl Host for ScriptedHost {
    fn choose_path(&mut self, request: &PickRequest<'_>) -> Option<PathBuf> {
        self.pickers
            .push((request.kind, request.suggested_name.map(str::to_owned)));
        self.paths
            .pop_front()
            .expect("file picker shown without a scripted answer")
    }

    fn ask_save_changes(&mut self, document_name: &str) -> SaveChoice {
        self.prompts.push(document_name.to_owned());
        self.choices
            .pop_front()
            .expect("save prompt shown without a scripted answer")
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_owned(), message.to_owned()));
    }

    fn record_recent(&mut self, path: &Path) {
        self.recent.push(path.to_path_buf());
    }
}

/// A rasterizer that paints the whole canvas in one color and remembers the
/// canvases it was asked for.
#[derive(Debug, Default)]
pub(crate) struct FlatRasterizer {
    pub(crate) canvases: Vec<(CanvasSize, f64)>,
}

impl Rasterizer for FlatRasterizer {
    fn render(
        &mut self,
        _description: &RenderDescription,
        stroke_width: f64,
        canvas: CanvasSize,
    ) -> Result<RgbaImage, Error> {
        self.canvases.push((canvas, stroke_width));
        Ok(RgbaImage::from_pixel(
            canvas.width,
            canvas.height,
            Rgba([20, 40, 60, 255]),
        ))
    }
}

pub(crate) type Controller = DocumentController<TextBuffer, ScriptedHost, FlatRasterizer>;

pub(crate) fn controller() -> Controller {
    DocumentController::new(
        TextBuffer::new(),
        ScriptedHost::default(),
        FlatRasterizer::default(),
    )
}

/// Types `text` at the caret.
pub(crate) fn type_text(controller: &mut Controller, text: &str) {
    controller.surface_mut().insert(text);
}
