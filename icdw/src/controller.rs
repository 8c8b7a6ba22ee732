// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document session controller.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Action, CommandError, Error};
use crate::format::ExportFormat;
use crate::fs;
use crate::geometry::Geometry;
use crate::host::{Host, PickRequest, SaveChoice};
use crate::raster::{
    CanvasSize, EXPORT_STROKE_WIDTH, PreviewSize, Rasterizer, RenderDescription, ShapeStyle,
};
use crate::session::Session;
use crate::surface::EditingSurface;

/// Whether a command may go ahead after checking for unsaved changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// Whether the application may shut down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    Deny,
}

/// The document was written to `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Saved {
    pub path: PathBuf,
}

/// The document was loaded from `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opened {
    pub path: PathBuf,
}

/// An image was written to `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exported {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub canvas: CanvasSize,
}

/// Mediates every state-changing command on the open document.
///
/// New, Open and Close all go through [`confirm_discard_if_dirty`], which asks
/// the user what to do with unsaved changes. Failures are reported to the
/// [`Host`] once, at the command boundary, and never leave the session
/// half-updated.
///
/// [`confirm_discard_if_dirty`]: Self::confirm_discard_if_dirty
pub struct DocumentController<S, H, R> {
    session: Session,
    surface: S,
    host: H,
    rasterizer: R,
}

impl<S: EditingSurface, H: Host, R: Rasterizer> DocumentController<S, H, R> {
    /// A controller for an untitled, empty document.
    ///
    /// Whatever text `surface` already holds counts as unsaved.
    pub fn new(surface: S, host: H, rasterizer: R) -> Self {
        Self {
            session: Session::new(),
            surface,
            host,
            rasterizer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// The text currently in the editing surface.
    pub fn current_text(&self) -> String {
        self.surface.text()
    }

    /// Whether the text differs from what was last saved or loaded.
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty(&self.surface.text())
    }

    /// Save is disabled only when there is nothing new to write to a known file.
    pub fn can_save(&self) -> bool {
        self.session.is_untitled() || self.is_dirty()
    }

    pub fn can_save_as(&self) -> bool {
        true
    }

    pub fn can_open(&self) -> bool {
        true
    }

    pub fn can_export(&self) -> bool {
        true
    }

    /// New is enabled when it would discard something.
    pub fn can_create_new(&self) -> bool {
        let text = self.surface.text();
        self.session.is_dirty(&text) || !text.is_empty() || !self.session.is_untitled()
    }

    pub fn can_delete(&self) -> bool {
        !self.surface.selection().is_empty()
    }

    /// Removes the selected text, leaving the caret where the selection began.
    pub fn delete_selection(&mut self) {
        let selection = self.surface.selection();
        let mut text = self.surface.text();
        if selection.is_empty() || text.get(selection.clone()).is_none() {
            return;
        }
        text.replace_range(selection.clone(), "");
        self.surface.set_text(&text);
        self.surface.set_selection(selection.start..selection.start);
    }

    /// Asks what to do with unsaved changes, saving them if requested.
    pub fn confirm_discard_if_dirty(&mut self) -> Decision {
        if !self.is_dirty() {
            return Decision::Proceed;
        }
        let name = self.session.display_name();
        match self.host.ask_save_changes(&name) {
            SaveChoice::Cancel => {
                debug!("keeping unsaved changes to {name}");
                Decision::Abort
            }
            SaveChoice::Discard => {
                debug!("discarding unsaved changes to {name}");
                Decision::Proceed
            }
            SaveChoice::Save => match self.save() {
                Ok(_) => Decision::Proceed,
                Err(err) => {
                    debug!("not proceeding, saving {name} didn't complete: {err}");
                    Decision::Abort
                }
            },
        }
    }

    /// Writes the text to the current file, or asks for one if untitled.
    pub fn save(&mut self) -> Result<Saved, CommandError> {
        match self.session.path() {
            Some(path) => {
                let path = path.to_path_buf();
                self.write_document(path)
            }
            None => self.save_as(),
        }
    }

    /// Asks for a destination and writes the text there.
    ///
    /// The session only moves to the new path once the write succeeded.
    pub fn save_as(&mut self) -> Result<Saved, CommandError> {
        let Some(path) = self.host.choose_path(&PickRequest::save_document()) else {
            debug!("save picker cancelled");
            return Err(CommandError::Cancelled);
        };
        self.write_document(path)
    }

    fn write_document(&mut self, path: PathBuf) -> Result<Saved, CommandError> {
        let text = self.surface.text();
        if let Err(error) = fs::write_bytes(&path, text.as_bytes(), Action::Save) {
            return Err(self.report(error));
        }
        info!("saved {}", path.display());
        self.session.commit(path.clone(), text);
        Ok(Saved { path })
    }

    /// Asks for a document and loads it, after dealing with unsaved changes.
    pub fn open(&mut self) -> Result<Opened, CommandError> {
        if self.confirm_discard_if_dirty() == Decision::Abort {
            return Err(CommandError::Aborted);
        }
        let Some(path) = self.host.choose_path(&PickRequest::open_document()) else {
            debug!("open picker cancelled");
            return Err(CommandError::Cancelled);
        };
        self.open_path(&path)
    }

    /// Loads `path`, replacing the text without asking about unsaved changes.
    ///
    /// On failure the text and the session are left exactly as they were.
    pub fn open_path(&mut self, path: &Path) -> Result<Opened, CommandError> {
        let text = match fs::read_text(path) {
            Ok(text) => text,
            Err(error) => return Err(self.report(error)),
        };
        self.surface.set_text(&text);
        // The surface may normalize what it was given.
        self.session.commit(path.to_path_buf(), self.surface.text());
        self.host.record_recent(path);
        info!("opened {}", path.display());
        Ok(Opened {
            path: path.to_path_buf(),
        })
    }

    /// Starts an untitled, empty document after dealing with unsaved changes.
    pub fn create_new(&mut self) -> Decision {
        let decision = self.confirm_discard_if_dirty();
        if decision == Decision::Proceed {
            self.session.reset();
            self.surface.set_text("");
            debug!("started a new document");
        }
        decision
    }

    /// Whether the application may close; the only place shutdown is vetoed.
    pub fn request_close(&mut self) -> CloseDecision {
        match self.confirm_discard_if_dirty() {
            Decision::Proceed => CloseDecision::Allow,
            Decision::Abort => CloseDecision::Deny,
        }
    }

    /// The current text as something to draw, painted with `style`.
    ///
    /// Text that doesn't parse draws nothing.
    pub fn render_description(&self, style: &ShapeStyle) -> RenderDescription {
        let geometry = Geometry::parse(&self.surface.text()).unwrap_or_else(|err| {
            warn!("drawing nothing for {}: {err}", self.session.display_name());
            Geometry::empty()
        });
        RenderDescription::new(geometry, style)
    }

    /// Asks for a destination and writes `description` there as an image.
    ///
    /// The format comes from the destination's extension. The canvas is
    /// derived from the preview size by [`CanvasSize::for_export`]. Nothing is
    /// written unless rendering and encoding both succeeded.
    pub fn export_image(
        &mut self,
        description: &RenderDescription,
        preview: PreviewSize,
    ) -> Result<Exported, CommandError> {
        let Some(path) = self.host.choose_path(&PickRequest::export_image()) else {
            debug!("export picker cancelled");
            return Err(CommandError::Cancelled);
        };
        let Some(format) = ExportFormat::from_path(&path) else {
            return Err(self.report(Error::InvalidFormat { path }));
        };
        let canvas = CanvasSize::for_export(preview);
        debug!(
            "exporting {}x{} {format} canvas for a {}x{} preview",
            canvas.width, canvas.height, preview.width, preview.height
        );
        let encoded = self
            .rasterizer
            .render(description, EXPORT_STROKE_WIDTH, canvas)
            .and_then(|pixels| format.encode(&pixels))
            .and_then(|bytes| fs::write_bytes(&path, &bytes, Action::Export));
        if let Err(error) = encoded {
            return Err(self.report(error));
        }
        info!("exported {}", path.display());
        Ok(Exported {
            path,
            format,
            canvas,
        })
    }

    fn report(&mut self, error: Error) -> CommandError {
        warn!("{error}");
        self.host.show_error(error.title(), &error.user_message());
        CommandError::Failed(error)
    }
}
