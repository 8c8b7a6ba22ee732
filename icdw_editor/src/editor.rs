// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use icdw::peniko::Color;
use icdw::{
    CloseDecision, CommandError, CpuRasterizer, Decision, DocumentController, EditingSurface,
    PreviewSize, ShapeStyle, TextBuffer, Zoom,
};
use log::{debug, info, warn};

use crate::commands::{self, Command, HELP, ZoomCommand};
use crate::terminal::TerminalHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive editor: a text buffer plus a described, zoomable preview.
pub(crate) struct Editor<I, O> {
    controller: DocumentController<TextBuffer, TerminalHost<I, O>, CpuRasterizer>,
    style: ShapeStyle,
    /// The size the preview gets when not zoomed.
    fitted: PreviewSize,
    zoom: Zoom,
}

impl<I: BufRead, O: Write> Editor<I, O> {
    pub(crate) fn new(host: TerminalHost<I, O>, style: ShapeStyle, fitted: PreviewSize) -> Self {
        Self {
            controller: DocumentController::new(TextBuffer::new(), host, CpuRasterizer::new()),
            style,
            fitted,
            zoom: Zoom::new(),
        }
    }

    /// Loads `path` into the empty editor.
    pub(crate) fn open_at_startup(&mut self, path: &Path) {
        // Failures were already shown; the editor starts untitled instead.
        if let Err(err) = self.controller.open_path(path) {
            debug!("starting untitled, {} didn't open: {err}", path.display());
        }
    }

    /// Reads and runs commands until `quit` succeeds or the input ends.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            let name = self.controller.session().display_name();
            let marker = if self.controller.is_dirty() { "*" } else { "" };
            let output = self.controller.host_mut().output();
            write!(output, "{name}{marker}> ")?;
            output.flush()?;

            let Some(line) = self.controller.host_mut().read_line()? else {
                if self.controller.request_close() == CloseDecision::Deny {
                    warn!("input ended, leaving unsaved changes behind");
                }
                return Ok(());
            };
            let command = match commands::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    self.say(format_args!("{err:#}"))?;
                    continue;
                }
            };
            if self.execute(command)? == Flow::Quit {
                info!("closing {name}");
                return Ok(());
            }
        }
    }

    fn say(&mut self, message: fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.controller.host_mut().output(), "{message}")?;
        Ok(())
    }

    fn preview_size(&self) -> PreviewSize {
        self.zoom.resolve(self.fitted)
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Text(text) => self.controller.surface_mut().set_text(&text),
            Command::Insert(text) => self.controller.surface_mut().insert(&text),
            Command::Select(start, end) => {
                let text = self.controller.current_text();
                if start > end || text.get(start..end).is_none() {
                    self.say(format_args!(
                        "{start}..{end} is not a range of whole characters in the text"
                    ))?;
                } else {
                    self.controller.surface_mut().set_selection(start..end);
                }
            }
            Command::Delete => {
                if self.controller.can_delete() {
                    self.controller.delete_selection();
                } else {
                    self.say(format_args!("nothing is selected"))?;
                }
            }
            Command::Show => {
                let text = self.controller.current_text();
                self.say(format_args!("{text}"))?;
            }
            Command::Status => self.status()?,
            Command::Preview => self.preview()?,
            Command::New => {
                if !self.controller.can_create_new() {
                    self.say(format_args!("the document is already new"))?;
                } else if self.controller.create_new() == Decision::Abort {
                    self.say(format_args!("kept the current document"))?;
                }
            }
            Command::Open(path) => {
                let opened = match path {
                    None => self.controller.open(),
                    Some(path) => match self.controller.confirm_discard_if_dirty() {
                        Decision::Proceed => self.controller.open_path(&path),
                        Decision::Abort => Err(CommandError::Aborted),
                    },
                };
                if let Ok(opened) = opened {
                    self.say(format_args!("opened {}", opened.path.display()))?;
                }
            }
            Command::Save => {
                if self.controller.can_save() {
                    if let Ok(saved) = self.controller.save() {
                        self.say(format_args!("saved {}", saved.path.display()))?;
                    }
                } else {
                    self.say(format_args!("no changes to save"))?;
                }
            }
            Command::SaveAs => {
                if let Ok(saved) = self.controller.save_as() {
                    self.say(format_args!("saved {}", saved.path.display()))?;
                }
            }
            Command::Export => {
                let description = self.controller.render_description(&self.style);
                let preview = self.preview_size();
                if let Ok(exported) = self.controller.export_image(&description, preview) {
                    self.say(format_args!(
                        "exported a {}x{} {} image to {}",
                        exported.canvas.width,
                        exported.canvas.height,
                        exported.format,
                        exported.path.display()
                    ))?;
                }
            }
            Command::Fill(fill) => self.style.fill = fill,
            Command::Stroke(stroke) => self.style.stroke = stroke,
            Command::Thickness(width) => self.style.stroke_width = width,
            Command::Zoom(direction) => self.zoom(direction)?,
            Command::Recent => {
                let recent = self
                    .controller
                    .host()
                    .recent()
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>();
                if recent.is_empty() {
                    self.say(format_args!("no recent documents"))?;
                }
                for (index, path) in recent.iter().enumerate() {
                    self.say(format_args!("{}: {path}", index + 1))?;
                }
            }
            Command::Help => self.say(format_args!("{HELP}"))?,
            Command::Quit => {
                if self.controller.request_close() == CloseDecision::Allow {
                    return Ok(Flow::Quit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn zoom(&mut self, direction: ZoomCommand) -> Result<()> {
        let actual = self.preview_size();
        match direction {
            ZoomCommand::In if self.zoom.can_increase(actual) => self.zoom.increase(actual),
            ZoomCommand::Out if self.zoom.can_decrease(actual) => self.zoom.decrease(actual),
            ZoomCommand::Reset if self.zoom.can_reset() => self.zoom.reset(),
            _ => return self.say(format_args!("can't zoom {direction:?} any further")),
        }
        let size = self.preview_size();
        self.say(format_args!("preview is {}x{}", size.width, size.height))
    }

    fn status(&mut self) -> Result<()> {
        let session = self.controller.session();
        let path = session
            .path()
            .map_or_else(
                || "not saved yet".to_owned(),
                |path| path.display().to_string(),
            );
        let name = session.display_name();
        let changes = if self.controller.is_dirty() {
            "unsaved changes"
        } else {
            "no changes"
        };
        let enabled = [
            ("new", self.controller.can_create_new()),
            ("open", self.controller.can_open()),
            ("save", self.controller.can_save()),
            ("saveas", self.controller.can_save_as()),
            ("export", self.controller.can_export()),
            ("delete", self.controller.can_delete()),
            ("zoom in", self.zoom.can_increase(self.preview_size())),
            ("zoom out", self.zoom.can_decrease(self.preview_size())),
            ("zoom reset", self.zoom.can_reset()),
        ]
        .into_iter()
        .filter_map(|(command, enabled)| enabled.then_some(command))
        .collect::<Vec<_>>()
        .join(", ");
        self.say(format_args!("{name} ({path}), {changes}"))?;
        self.say(format_args!("available: {enabled}"))
    }

    fn preview(&mut self) -> Result<()> {
        let description = self.controller.render_description(&self.style);
        let size = self.preview_size();
        let geometry = &description.geometry;
        let shape = match geometry.bounds() {
            Some(bounds) => format!(
                "{} path elements within ({}, {})-({}, {}), {:?} fill rule",
                geometry.element_count(),
                bounds.x0,
                bounds.y0,
                bounds.x1,
                bounds.y1,
                geometry.fill_rule
            ),
            None => "nothing".to_owned(),
        };
        let fill = paint_name(description.fill);
        let stroke = paint_name(description.stroke);
        let width = self.style.stroke_width;
        self.say(format_args!(
            "{}x{} preview of {shape}, fill {fill}, border {stroke} {width} wide",
            size.width, size.height
        ))
    }
}

fn paint_name(paint: Option<Color>) -> String {
    match paint {
        Some(color) => {
            let rgba = color.to_rgba8();
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
        None => "none".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icdw::RecentFiles;
    use icdw::peniko::color::palette::css;
    use std::fs;
    use std::io::Cursor;

    fn editor(input: &str) -> Editor<Cursor<Vec<u8>>, Vec<u8>> {
        let host = TerminalHost::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            RecentFiles::default(),
        );
        Editor::new(host, ShapeStyle::default(), PreviewSize::new(480.0, 480.0))
    }

    fn transcript(editor: &mut Editor<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(editor.controller.host_mut().output().clone()).unwrap()
    }

    #[test]
    fn type_save_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.icdw");
        let input = format!(
            "text M 0 0 L 10 10\nsave\n{}\nstatus\nquit\n",
            path.display()
        );
        let mut editor = editor(&input);

        editor.run().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "M 0 0 L 10 10");
        assert!(!editor.controller.is_dirty());
        let transcript = transcript(&mut editor);
        assert!(transcript.contains("Untitled*> "));
        assert!(transcript.contains("line.icdw> "));
        assert!(transcript.contains("no changes"));
    }

    #[test]
    fn opens_a_file_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("star.icdw");
        fs::write(&path, "M 10 10 L 20 20").unwrap();
        let mut editor = editor("show\n");

        editor.open_at_startup(&path);
        editor.run().unwrap();

        let session = editor.controller.session();
        assert_eq!(session.path(), Some(path.as_path()));
        assert!(!editor.controller.is_dirty());
        assert_eq!(editor.controller.host().recent().len(), 1);
        assert!(transcript(&mut editor).starts_with("star.icdw> M 10 10 L 20 20\n"));
    }

    #[test]
    fn missing_startup_file_leaves_the_editor_untitled() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor("");

        editor.open_at_startup(&dir.path().join("missing.icdw"));

        assert!(editor.controller.session().is_untitled());
        assert!(transcript(&mut editor).starts_with("Error: An error has occurred."));
    }

    #[test]
    fn end_of_input_with_unsaved_changes_still_exits() {
        let mut editor = editor("text M 0 0 L 5 5\n");

        editor.run().unwrap();

        assert!(editor.controller.is_dirty());
        assert!(transcript(&mut editor).contains("Do you want to save the changes"));
    }

    #[test]
    fn quit_can_be_cancelled() {
        let mut editor = editor("text M 1 1\nquit\nc\nshow\nquit\nn\n");

        editor.run().unwrap();

        let transcript = transcript(&mut editor);
        assert_eq!(transcript.matches("Do you want to save").count(), 2);
        assert!(transcript.contains("> M 1 1\n"));
    }

    #[test]
    fn select_and_delete() {
        let mut editor = editor("text M 0 0 L 9 9\nselect 5 11\ndelete\ndelete\nselect 3 99\n");

        editor.run().unwrap();

        assert_eq!(editor.controller.current_text(), "M 0 0");
        let transcript = transcript(&mut editor);
        assert!(transcript.contains("nothing is selected"));
        assert!(transcript.contains("3..99 is not a range"));
    }

    #[test]
    fn zoom_follows_the_preview() {
        let mut editor = editor("zoom out\nzoom out\nzoom reset\nzoom reset\nzoom in\n");

        editor.run().unwrap();

        let zoomed = PreviewSize::new(960.0, 960.0);
        assert_eq!(editor.zoom.requested(), Some(zoomed));
        let transcript = transcript(&mut editor);
        assert!(transcript.contains("preview is 120x120"));
        assert!(transcript.contains("can't zoom Reset any further"));
    }

    #[test]
    fn style_changes_show_in_the_preview() {
        let mut editor =
            editor("text F1 M 10 10 L 20 10 L 20 20 Z\nfill red\nstroke none\npreview\n");

        editor.run().unwrap();

        assert_eq!(editor.style.fill, Some(css::RED));
        assert_eq!(editor.style.stroke, None);
        let transcript = transcript(&mut editor);
        assert!(transcript.contains("fill #ff0000ff, border none"));
        assert!(transcript.contains("NonZero fill rule"));
    }

    #[test]
    fn bad_commands_are_reported() {
        let mut editor = editor("frobnicate\n");

        editor.run().unwrap();

        assert!(transcript(&mut editor).contains("unknown command `frobnicate`"));
    }
}
