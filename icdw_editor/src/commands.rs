// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of editor command lines.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use icdw::peniko::Color;
use icdw::peniko::color::{Srgb, parse_color};

/// One line of editor input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    /// Replace the whole text.
    Text(String),
    /// Insert at the caret, replacing the selection.
    Insert(String),
    /// Select a byte range.
    Select(usize, usize),
    /// Delete the selection.
    Delete,
    Show,
    Status,
    Preview,
    New,
    Open(Option<PathBuf>),
    Save,
    SaveAs,
    Export,
    Fill(Option<Color>),
    Stroke(Option<Color>),
    Thickness(f64),
    Zoom(ZoomCommand),
    Recent,
    Help,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ZoomCommand {
    In,
    Out,
    Reset,
}

pub(crate) const HELP: &str = "\
commands:
  text <path data>     replace the document text
  insert <path data>   insert at the caret, replacing the selection
  select <start> <end> select a byte range
  delete               delete the selection
  show                 print the document text
  status               print the document state and enabled commands
  preview              describe what the preview draws
  new                  start an untitled document
  open [file]          open a document
  save                 save the document
  saveas               save the document under a new name
  export               export the shape as an image
  fill <color|none>    change the fill color
  stroke <color|none>  change the border color
  thickness <width>    change the border thickness of the preview
  zoom <in|out|reset>  change the preview zoom
  recent               list recently opened documents
  help                 print this help
  quit                 leave the editor";

/// Parses a CSS color such as `#ff8800` or `teal`, or `none`.
pub(crate) fn parse_paint(text: &str) -> Result<Option<Color>> {
    if text.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let color = parse_color(text).map_err(|err| anyhow!("invalid color `{text}`: {err}"))?;
    Ok(Some(color.to_alpha_color::<Srgb>()))
}

pub(crate) fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, rest)| (name, rest.trim()));
    let no_arguments = |command: Command| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(anyhow!("`{name}` takes no arguments"))
        }
    };
    match name.to_ascii_lowercase().as_str() {
        "text" => Ok(Command::Text(rest.to_owned())),
        "insert" => Ok(Command::Insert(rest.to_owned())),
        "select" => {
            let mut bounds = rest.split_whitespace().map(|bound| {
                bound
                    .parse::<usize>()
                    .with_context(|| format!("invalid offset `{bound}`"))
            });
            match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(start), Some(end), None) => Ok(Command::Select(start?, end?)),
                _ => bail!("usage: select <start> <end>"),
            }
        }
        "delete" => no_arguments(Command::Delete),
        "show" => no_arguments(Command::Show),
        "status" => no_arguments(Command::Status),
        "preview" => no_arguments(Command::Preview),
        "new" => no_arguments(Command::New),
        "open" => Ok(Command::Open(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "save" => no_arguments(Command::Save),
        "saveas" => no_arguments(Command::SaveAs),
        "export" => no_arguments(Command::Export),
        "fill" => Ok(Command::Fill(parse_paint(rest)?)),
        "stroke" => Ok(Command::Stroke(parse_paint(rest)?)),
        "thickness" => {
            let width = rest
                .parse::<f64>()
                .with_context(|| format!("invalid thickness `{rest}`"))?;
            if !(width.is_finite() && width >= 0.0) {
                bail!("thickness must be a non-negative number");
            }
            Ok(Command::Thickness(width))
        }
        "zoom" => match rest.to_ascii_lowercase().as_str() {
            "in" => Ok(Command::Zoom(ZoomCommand::In)),
            "out" => Ok(Command::Zoom(ZoomCommand::Out)),
            "reset" => Ok(Command::Zoom(ZoomCommand::Reset)),
            _ => bail!("usage: zoom <in|out|reset>"),
        },
        "recent" => no_arguments(Command::Recent),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => no_arguments(Command::Quit),
        "" => bail!("type `help` for a list of commands"),
        other => bail!("unknown command `{other}`, type `help` for a list of commands"),
    }
}
