// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-based stand-ins for the desktop dialogs.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use icdw::{Host, PickRequest, RecentFiles, SaveChoice};

/// A [`Host`] that asks its questions on a terminal.
///
/// Pickers read a path from the next input line; an empty line cancels.
pub(crate) struct TerminalHost<I, O> {
    input: I,
    output: O,
    recent: RecentFiles,
}

impl<I: BufRead, O: Write> TerminalHost<I, O> {
    pub(crate) fn new(input: I, output: O, recent: RecentFiles) -> Self {
        Self {
            input,
            output,
            recent,
        }
    }

    pub(crate) fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    pub(crate) fn output(&mut self) -> &mut O {
        &mut self.output
    }

    /// The next input line without its line ending, or `None` at end of input.
    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_line()
    }
}

impl<I: BufRead, O: Write> Host for TerminalHost<I, O> {
    fn choose_path(&mut self, request: &PickRequest<'_>) -> Option<PathBuf> {
        let filters = request
            .filters
            .iter()
            .map(|filter| format!("{}|{}", filter.label, filter.pattern()))
            .collect::<Vec<_>>()
            .join("|");
        let suggestion = match (request.suggested_name, request.filters.first()) {
            (Some(name), Some(filter)) => format!(" (e.g. {name}.{})", filter.extension),
            (Some(name), None) => format!(" (e.g. {name})"),
            (None, _) => String::new(),
        };
        let question = format!("{} [{filters}]{suggestion}: ", request.title);
        match self.ask(&question) {
            Ok(Some(answer)) if !answer.trim().is_empty() => Some(PathBuf::from(answer.trim())),
            Ok(_) => None,
            Err(err) => {
                log::warn!("couldn't read a path, treating as cancelled: {err}");
                None
            }
        }
    }

    fn ask_save_changes(&mut self, document_name: &str) -> SaveChoice {
        let question = format!(
            "Do you want to save the changes you made to {document_name}? [y]es/[n]o/[c]ancel: "
        );
        loop {
            let answer = match self.ask(&question) {
                Ok(Some(answer)) => answer,
                Ok(None) => return SaveChoice::Cancel,
                Err(err) => {
                    log::warn!("couldn't read an answer, keeping changes: {err}");
                    return SaveChoice::Cancel;
                }
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return SaveChoice::Save,
                "n" | "no" => return SaveChoice::Discard,
                "c" | "cancel" => return SaveChoice::Cancel,
                _ => {}
            }
        }
    }

    fn show_error(&mut self, title: &str, message: &str) {
        if let Err(err) = writeln!(self.output, "{title}: {message}") {
            log::warn!("couldn't show error `{message}`: {err}");
        }
    }

    fn record_recent(&mut self, path: &Path) {
        self.recent.record(path);
    }
}
