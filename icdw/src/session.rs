// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document session: where the document lives and what was last persisted.

use std::path::{Path, PathBuf};

/// Name shown for a document that has never been saved.
pub const UNTITLED: &str = "Untitled";

/// The persisted state of the open document.
///
/// The current text isn't stored here; it lives in the editing surface and is
/// compared against [`last_saved`](Self::last_saved) to decide whether the
/// document is dirty. The path and the snapshot only ever change together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    path: Option<PathBuf>,
    last_saved: String,
}

impl Session {
    /// An untitled session with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The file the document was last saved to or loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether no path has been assigned yet.
    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }

    /// The text as of the last successful save or load.
    pub fn last_saved(&self) -> &str {
        &self.last_saved
    }

    /// Whether `text` differs from the last persisted text.
    pub fn is_dirty(&self, text: &str) -> bool {
        text != self.last_saved
    }

    /// The file name used when talking to the user about this document.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || UNTITLED.to_owned(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    /// Records a successful save or load of `text` at `path`.
    pub(crate) fn commit(&mut self, path: PathBuf, text: String) {
        self.path = Some(path);
        self.last_saved = text;
    }

    /// Returns to the untitled, empty state.
    pub(crate) fn reset(&mut self) {
        self.path = None;
        self.last_saved.clear();
    }
}
