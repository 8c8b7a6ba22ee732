// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shell around the controller: file pickers, prompts, notifications and
//! the recent-files registry.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::format::EXPORT_FORMATS;
use crate::session::UNTITLED;

/// Filter offered by the document pickers.
pub const DOCUMENT_FILTER: FileFilter = FileFilter {
    label: "Image Creator Files",
    extension: "icdw",
};

/// A named file-type filter, e.g. `PNG Image|*.png`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// Extension without the leading dot.
    pub extension: &'static str,
}

impl FileFilter {
    /// The glob matching this filter's files.
    pub fn pattern(&self) -> String {
        format!("*.{}", self.extension)
    }
}

/// Which picker is being shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKind {
    Open,
    Save,
    Export,
}

/// Everything a file picker needs to ask the user for a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickRequest<'a> {
    pub kind: PickerKind,
    pub title: &'a str,
    pub suggested_name: Option<&'a str>,
    pub filters: &'a [FileFilter],
}

impl PickRequest<'static> {
    pub(crate) fn open_document() -> Self {
        Self {
            kind: PickerKind::Open,
            title: "Open File - Image Creator",
            suggested_name: None,
            filters: &[DOCUMENT_FILTER],
        }
    }

    pub(crate) fn save_document() -> Self {
        Self {
            kind: PickerKind::Save,
            title: "Save File - Image Creator",
            suggested_name: Some(UNTITLED),
            filters: &[DOCUMENT_FILTER],
        }
    }

    pub(crate) fn export_image() -> Self {
        Self {
            kind: PickerKind::Export,
            title: "Convert to Image - Image Creator",
            suggested_name: Some("Image"),
            filters: &EXPORT_FILTERS,
        }
    }
}

static EXPORT_FILTERS: [FileFilter; EXPORT_FORMATS.len()] = {
    let mut filters = [DOCUMENT_FILTER; EXPORT_FORMATS.len()];
    let mut i = 0;
    while i < EXPORT_FORMATS.len() {
        filters[i] = FileFilter {
            label: EXPORT_FORMATS[i].label,
            extension: EXPORT_FORMATS[i].extension,
        };
        i += 1;
    }
    filters
};

/// The user's answer to "Do you want to save the changes?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// The services the surrounding application provides to the controller.
pub trait Host {
    /// Shows a file picker. `None` means the user cancelled.
    fn choose_path(&mut self, request: &PickRequest<'_>) -> Option<PathBuf>;

    /// Asks whether unsaved changes to `document_name` should be saved.
    fn ask_save_changes(&mut self, document_name: &str) -> SaveChoice;

    /// Shows a non-fatal error notification.
    fn show_error(&mut self, title: &str, message: &str);

    /// Adds `path` to the recently used documents.
    fn record_recent(&mut self, path: &Path);
}

/// Number of entries kept by [`RecentFiles::default`].
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// Most-recently-used documents, newest first, without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentFiles {
    entries: VecDeque<PathBuf>,
    capacity: usize,
}

impl RecentFiles {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Moves `path` to the front, evicting the oldest entry when full.
    pub fn record(&mut self, path: &Path) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|entry| entry != path);
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(path.to_path_buf());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filters_follow_format_table() {
        let request = PickRequest::export_image();
        let patterns: Vec<_> = request.filters.iter().map(FileFilter::pattern).collect();
        assert_eq!(
            patterns,
            ["*.png", "*.jpg", "*.tiff", "*.gif", "*.bmp", "*.wdp"]
        );
        assert_eq!(request.suggested_name, Some("Image"));
    }

    #[test]
    fn save_picker_suggests_untitled() {
        let request = PickRequest::save_document();
        assert_eq!(request.suggested_name, Some("Untitled"));
        assert_eq!(request.filters, &[DOCUMENT_FILTER]);
        assert_eq!(DOCUMENT_FILTER.pattern(), "*.icdw");
    }

    #[test]
    fn recent_files_dedup_and_evict() {
        let mut recent = RecentFiles::with_capacity(2);
        recent.record(Path::new("a.icdw"));
        recent.record(Path::new("b.icdw"));
        recent.record(Path::new("a.icdw"));
        assert_eq!(
            recent.iter().collect::<Vec<_>>(),
            [Path::new("a.icdw"), Path::new("b.icdw")]
        );
        recent.record(Path::new("c.icdw"));
        assert_eq!(
            recent.iter().collect::<Vec<_>>(),
            [Path::new("c.icdw"), Path::new("a.icdw")]
        );
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut recent = RecentFiles::with_capacity(0);
        recent.record(Path::new("a.icdw"));
        assert!(recent.is_empty());
    }
}
