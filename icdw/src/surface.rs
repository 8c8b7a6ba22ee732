// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text-editing surface the document text lives in.

use std::ops::Range;

/// A text box holding the document text.
///
/// The controller reads the text on demand and never keeps a copy beyond a
/// single operation. Selections are byte ranges into the text.
pub trait EditingSurface {
    /// The full current text.
    fn text(&self) -> String;

    /// Replaces the full text.
    fn set_text(&mut self, text: &str);

    /// The selected range; empty when there is only a caret.
    fn selection(&self) -> Range<usize>;

    /// Selects `range`, or places the caret when it is empty.
    fn set_selection(&mut self, range: Range<usize>);
}

/// An in-memory [`EditingSurface`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    selection: Range<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text`, with the caret at its end.
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replaces the selection with `text` and puts the caret after it.
    pub fn insert(&mut self, text: &str) {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, text);
        let caret = start + text.len();
        self.selection = caret..caret;
    }

    /// Selects the whole text.
    pub fn select_all(&mut self) {
        self.selection = 0..self.text.len();
    }

    fn floor_boundary(&self, index: usize) -> usize {
        let mut index = index.min(self.text.len());
        while !self.text.is_char_boundary(index) {
            index -= 1;
        }
        index
    }
}

impl EditingSurface for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.selection = self.text.len()..self.text.len();
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: Range<usize>) {
        let end = self.floor_boundary(range.end);
        let start = self.floor_boundary(range.start.min(end));
        self.selection = start..end;
    }
}
