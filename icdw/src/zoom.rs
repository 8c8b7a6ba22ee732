// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom state of the preview.

use crate::raster::PreviewSize;

/// Requested preview size, or automatic sizing to fit the available space.
///
/// The commands take the *actual* size of the preview as laid out, since under
/// automatic sizing only the layout knows it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Zoom {
    requested: Option<PreviewSize>,
}

impl Zoom {
    /// Automatic sizing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicitly requested size, if any.
    pub fn requested(&self) -> Option<PreviewSize> {
        self.requested
    }

    /// The size to lay the preview out at, given the size it would fit.
    pub fn resolve(&self, fitted: PreviewSize) -> PreviewSize {
        self.requested.unwrap_or(fitted)
    }

    pub fn can_increase(&self, actual: PreviewSize) -> bool {
        (actual.width * 2.0).is_finite() && (actual.height * 2.0).is_finite()
    }

    /// Doubles both dimensions.
    pub fn increase(&mut self, actual: PreviewSize) {
        self.requested = Some(PreviewSize::new(actual.width * 2.0, actual.height * 2.0));
    }

    pub fn can_decrease(&self, actual: PreviewSize) -> bool {
        actual.width / 2.0 > 0.0 && actual.height / 2.0 > 0.0
    }

    /// Halves both dimensions.
    pub fn decrease(&mut self, actual: PreviewSize) {
        self.requested = Some(PreviewSize::new(actual.width / 2.0, actual.height / 2.0));
    }

    pub fn can_reset(&self) -> bool {
        self.requested.is_some()
    }

    /// Returns to automatic sizing.
    pub fn reset(&mut self) {
        self.requested = None;
    }
}
