// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of the path mini-language stored in `.icdw` documents.
//!
//! A document is SVG path data, optionally prefixed with a fill rule: `F0`
//! selects even-odd (the default) and `F1` selects non-zero, e.g.
//! `F1 M 10 10 L 80 10 L 45 70 Z`.

use peniko::Fill;
use peniko::kurbo::{BezPath, Rect, Shape};
use thiserror::Error;

/// Largest coordinate magnitude a path may reach, in geometry units.
///
/// The canvas spans 96 units, so anything further out is far off screen; the
/// rasterizer's fixed-point tiling can't represent it.
pub const MAX_COORDINATE: f64 = 1.0e7;

/// A parsed document: the outline and how to fill it.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub path: BezPath,
    pub fill_rule: Fill,
}

/// Errors from parsing path data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The fill-rule prefix wasn't `F0` or `F1`.
    #[error("unknown fill rule `F{0}`, expected `F0` or `F1`")]
    FillRule(String),
    /// The path data itself didn't parse.
    #[error("invalid path data: {0}")]
    PathData(String),
    /// The path reaches coordinates beyond [`MAX_COORDINATE`].
    #[error("path extends more than 1e7 units from the origin")]
    OutOfRange,
}

impl Geometry {
    /// A geometry with nothing in it.
    pub fn empty() -> Self {
        Self {
            path: BezPath::new(),
            fill_rule: Fill::EvenOdd,
        }
    }

    /// Parses document text.
    ///
    /// Blank text is the empty geometry.
    pub fn parse(data: &str) -> Result<Self, GeometryError> {
        let data = data.trim();
        let (fill_rule, data) = match data.strip_prefix('F') {
            Some(rest) => {
                let mut chars = rest.trim_start().chars();
                let fill_rule = match chars.next() {
                    Some('0') => Fill::EvenOdd,
                    Some('1') => Fill::NonZero,
                    other => {
                        return Err(GeometryError::FillRule(
                            other.map(String::from).unwrap_or_default(),
                        ));
                    }
                };
                (fill_rule, chars.as_str().trim_start())
            }
            None => (Fill::EvenOdd, data),
        };
        if data.is_empty() {
            return Ok(Self {
                path: BezPath::new(),
                fill_rule,
            });
        }
        let path =
            BezPath::from_svg(data).map_err(|err| GeometryError::PathData(err.to_string()))?;
        let bounds = path.bounding_box();
        let in_range = [bounds.x0, bounds.y0, bounds.x1, bounds.y1]
            .iter()
            .all(|coordinate| coordinate.abs() <= MAX_COORDINATE);
        if !in_range {
            return Err(GeometryError::OutOfRange);
        }
        Ok(Self { path, fill_rule })
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Number of path elements (move, line, curve and close commands).
    pub fn element_count(&self) -> usize {
        self.path.elements().len()
    }

    /// Bounding box of the outline, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.path.bounding_box())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_path_data() {
        let geometry = Geometry::parse("M 10 10 L 90 10 L 50 80 Z").unwrap();
        assert_eq!(geometry.fill_rule, Fill::EvenOdd);
        assert_eq!(geometry.element_count(), 4);
        assert_eq!(geometry.bounds(), Some(Rect::new(10.0, 10.0, 90.0, 80.0)));
    }

    #[test]
    fn fill_rule_prefix() {
        let non_zero = Geometry::parse("F1 M 0 0 L 5 0 L 5 5 Z").unwrap();
        assert_eq!(non_zero.fill_rule, Fill::NonZero);
        assert_eq!(non_zero.element_count(), 4);

        let even_odd = Geometry::parse("  F0M 0 0 L 5 5").unwrap();
        assert_eq!(even_odd.fill_rule, Fill::EvenOdd);
        assert_eq!(even_odd.element_count(), 2);
    }

    #[test]
    fn unknown_fill_rule() {
        assert_eq!(
            Geometry::parse("F2 M 0 0").unwrap_err(),
            GeometryError::FillRule("2".to_owned())
        );
    }

    #[test]
    fn blank_text_is_empty() {
        let geometry = Geometry::parse(" \n").unwrap();
        assert!(geometry.is_empty());
        assert_eq!(geometry.bounds(), None);
        assert!(Geometry::parse("F1").unwrap().is_empty());
    }

    #[test]
    fn far_away_coordinates_are_rejected() {
        assert_eq!(
            Geometry::parse("M -1e300 0 L 1e300 5 L 0 50 Z").unwrap_err(),
            GeometryError::OutOfRange
        );
        assert_eq!(
            Geometry::parse("M 0 0 L 5 2e7").unwrap_err(),
            GeometryError::OutOfRange
        );
        assert!(Geometry::parse("M -1e7 0 L 1e7 96").is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            Geometry::parse("not a path"),
            Err(GeometryError::PathData(_))
        ));
    }
}
