// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster image formats the rendered shape can be exported as.
//!
//! The format is chosen purely by the destination's extension, looked up in
//! [`EXPORT_FORMATS`]. Adding a format means adding a row there and a codec
//! in [`ExportFormat::encode`].

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::Error;

/// An image container the export command can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Tiff,
    Gif,
    Bmp,
    /// Windows Media Photo, also known as JPEG XR.
    Wmp,
}

/// A row of the export format table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatEntry {
    /// Lower-case extension without the leading dot.
    pub extension: &'static str,
    pub format: ExportFormat,
    /// Label shown in the export picker's filter list.
    pub label: &'static str,
}

/// Every export format, in the order the export picker lists them.
pub const EXPORT_FORMATS: &[FormatEntry] = &[
    FormatEntry {
        extension: "png",
        format: ExportFormat::Png,
        label: "PNG Image",
    },
    FormatEntry {
        extension: "jpg",
        format: ExportFormat::Jpeg,
        label: "JPEG Image",
    },
    FormatEntry {
        extension: "tiff",
        format: ExportFormat::Tiff,
        label: "Tiff Image",
    },
    FormatEntry {
        extension: "gif",
        format: ExportFormat::Gif,
        label: "GIF Image",
    },
    FormatEntry {
        extension: "bmp",
        format: ExportFormat::Bmp,
        label: "Window Bitmap",
    },
    FormatEntry {
        extension: "wdp",
        format: ExportFormat::Wmp,
        label: "Window Media Format",
    },
];

impl ExportFormat {
    /// Looks up an extension, ignoring case and a leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        EXPORT_FORMATS
            .iter()
            .find(|entry| entry.extension.eq_ignore_ascii_case(extension))
            .map(|entry| entry.format)
    }

    /// The format selected by the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str().and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Tiff => "TIFF",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Wmp => "WMP",
        }
    }

    fn codec(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Tiff => Some(image::ImageFormat::Tiff),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            // No JPEG XR encoder is available.
            Self::Wmp => None,
        }
    }

    /// Encodes `pixels` into a complete file in memory.
    ///
    /// JPEG has no alpha channel; transparent pixels come out black.
    pub fn encode(self, pixels: &RgbaImage) -> Result<Vec<u8>, Error> {
        let codec = self
            .codec()
            .ok_or(Error::EncoderUnavailable { format: self })?;
        let mut out = Cursor::new(Vec::new());
        let result = match self {
            Self::Jpeg => DynamicImage::ImageRgba8(pixels.clone())
                .into_rgb8()
                .write_to(&mut out, codec),
            _ => pixels.write_to(&mut out, codec),
        };
        result.map_err(|source| Error::Encode {
            format: self,
            source,
        })?;
        Ok(out.into_inner())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use image::Rgba;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/Shape.PNG")),
            Some(ExportFormat::Png)
        );
        assert_eq!(
            ExportFormat::from_extension(".Jpg"),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(ExportFormat::from_extension("wdp"), Some(ExportFormat::Wmp));
    }

    #[test]
    fn unknown_extensions_have_no_format() {
        assert_eq!(ExportFormat::from_path(Path::new("pic.xyz")), None);
        assert_eq!(ExportFormat::from_path(Path::new("pic")), None);
        // Only the listed spellings are registered.
        assert_eq!(ExportFormat::from_extension("jpeg"), None);
        assert_eq!(ExportFormat::from_extension("tif"), None);
    }

    fn swatch() -> RgbaImage {
        RgbaImage::from_fn(4, 3, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn encoded_files_carry_their_signature() {
        let pixels = swatch();
        let png = ExportFormat::Png.encode(&pixels).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let jpeg = ExportFormat::Jpeg.encode(&pixels).unwrap();
        assert!(jpeg.starts_with(&[0xff, 0xd8]));
        let gif = ExportFormat::Gif.encode(&pixels).unwrap();
        assert!(gif.starts_with(b"GIF8"));
        let bmp = ExportFormat::Bmp.encode(&pixels).unwrap();
        assert!(bmp.starts_with(b"BM"));
        let tiff = ExportFormat::Tiff.encode(&pixels).unwrap();
        assert!(tiff.starts_with(b"II") || tiff.starts_with(b"MM"));
    }

    #[test]
    fn png_keeps_pixels() {
        let pixels = swatch();
        let png = ExportFormat::Png.encode(&pixels).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn wmp_has_no_encoder() {
        let error = ExportFormat::Wmp.encode(&swatch()).unwrap_err();
        assert!(matches!(error, Error::EncoderUnavailable { .. }));
        assert_eq!(error.kind(), ErrorKind::IoFailure);
    }
}
