// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Failure categories and the outcome type shared by every document command.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::ExportFormat;

/// The category a failure is reported under.
///
/// Each category maps to one user-facing message per [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file system refused access to the file.
    AccessDenied,
    /// The process lacks the rights required for the operation.
    PermissionMissing,
    /// The path is malformed or contains characters the platform doesn't allow.
    InvalidPath,
    /// Any other read, write or encoding failure.
    IoFailure,
    /// The export destination has an extension no image format is registered for.
    InvalidFormat,
}

/// The operation a failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Writing the document.
    Save,
    /// Reading a document.
    Open,
    /// Writing a rendered image.
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Open => "open",
            Self::Export => "export",
        })
    }
}

/// Errors that can occur while saving, opening or exporting a document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The file system reported an error.
    #[error("couldn't {action} `{}`", .path.display())]
    Io {
        action: Action,
        path: PathBuf,
        kind: ErrorKind,
        #[source]
        source: io::Error,
    },
    /// The path was rejected before touching the file system.
    #[error("`{}` is not a valid path", .path.display())]
    InvalidPath { action: Action, path: PathBuf },
    /// The document isn't UTF-8 text.
    #[error("`{}` doesn't contain UTF-8 text", .path.display())]
    NotText {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// The export destination has no registered image format.
    #[error("no image format is registered for `{}`", .path.display())]
    InvalidFormat { path: PathBuf },
    /// The image crate failed to encode the rendered canvas.
    #[error("couldn't encode the canvas as {format}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },
    /// The format is recognized but there is no encoder for it.
    #[error("no encoder is available for {format} images")]
    EncoderUnavailable { format: ExportFormat },
    /// The canvas doesn't fit the rasterizer's size limits.
    #[error("a {width}x{height} canvas is too large to render")]
    CanvasTooLarge { width: u32, height: u32 },
}

impl Error {
    /// Wraps an I/O error, classifying it.
    pub(crate) fn io(action: Action, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            kind: classify(&source),
            source,
        }
    }

    /// The category this error is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { kind, .. } => *kind,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::NotText { .. }
            | Self::Encode { .. }
            | Self::EncoderUnavailable { .. }
            | Self::CanvasTooLarge { .. } => ErrorKind::IoFailure,
        }
    }

    /// The operation that failed.
    pub fn action(&self) -> Action {
        match self {
            Self::Io { action, .. } | Self::InvalidPath { action, .. } => *action,
            Self::NotText { .. } => Action::Open,
            Self::InvalidFormat { .. }
            | Self::Encode { .. }
            | Self::EncoderUnavailable { .. }
            | Self::CanvasTooLarge { .. } => Action::Export,
        }
    }

    /// Title of the notification shown for this error.
    pub fn title(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidFormat => "Invalid Format",
            _ => "Error",
        }
    }

    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        let object = match self.action() {
            Action::Save => "The file could not be saved.",
            Action::Open => "The file could not be opened.",
            Action::Export => "The image could not be saved.",
        };
        let detail = match self.kind() {
            ErrorKind::AccessDenied => " Access has been denied.",
            ErrorKind::PermissionMissing => " The program does not have the required permission.",
            ErrorKind::InvalidPath => " Invalid characters were found in the file path.",
            ErrorKind::IoFailure => "",
            ErrorKind::InvalidFormat => {
                return "An invalid file format was selected. Please select a valid file format."
                    .to_owned();
            }
        };
        format!("An error has occurred. {object}{detail}")
    }
}

/// Maps an I/O error onto the category it is reported under.
pub(crate) fn classify(error: &io::Error) -> ErrorKind {
    match error.kind() {
        io::ErrorKind::PermissionDenied if lacks_privilege(error) => ErrorKind::PermissionMissing,
        io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
        io::ErrorKind::ReadOnlyFilesystem => ErrorKind::PermissionMissing,
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename => ErrorKind::InvalidPath,
        _ => ErrorKind::IoFailure,
    }
}

#[cfg(unix)]
fn lacks_privilege(error: &io::Error) -> bool {
    // EPERM
    error.raw_os_error() == Some(1)
}

#[cfg(windows)]
fn lacks_privilege(error: &io::Error) -> bool {
    // ERROR_PRIVILEGE_NOT_HELD
    error.raw_os_error() == Some(1314)
}

#[cfg(not(any(unix, windows)))]
fn lacks_privilege(_: &io::Error) -> bool {
    false
}

/// How a document command ended, when it didn't succeed.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The user dismissed a file picker.
    #[error("cancelled by the user")]
    Cancelled,
    /// The user chose to keep unsaved changes, or saving them failed.
    #[error("aborted to keep unsaved changes")]
    Aborted,
    /// The command failed; the user has already been notified.
    #[error(transparent)]
    Failed(#[from] Error),
}

impl CommandError {
    /// The failure category, if the command failed.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed(error) => Some(error.kind()),
            Self::Cancelled | Self::Aborted => None,
        }
    }
}
