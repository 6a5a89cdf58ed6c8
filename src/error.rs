use std::path::PathBuf;
use thiserror::Error;

use crate::ledger::RecordError;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("File {0} not found")]
    InputNotFound(PathBuf),

    #[error("Failed to read ledger '{path}': {source}")]
    LedgerRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create ledger '{path}': {source}")]
    LedgerCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Wrong date format '{input}', expected dd/mm/yy: {source}")]
    InvalidCutoff {
        input: String,
        source: chrono::ParseError,
    },

    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord { line: usize, source: RecordError },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Invalid sheet layout: {field} {reason}")]
    InvalidLayout {
        field: &'static str,
        reason: &'static str,
    },

    #[error(
        "Sprite sheet is {width}x{height}, smaller than the {expected_width}x{expected_height} grid"
    )]
    SheetTooSmall {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("No optimal crop rect could be determined")]
    NoCropRect,
}
