//! Error types for building and extracting subtitle decks.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file or stream.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not a presentation we can open.
    #[error("Couldn't open file as a powerpoint: {0}")]
    DocumentUnreadable(String),

    /// The file format is recognised but not supported.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The template has no slide master.
    #[error("Provided presentation must have at least one slide master attached")]
    MissingMaster,

    /// The first slide master has no layouts.
    #[error("Slide master must have at least one layout")]
    MissingLayout,

    /// The layout has no placeholder 0, or it cannot hold text.
    #[error("Provided layout must use a textbox as the first placeholder: {0}")]
    InvalidPlaceholder(String),

    /// No slide exists at the given position.
    #[error("No slide at position {0}")]
    SlideNotFound(usize),

    /// No shape exists at the given position on a slide.
    #[error("No shape at position {shape} on slide {slide}")]
    ShapeNotFound { slide: usize, shape: usize },

    /// ZIP archive error while writing a package.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error while rewriting a part.
    #[error("XML error: {0}")]
    XmlError(String),
}
