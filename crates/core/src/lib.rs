//! Core of the text-to-slides converter: the deck capability trait, the
//! slide builder, the text extractor and line-source helpers.

pub mod deck;
pub mod error;
pub mod lines;
pub mod memory;
pub mod subtitles;
pub mod types;

pub use deck::Deck;
pub use error::{Error, Result};
pub use lines::{join_lines, join_lines_with_newline, split_lines};
pub use memory::MemoryDeck;
pub use subtitles::{create_subtitles, extract_subtitles, subtitles};
pub use types::{
    DocumentFormat, Layout, Placeholder, PlaceholderKind, Shape, ShapeKind, TextFrame,
};
