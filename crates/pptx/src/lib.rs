//! Office Open XML (`.pptx`) backend for the text-to-slides converter.
//!
//! [`PptxDeck`] reads a presentation package into memory, implements
//! [`powerpointless_core::Deck`] on top of it and writes it back out,
//! leaving every part it does not understand untouched.

mod deck;
pub mod package;
mod presentation;
mod shapes;
mod template;
mod xml;

pub use deck::PptxDeck;
pub use package::{Package, Part};
