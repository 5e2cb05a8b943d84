//! The capability interface a document model has to provide.
//!
//! The builder and extractor only talk to a deck through this trait, so they
//! work the same against a real `.pptx` package and the in-memory
//! [`MemoryDeck`](crate::memory::MemoryDeck).

use crate::error::{Error, Result};
use crate::types::{Layout, Placeholder, Shape};

/// A slide deck that can be inspected and extended.
///
/// Slides and shapes are addressed by position. Positions stay valid until
/// the next call to [`Deck::add_slide`], which only ever appends.
pub trait Deck {
    /// Layouts of the deck's first slide master, in master order.
    ///
    /// Returns `None` when the deck has no slide master at all.
    fn master_layouts(&self) -> Option<&[Layout]>;

    /// Append a new slide built from `layout` and return its position.
    fn add_slide(&mut self, layout: &Layout) -> Result<usize>;

    /// Number of slides in the deck.
    fn slide_count(&self) -> usize;

    /// Shapes of the slide at `slide`, in shape-tree order.
    fn shapes(&self, slide: usize) -> Result<&[Shape]>;

    /// Replace the text of the shape at `shape` on slide `slide`.
    fn set_text(&mut self, slide: usize, shape: usize, text: &str) -> Result<()>;

    /// Placeholders on the slide at `slide`, ordered by `idx`.
    fn placeholders(&self, slide: usize) -> Result<Vec<Placeholder>> {
        let mut placeholders: Vec<Placeholder> = self
            .shapes(slide)?
            .iter()
            .filter_map(|shape| shape.placeholder.clone())
            .collect();
        placeholders.sort_by_key(|ph| ph.idx);
        Ok(placeholders)
    }

    /// The placeholder whose `idx` is `idx` on the slide at `slide`.
    ///
    /// Placeholders are keyed by `idx`, not by position: a slide whose
    /// placeholders are numbered 1 and 2 has no placeholder 0.
    fn placeholder(&self, slide: usize, idx: u32) -> Result<Option<Placeholder>> {
        Ok(self
            .placeholders(slide)?
            .into_iter()
            .find(|ph| ph.idx == idx))
    }

    /// Text of the placeholder with `idx` on the slide at `slide`.
    fn placeholder_text(&self, slide: usize, idx: u32) -> Result<Option<String>> {
        let placeholder = match self.placeholder(slide, idx)? {
            Some(ph) => ph,
            None => return Ok(None),
        };
        let shape = self
            .shapes(slide)?
            .get(placeholder.shape)
            .ok_or(Error::ShapeNotFound {
                slide,
                shape: placeholder.shape,
            })?;
        Ok(shape.text().map(str::to_string))
    }
}
