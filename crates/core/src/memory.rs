//! An in-memory deck for exercising the builder and extractor without a
//! document parser.

use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::types::{Layout, Shape, ShapeKind, TextFrame};

/// A deck held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDeck {
    /// Layouts of the single slide master, or `None` for a deck with no master.
    master: Option<Vec<Layout>>,

    /// Slides in deck order.
    slides: Vec<Vec<Shape>>,
}

impl MemoryDeck {
    /// Create a deck with no master and no slides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck whose master carries the given layouts.
    pub fn with_master(layouts: Vec<Layout>) -> Self {
        Self {
            master: Some(layouts),
            slides: Vec::new(),
        }
    }

    /// Append a slide with pre-built shapes.
    pub fn push_slide(&mut self, shapes: Vec<Shape>) {
        self.slides.push(shapes);
    }

    /// Builder-style variant of [`MemoryDeck::push_slide`].
    pub fn with_slide(mut self, shapes: Vec<Shape>) -> Self {
        self.push_slide(shapes);
        self
    }

    fn slide_mut(&mut self, slide: usize) -> Result<&mut Vec<Shape>> {
        self.slides.get_mut(slide).ok_or(Error::SlideNotFound(slide))
    }
}

impl Deck for MemoryDeck {
    fn master_layouts(&self) -> Option<&[Layout]> {
        self.master.as_deref()
    }

    fn add_slide(&mut self, layout: &Layout) -> Result<usize> {
        let shapes = layout
            .placeholders
            .iter()
            .enumerate()
            .map(|(position, ph)| {
                let mut placeholder = ph.clone();
                placeholder.shape = position;
                Shape {
                    id: position as u32 + 2,
                    name: ph.name.clone(),
                    kind: ph.shape_kind,
                    text_frame: (ph.shape_kind == ShapeKind::AutoShape).then(TextFrame::default),
                    placeholder: Some(placeholder),
                }
            })
            .collect();

        self.slides.push(shapes);
        Ok(self.slides.len() - 1)
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn shapes(&self, slide: usize) -> Result<&[Shape]> {
        self.slides
            .get(slide)
            .map(Vec::as_slice)
            .ok_or(Error::SlideNotFound(slide))
    }

    fn set_text(&mut self, slide: usize, shape: usize, text: &str) -> Result<()> {
        let target = self
            .slide_mut(slide)?
            .get_mut(shape)
            .ok_or(Error::ShapeNotFound { slide, shape })?;

        if target.kind != ShapeKind::AutoShape {
            return Err(Error::InvalidPlaceholder(format!(
                "shape '{}' is a {:?} and has no text frame",
                target.name, target.kind
            )));
        }

        target.text_frame = Some(TextFrame::new(text));
        Ok(())
    }
}
