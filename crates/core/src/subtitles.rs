//! Conversion between text lines and slides.
//!
//! [`create_subtitles`] appends one slide per line to a template deck and
//! [`extract_subtitles`] reads one line back per non-empty text frame.

use crate::deck::Deck;
use crate::error::{Error, Result};

/// Append one slide per line to `deck`.
///
/// Each slide is built from the first layout of the deck's first slide
/// master, and the line is written verbatim into the slide's placeholder
/// with `idx` 0. The master and layout are checked before any line is
/// processed, so a template without them fails even when `lines` is empty.
///
/// The first line whose slide has no placeholder 0, or one that cannot hold
/// text, aborts the build with [`Error::InvalidPlaceholder`].
pub fn create_subtitles<D, I, S>(mut deck: D, lines: I) -> Result<D>
where
    D: Deck,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let layouts = deck.master_layouts().ok_or(Error::MissingMaster)?;
    let layout = layouts.first().cloned().ok_or(Error::MissingLayout)?;

    log::debug!(
        "Using layout '{}' with {} placeholder(s)",
        layout.name,
        layout.placeholders.len()
    );

    let mut created = 0usize;
    for line in lines {
        let slide = deck.add_slide(&layout)?;

        let placeholder = deck.placeholder(slide, 0)?.ok_or_else(|| {
            Error::InvalidPlaceholder(format!("layout '{}' has no placeholder 0", layout.name))
        })?;

        if !placeholder.accepts_text() {
            return Err(Error::InvalidPlaceholder(format!(
                "placeholder '{}' is of type '{}'",
                placeholder.name,
                placeholder.kind.as_ooxml()
            )));
        }

        deck.set_text(slide, placeholder.shape, line.as_ref())?;
        created += 1;
    }

    log::info!("Created {} slide(s)", created);
    Ok(deck)
}

/// Lazily yield the text of every shape with a non-empty text frame.
///
/// Order is slide order, then shape order within a slide. Trailing
/// whitespace is stripped; leading and internal whitespace (including the
/// `\x0b` used for soft line breaks) is kept. A slide whose shapes cannot
/// be read contributes no lines.
pub fn subtitles<D: Deck>(deck: &D) -> impl Iterator<Item = String> + '_ {
    (0..deck.slide_count())
        .filter_map(move |slide| deck.shapes(slide).ok())
        .flatten()
        .filter_map(|shape| shape.text())
        .filter(|text| !text.is_empty())
        .map(|text| text.trim_end().to_string())
}

/// Collect [`subtitles`] into a vector.
pub fn extract_subtitles<D: Deck>(deck: &D) -> Vec<String> {
    let lines: Vec<String> = subtitles(deck).collect();
    log::info!(
        "Extracted {} line(s) from {} slide(s)",
        lines.len(),
        deck.slide_count()
    );
    lines
}
