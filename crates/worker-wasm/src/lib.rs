//! WASM bindings for the text-to-slides converter.
//!
//! This crate exposes slide creation and text extraction to JavaScript for
//! the browser upload form.

use powerpointless_core::{
    create_subtitles as build_deck, extract_subtitles as extract_lines, join_lines, split_lines,
    Deck,
};
use powerpointless_pptx::PptxDeck;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// File name offered for download of a generated deck.
pub const GENERATED_FILE_NAME: &str = "generated.pptx";

/// MIME type of a `.pptx` file.
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of extracting text from a presentation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Number of slides in the presentation.
    pub slide_count: usize,
    /// One entry per non-empty text box, in slide order.
    pub lines: Vec<String>,
    /// The lines joined by `\n`, for the text area and `extracted.txt`.
    pub text: String,
}

/// A freshly built presentation ready for download.
#[wasm_bindgen]
#[derive(Debug)]
pub struct GeneratedDeck {
    bytes: Vec<u8>,
    slide_count: usize,
}

#[wasm_bindgen]
impl GeneratedDeck {
    /// The `.pptx` file contents.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        GENERATED_FILE_NAME.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        PPTX_MIME_TYPE.to_string()
    }
}

/// Extract one line per non-empty text box from a `.pptx` file.
///
/// Returns `{ slide_count, lines, text }`, or throws an `Error`.
#[wasm_bindgen]
pub fn extract_subtitles(data: &[u8]) -> Result<JsValue, JsValue> {
    let result = extract_subtitles_impl(data).map_err(to_js_error)?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| to_js_error(format!("Serialization error: {}", e)))
}

fn extract_subtitles_impl(data: &[u8]) -> Result<ExtractionResult, String> {
    let deck = PptxDeck::from_bytes(data).map_err(|e| e.to_string())?;
    let lines = extract_lines(&deck);

    Ok(ExtractionResult {
        slide_count: deck.slide_count(),
        text: join_lines(&lines),
        lines,
    })
}

/// Build a deck with one slide per line of `text`.
///
/// `template` is the bytes of a `.pptx` to append to; without it the
/// built-in blank template is used. Throws an `Error` on failure.
#[wasm_bindgen]
pub fn create_subtitles(template: Option<Vec<u8>>, text: &str) -> Result<GeneratedDeck, JsValue> {
    create_subtitles_impl(template.as_deref(), text).map_err(to_js_error)
}

fn create_subtitles_impl(template: Option<&[u8]>, text: &str) -> Result<GeneratedDeck, String> {
    let deck = match template {
        Some(data) => PptxDeck::from_bytes(data),
        None => PptxDeck::default_template(),
    }
    .map_err(|e| e.to_string())?;

    let deck = build_deck(deck, split_lines(text)).map_err(|e| e.to_string())?;
    let bytes = deck.to_bytes().map_err(|e| e.to_string())?;

    Ok(GeneratedDeck {
        bytes,
        slide_count: deck.slide_count(),
    })
}

fn to_js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_extract() {
        let deck = create_subtitles_impl(None, "Alpha\r\nBeta\nGamma\n").unwrap();
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.file_name(), "generated.pptx");
        assert!(deck.mime_type().ends_with("presentationml.presentation"));

        let result = extract_subtitles_impl(&deck.bytes()).unwrap();
        assert_eq!(result.slide_count, 3);
        assert_eq!(result.lines, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(result.text, "Alpha\nBeta\nGamma");
    }

    #[test]
    fn test_create_appends_to_template() {
        let first = create_subtitles_impl(None, "Title").unwrap();
        let second = create_subtitles_impl(Some(first.bytes().as_slice()), "Verse 1\nVerse 2").unwrap();
        assert_eq!(second.slide_count(), 3);

        let result = extract_subtitles_impl(&second.bytes()).unwrap();
        assert_eq!(result.lines, vec!["Title", "Verse 1", "Verse 2"]);
    }

    #[test]
    fn test_empty_text_gives_no_slides() {
        let deck = create_subtitles_impl(None, "").unwrap();
        assert_eq!(deck.slide_count(), 0);

        let result = extract_subtitles_impl(&deck.bytes()).unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_extraction_result_shape() {
        let deck = create_subtitles_impl(None, "one\ntwo").unwrap();
        let result = extract_subtitles_impl(&deck.bytes()).unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "slide_count": 2,
                "lines": ["one", "two"],
                "text": "one\ntwo",
            })
        );
    }

    #[test]
    fn test_bad_upload_is_reported() {
        let err = extract_subtitles_impl(b"hello").unwrap_err();
        assert!(err.contains("Couldn't open file as a powerpoint"));

        let err = create_subtitles_impl(Some(&b"hello"[..]), "line").unwrap_err();
        assert!(err.contains("Couldn't open file as a powerpoint"));
    }
}
