//! Small helpers shared by the part readers and writers.

use powerpointless_core::{Error, Result};
use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// The prefix of a namespaced name, if any.
pub(crate) fn prefix(name: &[u8]) -> Option<&[u8]> {
    name.iter().position(|&b| b == b':').map(|pos| &name[..pos])
}

/// Value of the attribute whose full (prefixed) name is `key`.
pub(crate) fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Value of the first attribute whose local name is `key` and which carries a prefix.
///
/// Used for `r:id` style attributes where the document picks the prefix.
pub(crate) fn prefixed_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| {
            let name = a.key.as_ref();
            prefix(name).is_some_and(|p| p != b"xmlns") && local_name(name) == key
        })
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Borrow a part as UTF-8 text.
pub(crate) fn as_str<'a>(data: &'a [u8], part: &str) -> Result<&'a str> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::DocumentUnreadable(format!("part '{}' is not UTF-8: {}", part, e)))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Escape text for use in element content or attribute values.
pub(crate) fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}
