//! Shape tree reading and writing for slides and layouts.
//!
//! Only the direct children of `p:spTree` are shapes as far as the deck is
//! concerned; members of a group shape are part of the group.

use crate::xml::{attr, escape, local_name, prefix};
use powerpointless_core::{Error, Placeholder, PlaceholderKind, Result, Shape, ShapeKind, TextFrame};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Soft line break marker inside a paragraph.
const LINE_BREAK: char = '\x0b';

/// Placeholder attributes read from `p:ph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderAttrs {
    pub kind: PlaceholderKind,
    pub idx: u32,
    pub orient: Option<String>,
    pub sz: Option<String>,
}

/// A top-level shape as read from XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShapeInfo {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    pub placeholder: Option<PlaceholderAttrs>,
    /// Text frame content. Always `Some` for auto shapes, even without a `p:txBody`.
    pub text: Option<String>,
}

impl ShapeInfo {
    fn new(kind: ShapeKind) -> Self {
        Self {
            id: 0,
            name: String::new(),
            kind,
            placeholder: None,
            text: (kind == ShapeKind::AutoShape).then(String::new),
        }
    }

    /// Convert to the core model, given the shape's position in the tree.
    pub fn to_shape(&self, position: usize) -> Shape {
        Shape {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            placeholder: self.placeholder.as_ref().map(|ph| Placeholder {
                shape: position,
                idx: ph.idx,
                kind: ph.kind.clone(),
                shape_kind: self.kind,
                name: self.name.clone(),
            }),
            text_frame: self.text.clone().map(TextFrame::new),
        }
    }
}

/// The parsed `p:cSld` of a slide, layout or master.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShapeTree {
    /// `p:cSld/@name`, set on layouts.
    pub name: Option<String>,
    pub shapes: Vec<ShapeInfo>,
}

impl ShapeTree {
    pub fn to_shapes(&self) -> Vec<Shape> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(position, info)| info.to_shape(position))
            .collect()
    }
}

fn shape_kind(local: &[u8]) -> Option<ShapeKind> {
    match local {
        b"sp" => Some(ShapeKind::AutoShape),
        b"pic" => Some(ShapeKind::Picture),
        b"graphicFrame" => Some(ShapeKind::GraphicFrame),
        b"grpSp" => Some(ShapeKind::Group),
        b"cxnSp" => Some(ShapeKind::Connector),
        b"contentPart" => Some(ShapeKind::ContentPart),
        _ => None,
    }
}

fn read_placeholder(e: &quick_xml::events::BytesStart) -> PlaceholderAttrs {
    PlaceholderAttrs {
        kind: PlaceholderKind::from_ooxml(attr(e, b"type").as_deref()),
        idx: attr(e, b"idx").and_then(|v| v.parse().ok()).unwrap_or(0),
        orient: attr(e, b"orient"),
        sz: attr(e, b"sz"),
    }
}

/// Tracks where we are relative to the shape tree while streaming a part.
#[derive(Debug, Default)]
struct TreeCursor {
    depth: usize,
    /// Depth of the `p:spTree` element.
    tree: Option<usize>,
    /// Whether the single shape tree has already been closed.
    tree_done: bool,
}

impl TreeCursor {
    /// Depth relative to the shape tree's children (1 = a shape element).
    fn level(&self, depth: usize) -> Option<usize> {
        self.tree.and_then(|tree| depth.checked_sub(tree))
    }

    fn open(&mut self, local: &[u8]) -> usize {
        self.depth += 1;
        if self.tree.is_none() && !self.tree_done && local == b"spTree" {
            self.tree = Some(self.depth);
        }
        self.depth
    }

    fn close(&mut self) -> usize {
        let depth = self.depth;
        if self.tree == Some(depth) {
            self.tree = None;
            self.tree_done = true;
        }
        self.depth = self.depth.saturating_sub(1);
        depth
    }
}

/// Parse the shape tree of a slide, layout or master part.
pub(crate) fn parse_shape_tree(xml: &str) -> Result<ShapeTree> {
    let mut reader = Reader::from_str(xml);
    let mut tree = ShapeTree::default();
    let mut cursor = TreeCursor::default();

    let mut current: Option<ShapeInfo> = None;
    let mut in_text_body = false;
    let mut in_text = false;
    let mut paragraphs = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::DocumentUnreadable(format!("XML parsing error: {}", e)))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"cSld" && tree.name.is_none() {
                    tree.name = attr(e, b"name");
                }

                let depth = if is_empty {
                    cursor.depth + 1
                } else {
                    cursor.open(local)
                };

                match (cursor.level(depth), local) {
                    (Some(1), local) => {
                        if let Some(kind) = shape_kind(local) {
                            let shape = ShapeInfo::new(kind);
                            if is_empty {
                                tree.shapes.push(shape);
                            } else {
                                current = Some(shape);
                            }
                        }
                    }
                    (Some(3), b"cNvPr") => {
                        if let Some(shape) = current.as_mut() {
                            shape.id = attr(e, b"id").and_then(|v| v.parse().ok()).unwrap_or(0);
                            shape.name = attr(e, b"name").unwrap_or_default();
                        }
                    }
                    (Some(4), b"ph") => {
                        if let Some(shape) = current.as_mut() {
                            shape.placeholder = Some(read_placeholder(e));
                        }
                    }
                    (Some(2), b"txBody") => {
                        in_text_body = !is_empty
                            && current.as_ref().is_some_and(|s| s.kind == ShapeKind::AutoShape);
                        paragraphs = 0;
                    }
                    (Some(3), b"p") if in_text_body => {
                        paragraphs += 1;
                        if paragraphs > 1 {
                            if let Some(text) = current.as_mut().and_then(|s| s.text.as_mut()) {
                                text.push('\n');
                            }
                        }
                    }
                    (Some(4), b"br") if in_text_body => {
                        if let Some(text) = current.as_mut().and_then(|s| s.text.as_mut()) {
                            text.push(LINE_BREAK);
                        }
                    }
                    (_, b"t") if in_text_body && !is_empty => {
                        in_text = true;
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) if in_text => {
                let value = e
                    .unescape()
                    .map_err(|e| Error::DocumentUnreadable(format!("XML text error: {}", e)))?;
                if let Some(text) = current.as_mut().and_then(|s| s.text.as_mut()) {
                    text.push_str(&value);
                }
            }
            Event::CData(ref e) if in_text => {
                if let Some(text) = current.as_mut().and_then(|s| s.text.as_mut()) {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                let level = cursor.level(cursor.depth);

                match (level, local) {
                    (Some(1), _) => {
                        if let Some(shape) = current.take() {
                            tree.shapes.push(shape);
                        }
                        in_text_body = false;
                    }
                    (Some(2), b"txBody") => in_text_body = false,
                    (_, b"t") => in_text = false,
                    _ => {}
                }
                cursor.close();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tree)
}

/// Render text as DrawingML paragraphs.
///
/// `\n` starts a new paragraph and `\x0b` becomes `a:br`, so the text reads
/// back exactly as given. Other control characters XML cannot carry are
/// written as `_xHHHH_`.
pub(crate) fn paragraphs_xml(text: &str, a: &str) -> String {
    let mut xml = String::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            xml.push_str(&format!("<{a}:p/>"));
            continue;
        }

        xml.push_str(&format!("<{a}:p>"));
        for (i, segment) in paragraph.split(LINE_BREAK).enumerate() {
            if i > 0 {
                xml.push_str(&format!("<{a}:br/>"));
            }
            if !segment.is_empty() {
                let escaped = escape(&escape_control_chars(segment)).replace('\r', "&#13;");
                xml.push_str(&format!("<{a}:r><{a}:t>{escaped}</{a}:t></{a}:r>"));
            }
        }
        xml.push_str(&format!("</{a}:p>"));
    }
    xml
}

/// Replace characters that are not allowed in XML 1.0 with `_xHHHH_`.
///
/// Tab and `\r` are legal XML and kept as they are.
fn escape_control_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\x00'..='\x08' | '\x0c' | '\x0e'..='\x1f' => {
                escaped.push_str(&format!("_x{:04X}_", c as u32))
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn text_body_xml(p: &str, a: &str, text: &str) -> String {
    format!(
        "<{p}:txBody><{a}:bodyPr/><{a}:lstStyle/>{}</{p}:txBody>",
        paragraphs_xml(text, a)
    )
}

fn prefix_of(name: &[u8], fallback: &str) -> String {
    prefix(name)
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

/// Replace the text of the top-level shape at `position` in a slide part.
///
/// Body properties and list styles of an existing `p:txBody` are kept, its
/// paragraphs are replaced. An auto shape without a text body gets one.
pub(crate) fn replace_shape_text(xml: &str, position: usize, text: &str) -> Result<String> {
    let xml_err = |e: quick_xml::Error| Error::XmlError(e.to_string());

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + text.len() * 2));
    let mut cursor = TreeCursor::default();

    let mut index = 0usize;
    let mut in_target = false;
    let mut target_prefix = String::from("p");
    let mut drawing_prefix = String::from("a");
    let mut in_text_body = false;
    let mut body_written = false;
    let mut skip_until: Option<usize> = None;
    let mut found = false;

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        if let Event::Eof = event {
            break;
        }

        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.name();
                let local = local_name(name.as_ref());
                let depth = if is_empty {
                    cursor.depth + 1
                } else {
                    cursor.open(local)
                };

                if skip_until.is_some() {
                    continue;
                }

                match cursor.level(depth) {
                    Some(1) if shape_kind(local).is_some() => {
                        if index == position {
                            found = true;
                            if local != b"sp" {
                                return Err(Error::InvalidPlaceholder(format!(
                                    "shape {} is a '{}' and has no text frame",
                                    position,
                                    String::from_utf8_lossy(local)
                                )));
                            }
                            target_prefix = prefix_of(name.as_ref(), "p");
                            in_target = !is_empty;
                            if is_empty {
                                // `<p:sp/>` is degenerate; expand it around a text body.
                                let raw = format!(
                                    "<{0}:sp>{1}</{0}:sp>",
                                    target_prefix,
                                    text_body_xml(&target_prefix, &drawing_prefix, text)
                                );
                                writer.get_mut().write_all(raw.as_bytes())?;
                                index += 1;
                                continue;
                            }
                        }
                        index += 1;
                    }
                    Some(2) if in_target && local == b"txBody" => {
                        body_written = true;
                        if is_empty {
                            let raw =
                                text_body_xml(&target_prefix, &drawing_prefix, text);
                            writer.get_mut().write_all(raw.as_bytes())?;
                            continue;
                        }
                        in_text_body = true;
                    }
                    Some(2) if in_target && local == b"extLst" && !body_written => {
                        body_written = true;
                        let raw = text_body_xml(&target_prefix, &drawing_prefix, text);
                        writer.get_mut().write_all(raw.as_bytes())?;
                    }
                    Some(3) if in_text_body => {
                        if local == b"bodyPr" {
                            drawing_prefix = prefix_of(name.as_ref(), "a");
                        }
                        if local == b"p" {
                            if !is_empty {
                                skip_until = Some(depth);
                            }
                            continue;
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                let depth = cursor.depth;
                let name = e.name();
                let local = local_name(name.as_ref());
                let level = cursor.level(depth);
                cursor.close();

                if let Some(skip) = skip_until {
                    if skip == depth {
                        skip_until = None;
                    }
                    continue;
                }

                match level {
                    Some(2) if in_text_body && local == b"txBody" => {
                        let raw = paragraphs_xml(text, &drawing_prefix);
                        writer.get_mut().write_all(raw.as_bytes())?;
                        in_text_body = false;
                    }
                    Some(1) if in_target => {
                        if !body_written {
                            let raw = text_body_xml(&target_prefix, &drawing_prefix, text);
                            writer.get_mut().write_all(raw.as_bytes())?;
                        }
                        in_target = false;
                    }
                    _ => {}
                }
            }
            _ => {
                if skip_until.is_some() {
                    continue;
                }
            }
        }

        writer.write_event(event).map_err(xml_err)?;
    }

    if !found {
        return Err(Error::XmlError(format!("no shape at position {}", position)));
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::XmlError(e.to_string()))
}

/// Namespaces declared on a new slide.
const SLIDE_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// XML of a new slide carrying empty copies of the layout's placeholders.
///
/// Date, footer and slide number placeholders are left on the layout.
/// Text placeholders get an empty text body so they are editable.
pub(crate) fn new_slide_xml(layout: &ShapeTree) -> String {
    let mut shapes = String::new();
    let mut next_id = 2u32;

    for shape in &layout.shapes {
        let Some(ph) = shape.placeholder.as_ref() else {
            continue;
        };
        if !ph.kind.is_cloneable() {
            continue;
        }

        let id = next_id;
        next_id += 1;
        let name = format!("{} {}", ph.kind.base_name(), id - 1);

        let mut ph_attrs = String::new();
        if ph.kind != PlaceholderKind::Object {
            ph_attrs.push_str(&format!(" type=\"{}\"", escape(ph.kind.as_ooxml())));
        }
        if let Some(orient) = ph.orient.as_deref().filter(|o| *o != "horz") {
            ph_attrs.push_str(&format!(" orient=\"{}\"", escape(orient)));
        }
        if let Some(sz) = ph.sz.as_deref().filter(|s| *s != "full") {
            ph_attrs.push_str(&format!(" sz=\"{}\"", escape(sz)));
        }
        if ph.idx != 0 {
            ph_attrs.push_str(&format!(" idx=\"{}\"", ph.idx));
        }

        let text_body = if ph.kind.accepts_text() {
            "<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>"
        } else {
            ""
        };

        shapes.push_str(&format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{}\"/>\
             <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
             <p:nvPr><p:ph{ph_attrs}/></p:nvPr></p:nvSpPr><p:spPr/>{text_body}</p:sp>",
            escape(&name)
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <p:sld {SLIDE_NAMESPACES}><p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
    )
}
