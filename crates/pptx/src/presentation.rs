//! The `presentation.xml` part: master and slide lists.

use crate::xml::{attr, local_name, prefix, prefixed_attr};
use powerpointless_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Namespace of relationship-id attributes such as `r:id`.
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Lowest id PowerPoint accepts for a `p:sldId`.
pub(crate) const MIN_SLIDE_ID: u32 = 256;

/// Highest id PowerPoint accepts for a `p:sldId`.
pub(crate) const MAX_SLIDE_ID: u32 = 2_147_483_647;

/// Root children that come before `p:sldIdLst` in the schema.
const BEFORE_SLIDE_LIST: &[&[u8]] =
    &[b"sldMasterIdLst", b"notesMasterIdLst", b"handoutMasterIdLst"];

/// One entry of `p:sldIdLst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlideId {
    pub id: u32,
    pub rel_id: String,
}

/// What the deck needs from `presentation.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PresentationInfo {
    /// Relationship ids of the slide masters, in `p:sldMasterIdLst` order.
    pub master_rel_ids: Vec<String>,
    /// Slides in `p:sldIdLst` order.
    pub slide_ids: Vec<SlideId>,
}

impl PresentationInfo {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut info = Self::default();
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"sldMasterId" => {
                            if let Some(rel_id) = prefixed_attr(e, b"id") {
                                info.master_rel_ids.push(rel_id);
                            }
                        }
                        b"sldId" => {
                            let id = attr(e, b"id").and_then(|v| v.parse().ok());
                            match (id, prefixed_attr(e, b"id")) {
                                (Some(id), Some(rel_id)) => {
                                    info.slide_ids.push(SlideId { id, rel_id })
                                }
                                _ => log::warn!("Skipping slide id entry with missing attributes"),
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::DocumentUnreadable(format!(
                        "Error parsing presentation: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(info)
    }

    /// The id for a new slide: one above the largest in use, at least 256.
    ///
    /// Once that would pass [`MAX_SLIDE_ID`], the lowest unused id in range
    /// is taken instead.
    pub fn next_slide_id(&self) -> u32 {
        let largest = self.slide_ids.iter().map(|s| s.id).max();
        match largest {
            None => MIN_SLIDE_ID,
            Some(id) if id < MAX_SLIDE_ID => (id + 1).max(MIN_SLIDE_ID),
            Some(_) => (MIN_SLIDE_ID..=MAX_SLIDE_ID)
                .find(|id| !self.slide_ids.iter().any(|s| s.id == *id))
                .unwrap_or(MAX_SLIDE_ID),
        }
    }
}

/// `prefix:local`, or just `local` for the default namespace.
fn qualify(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{}:{}", p, local),
        None => local.to_string(),
    }
}

fn slide_list_xml(p: Option<&str>, r: &str, declare_r: bool, slides: &[SlideId]) -> String {
    let list = qualify(p, "sldIdLst");
    let entry = qualify(p, "sldId");

    let mut xml = if declare_r {
        format!("<{list} xmlns:{r}=\"{RELATIONSHIPS_NS}\">")
    } else {
        format!("<{list}>")
    };
    for slide in slides {
        xml.push_str(&format!(
            "<{entry} id=\"{}\" {r}:id=\"{}\"/>",
            slide.id,
            crate::xml::escape(&slide.rel_id)
        ));
    }
    xml.push_str(&format!("</{list}>"));
    xml
}

/// Rewrite `p:sldIdLst` of `presentation.xml` to list exactly `slides`.
///
/// The list keeps its position when present; otherwise it is inserted after
/// the master lists. An empty slide list removes the element.
pub(crate) fn rewrite_slide_list(xml: &str, slides: &[SlideId]) -> Result<String> {
    let xml_err = |e: quick_xml::Error| Error::XmlError(e.to_string());

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + slides.len() * 48));

    let mut depth = 0usize;
    let mut p_prefix: Option<String> = None;
    let mut r_prefix: Option<String> = None;
    let mut skipping = false;
    let mut written = slides.is_empty();

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        if let Event::Eof = event {
            break;
        }

        let mut insert_here = false;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.name();
                let local = local_name(name.as_ref());
                let element_depth = depth + 1;
                if !is_empty {
                    depth += 1;
                }

                if skipping {
                    continue;
                }

                if element_depth == 1 {
                    p_prefix =
                        prefix(name.as_ref()).map(|p| String::from_utf8_lossy(p).into_owned());
                    r_prefix = e
                        .attributes()
                        .flatten()
                        .find(|a| a.value.as_ref() == RELATIONSHIPS_NS.as_bytes())
                        .and_then(|a| {
                            a.key
                                .as_ref()
                                .strip_prefix(b"xmlns:")
                                .map(|p| String::from_utf8_lossy(p).into_owned())
                        });
                } else if element_depth == 2 {
                    if local == b"sldIdLst" {
                        skipping = !is_empty;
                        if !written {
                            let (p, r) = (p_prefix.as_deref(), r_prefix.as_deref());
                            write_list(&mut writer, p, r, slides)?;
                            written = true;
                        }
                        continue;
                    }
                    if !written && !BEFORE_SLIDE_LIST.contains(&local) {
                        insert_here = true;
                        written = true;
                    }
                }
            }
            Event::End(_) => {
                let element_depth = depth;
                depth = depth.saturating_sub(1);

                if skipping {
                    if element_depth == 2 {
                        skipping = false;
                    }
                    continue;
                }

                if element_depth == 1 && !written {
                    insert_here = true;
                    written = true;
                }
            }
            _ => {
                if skipping {
                    continue;
                }
            }
        }

        if insert_here {
            write_list(&mut writer, p_prefix.as_deref(), r_prefix.as_deref(), slides)?;
        }
        writer.write_event(event).map_err(xml_err)?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::XmlError(e.to_string()))
}

fn write_list(
    writer: &mut Writer<Vec<u8>>,
    p: Option<&str>,
    r: Option<&str>,
    slides: &[SlideId],
) -> Result<()> {
    if slides.is_empty() {
        return Ok(());
    }
    let raw = slide_list_xml(p, r.unwrap_or("r"), r.is_none(), slides);
    writer.get_mut().write_all(raw.as_bytes())?;
    Ok(())
}
