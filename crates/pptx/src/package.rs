//! OPC package handling: parts, content types and relationships.
//!
//! A `.pptx` file is a ZIP archive of XML parts. Parts are kept as raw bytes
//! in archive order so anything this crate does not touch is written back
//! unchanged.

use crate::xml::{as_str, attr, escape, local_name};
use powerpointless_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek, Write};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

/// Name of the content types part.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Upper bound on the buffer reserved up front for a part.
///
/// The uncompressed size in the ZIP header is not trusted beyond this.
const PART_CAPACITY_HINT: usize = 1 << 20;

/// Relationship type URIs. Matched by suffix so Strict OOXML documents work too.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Whether `rel_type` is `expected`, ignoring the namespace base.
    pub fn matches(rel_type: &str, expected: &str) -> bool {
        match expected.rsplit_once('/') {
            Some((_, suffix)) => rel_type
                .rsplit_once('/')
                .is_some_and(|(_, actual)| actual == suffix),
            None => rel_type == expected,
        }
    }
}

/// Content type strings.
pub mod content_types {
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const PRESENTATION_MACRO: &str =
        "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml";
    pub const TEMPLATE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml";
    pub const TEMPLATE_MACRO: &str =
        "application/vnd.ms-powerpoint.template.macroEnabled.main+xml";
    pub const SLIDESHOW: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml";
    pub const SLIDESHOW_MACRO: &str =
        "application/vnd.ms-powerpoint.slideshow.macroEnabled.main+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const XML: &str = "application/xml";

    /// Main-part content types we accept as a presentation.
    pub const PRESENTATION_MAIN: &[&str] = &[
        PRESENTATION,
        PRESENTATION_MACRO,
        TEMPLATE,
        TEMPLATE_MACRO,
        SLIDESHOW,
        SLIDESHOW_MACRO,
    ];
}

/// A single part of the package.
#[derive(Debug, Clone)]
pub struct Part {
    /// Archive path without a leading slash, e.g. `ppt/slides/slide1.xml`.
    pub name: String,
    pub data: Vec<u8>,
}

/// An OPC package held in memory.
#[derive(Debug, Clone)]
pub struct Package {
    parts: Vec<Part>,
    content_types: ContentTypes,
}

impl Package {
    /// Read every part of a ZIP package.
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::DocumentUnreadable(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index).map_err(|e| {
                Error::DocumentUnreadable(format!("Failed to read ZIP entry {}: {}", index, e))
            })?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().trim_start_matches('/').to_string();
            let capacity = usize::try_from(file.size()).map_or(PART_CAPACITY_HINT, |size| {
                size.min(PART_CAPACITY_HINT)
            });
            let mut data = Vec::with_capacity(capacity);
            file.read_to_end(&mut data).map_err(|e| {
                Error::DocumentUnreadable(format!("Failed to read '{}': {}", name, e))
            })?;
            parts.push(Part { name, data });
        }

        log::debug!("Read {} part(s) from package", parts.len());
        Self::from_parts(parts)
    }

    /// Build a package from parts, pulling out `[Content_Types].xml`.
    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Result<Self> {
        let mut content_types = None;
        let mut rest = Vec::new();

        for part in parts {
            if part.name.eq_ignore_ascii_case(CONTENT_TYPES_PART) {
                content_types = Some(ContentTypes::parse(as_str(&part.data, &part.name)?)?);
            } else {
                rest.push(part);
            }
        }

        let content_types = content_types.ok_or_else(|| {
            Error::DocumentUnreadable(format!("package has no {}", CONTENT_TYPES_PART))
        })?;

        Ok(Self {
            parts: rest,
            content_types,
        })
    }

    /// Raw bytes of a part.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// A part as UTF-8 text, failing if it does not exist.
    pub fn part_str(&self, name: &str) -> Result<&str> {
        let data = self
            .part(name)
            .ok_or_else(|| Error::DocumentUnreadable(format!("File not found in package '{}'", name)))?;
        as_str(data, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.part(name).is_some()
    }

    /// Names of all parts, in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Replace a part's bytes, or append it when new.
    pub fn put_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Relationships whose source is `source` (`""` for the package itself).
    ///
    /// A part without a `.rels` companion has no relationships.
    pub fn relationships(&self, source: &str) -> Result<Relationships> {
        let rels_name = rels_part_name(source);
        match self.part(&rels_name) {
            Some(data) => Relationships::parse(as_str(data, &rels_name)?),
            None => Ok(Relationships::default()),
        }
    }

    /// Store the relationships of `source`.
    pub fn put_relationships(&mut self, source: &str, rels: &Relationships) {
        self.put_part(&rels_part_name(source), rels.to_xml().into_bytes());
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Name of the part the package-level `officeDocument` relationship points to.
    pub fn main_part(&self) -> Result<String> {
        let rels = self.relationships("")?;
        let rel = rels
            .iter()
            .find(|r| !r.external && rel_types::matches(&r.rel_type, rel_types::OFFICE_DOCUMENT))
            .ok_or_else(|| Error::DocumentUnreadable("package has no main document".to_string()))?;
        Ok(resolve_target("", &rel.target))
    }

    /// Write the package as a ZIP archive.
    pub fn save<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let zip_err = |e: zip::result::ZipError| Error::ZipError(e.to_string());

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file(CONTENT_TYPES_PART, options).map_err(zip_err)?;
        zip.write_all(self.content_types.to_xml().as_bytes())?;

        for part in &self.parts {
            zip.start_file(part.name.as_str(), options).map_err(zip_err)?;
            zip.write_all(&part.data)?;
        }

        log::debug!("Wrote {} part(s) to package", self.parts.len() + 1);
        zip.finish().map_err(zip_err)
    }
}

/// `[Content_Types].xml`: default types by extension and per-part overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut types = Self::default();
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) =
                                (attr(e, b"Extension"), attr(e, b"ContentType"))
                            {
                                types.defaults.push((ext.to_lowercase(), ct));
                            }
                        }
                        b"Override" => {
                            if let (Some(part), Some(ct)) =
                                (attr(e, b"PartName"), attr(e, b"ContentType"))
                            {
                                types
                                    .overrides
                                    .push((part.trim_start_matches('/').to_string(), ct));
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::DocumentUnreadable(format!(
                        "Error parsing content types: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(types)
    }

    /// Content type of a part: its override, else the default for its extension.
    pub fn content_type(&self, part: &str) -> Option<&str> {
        let part = part.trim_start_matches('/');
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(part))
        {
            return Some(ct);
        }

        let ext = part.rsplit_once('.')?.1.to_lowercase();
        self.defaults
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, ct)| ct.as_str())
    }

    pub fn set_default(&mut self, extension: &str, content_type: &str) {
        let extension = extension.to_lowercase();
        match self.defaults.iter_mut().find(|(e, _)| *e == extension) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.defaults.push((extension, content_type.to_string())),
        }
    }

    pub fn set_override(&mut self, part: &str, content_type: &str) {
        let part = part.trim_start_matches('/');
        match self
            .overrides
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(part))
        {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self
                .overrides
                .push((part.to_string(), content_type.to_string())),
        }
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        );
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                escape(ext),
                escape(ct)
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                "<Override PartName=\"/{}\" ContentType=\"{}\"/>",
                escape(part),
                escape(ct)
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// A single relationship from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URI, not a part.
    pub external: bool,
}

/// The relationships of one source part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut items = Vec::new();
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let (Some(id), Some(rel_type), Some(target)) =
                        (attr(e, b"Id"), attr(e, b"Type"), attr(e, b"Target"))
                    else {
                        log::warn!("Skipping relationship with missing attributes");
                        continue;
                    };
                    let external = attr(e, b"TargetMode").as_deref() == Some("External");
                    items.push(Relationship {
                        id,
                        rel_type,
                        target,
                        external,
                    });
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::DocumentUnreadable(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(Self { items })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Internal relationships of the given type, in document order.
    pub fn of_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.items
            .iter()
            .filter(move |r| !r.external && rel_types::matches(&r.rel_type, rel_type))
    }

    /// The lowest `rIdN` not yet in use.
    pub fn next_id(&self) -> String {
        (1..)
            .map(|n| format!("rId{}", n))
            .find(|id| self.get(id).is_none())
            .unwrap_or_default()
    }

    /// Add an internal relationship and return its id.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = self.next_id();
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external: false,
        });
        id
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        );
        for rel in &self.items {
            xml.push_str(&format!(
                "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"",
                escape(&rel.id),
                escape(&rel.rel_type),
                escape(&rel.target)
            ));
            if rel.external {
                xml.push_str(" TargetMode=\"External\"");
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Name of the `.rels` part for `source` (`""` is the package root).
pub fn rels_part_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source),
    }
}

fn directory(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against its source part.
pub fn resolve_target(source: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => {
            let dir = directory(source);
            if dir.is_empty() {
                target.to_string()
            } else {
                format!("{}/{}", dir, target)
            }
        }
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Relative target from `source` to the part `target`.
pub fn relative_target(source: &str, target: &str) -> String {
    let from: Vec<&str> = directory(source).split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count()
        .min(to.len().saturating_sub(1));

    let mut segments: Vec<&str> = vec![".."; from.len() - common];
    segments.extend(&to[common..]);
    segments.join("/")
}
