//! [`Deck`] backed by a `.pptx` package.

use crate::package::{
    content_types, rel_types, relative_target, resolve_target, Package, Relationships,
};
use crate::presentation::{rewrite_slide_list, PresentationInfo, SlideId};
use crate::shapes::{new_slide_xml, parse_shape_tree, replace_shape_text, ShapeTree};
use crate::template;
use crate::xml::{local_name, prefixed_attr};
use powerpointless_core::{Deck, DocumentFormat, Error, Layout, Result, Shape};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A slide layout together with the shape tree new slides are cloned from.
#[derive(Debug, Clone)]
struct LayoutPart {
    layout: Layout,
    tree: ShapeTree,
}

#[derive(Debug, Clone)]
struct SlidePart {
    name: String,
    shapes: Vec<Shape>,
}

/// A presentation opened from (or written to) the Office Open XML format.
///
/// Parts the deck does not touch are carried through unchanged on save.
#[derive(Debug, Clone)]
pub struct PptxDeck {
    package: Package,
    presentation_part: String,
    presentation_rels: Relationships,
    info: PresentationInfo,
    /// Layouts per slide master, in `p:sldMasterIdLst` order.
    masters: Vec<Vec<LayoutPart>>,
    /// Layouts of the first master, as handed out by [`Deck::master_layouts`].
    first_master_layouts: Vec<Layout>,
    slides: Vec<SlidePart>,
}

impl PptxDeck {
    /// Open a presentation from any seekable reader.
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 8];
        let read = read_up_to(&mut reader, &mut magic)?;
        reader.seek(SeekFrom::Start(0))?;

        match DocumentFormat::from_magic(&magic[..read]) {
            Some(DocumentFormat::Pptx) => {}
            Some(DocumentFormat::Ppt) => {
                return Err(Error::UnsupportedFormat(
                    "legacy PowerPoint 97-2003 (.ppt) files are not supported".to_string(),
                ))
            }
            None => {
                return Err(Error::DocumentUnreadable(
                    "not a ZIP-based Office Open XML package".to_string(),
                ))
            }
        }

        Self::from_package(Package::open(reader)?)
    }

    /// Open a presentation held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::open(Cursor::new(data))
    }

    /// Open a presentation file.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening presentation {}", path.display());
        Self::open(BufReader::new(File::open(path)?))
    }

    /// The built-in blank template: one master, one "Title Slide" layout, no slides.
    pub fn default_template() -> Result<Self> {
        Self::from_package(Package::from_parts(template::default_parts())?)
    }

    fn from_package(package: Package) -> Result<Self> {
        let presentation_part = package.main_part()?;
        let content_type = package
            .content_types()
            .content_type(&presentation_part)
            .unwrap_or_default();
        if !content_types::PRESENTATION_MAIN.contains(&content_type) {
            return Err(Error::DocumentUnreadable(format!(
                "main part '{}' is not a presentation ({})",
                presentation_part, content_type
            )));
        }

        let info = PresentationInfo::parse(package.part_str(&presentation_part)?)?;
        let presentation_rels = package.relationships(&presentation_part)?;

        let mut masters = Vec::with_capacity(info.master_rel_ids.len());
        for rel_id in &info.master_rel_ids {
            let master_part = target_of(&presentation_rels, &presentation_part, rel_id)?;
            masters.push(load_layouts(&package, &master_part)?);
        }

        let mut slides = Vec::with_capacity(info.slide_ids.len());
        for slide_id in &info.slide_ids {
            let name = target_of(&presentation_rels, &presentation_part, &slide_id.rel_id)?;
            let shapes = parse_shape_tree(package.part_str(&name)?)?.to_shapes();
            slides.push(SlidePart { name, shapes });
        }

        let first_master_layouts = masters
            .first()
            .map(|layouts| layouts.iter().map(|l| l.layout.clone()).collect())
            .unwrap_or_default();

        log::info!(
            "Loaded presentation with {} master(s) and {} slide(s)",
            masters.len(),
            slides.len()
        );

        Ok(Self {
            package,
            presentation_part,
            presentation_rels,
            info,
            masters,
            first_master_layouts,
            slides,
        })
    }

    /// Write the deck as a `.pptx` archive.
    pub fn save<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.package.save(writer)
    }

    /// The deck as `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.save(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the deck to a file, replacing it if it exists.
    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = self.save(BufWriter::new(File::create(path)?))?;
        writer.flush()?;
        log::debug!("Saved presentation to {}", path.display());
        Ok(())
    }

    /// The underlying package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Part name of each slide, in slide order.
    pub fn slide_parts(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.name.as_str())
    }

    fn find_layout(&self, id: &str) -> Option<&LayoutPart> {
        self.masters.iter().flatten().find(|l| l.layout.id == id)
    }

    /// Lowest free `slidesN.xml` name next to the presentation part.
    fn next_slide_part(&self) -> String {
        let dir = match self.presentation_part.rsplit_once('/') {
            Some((dir, _)) => format!("{}/slides", dir),
            None => "slides".to_string(),
        };
        (1..)
            .map(|n| format!("{}/slide{}.xml", dir, n))
            .find(|name| !self.package.contains(name))
            .unwrap_or_default()
    }
}

impl Deck for PptxDeck {
    fn master_layouts(&self) -> Option<&[Layout]> {
        if self.masters.is_empty() {
            None
        } else {
            Some(&self.first_master_layouts)
        }
    }

    fn add_slide(&mut self, layout: &Layout) -> Result<usize> {
        let tree = self
            .find_layout(&layout.id)
            .map(|l| l.tree.clone())
            .ok_or(Error::MissingLayout)?;

        let name = self.next_slide_part();
        let xml = new_slide_xml(&tree);
        let shapes = parse_shape_tree(&xml)?.to_shapes();
        self.package.put_part(&name, xml.into_bytes());

        let mut slide_rels = Relationships::default();
        slide_rels.add(rel_types::SLIDE_LAYOUT, &relative_target(&name, &layout.id));
        self.package.put_relationships(&name, &slide_rels);
        self.package
            .content_types_mut()
            .set_override(&name, content_types::SLIDE);

        let rel_id = self.presentation_rels.add(
            rel_types::SLIDE,
            &relative_target(&self.presentation_part, &name),
        );
        self.package
            .put_relationships(&self.presentation_part, &self.presentation_rels);

        let id = self.info.next_slide_id();
        self.info.slide_ids.push(SlideId { id, rel_id });
        let presentation = rewrite_slide_list(
            self.package.part_str(&self.presentation_part)?,
            &self.info.slide_ids,
        )?;
        self.package
            .put_part(&self.presentation_part, presentation.into_bytes());

        log::debug!("Added {} from layout '{}'", name, layout.name);
        self.slides.push(SlidePart { name, shapes });
        Ok(self.slides.len() - 1)
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn shapes(&self, slide: usize) -> Result<&[Shape]> {
        self.slides
            .get(slide)
            .map(|s| s.shapes.as_slice())
            .ok_or(Error::SlideNotFound(slide))
    }

    fn set_text(&mut self, slide: usize, shape: usize, text: &str) -> Result<()> {
        let part = self.slides.get(slide).ok_or(Error::SlideNotFound(slide))?;
        if shape >= part.shapes.len() {
            return Err(Error::ShapeNotFound { slide, shape });
        }

        let xml = replace_shape_text(self.package.part_str(&part.name)?, shape, text)?;
        let shapes = parse_shape_tree(&xml)?.to_shapes();
        let name = part.name.clone();
        self.package.put_part(&name, xml.into_bytes());
        self.slides[slide].shapes = shapes;
        Ok(())
    }
}

/// Fill `buf` as far as the reader allows.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Part name a relationship id points at, failing on dangling references.
fn target_of(rels: &Relationships, source: &str, rel_id: &str) -> Result<String> {
    let rel = rels.get(rel_id).filter(|r| !r.external).ok_or_else(|| {
        Error::DocumentUnreadable(format!("'{}' has no relationship '{}'", source, rel_id))
    })?;
    Ok(resolve_target(source, &rel.target))
}

/// Relationship ids listed in a master's `p:sldLayoutIdLst`.
fn layout_rel_ids(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldLayoutId" =>
            {
                if let Some(rel_id) = prefixed_attr(e, b"id") {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::DocumentUnreadable(format!(
                    "Error parsing slide master: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

fn load_layouts(package: &Package, master_part: &str) -> Result<Vec<LayoutPart>> {
    let rel_ids = layout_rel_ids(package.part_str(master_part)?)?;
    let rels = package.relationships(master_part)?;

    let mut layouts = Vec::with_capacity(rel_ids.len());
    for rel_id in &rel_ids {
        let part = target_of(&rels, master_part, rel_id)?;
        let tree = parse_shape_tree(package.part_str(&part)?)?;
        let placeholders = tree
            .to_shapes()
            .into_iter()
            .filter_map(|shape| shape.placeholder)
            .collect();
        let name = tree.name.clone().unwrap_or_default();
        layouts.push(LayoutPart {
            layout: Layout::new(part, name, placeholders),
            tree,
        });
    }

    log::debug!("Master {} has {} layout(s)", master_part, layouts.len());
    Ok(layouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{Part, CONTENT_TYPES_PART};
    use powerpointless_core::{create_subtitles, extract_subtitles, PlaceholderKind};

    fn roundtrip(deck: &PptxDeck) -> PptxDeck {
        PptxDeck::from_bytes(&deck.to_bytes().unwrap()).unwrap()
    }

    /// Default template parts with some of them replaced.
    fn template_with(overrides: &[(&str, &str)]) -> Vec<Part> {
        template::default_parts()
            .map(|mut part| {
                if let Some((_, xml)) = overrides.iter().find(|(name, _)| *name == part.name) {
                    part.data = xml.as_bytes().to_vec();
                }
                part
            })
            .collect()
    }

    #[test]
    fn test_default_template() {
        let deck = PptxDeck::default_template().unwrap();
        assert_eq!(deck.slide_count(), 0);

        let layouts = deck.master_layouts().unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].name, "Title Slide");
        assert_eq!(layouts[0].id, "ppt/slideLayouts/slideLayout1.xml");
        assert_eq!(layouts[0].placeholders[0].kind, PlaceholderKind::CenterTitle);
        assert_eq!(layouts[0].placeholders[1].kind, PlaceholderKind::Subtitle);
    }

    #[test]
    fn test_create_then_extract_through_bytes() {
        let deck = PptxDeck::default_template().unwrap();
        let deck = create_subtitles(deck, ["Alpha", "Beta", "Gamma"]).unwrap();
        assert_eq!(deck.slide_count(), 3);

        let reopened = roundtrip(&deck);
        assert_eq!(reopened.slide_count(), 3);
        assert_eq!(
            reopened.slide_parts().collect::<Vec<_>>(),
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide3.xml"
            ]
        );
        assert_eq!(extract_subtitles(&reopened), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(
            reopened.placeholder_text(1, 0).unwrap().as_deref(),
            Some("Beta")
        );
    }

    #[test]
    fn test_new_slides_are_registered_in_the_package() {
        let deck = create_subtitles(PptxDeck::default_template().unwrap(), ["One"]).unwrap();
        let package = deck.package();

        assert_eq!(
            package.content_types().content_type("ppt/slides/slide1.xml"),
            Some(content_types::SLIDE)
        );
        let slide_rels = package.relationships("ppt/slides/slide1.xml").unwrap();
        let layout = slide_rels.of_type(rel_types::SLIDE_LAYOUT).next().unwrap();
        assert_eq!(layout.target, "../slideLayouts/slideLayout1.xml");

        let presentation_rels = package.relationships("ppt/presentation.xml").unwrap();
        let slide = presentation_rels.of_type(rel_types::SLIDE).next().unwrap();
        assert_eq!(slide.id, "rId6");
        assert_eq!(slide.target, "slides/slide1.xml");

        let info = PresentationInfo::parse(package.part_str("ppt/presentation.xml").unwrap()).unwrap();
        assert_eq!(
            info.slide_ids,
            vec![SlideId {
                id: 256,
                rel_id: "rId6".to_string()
            }]
        );
    }

    #[test]
    fn test_appending_to_existing_slides() {
        let deck = create_subtitles(PptxDeck::default_template().unwrap(), ["first"]).unwrap();
        let deck = create_subtitles(roundtrip(&deck), ["second"]).unwrap();
        let reopened = roundtrip(&deck);

        assert_eq!(extract_subtitles(&reopened), vec!["first", "second"]);
        assert_eq!(
            reopened.info.slide_ids.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![256, 257]
        );
    }

    #[test]
    fn test_text_survives_special_characters() {
        let lines = ["Fish & <chips>", "\"quoted\" 'text'", "  leading"];
        let deck = create_subtitles(PptxDeck::default_template().unwrap(), lines).unwrap();
        assert_eq!(
            extract_subtitles(&roundtrip(&deck)),
            vec!["Fish & <chips>", "\"quoted\" 'text'", "  leading"]
        );
    }

    #[test]
    fn test_control_characters_are_escaped_in_slide_xml() {
        let deck = create_subtitles(
            PptxDeck::default_template().unwrap(),
            ["page\x0cbreak", "bell\x07"],
        )
        .unwrap();
        let reopened = roundtrip(&deck);

        for part in reopened.slide_parts() {
            let xml = reopened.package().part_str(part).unwrap();
            assert!(!xml.contains('\x0c'));
            assert!(!xml.contains('\x07'));
        }
        assert_eq!(
            extract_subtitles(&reopened),
            vec!["page_x000C_break", "bell_x0007_"]
        );
    }

    #[test]
    fn test_blank_lines_make_blank_slides() {
        let deck = create_subtitles(PptxDeck::default_template().unwrap(), ["a", "", "b"]).unwrap();
        let reopened = roundtrip(&deck);
        assert_eq!(reopened.slide_count(), 3);
        assert_eq!(extract_subtitles(&reopened), vec!["a", "b"]);
    }

    #[test]
    fn test_set_text_bounds() {
        let mut deck = create_subtitles(PptxDeck::default_template().unwrap(), ["x"]).unwrap();
        assert!(matches!(
            deck.set_text(5, 0, "y"),
            Err(Error::SlideNotFound(5))
        ));
        assert!(matches!(
            deck.set_text(0, 9, "y"),
            Err(Error::ShapeNotFound { slide: 0, shape: 9 })
        ));
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let mut deck = PptxDeck::default_template().unwrap();
        let stranger = Layout::new("ppt/slideLayouts/slideLayout99.xml", "Nope", Vec::new());
        assert!(matches!(deck.add_slide(&stranger), Err(Error::MissingLayout)));
    }

    #[test]
    fn test_non_zip_is_unreadable() {
        let err = PptxDeck::from_bytes(b"this is not a presentation").unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));

        let err = PptxDeck::from_bytes(b"").unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
    }

    #[test]
    fn test_legacy_ppt_is_unsupported() {
        let mut data = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        data.extend_from_slice(&[0u8; 504]);
        let err = PptxDeck::from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_non_presentation_package_is_unreadable() {
        let content_types = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
        let root_rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;
        let package = Package::from_parts(vec![
            Part {
                name: CONTENT_TYPES_PART.to_string(),
                data: content_types.as_bytes().to_vec(),
            },
            Part {
                name: "_rels/.rels".to_string(),
                data: root_rels.as_bytes().to_vec(),
            },
            Part {
                name: "word/document.xml".to_string(),
                data: b"<w:document/>".to_vec(),
            },
        ])
        .unwrap();
        let bytes = package.save(Cursor::new(Vec::new())).unwrap().into_inner();

        let err = PptxDeck::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
    }

    #[test]
    fn test_deck_without_master() {
        let presentation = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#;
        let parts = template_with(&[("ppt/presentation.xml", presentation)]);
        let deck = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap();

        assert!(deck.master_layouts().is_none());
        assert!(matches!(
            create_subtitles(deck, ["x"]),
            Err(Error::MissingMaster)
        ));
    }

    #[test]
    fn test_master_without_layouts() {
        let master = r#"<p:sldMaster xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree/></p:cSld></p:sldMaster>"#;
        let parts = template_with(&[("ppt/slideMasters/slideMaster1.xml", master)]);
        let deck = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap();

        assert_eq!(deck.master_layouts().map(<[Layout]>::len), Some(0));
        assert!(matches!(
            create_subtitles(deck, ["x"]),
            Err(Error::MissingLayout)
        ));
    }

    #[test]
    fn test_layout_starting_with_picture_placeholder() {
        let layout = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld name="Picture"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Picture Placeholder 1"/><p:cNvSpPr/><p:nvPr><p:ph type="pic"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp></p:spTree></p:cSld></p:sldLayout>"#;
        let parts = template_with(&[("ppt/slideLayouts/slideLayout1.xml", layout)]);
        let deck = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap();

        assert!(matches!(
            create_subtitles(deck, ["x"]),
            Err(Error::InvalidPlaceholder(_))
        ));
    }

    const BODY_ONLY_LAYOUT: &str = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld name="Body Only"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Text Placeholder 1"/><p:cNvSpPr/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp></p:spTree></p:cSld></p:sldLayout>"#;

    #[test]
    fn test_layout_without_placeholder_zero() {
        let parts = template_with(&[("ppt/slideLayouts/slideLayout1.xml", BODY_ONLY_LAYOUT)]);
        let deck = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap();

        assert!(matches!(
            create_subtitles(deck, ["x"]),
            Err(Error::InvalidPlaceholder(_))
        ));
    }

    #[test]
    fn test_text_goes_to_placeholder_zero_not_first_shape() {
        let layout = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld name="Reversed"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Subtitle 1"/><p:cNvSpPr/><p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Title 2"/><p:cNvSpPr/><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp></p:spTree></p:cSld></p:sldLayout>"#;
        let parts = template_with(&[("ppt/slideLayouts/slideLayout1.xml", layout)]);
        let deck = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap();

        let reopened = roundtrip(&create_subtitles(deck, ["Chorus"]).unwrap());
        let shapes = reopened.shapes(0).unwrap();
        assert_eq!(shapes[0].text(), Some(""));
        assert_eq!(shapes[1].text(), Some("Chorus"));
        assert_eq!(
            reopened.placeholder_text(0, 0).unwrap().as_deref(),
            Some("Chorus")
        );
    }

    #[test]
    fn test_dangling_slide_reference_is_unreadable() {
        let presentation = r#"<p:presentation xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId42"/></p:sldIdLst></p:presentation>"#;
        let parts = template_with(&[("ppt/presentation.xml", presentation)]);
        let err = PptxDeck::from_package(Package::from_parts(parts).unwrap()).unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
    }

    #[test]
    fn test_save_path_and_open_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.pptx");

        let deck = create_subtitles(PptxDeck::default_template().unwrap(), ["la", "di", "da"]).unwrap();
        deck.save_path(&path).unwrap();

        let reopened = PptxDeck::open_path(&path).unwrap();
        assert_eq!(extract_subtitles(&reopened), vec!["la", "di", "da"]);
    }
}
