//! Domain types for the parts of a deck the builder and extractor consume.

use serde::{Deserialize, Serialize};

/// The container format of a presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
}

impl DocumentFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" | "pptm" | "potx" | "ppsx" => Some(Self::Pptx),
            "ppt" | "pot" | "pps" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// The kind of element a shape is in the slide's shape tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// An auto shape or text box. The only kind that carries a text frame.
    AutoShape,
    /// A picture.
    Picture,
    /// A graphic frame (table, chart, diagram, OLE object).
    GraphicFrame,
    /// A group of shapes.
    Group,
    /// A connector line.
    Connector,
    /// Embedded ink or other content part.
    ContentPart,
}

/// Placeholder types as they appear in a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderKind {
    Title,
    CenterTitle,
    Subtitle,
    Body,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    Picture,
    SlideImage,
    Date,
    Footer,
    Header,
    SlideNumber,
    /// A type this crate does not know about, kept verbatim.
    Other(String),
}

impl PlaceholderKind {
    /// Parse the OOXML `type` attribute of `p:ph`. A missing attribute means `obj`.
    pub fn from_ooxml(value: Option<&str>) -> Self {
        match value.unwrap_or("obj") {
            "title" => Self::Title,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::Subtitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::Diagram,
            "media" => Self::Media,
            "pic" => Self::Picture,
            "sldImg" => Self::SlideImage,
            "dt" => Self::Date,
            "ftr" => Self::Footer,
            "hdr" => Self::Header,
            "sldNum" => Self::SlideNumber,
            other => Self::Other(other.to_string()),
        }
    }

    /// The OOXML `type` attribute value for this kind.
    pub fn as_ooxml(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Body => "body",
            Self::Object => "obj",
            Self::Chart => "chart",
            Self::Table => "tbl",
            Self::ClipArt => "clipArt",
            Self::Diagram => "dgm",
            Self::Media => "media",
            Self::Picture => "pic",
            Self::SlideImage => "sldImg",
            Self::Date => "dt",
            Self::Footer => "ftr",
            Self::Header => "hdr",
            Self::SlideNumber => "sldNum",
            Self::Other(value) => value,
        }
    }

    /// Whether a placeholder of this kind is a text slot.
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::Title | Self::CenterTitle | Self::Subtitle | Self::Body | Self::Object
        )
    }

    /// Whether this placeholder is copied onto slides created from a layout.
    ///
    /// Date, footer and slide number placeholders stay on the layout.
    pub fn is_cloneable(&self) -> bool {
        !matches!(self, Self::Date | Self::Footer | Self::SlideNumber)
    }

    /// Display name used when naming a freshly created placeholder shape.
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Title | Self::CenterTitle => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body => "Text Placeholder",
            Self::Object => "Content Placeholder",
            Self::Chart => "Chart Placeholder",
            Self::Table => "Table Placeholder",
            Self::ClipArt => "ClipArt Placeholder",
            Self::Diagram => "SmartArt Placeholder",
            Self::Media => "Media Placeholder",
            Self::Picture => "Picture Placeholder",
            Self::SlideImage => "Slide Image Placeholder",
            Self::Date => "Date Placeholder",
            Self::Footer => "Footer Placeholder",
            Self::Header => "Header Placeholder",
            Self::SlideNumber => "Slide Number Placeholder",
            Self::Other(_) => "Placeholder",
        }
    }
}

/// A placeholder slot on a layout or slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Position of the owning shape in the layout's or slide's shape list.
    pub shape: usize,

    /// The placeholder's `idx`, linking slide placeholders to layout ones.
    pub idx: u32,

    /// Placeholder type.
    pub kind: PlaceholderKind,

    /// Kind of the shape carrying the placeholder.
    pub shape_kind: ShapeKind,

    /// Shape name.
    pub name: String,
}

impl Placeholder {
    /// Create a placeholder carried by an auto shape.
    pub fn new(shape: usize, idx: u32, kind: PlaceholderKind, name: impl Into<String>) -> Self {
        Self {
            shape,
            idx,
            kind,
            shape_kind: ShapeKind::AutoShape,
            name: name.into(),
        }
    }

    /// Use a different carrying shape kind.
    pub fn with_shape_kind(mut self, shape_kind: ShapeKind) -> Self {
        self.shape_kind = shape_kind;
        self
    }

    /// Whether text can be assigned to this placeholder.
    pub fn accepts_text(&self) -> bool {
        self.shape_kind == ShapeKind::AutoShape && self.kind.accepts_text()
    }
}

/// The text container of a shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Raw text. Paragraphs are separated by `\n`, soft line breaks are `\x0b`.
    pub text: String,
}

impl TextFrame {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A visual element on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape id, unique within its slide.
    pub id: u32,

    /// Shape name.
    pub name: String,

    /// What kind of element this is.
    pub kind: ShapeKind,

    /// Placeholder details when the shape fills a layout slot.
    pub placeholder: Option<Placeholder>,

    /// The text container, present only on auto shapes.
    pub text_frame: Option<TextFrame>,
}

impl Shape {
    /// An auto shape holding `text`.
    pub fn text_box(id: u32, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ShapeKind::AutoShape,
            placeholder: None,
            text_frame: Some(TextFrame::new(text)),
        }
    }

    /// A shape of the given kind with no text frame.
    pub fn without_text(id: u32, name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            placeholder: None,
            text_frame: None,
        }
    }

    /// The raw text of the shape, if it has a text frame.
    pub fn text(&self) -> Option<&str> {
        self.text_frame.as_ref().map(|frame| frame.text.as_str())
    }
}

/// A reusable slide template from a slide master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Implementation-defined handle used by the deck to find the layout again.
    pub id: String,

    /// Layout name, e.g. "Title Slide".
    pub name: String,

    /// Cloneable placeholders, ordered by `idx`.
    pub placeholders: Vec<Placeholder>,
}

impl Layout {
    /// Create a layout, ordering its placeholders by `idx`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, placeholders: Vec<Placeholder>) -> Self {
        let mut placeholders: Vec<Placeholder> = placeholders
            .into_iter()
            .filter(|ph| ph.kind.is_cloneable())
            .collect();
        placeholders.sort_by_key(|ph| ph.idx);

        Self {
            id: id.into(),
            name: name.into(),
            placeholders,
        }
    }
}
