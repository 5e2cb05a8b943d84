//! The blank deck used when no template is supplied.
//!
//! One slide master with a single "Title Slide" layout whose first
//! placeholder is a centered title, and no slides.

use crate::package::{Part, CONTENT_TYPES_PART};

const DEFAULT_PARTS: &[(&str, &str)] = &[
    (
        CONTENT_TYPES_PART,
        include_str!("../resources/default/content_types.xml"),
    ),
    ("_rels/.rels", include_str!("../resources/default/root.rels")),
    (
        "ppt/presentation.xml",
        include_str!("../resources/default/presentation.xml"),
    ),
    (
        "ppt/_rels/presentation.xml.rels",
        include_str!("../resources/default/presentation.xml.rels"),
    ),
    (
        "ppt/slideMasters/slideMaster1.xml",
        include_str!("../resources/default/slideMaster1.xml"),
    ),
    (
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        include_str!("../resources/default/slideMaster1.xml.rels"),
    ),
    (
        "ppt/slideLayouts/slideLayout1.xml",
        include_str!("../resources/default/slideLayout1.xml"),
    ),
    (
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        include_str!("../resources/default/slideLayout1.xml.rels"),
    ),
    ("ppt/theme/theme1.xml", include_str!("../resources/default/theme1.xml")),
    ("ppt/presProps.xml", include_str!("../resources/default/presProps.xml")),
    ("ppt/viewProps.xml", include_str!("../resources/default/viewProps.xml")),
    (
        "ppt/tableStyles.xml",
        include_str!("../resources/default/tableStyles.xml"),
    ),
];

/// Parts of the default template, content types first.
pub(crate) fn default_parts() -> impl Iterator<Item = Part> {
    DEFAULT_PARTS.iter().map(|(name, xml)| Part {
        name: (*name).to_string(),
        data: xml.as_bytes().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{content_types, Package};

    #[test]
    fn test_default_parts_form_a_presentation_package() {
        let package = Package::from_parts(default_parts()).unwrap();
        let main = package.main_part().unwrap();

        assert_eq!(main, "ppt/presentation.xml");
        assert_eq!(
            package.content_types().content_type(&main),
            Some(content_types::PRESENTATION)
        );
        for name in package.part_names() {
            assert!(
                package.content_types().content_type(name).is_some(),
                "no content type for {}",
                name
            );
        }
    }
}
