//! Render configuration.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::markup::{Element, Node};
use super::size::SizeSpec;
use crate::error::{RenderError, Result};

lazy_static! {
    static ref RE_INVALID_ID_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]").unwrap();
    static ref RE_INVALID_ID_START: Regex = Regex::new(r"^[0-9.\-]").unwrap();
    // ASCII subset of the XML 1.0 Name production
    static ref RE_XML_NAME: Regex = Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.\-]*$").unwrap();
}

/// Options for one SVG render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Requested output size. Default: `SizeSpec::Absolute` (100x100)
    pub size: SizeSpec,
    /// Caller-supplied definitions, placed first in `<defs>`
    pub definitions: Vec<Element>,
    /// Prepended to every generated id, so several renders can share a page
    pub id_prefix: String,
    /// Extra attributes for the root `<svg>` element. They replace the
    /// generated `width`, `height` and `viewBox` when the keys collide;
    /// `xmlns` and `version` are fixed and cannot be overridden.
    pub svg_attributes: Vec<(String, String)>,
    /// Emit the XML declaration and SVG 1.1 DOCTYPE. Default: false
    pub generate_doctype: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            size: SizeSpec::Absolute,
            definitions: Vec::new(),
            id_prefix: String::new(),
            svg_attributes: Vec::new(),
            generate_doctype: false,
        }
    }
}

impl SvgOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: SvgOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every caller-supplied element and attribute name is an
    /// XML name, so the document stays well-formed.
    pub fn validate(&self) -> Result<()> {
        for (key, _) in &self.svg_attributes {
            check_name(key)?;
        }
        self.definitions.iter().try_for_each(check_element)
    }

    pub fn with_size(mut self, size: SizeSpec) -> Self {
        self.size = size;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

fn check_name(name: &str) -> Result<()> {
    if RE_XML_NAME.is_match(name) {
        Ok(())
    } else {
        Err(RenderError::InvalidName(name.to_string()))
    }
}

fn check_element(el: &Element) -> Result<()> {
    check_name(&el.name)?;
    for (key, _) in &el.attributes {
        check_name(key)?;
    }
    for child in &el.children {
        if let Node::Element(inner) = child {
            check_element(inner)?;
        }
    }
    Ok(())
}

/// Make an id prefix safe to use at the start of an XML id.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`, and a prefix that would
/// start with a digit, `.` or `-` gets a leading `_`.
pub fn sanitize_id_prefix(prefix: &str) -> String {
    let cleaned = RE_INVALID_ID_CHARS.replace_all(prefix, "_");
    if RE_INVALID_ID_START.is_match(&cleaned) {
        format!("_{}", cleaned)
    } else {
        cleaned.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_id_prefix() {
        assert_eq!(sanitize_id_prefix(""), "");
        assert_eq!(sanitize_id_prefix("fig1-"), "fig1-");
        assert_eq!(sanitize_id_prefix("my fig#2"), "my_fig_2");
        assert_eq!(sanitize_id_prefix("2d"), "_2d");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let opts = SvgOptions::from_json(r#"{"id_prefix":"a-","size":{"kind":"width","width":50}}"#)
            .unwrap();
        assert_eq!(opts.id_prefix, "a-");
        assert_eq!(opts.size, SizeSpec::width(50.0));
        assert!(opts.definitions.is_empty());
        assert!(!opts.generate_doctype);
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let opts = SvgOptions {
            svg_attributes: vec![("data-x\"><script".to_string(), "1".to_string())],
            ..SvgOptions::default()
        };
        assert!(matches!(opts.validate(), Err(RenderError::InvalidName(_))));

        let nested = SvgOptions {
            definitions: vec![Element::new("marker").child(Element::new("pa th"))],
            ..SvgOptions::default()
        };
        match nested.validate() {
            Err(RenderError::InvalidName(name)) => assert_eq!(name, "pa th"),
            other => panic!("expected invalid name, got {:?}", other),
        }

        let good = SvgOptions {
            svg_attributes: vec![("xml:lang".to_string(), "en".to_string())],
            definitions: vec![Element::new("marker").attr("data-kind", "arrow")],
            ..SvgOptions::default()
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_from_json_validates_names() {
        let json = r#"{"definitions":[{"name":"g","attributes":[["a b","1"]]}]}"#;
        assert!(matches!(
            SvgOptions::from_json(json),
            Err(RenderError::InvalidName(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SvgOptions::from_json("{\"size\": 3}").is_err());
    }
}
