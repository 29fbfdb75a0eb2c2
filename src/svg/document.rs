//! Document assembly: root `<svg>` element, hoisted `<defs>`, body.

use std::fmt;
use std::io::{self, Write};

use log::warn;

use super::fragment::Fragment;
use super::markup::{fmt_num, Element, Node};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Root attributes that extra attributes may not replace
const FIXED_ROOT_ATTRIBUTES: [&str; 2] = ["xmlns", "version"];

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG11_DOCTYPE: &str = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#;

/// A finished SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    /// Extra root attributes, applied after the generated ones. Keys
    /// `xmlns` and `version` are ignored.
    pub attributes: Vec<(String, String)>,
    /// Contents of `<defs>`: caller definitions, clip paths, textures
    pub definitions: Vec<Element>,
    pub body: Vec<Node>,
    /// Prefix the output with the XML declaration and SVG 1.1 DOCTYPE
    pub doctype: bool,
}

/// Combine a rendered fragment with the resolved size and caller
/// definitions into a document.
pub fn assemble_document(body: Fragment, size: (f64, f64), extra_defs: &[Element]) -> Document {
    let Fragment {
        clip_paths,
        textures,
        body,
    } = body;

    let mut definitions = extra_defs.to_vec();
    definitions.extend(clip_paths);
    definitions.extend(textures);

    Document {
        width: size.0,
        height: size.1,
        attributes: Vec::new(),
        definitions,
        body,
        doctype: false,
    }
}

impl Document {
    /// The root `<svg>` element
    pub fn to_element(&self) -> Element {
        let w = fmt_num(self.width);
        let h = fmt_num(self.height);
        let mut root = Element::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .attr("version", "1.1")
            .attr("width", w.clone())
            .attr("height", h.clone())
            .attr("viewBox", format!("0 0 {} {}", w, h));
        for (k, v) in &self.attributes {
            if FIXED_ROOT_ATTRIBUTES.contains(&k.as_str()) {
                warn!("ignoring root attribute override {}={:?}", k, v);
                continue;
            }
            root.set_attr(k.clone(), v.clone());
        }

        if !self.definitions.is_empty() {
            let defs = Element::new("defs")
                .children(self.definitions.iter().cloned().map(Node::Element));
            root = root.child(defs);
        }
        root.children(self.body.iter().cloned())
    }

    /// Serialize to SVG text
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        if self.doctype {
            out.push_str(XML_DECLARATION);
            out.push('\n');
            out.push_str(SVG11_DOCTYPE);
            out.push('\n');
        }
        self.to_element().write_to(&mut out);
        out.push('\n');
        out
    }

    /// Write the serialized document to `sink` in one call
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.to_svg_string().as_bytes())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_fragment() -> Fragment {
        Fragment {
            clip_paths: vec![Element::new("clipPath").attr("id", "clip0")],
            textures: vec![Element::new("linearGradient").attr("id", "fillGradient0")],
            body: vec![Element::new("g").into()],
        }
    }

    #[test]
    fn test_defs_order() {
        let caller = vec![Element::new("marker").attr("id", "arrow")];
        let doc = assemble_document(body_fragment(), (10.0, 20.0), &caller);
        let ids: Vec<_> = doc.definitions.iter().filter_map(|d| d.get_attr("id")).collect();
        assert_eq!(ids, vec!["arrow", "clip0", "fillGradient0"]);
    }

    #[test]
    fn test_root_attributes() {
        let doc = assemble_document(Fragment::empty(), (10.0, 20.5), &[]);
        let svg = doc.to_svg_string();
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="10" height="20.5" viewBox="0 0 10 20.5"/>"#
        ));
        assert!(!svg.contains("<defs"));
    }

    #[test]
    fn test_extra_attributes_and_doctype() {
        let mut doc = assemble_document(body_fragment(), (1.0, 1.0), &[]);
        doc.attributes = vec![
            ("class".to_string(), "figure".to_string()),
            ("width".to_string(), "100%".to_string()),
        ];
        doc.doctype = true;
        let svg = doc.to_svg_string();
        assert!(svg.starts_with(XML_DECLARATION));
        assert!(svg.contains(SVG11_DOCTYPE));
        assert!(svg.contains(r#"width="100%""#));
        assert!(svg.contains(r#"class="figure""#));
        assert!(svg.contains("<defs><clipPath id=\"clip0\"/><linearGradient id=\"fillGradient0\"/></defs><g/>"));
    }

    #[test]
    fn test_fixed_root_attributes_are_not_replaced() {
        let mut doc = assemble_document(Fragment::empty(), (1.0, 1.0), &[]);
        doc.attributes = vec![
            ("xmlns".to_string(), "urn:other".to_string()),
            ("version".to_string(), "2.0".to_string()),
            ("viewBox".to_string(), "0 0 2 2".to_string()),
        ];
        let root = doc.to_element();
        assert_eq!(root.get_attr("xmlns"), Some(SVG_NAMESPACE));
        assert_eq!(root.get_attr("version"), Some("1.1"));
        assert_eq!(root.get_attr("viewBox"), Some("0 0 2 2"));
    }

    #[test]
    fn test_write_to_sink() {
        let doc = assemble_document(body_fragment(), (1.0, 1.0), &[]);
        let mut buf: Vec<u8> = Vec::new();
        doc.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), doc.to_string());
    }
}
