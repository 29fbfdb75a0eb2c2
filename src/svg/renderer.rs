//! SVG renderer - turns scene primitives into nested groups.
//!
//! Each primitive becomes, from the inside out:
//!   raw content → clip groups (one per clip region) → styled group →
//!   transform group (frozen part of the transform, if any).
//! Generated `<clipPath>` and gradient definitions travel in the fragment
//! and are hoisted into `<defs>` on assembly.

use log::{debug, trace};

use super::document::{assemble_document, Document};
use super::fragment::Fragment;
use super::markup::{Element, Node};
use super::options::sanitize_id_prefix;
use super::path_data::{matrix_attr, path_data};
use super::state::RenderState;
use super::styles::style_attributes;
use super::texture::texture_definitions;
use crate::backend::Backend;
use crate::error::{RenderError, Result};
use crate::transform::Transformation;
use crate::types::{Path, Primitive, SplitTransformation, Style, Text, TextAlignment};

/// The SVG backend. One value per render pass.
#[derive(Debug, Clone, Default)]
pub struct SvgBackend {
    state: RenderState,
    id_prefix: String,
}

impl SvgBackend {
    pub fn new(id_prefix: &str) -> Self {
        Self {
            state: RenderState::new(),
            id_prefix: sanitize_id_prefix(id_prefix),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Wrap raw content with clipping, texture definitions, style
    /// attributes and the frozen transform.
    ///
    /// Clip regions are given in the diagram frame; they are mapped by the
    /// inverse of `frozen` so that they land on the intended region once the
    /// transform group applies `frozen`.
    pub fn render_styled_group(
        &mut self,
        mut content: Fragment,
        style: &Style,
        frozen: &Transformation,
    ) -> Result<Fragment> {
        if !frozen.is_finite() {
            return Err(RenderError::NonFiniteValue("frozen transform".to_string()));
        }
        if let Some(field) = style.first_non_finite() {
            return Err(RenderError::NonFiniteValue(format!("style {}", field)));
        }
        if !style.clip.is_empty() {
            let inverse = frozen
                .inverse()
                .ok_or_else(|| RenderError::NonInvertibleTransform(frozen.determinant()))?;
            for region in &style.clip {
                let local = region.transform(&inverse);
                if !local.is_finite() {
                    return Err(RenderError::NonFiniteValue("clip region".to_string()));
                }
                let id = format!("{}clip{}", self.id_prefix, self.state.next_clip_path_id());
                content.clip_paths.push(
                    Element::new("clipPath")
                        .attr("id", id.as_str())
                        .child(Element::new("path").attr("d", path_data(&local))),
                );
                content.wrap_body(Element::new("g").attr("clip-path", format!("url(#{})", id)));
            }
        }

        let texture_id = self.state.next_texture_id();
        let (mut textures, refs) = texture_definitions(style, texture_id, &self.id_prefix);

        let mut group = Element::new("g");
        group.attributes = style_attributes(style, &refs);
        if self.state.ignore_fill {
            group.set_attr("fill", "none");
            group.remove_attr("fill-opacity");
            if let Some(ref fill_id) = refs.fill {
                textures.retain(|t| t.get_attr("id") != Some(fill_id.as_str()));
            }
        }
        content.wrap_body(group);

        if !frozen.is_identity() {
            content.wrap_body(Element::new("g").attr("transform", matrix_attr(frozen)));
        }

        let mut out = Fragment {
            textures,
            ..Fragment::default()
        };
        out.append(content);
        Ok(out)
    }

    /// Raw markup for a primitive with `geometry` already applied.
    fn render_content(&mut self, primitive: &Primitive, geometry: &Transformation) -> Result<Fragment> {
        match primitive {
            Primitive::Path(path) => self.render_path(path.transform(geometry)),
            Primitive::Trail(trail) => self.render_path(Path::from(trail.clone()).transform(geometry)),
            Primitive::Segment(segment) => {
                self.render_path(Path::from(segment.clone()).transform(geometry))
            }
            Primitive::Text(text) => render_text(text, geometry),
            Primitive::Image(_) => Err(RenderError::UnsupportedPrimitive(primitive.kind_name())),
        }
    }

    /// An open stroke has no fill region, so any open trail suppresses
    /// the fill of the whole primitive.
    fn render_path(&mut self, path: Path) -> Result<Fragment> {
        if !path.is_finite() {
            return Err(RenderError::NonFiniteValue("path geometry".to_string()));
        }
        if path.has_open_trail() {
            self.state.ignore_fill = true;
        }
        Ok(Fragment::from_body(Element::new("path").attr("d", path_data(&path))))
    }
}

impl Backend for SvgBackend {
    type Output = Document;

    fn render(
        &mut self,
        primitive: &Primitive,
        transform: &SplitTransformation,
        style: &Style,
    ) -> Result<Fragment> {
        self.state.ignore_fill = false;
        let (geometry, frozen) = split_transform(transform);
        trace!(
            "render {} (clips: {}, frozen: {})",
            primitive.kind_name(),
            style.clip.len(),
            !frozen.is_identity()
        );
        let content = self.render_content(primitive, &geometry)?;
        self.render_styled_group(content, style, &frozen)
    }

    fn assemble(&self, body: Fragment, size: (f64, f64), extra_defs: &[Element]) -> Document {
        debug!(
            "assembling {}x{} document ({} clip paths, {} textures)",
            size.0,
            size.1,
            body.clip_paths.len(),
            body.textures.len()
        );
        assemble_document(body, size, extra_defs)
    }
}

/// Split a transform into (applied to geometry now, deferred to a group).
pub fn split_transform(transform: &SplitTransformation) -> (Transformation, Transformation) {
    match *transform {
        SplitTransformation::Merged { transform } => (transform, Transformation::identity()),
        SplitTransformation::Split { frozen, remaining } => (remaining, frozen),
    }
}

/// Text cannot be baked into geometry, so the transform stays an attribute.
fn render_text(text: &Text, geometry: &Transformation) -> Result<Fragment> {
    let transform = geometry.compose(&text.transform);
    if !transform.is_finite() {
        return Err(RenderError::NonFiniteValue("text transform".to_string()));
    }
    let (anchor, baseline) = text_alignment(text.alignment);
    let mut el = Element::new("text");
    if !transform.is_identity() {
        el.set_attr("transform", matrix_attr(&transform));
    }
    let el = el
        .attr("dominant-baseline", baseline)
        .attr("text-anchor", anchor)
        .attr("stroke", "none")
        .child(Node::Text(text.content.clone()));
    Ok(Fragment::from_body(el))
}

/// (text-anchor, dominant-baseline)
fn text_alignment(alignment: TextAlignment) -> (&'static str, &'static str) {
    match alignment {
        TextAlignment::Baseline => ("start", "alphabetic"),
        TextAlignment::BoxAligned { x, y } => {
            let anchor = if x <= 0.25 {
                "start"
            } else if x >= 0.75 {
                "end"
            } else {
                "middle"
            };
            let baseline = if y <= 0.25 {
                "text-after-edge"
            } else if y >= 0.75 {
                "text-before-edge"
            } else {
                "middle"
            };
            (anchor, baseline)
        }
    }
}
