//! Gradient definitions for fill and stroke textures.

use super::markup::{fmt_num, Element, Node};
use super::path_data::matrix_attr;
use super::styles::{color_value, TextureRefs};
use crate::transform::Transformation;
use crate::types::{GradientStop, LinearGradient, RadialGradient, SpreadMethod, Style, Texture};

/// Emit the gradient definitions a style needs under texture id `texture_id`.
///
/// Solid colours need no definition. Fill and stroke gradients of the same
/// group share the numeric id under different names.
pub fn texture_definitions(
    style: &Style,
    texture_id: usize,
    id_prefix: &str,
) -> (Vec<Element>, TextureRefs) {
    let mut defs = Vec::new();
    let mut refs = TextureRefs::default();

    if let Some(el) = style
        .fill
        .as_ref()
        .and_then(|t| gradient_element(t, format!("{}fillGradient{}", id_prefix, texture_id)))
    {
        refs.fill = el.get_attr("id").map(str::to_string);
        defs.push(el);
    }
    if let Some(el) = style
        .stroke
        .as_ref()
        .and_then(|t| gradient_element(t, format!("{}lineGradient{}", id_prefix, texture_id)))
    {
        refs.stroke = el.get_attr("id").map(str::to_string);
        defs.push(el);
    }

    (defs, refs)
}

fn gradient_element(texture: &Texture, id: String) -> Option<Element> {
    match texture {
        Texture::Solid { .. } => None,
        Texture::Linear(g) => Some(linear_gradient(g, id)),
        Texture::Radial(g) => Some(radial_gradient(g, id)),
    }
}

fn linear_gradient(g: &LinearGradient, id: String) -> Element {
    let el = Element::new("linearGradient")
        .attr("id", id)
        .attr("x1", fmt_num(g.start.x))
        .attr("y1", fmt_num(g.start.y))
        .attr("x2", fmt_num(g.end.x))
        .attr("y2", fmt_num(g.end.y));
    let el = common_attributes(el, &g.transform, g.spread);
    el.children(g.stops.iter().map(|s| Node::Element(stop(s, s.offset))))
}

/// SVG 1.1 radial gradients have a single radius, so the inner radius is
/// folded into the stop offsets.
fn radial_gradient(g: &RadialGradient, id: String) -> Element {
    let inner = if g.radius1 > 0.0 {
        (g.radius0 / g.radius1).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let el = Element::new("radialGradient")
        .attr("id", id)
        .attr("r", fmt_num(g.radius1))
        .attr("cx", fmt_num(g.center1.x))
        .attr("cy", fmt_num(g.center1.y))
        .attr("fx", fmt_num(g.center0.x))
        .attr("fy", fmt_num(g.center0.y));
    let el = common_attributes(el, &g.transform, g.spread);
    el.children(
        g.stops
            .iter()
            .map(|s| Node::Element(stop(s, inner + (1.0 - inner) * s.offset))),
    )
}

fn common_attributes(el: Element, transform: &Transformation, spread: SpreadMethod) -> Element {
    let el = el
        .attr("gradientUnits", "userSpaceOnUse")
        .attr("spreadMethod", spread_method(spread));
    if transform.is_identity() {
        el
    } else {
        el.attr("gradientTransform", matrix_attr(transform))
    }
}

fn stop(s: &GradientStop, offset: f64) -> Element {
    Element::new("stop")
        .attr("offset", fmt_num(offset))
        .attr("stop-color", color_value(&s.color))
        .attr("stop-opacity", fmt_num(s.color.a))
}

fn spread_method(spread: SpreadMethod) -> &'static str {
    match spread {
        SpreadMethod::Pad => "pad",
        SpreadMethod::Reflect => "reflect",
        SpreadMethod::Repeat => "repeat",
    }
}
