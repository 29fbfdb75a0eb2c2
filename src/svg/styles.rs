//! Style to SVG presentation attributes.

use super::markup::fmt_num;
use crate::types::{Color, FillRule, FontSlant, FontWeight, LineCap, LineJoin, Style, Texture};

/// Ids of gradient definitions emitted for one styled group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureRefs {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

/// Translate a style into ordered `(name, value)` attributes.
///
/// Gradient paints refer to the ids in `refs`; a gradient without an id
/// is skipped.
pub fn style_attributes(style: &Style, refs: &TextureRefs) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut push = |k: &str, v: String| attrs.push((k.to_string(), v));

    paint_attributes(
        &mut push,
        "fill",
        style.fill.as_ref(),
        refs.fill.as_deref(),
        style.fill_opacity,
    );
    paint_attributes(
        &mut push,
        "stroke",
        style.stroke.as_ref(),
        refs.stroke.as_deref(),
        style.stroke_opacity,
    );

    if let Some(w) = style.line_width {
        push("stroke-width", fmt_num(w));
    }
    if let Some(o) = style.opacity {
        push("opacity", fmt_num(o));
    }
    if let Some(cap) = style.line_cap {
        push("stroke-linecap", line_cap(cap).to_string());
    }
    if let Some(join) = style.line_join {
        push("stroke-linejoin", line_join(join).to_string());
    }
    if let Some(limit) = style.miter_limit {
        push("stroke-miterlimit", fmt_num(limit));
    }
    if let Some(ref dash) = style.dashing {
        let array = if dash.array.is_empty() {
            "none".to_string()
        } else {
            dash.array.iter().map(|v| fmt_num(*v)).collect::<Vec<_>>().join(",")
        };
        push("stroke-dasharray", array);
        push("stroke-dashoffset", fmt_num(dash.offset));
    }
    if let Some(rule) = style.fill_rule {
        push("fill-rule", fill_rule(rule).to_string());
    }
    if let Some(ref family) = style.font_family {
        push("font-family", family.clone());
    }
    if let Some(size) = style.font_size {
        push("font-size", fmt_num(size));
    }
    if let Some(slant) = style.font_slant {
        push("font-style", font_slant(slant).to_string());
    }
    if let Some(weight) = style.font_weight {
        push("font-weight", font_weight(weight).to_string());
    }

    attrs
}

/// `fill`/`stroke` plus the matching `*-opacity`.
///
/// Solid colours fold their alpha into the opacity attribute.
fn paint_attributes(
    push: &mut impl FnMut(&str, String),
    name: &str,
    texture: Option<&Texture>,
    gradient_id: Option<&str>,
    opacity: Option<f64>,
) {
    let opacity_name = format!("{}-opacity", name);
    match texture {
        Some(Texture::Solid { color }) => {
            push(name, color_value(color));
            push(&opacity_name, fmt_num(color.a * opacity.unwrap_or(1.0)));
        }
        Some(Texture::Linear(_)) | Some(Texture::Radial(_)) => {
            if let Some(id) = gradient_id {
                push(name, format!("url(#{})", id));
            }
            if let Some(o) = opacity {
                push(&opacity_name, fmt_num(o));
            }
        }
        None => {
            if let Some(o) = opacity {
                push(&opacity_name, fmt_num(o));
            }
        }
    }
}

/// `rgb(r,g,b)` with 8-bit channels
pub fn color_value(color: &Color) -> String {
    let (r, g, b) = color.to_rgb8();
    format!("rgb({},{},{})", r, g, b)
}

fn line_cap(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

fn line_join(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

fn fill_rule(rule: FillRule) -> &'static str {
    match rule {
        FillRule::Winding => "nonzero",
        FillRule::EvenOdd => "evenodd",
    }
}

fn font_slant(slant: FontSlant) -> &'static str {
    match slant {
        FontSlant::Normal => "normal",
        FontSlant::Italic => "italic",
        FontSlant::Oblique => "oblique",
    }
}

fn font_weight(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
        FontWeight::Bolder => "bolder",
        FontWeight::Lighter => "lighter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformation;
    use crate::types::{Dashing, GradientStop, LinearGradient, Point, SpreadMethod};

    fn get<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_style_has_no_attributes() {
        assert!(style_attributes(&Style::default(), &TextureRefs::default()).is_empty());
    }

    #[test]
    fn test_solid_fill_and_stroke() {
        let style = Style::default()
            .fill_color(Color::RED)
            .line_color(Color::rgba(0.0, 0.0, 1.0, 0.5))
            .line_width(2.0);
        let attrs = style_attributes(&style, &TextureRefs::default());
        assert_eq!(get(&attrs, "fill"), Some("rgb(255,0,0)"));
        assert_eq!(get(&attrs, "fill-opacity"), Some("1"));
        assert_eq!(get(&attrs, "stroke"), Some("rgb(0,0,255)"));
        assert_eq!(get(&attrs, "stroke-opacity"), Some("0.5"));
        assert_eq!(get(&attrs, "stroke-width"), Some("2"));
    }

    #[test]
    fn test_gradient_fill_uses_reference() {
        let gradient = LinearGradient {
            stops: vec![GradientStop {
                color: Color::WHITE,
                offset: 0.0,
            }],
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 0.0),
            transform: Transformation::identity(),
            spread: SpreadMethod::Pad,
        };
        let style = Style::default().fill_texture(Texture::Linear(gradient));
        let refs = TextureRefs {
            fill: Some("fillGradient3".to_string()),
            stroke: None,
        };
        let attrs = style_attributes(&style, &refs);
        assert_eq!(get(&attrs, "fill"), Some("url(#fillGradient3)"));
        assert_eq!(get(&attrs, "fill-opacity"), None);
    }

    #[test]
    fn test_dash_and_font_attributes() {
        let style = Style {
            dashing: Some(Dashing {
                array: vec![4.0, 2.5],
                offset: 1.0,
            }),
            font_family: Some("Inter".to_string()),
            font_weight: Some(FontWeight::Bold),
            fill_rule: Some(FillRule::EvenOdd),
            ..Style::default()
        };
        let attrs = style_attributes(&style, &TextureRefs::default());
        assert_eq!(get(&attrs, "stroke-dasharray"), Some("4,2.5"));
        assert_eq!(get(&attrs, "stroke-dashoffset"), Some("1"));
        assert_eq!(get(&attrs, "font-family"), Some("Inter"));
        assert_eq!(get(&attrs, "font-weight"), Some("bold"));
        assert_eq!(get(&attrs, "fill-rule"), Some("evenodd"));
    }
}
