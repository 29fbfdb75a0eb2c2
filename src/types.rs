//! Type definitions for the flattened diagram scene.
//!
//! A scene is an ordered list of (primitive, split transformation, style)
//! triples. Order is paint order: later items are drawn on top.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::transform::Transformation;

lazy_static! {
    static ref RE_HEX_COLOR: Regex =
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$").unwrap();
}

/// Cubic Bezier handle length for a quarter circle of radius 1
const KAPPA: f64 = 0.552_284_749_830_793_4;

// ============================================================================
// Geometry
// ============================================================================

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A 2D displacement, relative to the start of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// A single path segment. All offsets are relative to the segment's start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Linear { to: Offset },
    Cubic { c1: Offset, c2: Offset, to: Offset },
}

impl Segment {
    pub fn transform(&self, t: &Transformation) -> Segment {
        match *self {
            Segment::Linear { to } => Segment::Linear {
                to: t.apply_offset(to),
            },
            Segment::Cubic { c1, c2, to } => Segment::Cubic {
                c1: t.apply_offset(c1),
                c2: t.apply_offset(c2),
                to: t.apply_offset(to),
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Segment::Linear { to } => to.is_finite(),
            Segment::Cubic { c1, c2, to } => c1.is_finite() && c2.is_finite() && to.is_finite(),
        }
    }
}

/// A chain of segments. Closed trails are loops, open trails are lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub closed: bool,
}

impl Trail {
    pub fn line(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            closed: false,
        }
    }

    pub fn closed(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            closed: true,
        }
    }
}

/// A trail pinned to a starting point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedTrail {
    pub origin: Point,
    pub trail: Trail,
}

impl LocatedTrail {
    pub fn transform(&self, t: &Transformation) -> LocatedTrail {
        LocatedTrail {
            origin: t.apply_point(self.origin),
            trail: Trail {
                segments: self.trail.segments.iter().map(|s| s.transform(t)).collect(),
                closed: self.trail.closed,
            },
        }
    }
}

/// A single segment pinned to a starting point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedSegment {
    pub origin: Point,
    pub segment: Segment,
}

/// A path: zero or more located trails
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub trails: Vec<LocatedTrail>,
}

impl Path {
    pub fn new(trails: Vec<LocatedTrail>) -> Self {
        Self { trails }
    }

    /// Open polyline through the given points
    pub fn polyline(points: &[Point]) -> Self {
        Self::through(points, false)
    }

    /// Closed polygon through the given points
    pub fn polygon(points: &[Point]) -> Self {
        Self::through(points, true)
    }

    /// Axis-aligned closed rectangle with top-left corner `(x, y)`
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::polygon(&[
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    /// Closed circle approximated by four cubic Beziers
    pub fn circle(center: Point, radius: f64) -> Self {
        let k = KAPPA * radius;
        let r = radius;
        // Quarter arcs starting at (cx + r, cy), going through +y first.
        let segments = vec![
            Segment::Cubic {
                c1: Offset::new(0.0, k),
                c2: Offset::new(k - r, r),
                to: Offset::new(-r, r),
            },
            Segment::Cubic {
                c1: Offset::new(-k, 0.0),
                c2: Offset::new(-r, k - r),
                to: Offset::new(-r, -r),
            },
            Segment::Cubic {
                c1: Offset::new(0.0, -k),
                c2: Offset::new(r - k, -r),
                to: Offset::new(r, -r),
            },
            Segment::Cubic {
                c1: Offset::new(k, 0.0),
                c2: Offset::new(r, r - k),
                to: Offset::new(r, r),
            },
        ];
        Self::new(vec![LocatedTrail {
            origin: Point::new(center.x + r, center.y),
            trail: Trail::closed(segments),
        }])
    }

    fn through(points: &[Point], closed: bool) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        let mut prev = *first;
        let mut segments = Vec::with_capacity(rest.len());
        for p in rest {
            segments.push(Segment::Linear {
                to: Offset::new(p.x - prev.x, p.y - prev.y),
            });
            prev = *p;
        }
        Self::new(vec![LocatedTrail {
            origin: *first,
            trail: Trail { segments, closed },
        }])
    }

    pub fn transform(&self, t: &Transformation) -> Path {
        Path {
            trails: self.trails.iter().map(|lt| lt.transform(t)).collect(),
        }
    }

    /// True if any component trail is open (a line rather than a loop)
    pub fn has_open_trail(&self) -> bool {
        self.trails.iter().any(|lt| !lt.trail.closed)
    }

    /// True if every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.trails
            .iter()
            .all(|lt| lt.origin.is_finite() && lt.trail.segments.iter().all(Segment::is_finite))
    }
}

impl From<LocatedTrail> for Path {
    fn from(trail: LocatedTrail) -> Self {
        Path::new(vec![trail])
    }
}

impl From<LocatedSegment> for Path {
    fn from(seg: LocatedSegment) -> Self {
        Path::new(vec![LocatedTrail {
            origin: seg.origin,
            trail: Trail::line(vec![seg.segment]),
        }])
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Text alignment relative to the text's local origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Baseline,
    /// Fractions of the text's bounding box: 0 = left/bottom, 1 = right/top
    BoxAligned { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    #[serde(default)]
    pub transform: Transformation,
    #[serde(default)]
    pub alignment: TextAlignment,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            transform: Transformation::identity(),
            alignment: TextAlignment::Baseline,
        }
    }
}

/// An external raster image. There is no renderer for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: f64,
    pub height: f64,
    pub source: String,
}

/// Leaf drawable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Path(Path),
    Trail(LocatedTrail),
    Segment(LocatedSegment),
    Text(Text),
    Image(Image),
}

impl Primitive {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Path(_) => "path",
            Primitive::Trail(_) => "trail",
            Primitive::Segment(_) => "segment",
            Primitive::Text(_) => "text",
            Primitive::Image(_) => "image",
        }
    }
}

/// A transform either applied in full to geometry, or split into a frozen
/// part (applied later by a wrapping group) and a remaining part (applied
/// to geometry now).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitTransformation {
    Merged {
        transform: Transformation,
    },
    Split {
        frozen: Transformation,
        remaining: Transformation,
    },
}

impl Default for SplitTransformation {
    fn default() -> Self {
        SplitTransformation::Merged {
            transform: Transformation::identity(),
        }
    }
}

// ============================================================================
// Style
// ============================================================================

/// RGBA color, channels in 0..=1.
///
/// Deserializes from `"#rrggbb"`, `"#rrggbbaa"` or `{ "r", "g", "b", "a"? }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Option<Color> {
        let caps = RE_HEX_COLOR.captures(s.trim())?;
        let channel = |i: usize| -> Option<f64> {
            match caps.get(i) {
                Some(m) => u8::from_str_radix(m.as_str(), 16)
                    .ok()
                    .map(|v| f64::from(v) / 255.0),
                None => Some(1.0),
            }
        };
        Some(Color {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
            a: channel(4)?,
        })
    }

    pub fn is_finite(&self) -> bool {
        [self.r, self.g, self.b, self.a].iter().all(|v| v.is_finite())
    }

    /// 8-bit channel values, rounded and clamped
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
}

fn opaque() -> f64 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => {
                Color::from_hex(&s).ok_or_else(|| format!("invalid hex color: {:?}", s))
            }
            ColorRepr::Channels { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    /// Position along the gradient, 0..=1
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadMethod {
    #[default]
    Pad,
    Reflect,
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub stops: Vec<GradientStop>,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub transform: Transformation,
    #[serde(default)]
    pub spread: SpreadMethod,
}

/// Radial gradient between an inner circle (`center0`, `radius0`) and an
/// outer circle (`center1`, `radius1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub stops: Vec<GradientStop>,
    pub center0: Point,
    pub radius0: f64,
    pub center1: Point,
    pub radius1: f64,
    #[serde(default)]
    pub transform: Transformation,
    #[serde(default)]
    pub spread: SpreadMethod,
}

/// Paint used for fill or stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Texture {
    Solid { color: Color },
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Texture {
    pub fn is_finite(&self) -> bool {
        let stops_finite =
            |stops: &[GradientStop]| stops.iter().all(|s| s.offset.is_finite() && s.color.is_finite());
        match self {
            Texture::Solid { color } => color.is_finite(),
            Texture::Linear(g) => {
                stops_finite(&g.stops)
                    && g.start.is_finite()
                    && g.end.is_finite()
                    && g.transform.is_finite()
            }
            Texture::Radial(g) => {
                stops_finite(&g.stops)
                    && g.center0.is_finite()
                    && g.center1.is_finite()
                    && g.radius0.is_finite()
                    && g.radius1.is_finite()
                    && g.transform.is_finite()
            }
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid { color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    Winding,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
    Bolder,
    Lighter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashing {
    pub array: Vec<f64>,
    #[serde(default)]
    pub offset: f64,
}

/// Resolved presentation attributes of one primitive.
///
/// Every field is optional; unset fields produce no attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Clip regions, applied in order (the last one is outermost)
    pub clip: Vec<Path>,
    pub fill: Option<Texture>,
    pub stroke: Option<Texture>,
    pub line_width: Option<f64>,
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
    pub miter_limit: Option<f64>,
    pub dashing: Option<Dashing>,
    pub fill_rule: Option<FillRule>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_slant: Option<FontSlant>,
    pub font_weight: Option<FontWeight>,
}

impl Style {
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn fill_texture(mut self, texture: Texture) -> Self {
        self.fill = Some(texture);
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn line_texture(mut self, texture: Texture) -> Self {
        self.stroke = Some(texture);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn clip_by(mut self, region: Path) -> Self {
        self.clip.push(region);
        self
    }

    /// Name of the first paint or stroke parameter that is not a finite
    /// number, if any. Clip regions are not inspected.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let opt = |v: Option<f64>| v.map_or(true, f64::is_finite);
        if !self.fill.as_ref().map_or(true, Texture::is_finite) {
            return Some("fill");
        }
        if !self.stroke.as_ref().map_or(true, Texture::is_finite) {
            return Some("stroke");
        }
        let scalars = [
            ("line_width", self.line_width),
            ("opacity", self.opacity),
            ("fill_opacity", self.fill_opacity),
            ("stroke_opacity", self.stroke_opacity),
            ("miter_limit", self.miter_limit),
            ("font_size", self.font_size),
        ];
        if let Some((name, _)) = scalars.into_iter().find(|(_, v)| !opt(*v)) {
            return Some(name);
        }
        match &self.dashing {
            Some(d) if !d.offset.is_finite() || !d.array.iter().all(|v| v.is_finite()) => {
                Some("dashing")
            }
            _ => None,
        }
    }
}

// ============================================================================
// Scene
// ============================================================================

/// One drawable with its transform and resolved style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    pub primitive: Primitive,
    #[serde(default)]
    pub transform: SplitTransformation,
    #[serde(default)]
    pub style: Style,
}

/// The flattened scene, in paint order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive, transform: SplitTransformation, style: Style) {
        self.items.push(SceneItem {
            primitive,
            transform,
            style,
        });
    }

    /// Builder form of [`Scene::push`]
    pub fn with(mut self, primitive: Primitive, transform: SplitTransformation, style: Style) -> Self {
        self.push(primitive, transform, style);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
        assert_eq!(c.a, 1.0);

        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);

        assert!(Color::from_hex("red").is_none());
        assert!(Color::from_hex("#fff").is_none());
    }

    #[test]
    fn test_color_deserialize_both_forms() {
        let hex: Color = serde_json::from_str(r##""#0000ff""##).unwrap();
        assert_eq!(hex, Color::BLUE);
        let channels: Color = serde_json::from_str(r#"{"r":1,"g":0,"b":0}"#).unwrap();
        assert_eq!(channels, Color::RED);
        assert!(serde_json::from_str::<Color>(r#""blue""#).is_err());
    }

    #[test]
    fn test_open_and_closed_paths() {
        let square = Path::rect(0.0, 0.0, 1.0, 1.0);
        assert!(!square.has_open_trail());
        let line = Path::polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(line.has_open_trail());
    }

    #[test]
    fn test_segment_normalizes_to_open_path() {
        let path: Path = LocatedSegment {
            origin: Point::new(1.0, 2.0),
            segment: Segment::Linear {
                to: Offset::new(3.0, 0.0),
            },
        }
        .into();
        assert_eq!(path.trails.len(), 1);
        assert!(path.has_open_trail());
        assert_eq!(path.trails[0].origin, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(Path::rect(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Path::rect(0.0, 0.0, f64::NAN, 1.0).is_finite());
        assert!(!Path::polyline(&[Point::new(0.0, 0.0), Point::new(f64::INFINITY, 0.0)]).is_finite());

        assert_eq!(Style::default().fill_color(Color::RED).first_non_finite(), None);
        assert_eq!(Style::default().line_width(f64::NAN).first_non_finite(), Some("line_width"));
        assert_eq!(
            Style::default()
                .fill_color(Color::rgba(1.0, 0.0, 0.0, f64::INFINITY))
                .first_non_finite(),
            Some("fill")
        );
    }

    #[test]
    fn test_scene_item_defaults() {
        let json = r#"{"primitive":{"kind":"text","content":"hi"}}"#;
        let item: SceneItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.transform, SplitTransformation::default());
        assert_eq!(item.style, Style::default());
        assert_eq!(item.primitive.kind_name(), "text");
    }
}
