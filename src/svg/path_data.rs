//! Geometry to SVG attribute strings.

use super::markup::fmt_num;
use crate::transform::Transformation;
use crate::types::{Offset, Path, Point, Segment};

/// Path `d` attribute: absolute move-to per trail, relative segments,
/// `Z` on closed trails.
pub fn path_data(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for located in &path.trails {
        parts.push(format!("M {}", fmt_point(located.origin)));
        for segment in &located.trail.segments {
            parts.push(segment_data(segment));
        }
        if located.trail.closed {
            parts.push("Z".to_string());
        }
    }
    parts.join(" ")
}

fn segment_data(segment: &Segment) -> String {
    match segment {
        Segment::Linear { to } => format!("l {}", fmt_offset(*to)),
        Segment::Cubic { c1, c2, to } => format!(
            "c {} {} {}",
            fmt_offset(*c1),
            fmt_offset(*c2),
            fmt_offset(*to)
        ),
    }
}

/// `matrix(a,b,c,d,e,f)` for a `transform` attribute
pub fn matrix_attr(t: &Transformation) -> String {
    format!(
        "matrix({},{},{},{},{},{})",
        fmt_num(t.a),
        fmt_num(t.b),
        fmt_num(t.c),
        fmt_num(t.d),
        fmt_num(t.e),
        fmt_num(t.f)
    )
}

fn fmt_point(p: Point) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

fn fmt_offset(v: Offset) -> String {
    format!("{},{}", fmt_num(v.dx), fmt_num(v.dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LocatedTrail, Trail};

    #[test]
    fn test_closed_square() {
        let d = path_data(&Path::rect(0.0, 0.0, 2.0, 2.0));
        assert_eq!(d, "M 0,0 l 2,0 l 0,2 l -2,0 Z");
    }

    #[test]
    fn test_open_cubic() {
        let path = Path::new(vec![LocatedTrail {
            origin: Point::new(1.0, 1.0),
            trail: Trail::line(vec![Segment::Cubic {
                c1: Offset::new(0.0, 1.0),
                c2: Offset::new(1.0, 1.0),
                to: Offset::new(1.0, 0.0),
            }]),
        }]);
        assert_eq!(path_data(&path), "M 1,1 c 0,1 1,1 1,0");
    }

    #[test]
    fn test_matrix_attr() {
        let t = Transformation::new(1.0, 0.0, 0.0, -1.0, 10.0, 20.5);
        assert_eq!(matrix_attr(&t), "matrix(1,0,0,-1,10,20.5)");
    }
}
