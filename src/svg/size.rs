//! Output size resolution.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Size used when no dimension is requested
pub const DEFAULT_SIZE: (f64, f64) = (100.0, 100.0);

/// Requested output size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizeSpec {
    Width { width: f64 },
    Height { height: f64 },
    Dims { width: f64, height: f64 },
    #[default]
    Absolute,
}

impl SizeSpec {
    pub fn width(width: f64) -> Self {
        SizeSpec::Width { width }
    }

    pub fn height(height: f64) -> Self {
        SizeSpec::Height { height }
    }

    pub fn dims(width: f64, height: f64) -> Self {
        SizeSpec::Dims { width, height }
    }
}

/// Concrete `(width, height)` for a size spec.
///
/// A single requested dimension is used for both sides; the content's
/// aspect ratio is not consulted.
pub fn resolve_size(spec: &SizeSpec) -> Result<(f64, f64)> {
    let (w, h) = match *spec {
        SizeSpec::Width { width } => (width, width),
        SizeSpec::Height { height } => (height, height),
        SizeSpec::Dims { width, height } => (width, height),
        SizeSpec::Absolute => DEFAULT_SIZE,
    };
    check_dimension("width", w)?;
    check_dimension("height", h)?;
    Ok((w, h))
}

fn check_dimension(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::MalformedSizeSpec(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        assert_eq!(resolve_size(&SizeSpec::width(40.0)).unwrap(), (40.0, 40.0));
        assert_eq!(resolve_size(&SizeSpec::height(25.0)).unwrap(), (25.0, 25.0));
        assert_eq!(resolve_size(&SizeSpec::dims(30.0, 10.0)).unwrap(), (30.0, 10.0));
        assert_eq!(resolve_size(&SizeSpec::Absolute).unwrap(), (100.0, 100.0));
        assert_eq!(resolve_size(&SizeSpec::default()).unwrap(), DEFAULT_SIZE);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            resolve_size(&SizeSpec::width(f64::NAN)),
            Err(RenderError::MalformedSizeSpec(_))
        ));
        assert!(matches!(
            resolve_size(&SizeSpec::dims(10.0, -1.0)),
            Err(RenderError::MalformedSizeSpec(_))
        ));
    }

    #[test]
    fn test_deserialize() {
        let spec: SizeSpec = serde_json::from_str(r#"{"kind":"dims","width":3,"height":4}"#).unwrap();
        assert_eq!(spec, SizeSpec::dims(3.0, 4.0));
        let spec: SizeSpec = serde_json::from_str(r#"{"kind":"absolute"}"#).unwrap();
        assert_eq!(spec, SizeSpec::Absolute);
    }
}
