//! Error type shared by the renderer, the document assembler and the
//! file-writing entry points.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// A primitive kind with no renderer (raster images).
    #[error("unsupported primitive: {0}")]
    UnsupportedPrimitive(&'static str),

    #[error("malformed size spec: {0}")]
    MalformedSizeSpec(String),

    /// Clip regions cannot be mapped into the frame before a singular
    /// frozen transform.
    #[error("frozen transform is not invertible (determinant {0})")]
    NonInvertibleTransform(f64),

    /// NaN or infinite coordinates, transform entries or style values.
    #[error("non-finite value in {0}")]
    NonFiniteValue(String),

    /// Caller-supplied element or attribute name that is not an XML name.
    #[error("invalid XML name: {0:?}")]
    InvalidName(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
