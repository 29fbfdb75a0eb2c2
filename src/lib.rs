//! scene2svg - Render flattened diagram scenes to SVG
//!
//! A scene is an ordered list of primitives (paths, trails, segments,
//! text), each with a split transformation and a resolved style. The SVG
//! backend turns every primitive into a group nest (clip → style →
//! transform) and assembles the groups into one document.
//!
//! # Example
//!
//! ```rust
//! use scene2svg::{render_to_string, Color, Path, Primitive, Scene, SplitTransformation, Style, SvgOptions};
//!
//! let scene = Scene::new().with(
//!     Primitive::Path(Path::rect(10.0, 10.0, 80.0, 80.0)),
//!     SplitTransformation::default(),
//!     Style::default().fill_color(Color::RED),
//! );
//! let svg = render_to_string(&scene, &SvgOptions::default()).unwrap();
//! assert!(svg.contains(r#"fill="rgb(255,0,0)""#));
//! ```

pub mod backend;
pub mod error;
pub mod svg;
pub mod transform;
pub mod types;

use std::fs::File;
use std::io::Write;

use log::debug;

pub use backend::Backend;
pub use error::{RenderError, Result};
pub use svg::{Document, SizeSpec, SvgBackend, SvgOptions};
pub use transform::Transformation;
pub use types::*;

/// Render a scene to an in-memory SVG document.
pub fn render_document(scene: &Scene, options: &SvgOptions) -> Result<Document> {
    options.validate()?;
    let size = svg::resolve_size(&options.size)?;
    let mut backend = SvgBackend::new(&options.id_prefix);
    debug!("rendering {} primitives", scene.len());
    let body = backend.render_scene(scene)?;
    debug!(
        "rendered scene: {} clip ids, {} texture ids allocated",
        backend.state().clip_path_count(),
        backend.state().texture_count()
    );

    let mut doc = backend.assemble(body, size, &options.definitions);
    doc.attributes = options.svg_attributes.clone();
    doc.doctype = options.generate_doctype;
    Ok(doc)
}

/// Render a scene to SVG text.
pub fn render_to_string(scene: &Scene, options: &SvgOptions) -> Result<String> {
    Ok(render_document(scene, options)?.to_svg_string())
}

/// Render a scene and write the SVG bytes to `sink`.
///
/// The document is fully assembled before the first byte is written.
pub fn render_to_writer<W: Write>(sink: &mut W, scene: &Scene, options: &SvgOptions) -> Result<()> {
    let doc = render_document(scene, options)?;
    doc.write_to(sink)?;
    Ok(())
}

/// Render a scene to an SVG file at `path` with default options.
///
/// Overwrites an existing file; parent directories are not created.
pub fn render_to_file(path: impl AsRef<std::path::Path>, size: SizeSpec, scene: &Scene) -> Result<()> {
    let options = SvgOptions::default().with_size(size);
    render_to_file_with_options(path, scene, &options)
}

/// Render a scene to an SVG file at `path`.
pub fn render_to_file_with_options(
    path: impl AsRef<std::path::Path>,
    scene: &Scene,
    options: &SvgOptions,
) -> Result<()> {
    let bytes = render_document(scene, options)?.to_svg_string();
    let path = path.as_ref();
    debug!("writing {} bytes to {}", bytes.len(), path.display());
    let mut file = File::create(path)?;
    file.write_all(bytes.as_bytes())?;
    file.flush()?;
    Ok(())
}
