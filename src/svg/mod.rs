//! SVG backend - renders scenes into SVG documents.
//!
//! - `SvgBackend`: per-primitive rendering (clip, texture, style, transform)
//! - `assemble_document`: root element, hoisted `<defs>`, body
//! - `resolve_size`: size spec to concrete pixels
//!
//! Output is built as a small element tree and serialized in one go.

mod document;
mod fragment;
mod markup;
mod options;
mod path_data;
mod renderer;
mod size;
mod state;
mod styles;
mod texture;

pub use document::{assemble_document, Document};
pub use fragment::Fragment;
pub use markup::{escape_xml, fmt_num, Element, Node};
pub use options::{sanitize_id_prefix, SvgOptions};
pub use path_data::{matrix_attr, path_data};
pub use renderer::{split_transform, SvgBackend};
pub use size::{resolve_size, SizeSpec, DEFAULT_SIZE};
pub use state::RenderState;
pub use styles::{color_value, style_attributes, TextureRefs};
pub use texture::texture_definitions;
