//! Rendering backend capability.

use crate::error::Result;
use crate::svg::{Element, Fragment};
use crate::types::{Primitive, Scene, SplitTransformation, Style};

/// A backend renders primitives one at a time into fragments and
/// assembles the concatenated fragments into its output document.
///
/// A backend value owns the state of exactly one render pass.
pub trait Backend {
    type Output;

    /// Render one primitive. Fragments must be concatenated in call order.
    fn render(
        &mut self,
        primitive: &Primitive,
        transform: &SplitTransformation,
        style: &Style,
    ) -> Result<Fragment>;

    fn assemble(&self, body: Fragment, size: (f64, f64), extra_defs: &[Element]) -> Self::Output;

    /// Render every item of a scene in paint order
    fn render_scene(&mut self, scene: &Scene) -> Result<Fragment> {
        let mut out = Fragment::empty();
        for item in &scene.items {
            out.append(self.render(&item.primitive, &item.transform, &item.style)?);
        }
        Ok(out)
    }
}
