//! Composable render output.
//!
//! A fragment keeps generated definitions apart from the drawable body so
//! they can be hoisted into the document's `<defs>` block. Concatenation
//! appends each part pairwise, which keeps it associative with
//! `Fragment::default()` as the identity.

use super::markup::{Element, Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    /// `<clipPath>` definitions, in allocation order
    pub clip_paths: Vec<Element>,
    /// Gradient definitions, in allocation order
    pub textures: Vec<Element>,
    /// Drawable content, in paint order
    pub body: Vec<Node>,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fragment holding only drawable content
    pub fn from_body(node: impl Into<Node>) -> Self {
        Self {
            body: vec![node.into()],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clip_paths.is_empty() && self.textures.is_empty() && self.body.is_empty()
    }

    pub fn append(&mut self, other: Fragment) {
        self.clip_paths.extend(other.clip_paths);
        self.textures.extend(other.textures);
        self.body.extend(other.body);
    }

    pub fn concat(mut self, other: Fragment) -> Fragment {
        self.append(other);
        self
    }

    /// Replace the body with a single `wrapper` element containing it
    pub fn wrap_body(&mut self, wrapper: Element) {
        let body = std::mem::take(&mut self.body);
        self.body.push(wrapper.children(body).into());
    }

    /// All generated definitions: clip paths first, then textures
    pub fn definitions(&self) -> impl Iterator<Item = &Element> {
        self.clip_paths.iter().chain(self.textures.iter())
    }
}

impl Extend<Fragment> for Fragment {
    fn extend<I: IntoIterator<Item = Fragment>>(&mut self, iter: I) {
        for frag in iter {
            self.append(frag);
        }
    }
}

impl FromIterator<Fragment> for Fragment {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let mut acc = Fragment::default();
        acc.extend(iter);
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(tag: &str) -> Fragment {
        Fragment {
            clip_paths: vec![Element::new(format!("clip-{}", tag))],
            textures: vec![Element::new(format!("tex-{}", tag))],
            body: vec![Element::new(format!("body-{}", tag)).into()],
        }
    }

    #[test]
    fn test_concat_is_associative() {
        let left = frag("a").concat(frag("b")).concat(frag("c"));
        let right = frag("a").concat(frag("b").concat(frag("c")));
        assert_eq!(left, right);
    }

    #[test]
    fn test_empty_is_identity() {
        assert_eq!(Fragment::empty().concat(frag("a")), frag("a"));
        assert_eq!(frag("a").concat(Fragment::empty()), frag("a"));
    }

    #[test]
    fn test_collect_preserves_order() {
        let all: Fragment = vec![frag("a"), frag("b")].into_iter().collect();
        let names: Vec<_> = all
            .body
            .iter()
            .filter_map(|n| n.as_element())
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["body-a", "body-b"]);
        let defs: Vec<_> = all.definitions().map(|e| e.name.as_str()).collect();
        assert_eq!(defs, vec!["clip-a", "clip-b", "tex-a", "tex-b"]);
    }

    #[test]
    fn test_wrap_body_nests_content() {
        let mut f = frag("a");
        f.wrap_body(Element::new("g"));
        assert_eq!(f.body.len(), 1);
        let g = f.body[0].as_element().unwrap();
        assert_eq!(g.name, "g");
        assert_eq!(g.children.len(), 1);
    }
}
