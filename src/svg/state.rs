//! Per-render bookkeeping.

/// Counters and flags threaded through one render pass.
///
/// Created fresh for every render; ids handed out by `next_*` are never
/// reused within that render. The fill flag is private to the traversal:
///
/// ```compile_fail
/// let mut state = scene2svg::svg::RenderState::new();
/// state.ignore_fill = true;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    clip_path_counter: usize,
    texture_counter: usize,
    /// Set while rendering a primitive whose fill must be suppressed.
    /// Only the traversal in this crate reads or writes it.
    pub(crate) ignore_fill: bool,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next clip-path id
    pub fn next_clip_path_id(&mut self) -> usize {
        let id = self.clip_path_counter;
        self.clip_path_counter += 1;
        id
    }

    /// Hand out the next texture id
    pub fn next_texture_id(&mut self) -> usize {
        let id = self.texture_counter;
        self.texture_counter += 1;
        id
    }

    /// Number of clip-path ids allocated so far
    pub fn clip_path_count(&self) -> usize {
        self.clip_path_counter
    }

    /// Number of texture ids allocated so far
    pub fn texture_count(&self) -> usize {
        self.texture_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let mut state = RenderState::new();
        assert_eq!(state.next_clip_path_id(), 0);
        assert_eq!(state.next_clip_path_id(), 1);
        assert_eq!(state.next_texture_id(), 0);
        assert_eq!(state.clip_path_count(), 2);
        assert_eq!(state.texture_count(), 1);
        assert!(!state.ignore_fill);
    }
}
