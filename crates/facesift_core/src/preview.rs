/// Single-image preview over the result sequence.
///
/// At most one index is shown at a time; next/previous wrap circularly in
/// both directions. Concurrent preview sessions are not supported: opening
/// a new index while one is shown simply replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewState {
    current: Option<usize>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Shows `index`. Returns false (and stays put) when the index is out
    /// of range, which also covers the empty-sequence case.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Advance one step, wrapping from the last index back to 0.
    /// No-op while closed.
    pub fn next(&mut self, len: usize) {
        if let Some(current) = self.current {
            if len > 0 {
                self.current = Some((current + 1) % len);
            }
        }
    }

    /// Step back one, wrapping from 0 to the last index. No-op while closed.
    pub fn previous(&mut self, len: usize) {
        if let Some(current) = self.current {
            if len > 0 {
                self.current = Some((current + len - 1) % len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PreviewState;

    #[test]
    fn open_rejects_out_of_range_index() {
        let mut preview = PreviewState::new();
        assert!(!preview.open(0, 0));
        assert!(!preview.open(3, 3));
        assert!(!preview.is_open());
        assert!(preview.open(2, 3));
        assert_eq!(preview.current(), Some(2));
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut preview = PreviewState::new();
        preview.open(0, 4);
        preview.previous(4);
        assert_eq!(preview.current(), Some(3));
        preview.next(4);
        assert_eq!(preview.current(), Some(0));
    }

    #[test]
    fn navigation_is_a_noop_while_closed() {
        let mut preview = PreviewState::new();
        preview.next(4);
        preview.previous(4);
        assert_eq!(preview.current(), None);
    }

    #[test]
    fn reopening_replaces_the_shown_index() {
        let mut preview = PreviewState::new();
        preview.open(1, 4);
        preview.open(3, 4);
        assert_eq!(preview.current(), Some(3));
    }
}
