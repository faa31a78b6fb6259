//! Highlight navigation for list-shaped widgets.

/// Highlight movement over a list of choices.
///
/// Implementors only expose how many choices there are and where the
/// highlight sits. Choices may be a derived view such as a filtered list, so
/// no slice access is required.
pub trait Picker {
    /// Number of choices currently on offer
    fn len(&self) -> usize;

    /// Current highlight position
    fn highlighted_index(&self) -> usize;

    /// Move the highlight
    fn set_highlighted_index(&mut self, index: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highlight the next choice (wraps around)
    fn select_next(&mut self) {
        if !self.is_empty() {
            let next = (self.highlighted_index() + 1) % self.len();
            self.set_highlighted_index(next);
        }
    }

    /// Highlight the previous choice (wraps around)
    fn select_prev(&mut self) {
        if !self.is_empty() {
            let prev = self
                .highlighted_index()
                .checked_sub(1)
                .unwrap_or(self.len() - 1);
            self.set_highlighted_index(prev);
        }
    }

    /// Move the highlight by `delta`, stopping at either end
    fn move_by(&mut self, delta: isize) {
        if self.is_empty() {
            return;
        }
        let last = self.len() - 1;
        let target = self.highlighted_index().saturating_add_signed(delta).min(last);
        self.set_highlighted_index(target);
    }

    /// Highlight a specific index (clamped to valid range)
    fn select_index(&mut self, index: usize) {
        if !self.is_empty() {
            let clamped = index.min(self.len() - 1);
            self.set_highlighted_index(clamped);
        }
    }

    fn select_first(&mut self) {
        self.set_highlighted_index(0);
    }

    fn select_last(&mut self) {
        if !self.is_empty() {
            self.set_highlighted_index(self.len() - 1);
        }
    }

    /// Keep the highlight inside the list after it shrank
    fn clamp_highlight(&mut self) {
        let max = self.len().saturating_sub(1);
        if self.highlighted_index() > max {
            self.set_highlighted_index(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters {
        items: Vec<char>,
        highlighted: usize,
    }

    impl Picker for Letters {
        fn len(&self) -> usize {
            self.items.len()
        }

        fn highlighted_index(&self) -> usize {
            self.highlighted
        }

        fn set_highlighted_index(&mut self, index: usize) {
            self.highlighted = index;
        }
    }

    fn letters() -> Letters {
        Letters {
            items: vec!['a', 'b', 'c'],
            highlighted: 0,
        }
    }

    #[test]
    fn test_wrapping_navigation() {
        let mut picker = letters();
        picker.select_prev();
        assert_eq!(picker.highlighted_index(), 2);
        picker.select_next();
        assert_eq!(picker.highlighted_index(), 0);
    }

    #[test]
    fn test_move_by_clamps() {
        let mut picker = letters();
        picker.move_by(10);
        assert_eq!(picker.highlighted_index(), 2);
        picker.move_by(-10);
        assert_eq!(picker.highlighted_index(), 0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut picker = letters();
        picker.select_last();
        picker.items.truncate(1);
        picker.clamp_highlight();
        assert_eq!(picker.highlighted_index(), 0);
    }

    #[test]
    fn test_empty_picker_is_inert() {
        let mut picker = Letters {
            items: vec![],
            highlighted: 0,
        };
        picker.select_next();
        picker.move_by(3);
        picker.select_last();
        assert_eq!(picker.highlighted_index(), 0);
    }
}
