//! Per-image selection state

/// One checkbox per collected image, all checked to start with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    states: Vec<bool>,
    /// Value written to every entry by the last "toggle all"
    last_applied: bool,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![true; len],
            last_applied: true,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.states.get(index).copied().unwrap_or(false)
    }

    /// Mutable checkbox binding for one entry
    pub fn get_mut(&mut self, index: usize) -> Option<&mut bool> {
        self.states.get_mut(index)
    }

    /// Flip one entry; out of range is ignored
    pub fn toggle(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            *state = !*state;
        }
    }

    /// Set every entry to the opposite of the last value this applied
    ///
    /// Individual toggles in between do not affect which way this goes.
    pub fn toggle_all(&mut self) {
        self.last_applied = !self.last_applied;
        self.states.fill(self.last_applied);
    }

    pub fn selected_count(&self) -> usize {
        self.states.iter().filter(|s| **s).count()
    }

    /// Selected items in their original order
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .zip(&self.states)
            .filter(|(_, selected)| **selected)
            .map(|(item, _)| item)
            .collect()
    }
}
