//! Match list and selection state.

use crate::dom::NodeId;
use crate::matcher::MatchSet;

/// Selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Observable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No query.
    Idle,
    /// A search is pending; the previous matches are still shown.
    Searching,
    /// The element at this index is selected.
    HasMatches(usize),
    NoMatches,
}

/// Current matches and which one is selected.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    matches: MatchSet,
    index: usize,
    query_active: bool,
    searching: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        if !self.query_active {
            NavState::Idle
        } else if self.searching {
            NavState::Searching
        } else if self.matches.is_empty() {
            NavState::NoMatches
        } else {
            NavState::HasMatches(self.index)
        }
    }

    pub fn begin_search(&mut self) {
        self.query_active = true;
        self.searching = true;
    }

    pub fn cancel_search(&mut self) {
        self.searching = false;
    }

    /// Back to `Idle` with no matches.
    pub fn clear(&mut self) {
        self.matches = MatchSet::new();
        self.index = 0;
        self.query_active = false;
        self.searching = false;
    }

    /// Adopt fresh search results and return the selected element.
    ///
    /// In manual mode the index is kept (clamped to the new length). Otherwise
    /// the previously selected element stays selected if it is still matched,
    /// else the first match is selected.
    pub fn resolve(&mut self, results: MatchSet, manual: bool) -> Option<NodeId> {
        let previous = self.selected();
        self.query_active = true;
        self.searching = false;

        self.index = if results.is_empty() {
            0
        } else if manual {
            self.index.min(results.len() - 1)
        } else {
            previous
                .and_then(|node| results.position(node))
                .unwrap_or(0)
        };
        self.matches = results;
        self.selected()
    }

    /// Move the selection, wrapping at both ends.
    pub fn step(&mut self, direction: Direction) -> Option<NodeId> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        self.index = match direction {
            Direction::Next => (self.index + 1) % n,
            Direction::Previous => (self.index + n - 1) % n,
        };
        self.selected()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.matches.get(self.index)
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> MatchSet {
        ids.iter().map(|&i| NodeId(i)).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut nav = Navigator::new();
        assert_eq!(nav.state(), NavState::Idle);

        nav.begin_search();
        assert_eq!(nav.state(), NavState::Searching);

        nav.resolve(MatchSet::new(), false);
        assert_eq!(nav.state(), NavState::NoMatches);

        nav.begin_search();
        nav.resolve(set(&[1, 2]), false);
        assert_eq!(nav.state(), NavState::HasMatches(0));

        nav.clear();
        assert_eq!(nav.state(), NavState::Idle);
        assert!(nav.matches().is_empty());
    }

    #[test]
    fn test_searching_keeps_old_matches() {
        let mut nav = Navigator::new();
        nav.resolve(set(&[4, 5]), false);
        nav.begin_search();
        assert_eq!(nav.matches().len(), 2);
        assert_eq!(nav.selected(), Some(NodeId(4)));
    }

    #[test]
    fn test_next_wraps_after_n_steps() {
        let mut nav = Navigator::new();
        nav.resolve(set(&[1, 2, 3]), false);
        for _ in 0..3 {
            nav.step(Direction::Next);
        }
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut nav = Navigator::new();
        nav.resolve(set(&[1, 2, 3]), false);
        assert_eq!(nav.step(Direction::Previous), Some(NodeId(3)));
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_step_without_matches() {
        let mut nav = Navigator::new();
        assert_eq!(nav.step(Direction::Next), None);
        assert_eq!(nav.step(Direction::Previous), None);
    }

    #[test]
    fn test_resolve_follows_selected_identity() {
        let mut nav = Navigator::new();
        nav.resolve(set(&[1, 2, 3]), false);
        nav.step(Direction::Next);
        assert_eq!(nav.selected(), Some(NodeId(2)));

        assert_eq!(nav.resolve(set(&[0, 1, 2]), false), Some(NodeId(2)));
        assert_eq!(nav.index(), 2);

        assert_eq!(nav.resolve(set(&[7, 8]), false), Some(NodeId(7)));
    }

    #[test]
    fn test_manual_resolve_clamps_index() {
        let mut nav = Navigator::new();
        nav.resolve(set(&[1, 2, 3, 4]), false);
        nav.step(Direction::Previous);
        assert_eq!(nav.index(), 3);

        assert_eq!(nav.resolve(set(&[9, 8]), true), Some(NodeId(8)));
        assert_eq!(nav.index(), 1);

        nav.resolve(MatchSet::new(), true);
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.selected(), None);
    }
}
