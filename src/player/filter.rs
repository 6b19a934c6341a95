//! Title filter over the track list.

use crate::library::Track;

/// Case-insensitive title query narrowing which tracks the list shows.
///
/// Track identity stays the index into the full list; the filter only
/// decides which of those indices are visible.
#[derive(Debug, Default, Clone)]
pub struct TrackFilter {
    query: String,
    /// Keys type into the query while this is set.
    editing: bool,
}

impl TrackFilter {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True while typing or while a non-blank query narrows the list.
    pub fn is_active(&self) -> bool {
        self.editing || !self.query.trim().is_empty()
    }

    pub fn begin(&mut self) {
        self.editing = true;
    }

    /// Stop typing but keep the list narrowed.
    pub fn commit(&mut self) {
        self.editing = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.editing = false;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn matches(&self, title: &str) -> bool {
        let q = self.query.trim();
        q.is_empty() || title.to_lowercase().contains(&q.to_lowercase())
    }

    /// Indices of `tracks` whose titles match, in list order.
    pub fn visible(&self, tracks: &[Track]) -> Vec<usize> {
        tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches(&t.title))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_matches_everything() {
        let mut f = TrackFilter::default();
        assert!(f.matches("Anything"));
        f.push(' ');
        assert!(f.matches("Anything"));
        assert!(!f.is_active());
    }

    #[test]
    fn match_ignores_case() {
        let mut f = TrackFilter::default();
        for c in "NIGHT".chars() {
            f.push(c);
        }
        assert!(f.matches("Midnight City"));
        assert!(!f.matches("Daylight"));

        f.pop();
        f.pop();
        assert_eq!(f.query(), "NIG");
        assert!(f.matches("nightcall"));
    }

    #[test]
    fn commit_keeps_query_and_clear_drops_it() {
        let mut f = TrackFilter::default();
        f.begin();
        f.push('a');
        assert!(f.is_editing());

        f.commit();
        assert!(!f.is_editing());
        assert!(f.is_active());

        f.clear();
        assert_eq!(f.query(), "");
        assert!(!f.is_active());
    }
}
