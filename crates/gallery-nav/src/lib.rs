pub mod swipe;

pub use swipe::{SwipeDirection, SwipeTracker};

use gallery_types::GalleryItem;

/// Ordered gallery items plus the selected position.
///
/// A selection exists only while the lightbox is open. Stepping clamps at
/// both ends; there is no wraparound.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    items: Vec<GalleryItem>,
    cur_idx: Option<usize>,
}

impl NavState {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            cur_idx: None,
        }
    }

    pub fn current(&self) -> Option<&GalleryItem> {
        self.cur_idx.and_then(|idx| self.items.get(idx))
    }

    pub fn index(&self) -> Option<usize> {
        self.cur_idx
    }

    pub fn is_selected(&self) -> bool {
        self.cur_idx.is_some()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&GalleryItem> {
        self.items.get(idx)
    }

    /// Selects `idx`. Out-of-range indices leave the state untouched.
    pub fn select(&mut self, idx: usize) -> Option<&GalleryItem> {
        if idx < self.items.len() {
            self.cur_idx = Some(idx);
            self.current()
        } else {
            None
        }
    }

    pub fn deselect(&mut self) {
        self.cur_idx = None;
    }

    /// Steps forward. Returns the new item only if the position moved.
    pub fn go_next(&mut self) -> Option<&GalleryItem> {
        let current = self.cur_idx?;
        if current + 1 >= self.items.len() {
            return None;
        }

        self.cur_idx = Some(current + 1);
        self.current()
    }

    /// Steps back. Returns the new item only if the position moved.
    pub fn go_prev(&mut self) -> Option<&GalleryItem> {
        let current = self.cur_idx?;
        if current == 0 {
            return None;
        }

        self.cur_idx = Some(current - 1);
        self.current()
    }

    pub fn is_first(&self) -> bool {
        self.cur_idx == Some(0)
    }

    pub fn is_last(&self) -> bool {
        matches!(self.cur_idx, Some(idx) if idx + 1 == self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(count: usize) -> NavState {
        NavState::new(
            (0..count)
                .map(|i| GalleryItem::new(format!("/media/{i}.jpg"), format!("photo {i}")))
                .collect(),
        )
    }

    #[test]
    fn test_starts_unselected() {
        let nav = nav(3);
        assert!(!nav.is_selected());
        assert!(nav.current().is_none());
        assert_eq!(nav.total(), 3);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut nav = nav(3);
        assert!(nav.select(3).is_none());
        assert!(!nav.is_selected());

        nav.select(1);
        assert!(nav.select(10).is_none());
        assert_eq!(nav.index(), Some(1));
    }

    #[test]
    fn test_go_next_clamps_at_end() {
        let mut nav = nav(4);
        nav.select(0);

        let mut seen = vec![0];
        while nav.go_next().is_some() {
            seen.push(nav.index().unwrap());
        }

        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert!(nav.go_next().is_none());
        assert_eq!(nav.index(), Some(3));
        assert!(nav.is_last());
    }

    #[test]
    fn test_go_prev_clamps_at_start() {
        let mut nav = nav(4);
        nav.select(3);

        let mut seen = vec![3];
        while nav.go_prev().is_some() {
            seen.push(nav.index().unwrap());
        }

        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert!(nav.go_prev().is_none());
        assert!(nav.is_first());
    }

    #[test]
    fn test_stepping_without_selection_is_noop() {
        let mut nav = nav(2);
        assert!(nav.go_next().is_none());
        assert!(nav.go_prev().is_none());
        assert!(!nav.is_selected());
    }

    #[test]
    fn test_single_item_is_first_and_last() {
        let mut nav = nav(1);
        nav.select(0);
        assert!(nav.is_first());
        assert!(nav.is_last());
        assert!(nav.go_next().is_none());
        assert!(nav.go_prev().is_none());
    }

    #[test]
    fn test_deselect() {
        let mut nav = nav(2);
        nav.select(1);
        nav.deselect();
        assert!(nav.index().is_none());
        assert!(!nav.is_last());
    }
}
