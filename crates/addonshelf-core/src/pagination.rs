// Incremental-loading cursor for progressive rendering
use serde::{Deserialize, Serialize};

/// Default number of rows materialized when a browse view opens.
pub const DEFAULT_LOAD: usize = 30;

/// Tracks how many matched results are currently materialized.
///
/// Each scroll event grows or shrinks the window by exactly one row,
/// inferred from the scroll direction: scrolling down (offset not below the
/// previous one) loads one more, scrolling up unloads one. The count never
/// drops below 1 so the window stays non-degenerate even under a rapid
/// scroll-up burst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PaginationCursor {
    /// How many results are materialized
    pub load: usize,
    /// Last seen scroll offset, only used to infer direction
    pub top: f64,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            load: DEFAULT_LOAD,
            top: 0.0,
        }
    }
}

impl PaginationCursor {
    pub fn new(load: usize) -> Self {
        Self {
            load: load.max(1),
            top: 0.0,
        }
    }

    /// Pure update for one scroll event: returns the next cursor state,
    /// leaving `self` untouched.
    pub fn advance(&self, offset: f64) -> Self {
        let load = if offset >= self.top {
            self.load + 1
        } else {
            // Clamp at 1 rather than underflow
            self.load.saturating_sub(1).max(1)
        };
        Self { load, top: offset }
    }

    /// The currently materialized window: the first `load` elements.
    pub fn window<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        &list[..self.load.min(list.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolling_down_loads_one_more() {
        let cursor = PaginationCursor::new(30);
        let next = cursor.advance(120.0);
        assert_eq!(next.load, 31);
        assert_eq!(next.top, 120.0);
    }

    #[test]
    fn test_unchanged_offset_counts_as_scrolling_down() {
        let cursor = PaginationCursor::new(30).advance(50.0);
        assert_eq!(cursor.advance(50.0).load, 32);
    }

    #[test]
    fn test_scrolling_up_unloads_one() {
        let cursor = PaginationCursor::new(30).advance(100.0);
        let next = cursor.advance(40.0);
        assert_eq!(next.load, 30);
        assert_eq!(next.top, 40.0);
    }

    #[test]
    fn test_load_never_drops_below_one() {
        let mut cursor = PaginationCursor::new(1);
        cursor.top = 100.0;
        for offset in [90.0, 80.0, 70.0] {
            cursor = cursor.advance(offset);
            assert_eq!(cursor.load, 1);
        }
    }

    #[test]
    fn test_window_caps_at_list_length() {
        let cursor = PaginationCursor::new(5);
        let items = [1, 2, 3];
        assert_eq!(cursor.window(&items), &[1, 2, 3]);

        let cursor = PaginationCursor::new(2);
        assert_eq!(cursor.window(&items), &[1, 2]);
    }
}
