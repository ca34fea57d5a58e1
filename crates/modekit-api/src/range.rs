// Pagination metadata carried in the list-endpoint range header.
//
// Paged endpoints answer with `Content-Range: [unit ]start-end/total`.
// Missing or unparseable headers collapse to an empty page.

use serde::{Deserialize, Serialize};

/// Header carrying `start-end/total` on paged list responses.
pub const RANGE_HEADER: &str = "content-range";

/// Item window reported by the platform for one page of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ItemRange {
    pub fn new(start: u64, end: u64, total: u64) -> Self {
        Self { start, end, total }
    }

    /// Range covering a complete, unpaginated list of `len` items.
    pub fn whole(len: usize) -> Self {
        let len = u64::try_from(len).unwrap_or(u64::MAX);
        Self::new(0, len, len)
    }

    /// Parse `start-end/total`, optionally preceded by a unit token
    /// (`items 0-3/3`). Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let window_total = raw.rsplit(' ').next()?;
        let (window, total) = window_total.split_once('/')?;
        let (start, end) = window.split_once('-')?;
        Some(Self {
            start: start.trim().parse().ok()?,
            end: end.trim().parse().ok()?,
            total: total.trim().parse().ok()?,
        })
    }

    /// Number of items the window claims to cover.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One page of a paged list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub range: ItemRange,
    pub items: Vec<T>,
}

impl<T> Paged<T> {
    /// The page reported when the range header is absent.
    pub fn empty() -> Self {
        Self {
            range: ItemRange::default(),
            items: Vec::new(),
        }
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_window() {
        assert_eq!(ItemRange::parse("0-3/3"), Some(ItemRange::new(0, 3, 3)));
    }

    #[test]
    fn parses_window_with_unit() {
        assert_eq!(
            ItemRange::parse("items 10-20/57"),
            Some(ItemRange::new(10, 20, 57))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(ItemRange::parse(""), None);
        assert_eq!(ItemRange::parse("0-3"), None);
        assert_eq!(ItemRange::parse("a-b/c"), None);
        assert_eq!(ItemRange::parse("items */12"), None);
    }

    #[test]
    fn whole_list_range() {
        let range = ItemRange::whole(4);
        assert_eq!(range, ItemRange::new(0, 4, 4));
        assert_eq!(range.len(), 4);
        assert!(ItemRange::default().is_empty());
    }

    #[test]
    fn empty_page_defaults() {
        let page: Paged<u64> = Paged::empty();
        assert_eq!(page.range, ItemRange::new(0, 0, 0));
        assert!(page.items.is_empty());
    }
}
