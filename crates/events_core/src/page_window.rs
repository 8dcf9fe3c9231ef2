//! Compact pagination windows: the first and last page, the pages around the
//! current one, and gap markers for the elided runs in between.

/// Pages shown before the current page before the left side collapses.
const LEFT_EXPANDED_LIMIT: u32 = 5;
/// Distance to the last page below which the right side stays expanded.
const RIGHT_COLLAPSE_DISTANCE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageWindowEntry {
    Page(u32),
    Gap,
}

impl PageWindowEntry {
    pub fn page(self) -> Option<u32> {
        match self {
            PageWindowEntry::Page(page) => Some(page),
            PageWindowEntry::Gap => None,
        }
    }
}

/// Computes the window for `current_page` out of `max_page` pages.
///
/// `max_page == 0` is treated as a single virtual page, so `(1, 0)` yields
/// `[Page(1)]`. A `current_page` above a non-zero `max_page` is not clamped:
/// the left side is emitted as usual and the right side is empty.
pub fn compute_window(current_page: u32, max_page: u32) -> Vec<PageWindowEntry> {
    let mut entries = Vec::with_capacity(9);

    if current_page > LEFT_EXPANDED_LIMIT {
        entries.extend([
            PageWindowEntry::Page(1),
            PageWindowEntry::Gap,
            PageWindowEntry::Page(current_page - 2),
            PageWindowEntry::Page(current_page - 1),
        ]);
    } else {
        entries.extend((1..current_page).map(PageWindowEntry::Page));
    }

    entries.push(PageWindowEntry::Page(current_page));

    if current_page.saturating_add(RIGHT_COLLAPSE_DISTANCE) < max_page {
        entries.extend([
            PageWindowEntry::Page(current_page + 1),
            PageWindowEntry::Page(current_page + 2),
            PageWindowEntry::Gap,
            PageWindowEntry::Page(max_page),
        ]);
    } else {
        entries.extend((current_page.saturating_add(1)..=max_page).map(PageWindowEntry::Page));
    }

    entries
}

/// Everything a pagination control needs: the window plus the targets of the
/// previous/next buttons. A `None` target means the button is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControl {
    current_page: u32,
    page_count: u32,
    entries: Vec<PageWindowEntry>,
}

impl PaginationControl {
    pub fn new(current_page: u32, page_count: u32) -> Self {
        Self {
            current_page,
            page_count,
            entries: compute_window(current_page, page_count),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn entries(&self) -> &[PageWindowEntry] {
        &self.entries
    }

    pub fn previous(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        let next = self.current_page.checked_add(1)?;
        (next <= self.page_count).then_some(next)
    }

    /// Whether `page` is one of the clickable numbers in the window.
    pub fn offers(&self, page: u32) -> bool {
        self.entries.contains(&PageWindowEntry::Page(page))
    }
}

#[cfg(test)]
#[path = "tests/page_window_tests.rs"]
mod tests;
