//! Page and button window arithmetic, free of any rendering concern.

use std::ops::{Range, RangeInclusive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
}

impl PageState {
    /// `items_per_page` of 0 is raised to 1; `requested` outside the valid
    /// range falls back to page 1.
    pub fn new(total_items: usize, items_per_page: usize, requested: Option<usize>) -> Self {
        let mut state = Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items,
        };
        state.current_page = state.clamp(requested);
        state
    }

    /// Never less than 1, even for an empty collection.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn clamp(&self, page: Option<usize>) -> usize {
        match page {
            Some(page) if (1..=self.total_pages()).contains(&page) => page,
            _ => 1,
        }
    }

    /// Item indices shown on `page`.
    pub fn page_window(&self, page: usize) -> Range<usize> {
        let start = page
            .saturating_sub(1)
            .saturating_mul(self.items_per_page)
            .min(self.total_items);
        let end = page.saturating_mul(self.items_per_page).min(self.total_items);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

/// Page numbers to render as buttons around `current`.
///
/// The window keeps `(max_buttons - 1) / 2` pages before `current` when it can
/// and slides back so it never runs past `total_pages`.
pub fn button_window(current: usize, total_pages: usize, max_buttons: usize) -> RangeInclusive<usize> {
    let total_pages = total_pages.max(1);
    let max_buttons = max_buttons.max(1);

    if total_pages <= max_buttons {
        return 1..=total_pages;
    }

    let before = (max_buttons - 1) / 2;
    let mut start = current.saturating_sub(before).max(1);
    let end = (start + max_buttons - 1).min(total_pages);
    if end - start < max_buttons - 1 {
        start = (end + 1).saturating_sub(max_buttons).max(1);
    }

    start..=end
}
