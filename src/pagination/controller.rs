use axum::extract::Query;
use axum::http::Uri;

use super::window::{button_window, PageState};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 4;
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 10;

pub const PREVIOUS_LABEL: &str = "← Back";
pub const NEXT_LABEL: &str = "Next →";

/// One entry of the rendered control strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Previous { target: usize, href: String },
    Page { number: usize, href: String },
    /// The current page; rendered as a marker, not a link.
    Active { number: usize },
    Next { target: usize, href: String },
}

impl Control {
    pub fn label(&self) -> String {
        match self {
            Control::Previous { .. } => PREVIOUS_LABEL.to_string(),
            Control::Next { .. } => NEXT_LABEL.to_string(),
            Control::Page { number, .. } | Control::Active { number } => number.to_string(),
        }
    }

    /// Page this control navigates to, `None` for the active marker.
    pub fn target(&self) -> Option<usize> {
        match self {
            Control::Previous { target, .. } | Control::Next { target, .. } => Some(*target),
            Control::Page { number, .. } => Some(*number),
            Control::Active { .. } => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Control::Previous { href, .. } | Control::Page { href, .. } | Control::Next { href, .. } => {
                Some(href.as_str())
            }
            Control::Active { .. } => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Control::Active { .. })
    }
}

/// Where the items and the control strip live.
pub trait RenderSurface {
    fn item_count(&self) -> usize;
    fn set_item_visible(&mut self, index: usize, visible: bool);
    /// Replaces the whole control strip and makes it visible.
    fn render_controls(&mut self, controls: &[Control]);
    fn hide_controls(&mut self);
    fn scroll_to_top(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Raw query string, with or without the leading `?`.
    pub search: String,
}

/// Address bar and history stack.
pub trait NavigationSink {
    fn location(&self) -> Location;
    fn push_state(&mut self, page: usize, url: &str);
    fn replace_state(&mut self, page: usize, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    Keep,
}

/// Reads the first `page` query parameter; anything but a positive integer
/// is `None`.
pub fn page_from_search(search: &str) -> Option<usize> {
    let uri: Uri = format!("/?{}", search.trim_start_matches('?')).parse().ok()?;
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).ok()?;

    pairs
        .into_iter()
        .find(|(key, _)| key == "page")?
        .1
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1)
}

/// Canonical URL of `page`: the bare pathname for page 1.
pub fn page_url(pathname: &str, page: usize) -> String {
    if page <= 1 {
        pathname.to_string()
    } else {
        format!("{pathname}?page={page}")
    }
}

pub struct PaginationController<S, N> {
    surface: S,
    nav: N,
    state: PageState,
    max_page_buttons: usize,
    pathname: String,
}

impl<S: RenderSurface, N: NavigationSink> PaginationController<S, N> {
    /// Four items per page and up to ten page buttons.
    pub fn with_defaults(surface: Option<S>, nav: N) -> Option<Self> {
        Self::initialize(surface, nav, DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAX_PAGE_BUTTONS)
    }

    /// Returns `None` when there is nothing to paginate: no surface was found,
    /// or every item already fits on one page.
    pub fn initialize(
        surface: Option<S>,
        nav: N,
        items_per_page: usize,
        max_page_buttons: usize,
    ) -> Option<Self> {
        let Some(mut surface) = surface else {
            tracing::debug!("pagination surface missing, leaving listing unpaginated");
            return None;
        };

        let items_per_page = items_per_page.max(1);
        let total_items = surface.item_count();
        if total_items <= items_per_page {
            surface.hide_controls();
            return None;
        }

        let location = nav.location();
        let requested = page_from_search(&location.search);
        let state = PageState::new(total_items, items_per_page, requested);

        let mut controller = Self {
            surface,
            nav,
            state,
            max_page_buttons: max_page_buttons.max(1),
            pathname: location.pathname,
        };

        controller.apply(state.current_page, HistoryMode::Replace);
        controller.render_controls();

        Some(controller)
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    /// Shows only the items of `page` and pushes its URL onto the history.
    pub fn show_page(&mut self, page: usize) {
        self.apply(page, HistoryMode::Push);
    }

    /// Redraws the control strip for the current page.
    pub fn render_controls(&mut self) {
        let controls = self.controls();
        self.surface.render_controls(&controls);
    }

    pub fn controls(&self) -> Vec<Control> {
        let current = self.state.current_page;
        let total_pages = self.state.total_pages();
        let mut controls = Vec::with_capacity(self.max_page_buttons + 2);

        if self.state.has_previous() {
            controls.push(Control::Previous {
                target: current - 1,
                href: page_url(&self.pathname, current - 1),
            });
        }

        for number in button_window(current, total_pages, self.max_page_buttons) {
            if number == current {
                controls.push(Control::Active { number });
            } else {
                controls.push(Control::Page {
                    number,
                    href: page_url(&self.pathname, number),
                });
            }
        }

        if self.state.has_next() {
            controls.push(Control::Next {
                target: current + 1,
                href: page_url(&self.pathname, current + 1),
            });
        }

        controls
    }

    /// Click on a control. The active marker is inert.
    pub fn activate(&mut self, control: &Control) {
        if let Some(target) = control.target() {
            self.go_to(target);
        }
    }

    pub fn go_to(&mut self, page: usize) {
        self.show_page(page);
        self.render_controls();
        self.surface.scroll_to_top();
    }

    /// Back/forward navigation; the history entry already exists.
    pub fn restore(&mut self, history_page: Option<usize>) {
        self.apply(history_page.unwrap_or(1), HistoryMode::Keep);
        self.render_controls();
    }

    fn apply(&mut self, page: usize, history: HistoryMode) {
        let page = self.state.clamp(Some(page));
        self.state.current_page = page;

        let window = self.state.page_window(page);
        for index in 0..self.state.total_items {
            self.surface.set_item_visible(index, window.contains(&index));
        }

        let url = page_url(&self.pathname, page);
        match history {
            HistoryMode::Push => self.nav.push_state(page, &url),
            HistoryMode::Replace => self.nav.replace_state(page, &url),
            HistoryMode::Keep => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeSurface {
        visible: Vec<bool>,
        controls: Vec<Control>,
        renders: usize,
        controls_hidden: bool,
        scrolls: usize,
    }

    impl FakeSurface {
        fn with_items(n: usize) -> Self {
            Self {
                visible: vec![true; n],
                ..Default::default()
            }
        }

        fn visible_indices(&self) -> Vec<usize> {
            self.visible
                .iter()
                .enumerate()
                .filter(|(_, v)| **v)
                .map(|(i, _)| i)
                .collect()
        }

        fn numbered(&self) -> Vec<usize> {
            self.controls
                .iter()
                .filter_map(|c| match c {
                    Control::Page { number, .. } | Control::Active { number } => Some(*number),
                    _ => None,
                })
                .collect()
        }
    }

    impl RenderSurface for FakeSurface {
        fn item_count(&self) -> usize {
            self.visible.len()
        }

        fn set_item_visible(&mut self, index: usize, visible: bool) {
            self.visible[index] = visible;
        }

        fn render_controls(&mut self, controls: &[Control]) {
            self.controls = controls.to_vec();
            self.renders += 1;
            self.controls_hidden = false;
        }

        fn hide_controls(&mut self) {
            self.controls_hidden = true;
        }

        fn scroll_to_top(&mut self) {
            self.scrolls += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakeHistory {
        location: Location,
        pushed: Vec<(usize, String)>,
        replaced: Vec<(usize, String)>,
    }

    impl FakeHistory {
        fn at(search: &str) -> Self {
            Self {
                location: Location {
                    pathname: "/blog".to_string(),
                    search: search.to_string(),
                },
                ..Default::default()
            }
        }
    }

    impl NavigationSink for FakeHistory {
        fn location(&self) -> Location {
            self.location.clone()
        }

        fn push_state(&mut self, page: usize, url: &str) {
            self.pushed.push((page, url.to_string()));
        }

        fn replace_state(&mut self, page: usize, url: &str) {
            self.replaced.push((page, url.to_string()));
        }
    }

    type Controller = PaginationController<FakeSurface, FakeHistory>;

    fn controller(items: usize, per_page: usize, search: &str) -> Option<Controller> {
        PaginationController::initialize(
            Some(FakeSurface::with_items(items)),
            FakeHistory::at(search),
            per_page,
            DEFAULT_MAX_PAGE_BUTTONS,
        )
    }

    #[test]
    fn defaults_show_four_items_per_page() {
        let c = PaginationController::with_defaults(
            Some(FakeSurface::with_items(9)),
            FakeHistory::at("?page=2"),
        )
        .unwrap();

        assert_eq!(c.total_pages(), 3);
        assert_eq!(c.surface().visible_indices(), vec![4, 5, 6, 7]);
        assert!(PaginationController::with_defaults(
            Some(FakeSurface::with_items(4)),
            FakeHistory::at(""),
        )
        .is_none());
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let result: Option<Controller> =
            PaginationController::initialize(None, FakeHistory::at("?page=3"), 4, 10);
        assert!(result.is_none());
    }

    #[test]
    fn short_listing_is_not_paginated() {
        assert!(controller(4, 4, "").is_none());
        assert!(controller(0, 4, "?page=2").is_none());
    }

    #[test]
    fn initial_page_comes_from_query() {
        let c = controller(20, 4, "?page=3").unwrap();
        assert_eq!(c.current_page(), 3);
        assert_eq!(c.surface().visible_indices(), vec![8, 9, 10, 11]);
        assert_eq!(c.nav().replaced, vec![(3, "/blog?page=3".to_string())]);
        assert!(c.nav().pushed.is_empty());
    }

    #[test]
    fn bad_query_values_fall_back_to_first_page() {
        for search in ["", "?page=abc", "?page=0", "?page=-2", "?page=99", "page=", "?other=1"] {
            let c = controller(20, 4, search).unwrap();
            assert_eq!(c.current_page(), 1, "search {search:?}");
            assert_eq!(c.surface().visible_indices(), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn repeated_page_key_uses_first_value() {
        let c = controller(20, 4, "?page=2&page=3").unwrap();
        assert_eq!(c.current_page(), 2);
        assert_eq!(c.surface().visible_indices(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn show_page_sets_visibility_and_url() {
        let mut c = controller(10, 4, "").unwrap();

        c.show_page(3);
        assert_eq!(c.surface().visible_indices(), vec![8, 9]);
        assert_eq!(c.nav().pushed.last(), Some(&(3, "/blog?page=3".to_string())));

        c.show_page(1);
        assert_eq!(c.surface().visible_indices(), vec![0, 1, 2, 3]);
        assert_eq!(c.nav().pushed.last(), Some(&(1, "/blog".to_string())));
    }

    #[test]
    fn show_page_is_idempotent() {
        let mut c = controller(10, 4, "").unwrap();

        c.show_page(2);
        let once = (c.surface().visible_indices(), c.nav().pushed.last().cloned());
        c.show_page(2);
        let twice = (c.surface().visible_indices(), c.nav().pushed.last().cloned());

        assert_eq!(once, twice);
    }

    #[test]
    fn controls_on_first_page() {
        let c = controller(80, 4, "").unwrap();
        let controls = &c.surface().controls;

        assert_eq!(c.total_pages(), 20);
        assert!(matches!(controls.first(), Some(Control::Active { number: 1 })));
        assert!(matches!(controls.last(), Some(Control::Next { target: 2, .. })));
        assert_eq!(c.surface().numbered(), (1..=10).collect::<Vec<_>>());
        assert!(!c.surface().controls_hidden);
    }

    #[test]
    fn controls_near_the_end() {
        let c = controller(80, 4, "?page=15").unwrap();
        let controls = &c.surface().controls;

        assert_eq!(c.surface().numbered(), (11..=20).collect::<Vec<_>>());
        assert_eq!(
            controls.first(),
            Some(&Control::Previous {
                target: 14,
                href: "/blog?page=14".to_string()
            })
        );
        assert!(controls.iter().any(|c| *c == Control::Active { number: 15 }));
        assert!(controls.iter().filter(|c| c.is_active()).count() == 1);
    }

    #[test]
    fn last_page_has_no_next() {
        let c = controller(10, 4, "?page=3").unwrap();
        let labels: Vec<String> = c.surface().controls.iter().map(Control::label).collect();
        assert_eq!(labels, vec!["← Back", "1", "2", "3"]);
    }

    #[test]
    fn page_two_links_back_to_canonical_url() {
        let c = controller(10, 4, "?page=2").unwrap();
        let previous = c.surface().controls.first().cloned().unwrap();
        assert_eq!(previous.href(), Some("/blog"));
    }

    #[test]
    fn activating_a_control_navigates_and_scrolls() {
        let mut c = controller(20, 4, "").unwrap();
        let next = c.surface().controls.last().cloned().unwrap();

        c.activate(&next);

        assert_eq!(c.current_page(), 2);
        assert_eq!(c.surface().visible_indices(), vec![4, 5, 6, 7]);
        assert_eq!(c.surface().scrolls, 1);
        assert_eq!(c.nav().pushed, vec![(2, "/blog?page=2".to_string())]);
        assert!(c.surface().controls.contains(&Control::Active { number: 2 }));
    }

    #[test]
    fn activating_the_active_marker_does_nothing() {
        let mut c = controller(20, 4, "").unwrap();
        let renders = c.surface().renders;

        c.activate(&Control::Active { number: 1 });

        assert_eq!(c.surface().renders, renders);
        assert_eq!(c.surface().scrolls, 0);
        assert!(c.nav().pushed.is_empty());
    }

    #[test]
    fn restore_does_not_push_history() {
        let mut c = controller(20, 4, "").unwrap();
        c.go_to(4);
        c.go_to(5);

        c.restore(Some(4));
        assert_eq!(c.current_page(), 4);
        assert_eq!(c.surface().visible_indices(), vec![12, 13, 14, 15]);

        c.restore(None);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.nav().pushed.len(), 2);
        assert_eq!(c.surface().scrolls, 2);
    }

    #[test]
    fn page_from_search_parses_positive_integers_only() {
        assert_eq!(page_from_search("?page=7"), Some(7));
        assert_eq!(page_from_search("page=7&x=1"), Some(7));
        assert_eq!(page_from_search("?x=1&page=%20%32"), Some(2));
        assert_eq!(page_from_search("?page=2&page=3"), Some(2));
        assert_eq!(page_from_search("?page=abc&page=3"), None);
        assert_eq!(page_from_search("?page=0"), None);
        assert_eq!(page_from_search("?page=2.5"), None);
        assert_eq!(page_from_search(""), None);
    }
}
