//! Headless pagination for pre-rendered listings.
//!
//! The controller never touches a DOM directly: items and controls are drawn
//! through a [`RenderSurface`], the address bar and history through a
//! [`NavigationSink`].

pub mod controller;
pub mod window;

pub use controller::{
    page_from_search, page_url, Control, Location, NavigationSink, PaginationController,
    RenderSurface, DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAX_PAGE_BUTTONS,
};
pub use window::{button_window, PageState};
