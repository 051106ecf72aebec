pub mod paging;
pub mod portfolio_model;
pub mod view_model;
