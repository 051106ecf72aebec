pub mod pg_view_store;
pub mod portfolio_service;
pub mod redis_view_store;
pub mod view_gate;
pub mod view_service;
pub mod view_store;
