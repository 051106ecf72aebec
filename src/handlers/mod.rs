pub mod view_handler;
