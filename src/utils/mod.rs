pub mod path;
pub mod period;
