pub mod catalog;
pub mod lending;
