mod errors;
mod lending_service;
mod shared;

pub use errors::{LendingError, Result};
pub use lending_service::LendingService;
pub use shared::SharedLibrary;
