mod errors;
mod store;

pub use errors::{CatalogError, EntityKind, Result};
pub use store::{Catalog, CatalogSnapshot};
