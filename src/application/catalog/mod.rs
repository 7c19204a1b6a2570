mod catalog_service;
mod circulation_service;
mod errors;
mod query_service;
mod snapshot_service;

pub use catalog_service::{
    ServiceDependencies, add_book, get_book, get_member, register_member, remove_book,
};
pub use circulation_service::{checkout_book, return_book};
pub use errors::{CatalogApplicationError, Result};
pub use query_service::{catalog_statistics, get_available_books, get_overdue_books, search_books};
pub use snapshot_service::{load_snapshot, save_snapshot};
