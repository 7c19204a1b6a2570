pub mod book;
pub mod catalog;
pub mod circulation;
pub mod commands;
pub mod errors;
pub mod events;
pub mod member;
pub mod search;
pub mod timestamp;
pub mod validation;
pub mod value_objects;

pub use book::*;
pub use catalog::*;
pub use errors::*;
pub use events::*;
pub use member::*;
pub use value_objects::*;
