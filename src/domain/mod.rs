pub mod book;
pub mod events;
pub mod member;
pub mod value_objects;

pub use book::Book;
pub use events::*;
pub use member::Member;
pub use value_objects::*;
