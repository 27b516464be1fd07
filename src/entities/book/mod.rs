//! Book entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::BookDescriptor;
pub use model::{Book, BookForm, MAX_RANK, MIN_RANK};
