pub mod documents;

pub use documents::{BatchWrite, Document, DocumentStore};
