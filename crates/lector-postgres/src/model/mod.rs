//! Diesel models for querying, inserting and updating rows.

mod account;
mod document;
mod document_interaction;

pub use account::{Account, NewAccount};
pub use document::{Document, NewDocument, UpdateDocument};
pub use document_interaction::{DocumentInteraction, NewDocumentInteraction};
