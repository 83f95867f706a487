//! Request types for HTTP handlers.

mod authentications;
mod documents;
mod paginations;
mod paths;

pub use authentications::*;
pub use documents::*;
pub use paginations::*;
pub use paths::*;
