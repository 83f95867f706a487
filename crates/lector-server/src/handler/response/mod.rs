//! Response types for HTTP handlers.

mod accounts;
mod authentications;
mod documents;
mod error_response;
mod monitors;

pub use accounts::*;
pub use authentications::*;
pub use documents::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
