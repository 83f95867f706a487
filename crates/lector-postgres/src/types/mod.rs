//! Contains constraints, enumerations and other custom types.

pub mod constants;
mod constraint;
mod enums;

pub use constraint::{
    AccountConstraints, ConstraintCategory, ConstraintViolation, DocumentConstraints,
    DocumentInteractionConstraints,
};
pub use enums::DocumentStatus;
