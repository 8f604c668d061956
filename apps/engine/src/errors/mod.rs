//! Engine-level error types.

pub mod domain;

pub use domain::DomainError;
