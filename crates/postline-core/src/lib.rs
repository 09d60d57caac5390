//! # Postline Core
//!
//! The domain layer of the Postline API.
//! This crate contains the post model, its validation rules, the repository
//! port, and the startup seed loader. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod seed;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::{FieldError, ValidationErrors};
