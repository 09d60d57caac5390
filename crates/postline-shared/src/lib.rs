//! # Postline Shared
//!
//! Wire types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::PostRequest;
pub use response::{ErrorResponse, FieldViolation};
