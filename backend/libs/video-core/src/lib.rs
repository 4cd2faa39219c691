//! Video resource core: models, validation rules and the in-memory store
//!
//! Shared by video-service and its tests. Nothing here does I/O.

pub mod constants;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;

pub use error::{FieldError, StoreError, ValidationErrors};
pub use models::*;
pub use store::VideoStore;
pub use validation::{validate_create, validate_update};
