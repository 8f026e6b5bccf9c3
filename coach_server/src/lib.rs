//! HTTP shell over the MicroCoach generator.

pub mod api;

pub use api::{create_router, AppState};
