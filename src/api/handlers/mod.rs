//! HTTP request handlers for API endpoints.

pub mod health;
pub mod resources;

pub use health::health_handler;
pub use resources::{create_handler, delete_handler, get_handler, list_handler, update_handler};
