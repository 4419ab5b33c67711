//! Domain layer containing business entities and storage contracts.
//!
//! This module is independent of infrastructure and HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Users, courses, enrollments and their commands
//! - [`repositories`] - Data access trait definitions
//! - [`filter`] - Filter builder producing storage-independent predicates
//! - [`pagination`] - Page/limit resolution and pagination metadata
//! - [`patch`] - Tagged optional used by partial updates
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod filter;
pub mod pagination;
pub mod patch;
pub mod repositories;
