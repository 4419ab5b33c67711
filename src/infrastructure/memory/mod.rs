//! In-process storage backend.
//!
//! Selected with `STORAGE_BACKEND=memory`. Data lives for the lifetime of the
//! process; listing, filtering and paging behave like the PostgreSQL backend.

pub mod repositories;
pub mod table;

pub use repositories::{
    InMemoryCourseRepository, InMemoryEnrollmentRepository, InMemoryUserRepository,
};
pub use table::InMemoryTable;
