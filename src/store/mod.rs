// file: src/store/mod.rs
// description: course store module exports
// reference: internal module structure

pub mod course_store;
pub mod scanner;

pub use course_store::{CatalogStats, CourseStore};
pub use scanner::{CourseScanner, ScannedFile};
