// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod course;
pub mod summary;

pub use course::{CourseMetadata, CourseRecord, CourseSection};
pub use summary::{CourseDetail, CourseSummary};
