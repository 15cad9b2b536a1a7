// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod store;
pub mod utils;

pub use config::{CatalogConfig, Config, DefaultsConfig, StoreConfig};
pub use error::{CatalogError, Result};
pub use exporter::{ExportManifest, ExportedFile, JsonExporter};
pub use models::{CourseDetail, CourseMetadata, CourseRecord, CourseSection, CourseSummary};
pub use parser::{
    AnalyzedSection, DocumentParser, ParsedDocument, RawSection, RecordBuilder, SectionAnalyzer,
    SectionContent, slugify,
};
pub use store::{CatalogStats, CourseScanner, CourseStore, ScannedFile};
