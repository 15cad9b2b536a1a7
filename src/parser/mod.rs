// file: src/parser/mod.rs
// description: course text parsing module exports
// reference: internal module structure

pub mod builder;
pub mod document;
pub mod section;
pub mod slug;

pub use builder::{RecordBuilder, SENTINEL};
pub use document::{DocumentParser, ParsedDocument, RawSection};
pub use section::{AnalyzedSection, SectionAnalyzer, SectionContent, KEY_IDEAS_MARKER, TOPICS_SLUG};
pub use slug::slugify;
