// file: src/parser/builder.rs
// description: assembles normalized course records from parse output
// reference: defaulting, sentinel substitution, rank and topic numbering

use crate::config::DefaultsConfig;
use crate::models::{CourseMetadata, CourseSection};
use crate::parser::document::ParsedDocument;
use crate::parser::section::{AnalyzedSection, SectionAnalyzer};
use crate::parser::slug::slugify;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

/// Identity placeholder for documents with no level-1 heading. Kept as the
/// literal value (rather than an absent field) because id, slug, and title
/// are required and equal in that case.
pub const SENTINEL: &str = "NA";

lazy_static! {
    /// Pre-existing numbering on topic lines, stripped before renumbering.
    static ref TOPIC_PREFIX: Regex = Regex::new(r"^\d+[.)]\s*").unwrap();
}

/// Pure, total assembly of the final record set. Never fails: missing
/// headings degrade to sentinels, everything else to absent fields.
#[derive(Debug)]
pub struct RecordBuilder {
    analyzer: SectionAnalyzer,
    defaults: DefaultsConfig,
}

impl RecordBuilder {
    pub fn new(defaults: DefaultsConfig) -> Self {
        Self {
            analyzer: SectionAnalyzer::new(),
            defaults,
        }
    }

    pub fn build(
        &self,
        document: &ParsedDocument,
        source: &Path,
        updated_at: Option<DateTime<Utc>>,
    ) -> (CourseMetadata, Vec<CourseSection>) {
        let mut topics: Vec<String> = Vec::new();
        let mut sections: Vec<CourseSection> = Vec::new();
        let mut rank: u32 = 1;

        for raw in &document.sections {
            match self.analyzer.analyze(raw) {
                AnalyzedSection::Topics(lines) => {
                    // last topics section wins if the document repeats it
                    topics = lines;
                }
                AnalyzedSection::Content(content) => {
                    let slug = non_empty(slugify(&content.title))
                        .unwrap_or_else(|| format!("section-{rank}"));
                    sections.push(CourseSection {
                        id: slug.clone(),
                        slug,
                        title: content.title,
                        description: content.description.or_else(|| content.tagline.clone()),
                        tagline: content.tagline,
                        key_ideas: content.key_ideas,
                        image: content.image,
                        rank,
                    });
                    rank += 1;
                }
            }
        }

        let (title, slug) = match &document.title {
            Some(title) => {
                let slug = non_empty(slugify(title))
                    .or_else(|| fallback_slug(source))
                    .unwrap_or_else(|| SENTINEL.to_string());
                (title.clone(), slug)
            }
            None => (SENTINEL.to_string(), SENTINEL.to_string()),
        };

        let tagline = document
            .preamble
            .as_ref()
            .and_then(|text| text.lines().next())
            .map(|line| line.trim().to_string());
        let description = document
            .preamble
            .as_ref()
            .and_then(|text| {
                let rest = text.lines().skip(1).collect::<Vec<_>>().join("\n");
                non_empty(rest.trim().to_string())
            })
            .or_else(|| tagline.clone());

        let metadata = CourseMetadata {
            id: slug.clone(),
            slug,
            title,
            tagline,
            description,
            status: self.defaults.status.clone(),
            category: self.defaults.category.clone(),
            year: self.defaults.year.clone(),
            updated_at,
            topics: renumber_topics(&topics),
            source: source.display().to_string(),
        };

        (metadata, sections)
    }
}

/// Topics are always re-numbered `"1. …"` onward, regardless of any
/// numbering present in the source lines.
fn renumber_topics(topics: &[String]) -> Vec<String> {
    topics
        .iter()
        .enumerate()
        .map(|(index, topic)| {
            let label = TOPIC_PREFIX.replace(topic, "");
            format!("{}. {}", index + 1, label.trim())
        })
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn fallback_slug(source: &Path) -> Option<String> {
    source
        .file_stem()
        .map(|stem| slugify(&stem.to_string_lossy()))
        .and_then(non_empty)
}
