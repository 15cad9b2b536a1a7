// file: src/models/summary.rs
// description: listing and detail projections of course records
// reference: summary is the list/search view, detail adds sections

use crate::models::course::{CourseMetadata, CourseRecord, CourseSection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary information surfaced in the course list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub source: String,
}

/// Full course payload returned for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub summary: CourseSummary,
    pub metadata: CourseMetadata,
    pub sections: Vec<CourseSection>,
}

impl CourseSummary {
    pub fn from_metadata(metadata: &CourseMetadata) -> Self {
        Self {
            id: metadata.id.clone(),
            slug: metadata.slug.clone(),
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            tagline: metadata.tagline.clone(),
            status: metadata.status.clone(),
            topics: metadata.topics.clone(),
            updated_at: metadata.updated_at,
            source: metadata.source.clone(),
        }
    }

    /// The denormalized text the store's substring search runs against.
    pub fn search_haystack(&self) -> String {
        let mut haystack = String::new();
        haystack.push_str(&self.title);
        haystack.push(' ');
        if let Some(description) = &self.description {
            haystack.push_str(description);
        }
        haystack.push(' ');
        haystack.push_str(&self.topics.join(" "));
        haystack.to_lowercase()
    }

    /// One-line rendering for terminal listings.
    pub fn format_line(&self) -> String {
        match &self.tagline {
            Some(tagline) => format!("{} [{}] {}", self.slug, self.id, tagline),
            None => format!("{} [{}]", self.slug, self.id),
        }
    }
}

impl CourseDetail {
    pub fn from_record(record: &CourseRecord) -> Self {
        Self {
            summary: CourseSummary::from_metadata(&record.metadata),
            metadata: record.metadata.clone(),
            sections: record.sections.clone(),
        }
    }
}
