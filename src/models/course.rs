// file: src/models/course.rs
// description: normalized course record types
// reference: served record shapes, optional fields omitted when absent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// High level metadata for one course file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseMetadata {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub source: String,
}

/// One ranked content section (a session) inside a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSection {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub key_ideas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 1-based, contiguous across the non-topics sections of one document.
    pub rank: u32,
}

/// The unit the store caches and the exporter writes: everything parsed
/// from one source file, plus a content hash of the raw text.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRecord {
    pub metadata: CourseMetadata,
    pub sections: Vec<CourseSection>,
    pub content_hash: String,
}

impl CourseRecord {
    pub fn new(metadata: CourseMetadata, sections: Vec<CourseSection>, content: &str) -> Self {
        Self {
            metadata,
            sections,
            content_hash: compute_hash(content),
        }
    }
}

fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata() -> CourseMetadata {
        CourseMetadata {
            id: "intro".to_string(),
            slug: "intro".to_string(),
            title: "Intro".to_string(),
            tagline: None,
            description: None,
            status: None,
            category: None,
            year: None,
            updated_at: None,
            topics: vec![],
            source: "intro.md".to_string(),
        }
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(metadata()).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("tagline"));
        assert!(!object.contains_key("updated_at"));
        assert_eq!(object["id"], "intro");
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = CourseRecord::new(metadata(), vec![], "# Intro");
        let b = CourseRecord::new(metadata(), vec![], "# Intro");
        assert_eq!(a.content_hash, b.content_hash);
        assert_eq!(a.content_hash.len(), 64);
    }
}
