// file: src/parser/section.rs
// description: structured field extraction from raw section bodies
// reference: tagline/description split, key-ideas marker, inline images

use crate::parser::document::RawSection;
use crate::parser::slug::slugify;
use lazy_static::lazy_static;
use regex::Regex;

/// Reserved section title (once slugified) holding the course topic list.
pub const TOPICS_SLUG: &str = "topics";

/// Literal marker separating a section's prose from its key-ideas list.
pub const KEY_IDEAS_MARKER: &str = "**Key Ideas:**";

lazy_static! {
    /// First inline image reference anywhere in a raw body.
    static ref IMAGE_REF: Regex = Regex::new(r"!\[[^\]]*\]\(([^)]*)\)").unwrap();
    /// A line that is nothing but an image reference.
    static ref BARE_IMAGE_LINE: Regex = Regex::new(r"^!\[[^\]]*\]\([^)]*\)$").unwrap();
    /// Leading bullet or numeric list markers on idea lines.
    static ref LIST_PREFIX: Regex = Regex::new(r"^(?:[-*+]\s+|\d+[.)]\s+)").unwrap();
}

#[derive(Debug)]
pub struct SectionAnalyzer;

/// What a level-2 section turned out to be.
#[derive(Debug, Clone)]
pub enum AnalyzedSection {
    /// The reserved "topics" container: its non-empty lines, verbatim.
    Topics(Vec<String>),
    /// A content section destined to become a ranked `CourseSection`.
    Content(SectionContent),
}

#[derive(Debug, Clone, Default)]
pub struct SectionContent {
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub key_ideas: Vec<String>,
    pub image: Option<String>,
}

impl SectionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, section: &RawSection) -> AnalyzedSection {
        let lines: Vec<&str> = section
            .body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if slugify(&section.title) == TOPICS_SLUG {
            return AnalyzedSection::Topics(lines.into_iter().map(String::from).collect());
        }

        let tagline = lines.first().map(|line| (*line).to_string());
        let mut description = if lines.len() > 1 {
            Some(lines[1..].join("\n"))
        } else {
            None
        };

        let mut key_ideas = Vec::new();
        let marker_split = description
            .as_deref()
            .and_then(|text| text.split_once(KEY_IDEAS_MARKER))
            .map(|(before, after)| (before.trim().to_string(), after.to_string()));
        if let Some((before, after)) = marker_split {
            description = if before.is_empty() { None } else { Some(before) };

            key_ideas = after
                .lines()
                .map(|line| LIST_PREFIX.replace(line.trim(), "").trim().to_string())
                .filter(|line| !line.is_empty())
                .collect();

            // a trailing bare image line belongs to the image field below
            if let Some(last) = key_ideas.last()
                && BARE_IMAGE_LINE.is_match(last)
            {
                key_ideas.pop();
            }
        }

        // image references are scanned over the full raw body, not the
        // post-split description
        let image = IMAGE_REF
            .captures(&section.body)
            .map(|caps| caps[1].to_string());

        AnalyzedSection::Content(SectionContent {
            title: section.title.clone(),
            tagline,
            description,
            key_ideas,
            image,
        })
    }
}

impl Default for SectionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyze(title: &str, body: &str) -> AnalyzedSection {
        SectionAnalyzer::new().analyze(&RawSection {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    fn content(title: &str, body: &str) -> SectionContent {
        match analyze(title, body) {
            AnalyzedSection::Content(content) => content,
            AnalyzedSection::Topics(_) => panic!("expected a content section"),
        }
    }

    #[test]
    fn test_tagline_and_description_split() {
        let section = content("Triangles", "First line.\n\nMore detail.\nEven more.");

        assert_eq!(section.tagline.as_deref(), Some("First line."));
        assert_eq!(section.description.as_deref(), Some("More detail.\nEven more."));
    }

    #[test]
    fn test_empty_body_yields_no_fields() {
        let section = content("Empty", "\n\n");

        assert_eq!(section.tagline, None);
        assert_eq!(section.description, None);
        assert!(section.key_ideas.is_empty());
        assert_eq!(section.image, None);
    }

    #[test]
    fn test_topics_container_detected_case_insensitively() {
        match analyze("ToPiCs", "1) Shapes\n2) Angles\n") {
            AnalyzedSection::Topics(lines) => {
                assert_eq!(lines, vec!["1) Shapes".to_string(), "2) Angles".to_string()]);
            }
            AnalyzedSection::Content(_) => panic!("topics section misclassified"),
        }
    }

    #[test]
    fn test_key_ideas_extraction() {
        let section = content(
            "Triangles",
            "Triangles are 3-sided.\n**Key Ideas:**\n- sum of angles is 180\n* similar triangles scale\n3. congruence rules\n",
        );

        assert_eq!(
            section.key_ideas,
            vec![
                "sum of angles is 180".to_string(),
                "similar triangles scale".to_string(),
                "congruence rules".to_string(),
            ]
        );
        // nothing but the marker followed the tagline
        assert_eq!(section.description, None);
    }

    #[test]
    fn test_key_ideas_keep_preceding_description() {
        let section = content(
            "S",
            "Tagline.\nProse before ideas.\n**Key Ideas:**\n- idea one\n",
        );

        assert_eq!(section.description.as_deref(), Some("Prose before ideas."));
        assert_eq!(section.key_ideas, vec!["idea one".to_string()]);
    }

    #[test]
    fn test_trailing_bare_image_line_leaves_idea_list() {
        let section = content(
            "S",
            "Tagline.\n**Key Ideas:**\n- real idea\n![diagram](img/tri.png)\n",
        );

        assert_eq!(section.key_ideas, vec!["real idea".to_string()]);
        assert_eq!(section.image.as_deref(), Some("img/tri.png"));
    }

    #[test]
    fn test_first_image_reference_wins() {
        let section = content(
            "S",
            "Tagline.\n![first](a.png) and ![second](b.png)\n",
        );

        assert_eq!(section.image.as_deref(), Some("a.png"));
    }
}
