// file: src/parser/document.rs
// description: heading-driven document segmentation state machine
// reference: recognizes exactly two heading levels, single forward scan

/// Splits raw course text into a title, a preamble, and raw sections.
#[derive(Debug)]
pub struct DocumentParser;

/// Intermediate parse tree. `title` and `preamble` are `None` when the
/// document carries no level-1 heading (or no text between headings);
/// sentinel substitution happens later in the record builder.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub preamble: Option<String>,
    pub sections: Vec<RawSection>,
}

/// One level-2 heading and everything up to the next one.
#[derive(Debug, Clone)]
pub struct RawSection {
    pub title: String,
    pub body: String,
}

enum ScanState {
    BeforeTitle,
    InPreamble,
    InSection,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Single left-to-right scan over the document's lines. The first
    /// `# `-line becomes the title; text until the next heading of any
    /// level is the preamble; every `## `-line opens a new section whose
    /// body runs to the next `## `-line or end of input.
    pub fn parse(&self, content: &str) -> ParsedDocument {
        let mut state = ScanState::BeforeTitle;
        let mut title: Option<String> = None;
        let mut preamble_lines: Vec<&str> = Vec::new();
        let mut sections: Vec<RawSection> = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in content.lines() {
            if let Some(text) = heading_text(line, 2) {
                if let Some((section_title, body)) = current.take() {
                    sections.push(RawSection {
                        title: section_title,
                        body: body.join("\n"),
                    });
                }
                current = Some((text.to_string(), Vec::new()));
                state = ScanState::InSection;
                continue;
            }

            match state {
                ScanState::BeforeTitle => {
                    if let Some(text) = heading_text(line, 1) {
                        title = Some(text.to_string());
                        state = ScanState::InPreamble;
                    }
                    // text before the first heading is ignored
                }
                ScanState::InPreamble => {
                    if is_any_heading(line) {
                        // a deeper heading also terminates the preamble
                        state = ScanState::InSection;
                    } else {
                        preamble_lines.push(line);
                    }
                }
                ScanState::InSection => {
                    if let Some((_, ref mut body)) = current {
                        body.push(line);
                    }
                }
            }
        }

        if let Some((section_title, body)) = current.take() {
            sections.push(RawSection {
                title: section_title,
                body: body.join("\n"),
            });
        }

        let preamble = {
            let text = preamble_lines.join("\n");
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        ParsedDocument {
            title,
            preamble,
            sections,
        }
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the heading text when `line` is a heading of exactly `level`.
fn heading_text(line: &str, level: usize) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes != level {
        return None;
    }
    let rest = &line[level..];
    let text = rest.strip_prefix(' ')?.trim();
    if text.is_empty() { None } else { Some(text) }
}

fn is_any_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    hashes > 0 && line[hashes..].starts_with(' ') && !line[hashes..].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_preamble_and_sections() {
        let parser = DocumentParser::new();
        let doc = parser.parse(
            "# Course Title\n\nAbout the course.\nSecond line.\n\n## First\nBody one.\n\n## Second\nBody two.",
        );

        assert_eq!(doc.title.as_deref(), Some("Course Title"));
        assert_eq!(doc.preamble.as_deref(), Some("About the course.\nSecond line."));
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "First");
        assert_eq!(doc.sections[0].body.trim(), "Body one.");
        assert_eq!(doc.sections[1].title, "Second");
    }

    #[test]
    fn test_missing_level_1_heading() {
        let parser = DocumentParser::new();
        let doc = parser.parse("just prose\nwith no headings at all\n");

        assert_eq!(doc.title, None);
        assert_eq!(doc.preamble, None);
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_sections_without_title() {
        let parser = DocumentParser::new();
        let doc = parser.parse("## Orphan\nStill collected.\n");

        assert_eq!(doc.title, None);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Orphan");
    }

    #[test]
    fn test_deeper_heading_ends_preamble() {
        let parser = DocumentParser::new();
        let doc = parser.parse("# T\nintro\n### sub\nnot preamble\n## S\nbody\n");

        assert_eq!(doc.preamble.as_deref(), Some("intro"));
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_level_3_heading_stays_in_section_body() {
        let parser = DocumentParser::new();
        let doc = parser.parse("# T\n## S\nline\n### deep\nmore\n");

        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].body.contains("### deep"));
        assert!(doc.sections[0].body.contains("more"));
    }

    #[test]
    fn test_hash_run_without_space_is_not_a_heading() {
        let parser = DocumentParser::new();
        let doc = parser.parse("#NoSpace\n# Real Title\n");

        assert_eq!(doc.title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_sections_preserve_document_order() {
        let parser = DocumentParser::new();
        let doc = parser.parse("# T\n## C\n.\n## A\n.\n## B\n.\n");

        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
