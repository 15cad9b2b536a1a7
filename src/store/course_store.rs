// file: src/store/course_store.rs
// description: cached course record store with lookup and search
// reference: key-scoped locking, at most one concurrent parse per file

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{CourseDetail, CourseRecord, CourseSummary};
use crate::parser::{DocumentParser, RecordBuilder};
use crate::store::scanner::{CourseScanner, ScannedFile};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Shared, read-mostly store over one directory of course files.
///
/// Records are parsed lazily on first touch and cached per source path.
/// Each path owns an async mutex slot, so concurrent first reads of the
/// same file serialize on that slot and only one of them pays the parse;
/// different files parse fully in parallel. A cached entry is reused while
/// the file's size+mtime fingerprint is unchanged and rebuilt wholesale
/// otherwise.
#[derive(Debug)]
pub struct CourseStore {
    data_dir: PathBuf,
    extension: String,
    parallel_parses: usize,
    scanner: CourseScanner,
    parser: DocumentParser,
    builder: RecordBuilder,
    cache: Mutex<HashMap<PathBuf, CacheSlot>>,
}

type CacheSlot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

#[derive(Debug)]
struct CacheEntry {
    fingerprint: Fingerprint,
    record: Arc<CourseRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    size: u64,
    modified: Option<SystemTime>,
}

/// Aggregate counts for the `stats` CLI command.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogStats {
    pub courses: usize,
    pub sections: usize,
    pub topics: usize,
}

impl CourseStore {
    /// Fails fast when the configured data directory does not exist.
    pub fn new(config: &Config) -> Result<Self> {
        let data_dir = config.catalog.data_dir.clone();
        if !data_dir.is_dir() {
            return Err(CatalogError::DirectoryMissing { path: data_dir });
        }

        Ok(Self {
            data_dir,
            extension: config.catalog.extension.clone(),
            parallel_parses: config.store.parallel_parses.max(1),
            scanner: CourseScanner::new(config.catalog.clone()),
            parser: DocumentParser::new(),
            builder: RecordBuilder::new(config.defaults.clone()),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Summaries of every parseable course, in lexicographic file order.
    /// Files that fail to read or parse are logged and skipped; a bad file
    /// never aborts the listing.
    pub async fn list(&self) -> Result<Vec<CourseSummary>> {
        let files = self.scanner.scan(&self.data_dir)?;
        let records = self.records_in_order(files).await;

        Ok(records
            .into_iter()
            .filter_map(|(path, result)| match result {
                Ok(record) => Some(CourseSummary::from_metadata(&record.metadata)),
                Err(err) => {
                    warn!("Skipping {} in listing: {}", path.display(), err);
                    None
                }
            })
            .collect())
    }

    /// Resolve `identifier` to a full course detail. A matching file name
    /// is the fast path; otherwise files are scanned in the fixed order and
    /// the first record whose id or slug equals the identifier wins, which
    /// makes the duplicate-slug tie-break deterministic.
    pub async fn get(&self, identifier: &str) -> Result<CourseDetail> {
        if let Some(path) = self.direct_path(identifier)
            && tokio::fs::try_exists(&path).await.unwrap_or(false)
        {
            let record = self.record_for(&path).await?;
            return Ok(CourseDetail::from_record(&record));
        }

        let files = self.scanner.scan(&self.data_dir)?;
        for file in files {
            let record = match self.record_for(&file.path).await {
                Ok(record) => record,
                Err(err) if err.is_per_file() => {
                    debug!("Skipping {} during lookup: {}", file.path.display(), err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            if record.metadata.id == identifier || record.metadata.slug == identifier {
                return Ok(CourseDetail::from_record(&record));
            }
        }

        Err(CatalogError::NotFound {
            identifier: identifier.to_string(),
        })
    }

    /// Case-insensitive substring search over title, description, and
    /// topics, in listing order. The substring test runs unconditionally;
    /// routing the empty query to `list()` is the caller's concern.
    pub async fn search(&self, query: &str) -> Result<Vec<CourseSummary>> {
        let needle = query.to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|summary| summary.search_haystack().contains(&needle))
            .collect())
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        let files = self.scanner.scan(&self.data_dir)?;
        let records = self.records_in_order(files).await;

        let mut stats = CatalogStats {
            courses: 0,
            sections: 0,
            topics: 0,
        };
        for (_, result) in records {
            if let Ok(record) = result {
                stats.courses += 1;
                stats.sections += record.sections.len();
                stats.topics += record.metadata.topics.len();
            }
        }
        Ok(stats)
    }

    /// Every record in listing order, parse failures included per file.
    /// Used by the exporter, which reports failures instead of hiding them.
    pub async fn records(&self) -> Result<Vec<(PathBuf, Result<Arc<CourseRecord>>)>> {
        let files = self.scanner.scan(&self.data_dir)?;
        Ok(self.records_in_order(files).await)
    }

    /// The cached record for one source file, parsing it if the cache has
    /// no current entry.
    pub async fn record_for(&self, path: &Path) -> Result<Arc<CourseRecord>> {
        let slot = self.slot_for(path);
        let mut entry = slot.lock().await;

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|source| CatalogError::FileOperation {
                    path: path.to_path_buf(),
                    source,
                })?;
        let fingerprint = Fingerprint {
            size: metadata.len(),
            modified: metadata.modified().ok(),
        };

        if let Some(cached) = entry.as_ref()
            && cached.fingerprint == fingerprint
        {
            return Ok(Arc::clone(&cached.record));
        }

        debug!("Parsing course file {}", path.display());
        let record = Arc::new(self.parse_file(path, fingerprint.modified).await?);
        *entry = Some(CacheEntry {
            fingerprint,
            record: Arc::clone(&record),
        });
        Ok(record)
    }

    async fn parse_file(
        &self,
        path: &Path,
        modified: Option<SystemTime>,
    ) -> Result<CourseRecord> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CatalogError::FileOperation {
                path: path.to_path_buf(),
                source,
            })?;
        let content = String::from_utf8(bytes).map_err(|err| CatalogError::MalformedInput {
            file: path.display().to_string(),
            message: format!("not valid UTF-8: {err}"),
        })?;

        let document = self.parser.parse(&content);
        let updated_at = modified.map(DateTime::<Utc>::from);
        let (metadata, sections) = self.builder.build(&document, path, updated_at);
        Ok(CourseRecord::new(metadata, sections, &content))
    }

    /// Parse up to `parallel_parses` distinct files concurrently while
    /// preserving the input (lexicographic) order in the output.
    async fn records_in_order(
        &self,
        files: Vec<ScannedFile>,
    ) -> Vec<(PathBuf, Result<Arc<CourseRecord>>)> {
        stream::iter(files.into_iter().map(|file| async move {
            let result = self.record_for(&file.path).await;
            (file.path, result)
        }))
        .buffered(self.parallel_parses)
        .collect()
        .await
    }

    fn slot_for(&self, path: &Path) -> CacheSlot {
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| {
            // a poisoned map only means some reader panicked mid-insert
            poisoned.into_inner()
        });
        Arc::clone(cache.entry(path.to_path_buf()).or_default())
    }

    /// Identifiers are plain names; anything path-like skips the fast path
    /// so lookups cannot escape the data directory.
    fn direct_path(&self, identifier: &str) -> Option<PathBuf> {
        if identifier.is_empty()
            || identifier.contains('/')
            || identifier.contains('\\')
            || identifier.contains("..")
        {
            return None;
        }
        Some(
            self.data_dir
                .join(format!("{identifier}.{}", self.extension)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const GEOMETRY: &str = "# Intro to Geometry\n\nShapes and angles.\n\n## Topics\n1) Shapes\n2) Angles\n\n## Triangles\nTriangles are 3-sided.\n**Key Ideas:**\n- sum of angles is 180\n";

    fn store_for(temp: &TempDir) -> CourseStore {
        let mut config = Config::default_config();
        config.catalog.data_dir = temp.path().to_path_buf();
        CourseStore::new(&config).unwrap()
    }

    #[test]
    fn test_missing_directory_fails_fast() {
        let mut config = Config::default_config();
        config.catalog.data_dir = PathBuf::from("/definitely/not/here");
        let err = CourseStore::new(&config).unwrap_err();
        assert!(matches!(err, CatalogError::DirectoryMissing { .. }));
    }

    #[tokio::test]
    async fn test_list_in_lexicographic_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b-second.md"), "# Second Course\n").unwrap();
        fs::write(temp.path().join("a-first.md"), "# First Course\n").unwrap();

        let store = store_for(&temp);
        let summaries = store.list().await.unwrap();

        let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["First Course", "Second Course"]);
    }

    #[tokio::test]
    async fn test_list_skips_malformed_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.md"), "# Good Course\n").unwrap();
        fs::write(temp.path().join("bad.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let store = store_for(&temp);
        let summaries = store.list().await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].title, "Good Course");
    }

    #[tokio::test]
    async fn test_get_by_file_name_id_and_slug() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("geometry.md"), GEOMETRY).unwrap();
        let store = store_for(&temp);

        // file stem fast path
        let by_file = store.get("geometry").await.unwrap();
        assert_eq!(by_file.summary.title, "Intro to Geometry");

        // id and slug both resolve through the scan path
        let by_slug = store.get("intro-to-geometry").await.unwrap();
        assert_eq!(by_slug.summary.slug, "intro-to-geometry");
        assert_eq!(by_slug.sections.len(), 1);
        assert_eq!(by_slug.sections[0].rank, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_identifier_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("geometry.md"), GEOMETRY).unwrap();
        let store = store_for(&temp);

        let err = store.get("no-such-course").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_malformed_file_directly_surfaces_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.md"), [0xff, 0xfe]).unwrap();
        let store = store_for(&temp);

        let err = store.get("bad").await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedInput { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_slug_first_file_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("aaa.md"), "# Same Title\nfrom aaa\n").unwrap();
        fs::write(temp.path().join("zzz.md"), "# Same Title\nfrom zzz\n").unwrap();
        let store = store_for(&temp);

        let detail = store.get("same-title").await.unwrap();
        assert!(detail.metadata.source.ends_with("aaa.md"));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("geometry.md"), GEOMETRY).unwrap();
        fs::write(temp.path().join("cooking.md"), "# Pasta Basics\nBoiling water.\n").unwrap();
        let store = store_for(&temp);

        let upper = store.search("GEOMETRY").await.unwrap();
        let lower = store.search("geometry").await.unwrap();
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].slug, lower[0].slug);

        // topics are part of the haystack
        let by_topic = store.search("angles").await.unwrap();
        assert_eq!(by_topic.len(), 1);

        assert!(store.search("quantum").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_rebuilds_when_file_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("course.md");
        fs::write(&path, "# Old Title\n").unwrap();
        let store = store_for(&temp);

        let before = store.record_for(&path).await.unwrap();
        assert_eq!(before.metadata.title, "Old Title");

        // different length guarantees a changed fingerprint even when the
        // mtime resolution is coarse
        fs::write(&path, "# Brand New Title Entirely\n").unwrap();
        let after = store.record_for(&path).await.unwrap();
        assert_eq!(after.metadata.title, "Brand New Title Entirely");
    }

    #[tokio::test]
    async fn test_cache_reuses_entry_for_unchanged_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("course.md");
        fs::write(&path, GEOMETRY).unwrap();
        let store = store_for(&temp);

        let first = store.record_for(&path).await.unwrap();
        let second = store.record_for(&path).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_concurrent_reads_of_one_file_agree() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("course.md");
        fs::write(&path, GEOMETRY).unwrap();
        let store = Arc::new(store_for(&temp));

        let (a, b) = tokio::join!(store.record_for(&path), store.record_for(&path));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("geometry.md"), GEOMETRY).unwrap();
        let store = store_for(&temp);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.courses, 1);
        assert_eq!(stats.sections, 1);
        assert_eq!(stats.topics, 2);
    }
}
