// file: src/store/scanner.rs
// description: course file discovery with deterministic ordering
// reference: https://docs.rs/walkdir

use crate::config::CatalogConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct CourseScanner {
    config: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl CourseScanner {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Enumerate eligible course files directly under `root`, sorted
    /// lexicographically by file name. Listing and search order, and the
    /// duplicate-slug tie-break, all derive from this ordering.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if let Some(extension) = path.extension()
                && extension == self.config.extension.as_str()
                && let Ok(metadata) = entry.metadata()
            {
                let size = metadata.len();
                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().to_string();
                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    file_name,
                    size,
                });
            }
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        info!("Found {} course files in {}", files.len(), root.display());
        Ok(files)
    }
}
