// file: src/exporter/json.rs
// description: json export of parsed course records with a manifest

use crate::error::Result;
use crate::models::CourseDetail;
use crate::store::CourseStore;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Writes one `<slug>.json` per parseable course plus a `manifest.json`
/// describing the run. The JSON files carry the same `CourseDetail` shape
/// the store serves.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_courses: usize,
    pub skipped: usize,
    pub files: Vec<ExportedFile>,
}

#[derive(Debug, Serialize)]
pub struct ExportedFile {
    pub file: String,
    pub source: String,
    pub content_hash: String,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub async fn export_all(&self, store: &CourseStore, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {}", self.output_dir.display());

        let records = store.records().await?;
        let bar = ProgressBar::new(records.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut files = Vec::new();
        let mut skipped = 0usize;

        for (path, result) in records {
            bar.inc(1);
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!("Not exporting {}: {}", path.display(), err);
                    skipped += 1;
                    continue;
                }
            };

            let file_name = format!("{}.json", record.metadata.slug);
            let detail = CourseDetail::from_record(&record);
            let payload = if pretty {
                serde_json::to_vec_pretty(&detail)?
            } else {
                serde_json::to_vec(&detail)?
            };
            fs::write(self.output_dir.join(&file_name), payload)?;

            files.push(ExportedFile {
                file: file_name,
                source: record.metadata.source.clone(),
                content_hash: record.content_hash.clone(),
            });
        }
        bar.finish_and_clear();

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_courses: files.len(),
            skipped,
            files,
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        fs::write(self.output_dir.join("manifest.json"), manifest_bytes)?;

        info!(
            "Export complete: {} courses written, {} skipped",
            manifest.total_courses, manifest.skipped
        );
        Ok(manifest)
    }
}
