//! Data loader for exported activity files
//!
//! The app exports a child's activity collection as JSONL (one record per
//! line) or as a plain JSON array. This module discovers those export files
//! and parses them into typed [`Activity`] values.
//!
//! # Discovery
//!
//! The search root is resolved in order of precedence:
//! 1. an explicit path passed on the command line (a file or a directory),
//! 2. the `BABYSTAT_DATA_PATH` environment variable,
//! 3. the platform data directory (e.g. `~/.local/share/babystat` on Linux).
//!
//! # Malformed input
//!
//! A line that is not valid JSON, or that lacks a parseable timestamp, is
//! skipped with a warning rather than failing the whole load; one bad record
//! must never cost the statistics of the rest of the export. Field-level
//! problems inside a structurally valid record are handled further down by
//! [`Activity::from_raw`].

use babystat_core::error::{BabystatError, Result};
use babystat_core::types::{Activity, RawActivity};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Environment variable overriding the default data directory
pub const DATA_PATH_ENV: &str = "BABYSTAT_DATA_PATH";

/// Loader for activity export files
pub struct DataLoader {
    /// Resolved search root (a single file or a directory)
    root: PathBuf,
    /// Whether to show a progress bar while loading
    show_progress: bool,
}

impl DataLoader {
    /// Create a new DataLoader, resolving the search root
    ///
    /// # Errors
    ///
    /// Returns [`BabystatError::NoDataDirectory`] when no explicit path is
    /// given and neither the environment variable nor the platform data
    /// directory points at an existing location.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let root = match path {
            Some(p) => p,
            None => Self::discover_data_path().ok_or(BabystatError::NoDataDirectory)?,
        };
        debug!("Using activity data path: {}", root.display());

        Ok(Self {
            root,
            show_progress: false,
        })
    }

    /// Enable or disable the loading progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The resolved search root
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn discover_data_path() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(DATA_PATH_ENV) {
            let path = PathBuf::from(env_path);
            if path.exists() {
                return Some(path);
            }
            warn!(
                "{} points at {}, which does not exist",
                DATA_PATH_ENV,
                path.display()
            );
        }

        dirs::data_dir()
            .map(|d| d.join("babystat"))
            .filter(|p| p.exists())
    }

    /// Load every activity found under the search root
    ///
    /// Files ending in `.jsonl` are read line by line; files ending in
    /// `.json` are read as one array of records. Anything else is ignored.
    pub fn load_activities(&self) -> Result<Vec<Activity>> {
        let files = self.collect_export_files()?;
        debug!("Found {} activity export files", files.len());

        let progress = if self.show_progress && files.len() > 1 {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} {msg} [{bar:30}] {pos}/{len} files")
                    .expect("static progress template is valid"),
            );
            pb.set_message("Loading activities");
            Some(pb)
        } else {
            None
        };

        let mut activities = Vec::new();
        for file in &files {
            self.load_file(file, &mut activities)?;
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Loaded {} activities", activities.len()));
        }

        Ok(activities)
    }

    fn collect_export_files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.exists() {
            return Err(BabystatError::NoDataDirectory);
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("jsonl") | Some("json")
                )
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn load_file(&self, path: &Path, out: &mut Vec<Activity>) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") => self.load_jsonl(path, out),
            Some("json") => self.load_json_array(path, out),
            _ => Ok(()),
        }
    }

    fn load_jsonl(&self, path: &Path, out: &mut Vec<Activity>) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RawActivity>(&line) {
                Ok(raw) => out.push(Activity::from_raw(raw)),
                Err(e) => {
                    skipped += 1;
                    warn!(
                        "Skipping malformed record at {}:{}: {}",
                        path.display(),
                        line_no + 1,
                        e
                    );
                }
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed records in {}", skipped, path.display());
        }
        Ok(())
    }

    fn load_json_array(&self, path: &Path, out: &mut Vec<Activity>) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        let raws: Vec<RawActivity> =
            serde_json::from_reader(reader).map_err(|e| BabystatError::Parse {
                file: path.to_path_buf(),
                error: e.to_string(),
            })?;
        out.extend(raws.into_iter().map(Activity::from_raw));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babystat_core::types::ActivityKind;
    use std::io::Write;

    #[test]
    fn test_load_jsonl_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{"id":"a-1","babyId":"b-1","type":"feeding","timestamp":"2024-03-01T08:00:00Z","details":{{"amount":120}}}}"#
        )
        .unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(
            file,
            r#"{{"id":"a-2","babyId":"b-1","type":"sleep","timestamp":"not-a-date","details":{{}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"id":"a-3","babyId":"b-1","type":"diaperChange","timestamp":"2024-03-01T09:00:00Z","details":{{"isUrine":true}}}}"#
        )
        .unwrap();

        let loader = DataLoader::new(Some(path)).unwrap();
        let activities = loader.load_activities().unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].kind, ActivityKind::Feeding { amount_ml: 120.0 });
        assert_eq!(
            activities[1].kind,
            ActivityKind::Diaper {
                urine: true,
                stool: false
            }
        );
    }

    #[test]
    fn test_load_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"[{"id":"a-1","babyId":"b-1","type":"measurement","timestamp":"2024-03-01T08:00:00Z","details":{"weight":4200}}]"#,
        )
        .unwrap();

        let loader = DataLoader::new(Some(path)).unwrap();
        let activities = loader.load_activities().unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(
            activities[0].kind,
            ActivityKind::Measurement {
                weight_g: Some(4200.0),
                height_cm: None,
                temperature_c: None
            }
        );
    }

    #[test]
    fn test_directory_discovery_collects_both_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loader = DataLoader::new(Some(dir.path().to_path_buf())).unwrap();
        let files = loader.collect_export_files().unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let loader = DataLoader::new(Some(PathBuf::from("/definitely/not/here"))).unwrap();
        assert!(matches!(
            loader.load_activities(),
            Err(BabystatError::NoDataDirectory)
        ));
    }
}
