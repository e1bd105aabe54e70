use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::errors::Result;
use crate::posting::JobPosting;

/// Postings created while the job board service was unreachable.
///
/// Stored as a JSON array. A missing or unreadable file reads as an empty
/// list so the board always renders; entries that no longer parse are
/// skipped on read but kept in the file.
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
    path: PathBuf,
}

impl LocalDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved drafts that parse, oldest first
    pub fn load(&self) -> Vec<JobPosting> {
        self.read_entries()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<JobPosting>(entry) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Skipping unreadable draft");
                    None
                }
            })
            .collect()
    }

    /// Append `draft` and rewrite the file atomically (temp file + rename).
    ///
    /// A file that is not a JSON array is moved aside to
    /// `<name>.corrupt-<unix time>` before the new list is written.
    pub fn save_draft(&self, draft: &JobPosting) -> Result<()> {
        let mut entries = match self.read_entries() {
            Some(entries) => entries,
            None => {
                self.set_aside()?;
                Vec::new()
            }
        };
        entries.push(serde_json::to_value(draft)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                tracing::error!(path = %parent.display(), error = %e, "Failed to create drafts directory");
                e
            })?;
        }

        let json = serde_json::to_string_pretty(&entries)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| {
            tracing::error!(path = %temp_path.display(), error = %e, "Failed to write temp drafts file");
            e
        })?;
        fs::rename(&temp_path, &self.path)?;

        tracing::info!(id = %draft.id, count = entries.len(), "Saved job posting as local draft");
        Ok(())
    }

    /// Raw entries of the file; `None` when it exists but cannot be read as a list
    fn read_entries(&self) -> Option<Vec<Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Some(Vec::new()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read drafts file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Drafts file is not a JSON list");
                None
            }
        }
    }

    fn set_aside(&self) -> Result<()> {
        let backup = self.path.with_extension(format!(
            "json.corrupt-{}",
            OffsetDateTime::now_utc().unix_timestamp()
        ));
        fs::rename(&self.path, &backup)?;

        tracing::warn!(backup = %backup.display(), "Moved corrupt drafts file aside");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::JobType;
    use tempfile::TempDir;

    fn draft(id: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: "Support Engineer".to_string(),
            company: "Helpdesk Co".to_string(),
            location: "Remote".to_string(),
            salary_min: 50000,
            salary_max: 65000,
            job_type: JobType::Contract,
            description: "Answer tickets".to_string(),
            benefits: vec!["Remote Work".to_string()],
            created_at: OffsetDateTime::now_utc(),
            company_logo: None,
            owner: Some("user-42".to_string()),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalDraftStore::new(temp_dir.path().join("drafts.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drafts.json");
        fs::write(&path, "{ not a list").unwrap();

        assert!(LocalDraftStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_save_appends_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalDraftStore::new(temp_dir.path().join("nested").join("drafts.json"));

        store.save_draft(&draft("a")).unwrap();
        store.save_draft(&draft("b")).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a");
        assert_eq!(loaded[1].owner.as_deref(), Some("user-42"));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_bad_entry_skipped_and_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drafts.json");
        let mut stale = serde_json::to_value(draft("stale")).unwrap();
        stale["job_type"] = Value::from("Remote");
        let entries = vec![serde_json::to_value(draft("keep-me")).unwrap(), stale];
        fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();
        let store = LocalDraftStore::new(&path);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "keep-me");

        store.save_draft(&draft("fresh")).unwrap();

        let ids: Vec<String> = store.load().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["keep-me", "fresh"]);

        let raw: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[1]["id"], "stale");
    }

    #[test]
    fn test_save_sets_corrupt_file_aside() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drafts.json");
        fs::write(&path, "garbage").unwrap();
        let store = LocalDraftStore::new(&path);

        store.save_draft(&draft("fresh")).unwrap();

        assert_eq!(store.load().len(), 1);

        let backups: Vec<PathBuf> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.to_string_lossy().contains("drafts.json.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "garbage");
    }
}
