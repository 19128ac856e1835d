use std::path::{Path, PathBuf};

use async_trait::async_trait;
use drivecore_client::{DriveClient, DriveError, DriveHandle};
use drivecore_item::DriveItemResult;
use walkdir::WalkDir;

use crate::search::{contains_ascii_case_insensitive, is_image_name};

const SPECIAL_FOLDERS: &[&str] = &["Desktop", "Documents", "Music", "Pictures", "Videos"];

/// A directory tree served through the drive contract.
pub(crate) struct LocalDrive {
    root: PathBuf,
    max_results: usize,
}

impl LocalDrive {
    pub(crate) fn new(root: PathBuf, max_results: usize) -> Self {
        Self { root, max_results }
    }
}

#[async_trait]
impl DriveClient for LocalDrive {
    async fn resolve_primary_drive(&self) -> Result<Option<DriveHandle>, DriveError> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            root.is_dir().then(|| {
                let name = root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string());
                DriveHandle::new(root.display().to_string(), name)
            })
        })
        .await
        .map_err(|err| DriveError::Transport(err.to_string()))
    }

    async fn search(
        &self,
        drive: &DriveHandle,
        query: &str,
    ) -> Result<Option<Vec<DriveItemResult>>, DriveError> {
        let root = PathBuf::from(&drive.id);
        let needle = query.trim().to_ascii_lowercase();
        let limit = self.max_results;
        let found = tokio::task::spawn_blocking(move || walk_matches(&root, &needle, limit))
            .await
            .map_err(|err| DriveError::Search(err.to_string()))?;

        Ok(Some(found))
    }
}

fn walk_matches(root: &Path, needle_lower_ascii: &str, limit: usize) -> Vec<DriveItemResult> {
    let mut out = Vec::new();
    if limit == 0 {
        return out;
    }

    for entry in WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        let name = entry.file_name().to_string_lossy();
        if !contains_ascii_case_insensitive(&name, needle_lower_ascii) {
            continue;
        }

        let mut item = DriveItemResult::new(entry.path().display().to_string(), &*name);
        if entry.file_type().is_dir() {
            item = item.folder();
            if entry.depth() == 1 && SPECIAL_FOLDERS.contains(&item.name.as_str()) {
                item = item.special_folder();
            }
        } else if is_image_name(&item.name) {
            item = item.image();
        }

        out.push(item);
        if out.len() >= limit {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Pictures").join("reports")).unwrap();
        fs::write(root.join("Report.pdf"), b"%PDF").unwrap();
        fs::write(root.join("Pictures").join("report-chart.png"), b"png").unwrap();
        fs::write(root.join("notes.txt"), b"notes").unwrap();
        dir
    }

    #[tokio::test]
    async fn finds_matches_in_walk_order_with_hints() {
        let tree = sample_tree();
        let drive = LocalDrive::new(tree.path().to_path_buf(), 100);
        let handle = drive.resolve_primary_drive().await.unwrap().unwrap();

        let found = drive.search(&handle, "REPORT").await.unwrap().unwrap();

        let names: Vec<_> = found.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["report-chart.png", "reports", "Report.pdf"]);
        assert!(found[0].is_image);
        assert!(found[1].is_folder && !found[1].is_special_folder);
        assert!(!found[2].is_folder && !found[2].is_image);
    }

    #[tokio::test]
    async fn top_level_well_known_folders_are_special() {
        let tree = sample_tree();
        let drive = LocalDrive::new(tree.path().to_path_buf(), 100);
        let handle = drive.resolve_primary_drive().await.unwrap().unwrap();

        let found = drive.search(&handle, "pictures").await.unwrap().unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_folder && found[0].is_special_folder);
    }

    #[tokio::test]
    async fn result_cap_and_missing_root() {
        let tree = sample_tree();
        let drive = LocalDrive::new(tree.path().to_path_buf(), 1);
        let handle = drive.resolve_primary_drive().await.unwrap().unwrap();
        assert_eq!(drive.search(&handle, "r").await.unwrap().unwrap().len(), 1);

        let missing = LocalDrive::new(tree.path().join("absent"), 10);
        assert_eq!(missing.resolve_primary_drive().await.unwrap(), None);
    }
}
