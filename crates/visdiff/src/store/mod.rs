use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use tracing::debug;
use visdiff::{MaskFile, codec};

pub const REFERENCE_DIR: &str = "reference";
pub const CURRENT_DIR: &str = "current";
pub const MASK_DIR: &str = "mask";
pub const MARKED_DIR: &str = "marked";
pub const DIFFERENCE_DIR: &str = "difference";
pub const REPORT_FILE: &str = "report.json";

/// Snapshot directory layout: `<root>/<kind>/<id>.png`, where an id is the
/// path relative to the kind directory without the `.png` extension.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn file_path(&self, subdir: &str, id: &str) -> PathBuf {
        self.root.join(subdir).join(format!("{id}.png"))
    }

    pub fn reference_path(&self, id: &str) -> PathBuf {
        self.file_path(REFERENCE_DIR, id)
    }

    pub fn current_path(&self, id: &str) -> PathBuf {
        self.file_path(CURRENT_DIR, id)
    }

    pub fn marked_path(&self, id: &str) -> PathBuf {
        self.file_path(MARKED_DIR, id)
    }

    pub fn difference_path(&self, id: &str) -> PathBuf {
        self.file_path(DIFFERENCE_DIR, id)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }

    pub fn mask_file(&self, id: &str) -> MaskFile {
        MaskFile::new(self.file_path(MASK_DIR, id))
    }

    /// `Ok(None)` when the snapshot has no reference yet.
    pub fn read_reference(&self, id: &str) -> Result<Option<RgbaImage>> {
        let path = self.reference_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(codec::load(&path)?))
    }

    pub fn read_current(&self, id: &str) -> Result<RgbaImage> {
        Ok(codec::load(self.current_path(id))?)
    }

    pub fn has_marked(&self, id: &str) -> bool {
        self.marked_path(id).exists()
    }

    /// Remove the `marked/` and `difference/` files of one snapshot.
    pub fn clean_output(&self, id: &str) {
        let _ = std::fs::remove_file(self.marked_path(id));
        let _ = std::fs::remove_file(self.difference_path(id));
    }

    /// Remove all files from `marked/` and `difference/`.
    pub fn clear_output_dirs(&self) {
        for subdir in [MARKED_DIR, DIFFERENCE_DIR] {
            let dir = self.root.join(subdir);
            if dir.exists() {
                let _ = std::fs::remove_dir_all(&dir);
            }
        }
    }

    /// Promote `current/<id>.png` to `reference/<id>.png` and drop the stale
    /// outputs of that snapshot.
    pub fn approve(&self, id: &str) -> Result<()> {
        let from = self.current_path(id);
        let to = self.reference_path(id);
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::copy(&from, &to)
            .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
        let _ = std::fs::remove_file(&from);
        self.clean_output(id);
        debug!(id, "approved snapshot");
        Ok(())
    }

    /// Ids of every PNG under `current/`, sorted.
    pub fn list_current_ids(&self) -> Result<BTreeSet<String>> {
        let dir = self.root.join(CURRENT_DIR);
        let pattern = format!(
            "{}/**/*.png",
            glob::Pattern::escape(&dir.to_string_lossy())
        );
        let mut ids = BTreeSet::new();
        for entry in glob::glob(&pattern).context("Invalid snapshot glob")? {
            let path = entry.context("Failed to read snapshot directory")?;
            if let Ok(rel) = path.strip_prefix(&dir) {
                let id = rel.with_extension("");
                ids.insert(id.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join(".visdiff"));
        (dir, store)
    }

    fn put(path: &Path) {
        codec::save_png(&RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])), path).unwrap();
    }

    #[test]
    fn lists_nested_current_ids() {
        let (_dir, store) = store();
        put(&store.current_path("button/primary"));
        put(&store.current_path("header"));
        std::fs::write(store.root().join(CURRENT_DIR).join("notes.txt"), "x").unwrap();
        let ids: Vec<String> = store.list_current_ids().unwrap().into_iter().collect();
        assert_eq!(ids, vec!["button/primary".to_string(), "header".to_string()]);
    }

    #[test]
    fn empty_store_has_no_ids() {
        let (_dir, store) = store();
        assert!(store.list_current_ids().unwrap().is_empty());
        assert!(!store.exists());
    }

    #[test]
    fn missing_reference_reads_as_none() {
        let (_dir, store) = store();
        assert!(store.read_reference("nope").unwrap().is_none());
        put(&store.reference_path("yes"));
        assert!(store.read_reference("yes").unwrap().is_some());
    }

    #[test]
    fn approve_promotes_and_cleans() {
        let (_dir, store) = store();
        put(&store.current_path("a/b"));
        put(&store.marked_path("a/b"));
        put(&store.difference_path("a/b"));
        store.approve("a/b").unwrap();
        assert!(store.reference_path("a/b").exists());
        assert!(!store.current_path("a/b").exists());
        assert!(!store.has_marked("a/b"));
        assert!(!store.difference_path("a/b").exists());
    }

    #[test]
    fn clear_output_dirs_keeps_references_and_masks() {
        let (_dir, store) = store();
        put(&store.reference_path("x"));
        put(store.mask_file("x").path());
        put(&store.marked_path("x"));
        store.clear_output_dirs();
        assert!(store.reference_path("x").exists());
        assert!(store.mask_file("x").path().exists());
        assert!(!store.has_marked("x"));
    }
}
