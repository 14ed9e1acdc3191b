use std::path::Path;

use anyhow::{Context, Result};

use super::CONFIG_FILE;

/// Hand-written config template with commented-out keys, so users can see the
/// available knobs. Every key is optional.
const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Comparison: all fields optional, shown with their defaults.
# ─────────────────────────────────────────────────────────
[compare]
# algorithm = "block-fuzzy"          # "exact" | "color-fuzzy" | "block-fuzzy"
# color_tolerance = 0.1              # per-pixel color distance treated as equal
# pixel_tolerance = 0.2              # share of a block allowed to differ
# pixel_per_block = 20               # detection block side length
# marking_block_width = 10           # annotation / training block
# marking_block_height = 10
# close_mask = false                 # bridge small gaps in the mask
# structuring_element_width = 10
# structuring_element_height = 10
# difference_image = false           # also write difference/<id>.png
# transparency = "force-difference"  # "force-difference" | "compare-channels"
"#;

pub fn config_file_exists(root: &Path) -> bool {
    root.join(CONFIG_FILE).exists()
}

pub fn write_gitignore(root: &Path, force: bool) -> Result<()> {
    let path = root.join(".gitignore");
    if !force && path.exists() {
        return Ok(());
    }
    std::fs::write(&path, "current/\nmarked/\ndifference/\nreport.json\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_template(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;
    let path = root.join(CONFIG_FILE);
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompareSettings, load};

    #[test]
    fn template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".visdiff");
        write_template(&root).unwrap();
        assert!(config_file_exists(&root));
        assert_eq!(load(&root).unwrap().compare, CompareSettings::default());
    }

    #[test]
    fn gitignore_is_kept_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        std::fs::write(&path, "custom\n").unwrap();
        write_gitignore(dir.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "custom\n");
        write_gitignore(dir.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("marked/"));
    }
}
