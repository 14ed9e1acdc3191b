use anyhow::{Result, bail};

use crate::config;
use crate::store::Store;

/// `visdiff init`: create .visdiff/config.toml.
pub fn init(store: &Store, force: bool) -> Result<()> {
    let root = store.root();
    if !force && config::config_file_exists(root) {
        bail!(
            "{}/config.toml already exists (use --force to overwrite)",
            root.display()
        );
    }

    config::write_template(root)?;
    config::write_gitignore(root, force)?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} {}/config.toml", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join(".visdiff"));
        init(&store, false).unwrap();
        assert!(store.root().join(".gitignore").exists());
        assert!(init(&store, false).is_err());
        init(&store, true).unwrap();
    }
}
