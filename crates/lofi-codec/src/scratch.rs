/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per invocation scratch directories
//!
//! Every codec round-trip gets a fresh directory below a shared root.
//! The directory and everything inside it is removed when the
//! [`ScratchSpace`] is dropped, whether the round-trip succeeded or not.
use std::path::{Path, PathBuf};

use lofi_core::errors::GlitchErrors;
use log::{trace, warn};
use tempfile::TempDir;

/// Default scratch root, relative to the working directory
pub const DEFAULT_SCRATCH_ROOT: &str = "temp";

/// Prefix of every scratch directory name
const SCRATCH_PREFIX: &str = "lofi-";

/// A uniquely named directory removed on drop
#[derive(Debug)]
pub struct ScratchSpace {
    path: PathBuf,
    // taken on drop so removal errors can be logged
    dir:  Option<TempDir>
}

impl ScratchSpace {
    /// Create a fresh directory under `root`
    ///
    /// `root` is created if missing, concurrent callers racing to create
    /// it is not an error.
    ///
    /// # Errors
    /// - The root cannot be created
    /// - No unique directory could be created below it
    pub fn new<P: AsRef<Path>>(root: P) -> Result<ScratchSpace, GlitchErrors> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;

        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(root)?;

        trace!("Created scratch directory {:?}", dir.path());

        Ok(ScratchSpace {
            path: dir.path().to_path_buf(),
            dir:  Some(dir)
        })
    }

    /// The directory itself
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` inside the scratch directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => trace!("Removed scratch directory {:?}", self.path),
                Err(err) => warn!("Could not remove scratch directory {:?}: {err}", self.path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::scratch::ScratchSpace;

    #[test]
    fn directories_are_unique_and_removed() {
        let root = std::env::temp_dir().join("lofi-scratch-unit");

        let a = ScratchSpace::new(&root).unwrap();
        let b = ScratchSpace::new(&root).unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().is_dir());

        std::fs::write(a.file("raw.blob"), [1, 2, 3]).unwrap();
        let dir = a.path().to_path_buf();

        drop(a);
        assert!(!dir.exists());
        assert!(b.path().is_dir());
    }

    #[test]
    fn missing_root_is_created() {
        let root = std::env::temp_dir()
            .join("lofi-scratch-nested")
            .join(format!("{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);

        let scratch = ScratchSpace::new(&root).unwrap();
        assert!(scratch.path().starts_with(&root));

        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("lofi-"));
    }

    #[test]
    fn vanished_directory_is_not_fatal_on_drop() {
        let scratch = ScratchSpace::new(std::env::temp_dir().join("lofi-scratch-unit")).unwrap();
        std::fs::remove_dir_all(scratch.path()).unwrap();

        // removal fails and is only logged
        drop(scratch);
    }
}
