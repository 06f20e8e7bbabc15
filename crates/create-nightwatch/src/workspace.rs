//! Filesystem access for the project being set up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files and directories of the target project
pub trait Workspace {
    /// Whether a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Entries directly inside a directory
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a directory and its parents
    fn make_dir(&self, path: &Path) -> io::Result<()>;

    /// Copy a directory tree; returns the files written
    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<Vec<PathBuf>>;

    /// Write a file, creating parent directories
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Read a whole file
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether a directory is missing or has nothing in it
    fn is_empty_dir(&self, path: &Path) -> bool {
        !self.exists(path) || self.list_dir(path).is_ok_and(|entries| entries.is_empty())
    }
}

/// [`Workspace`] over the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWorkspace;

impl Workspace for LocalWorkspace {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        fs::create_dir_all(to)?;
        for entry in self.list_dir(from)? {
            let Some(name) = entry.file_name() else {
                continue;
            };
            let target = to.join(name);
            if entry.is_dir() {
                written.extend(self.copy_tree(&entry, &target)?);
            } else if !target.exists() {
                fs::copy(&entry, &target)?;
                written.push(target);
            }
        }
        Ok(written)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
