use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Discovers source files to hand to an engine.
///
/// A file root is returned as-is. A directory root is walked recursively,
/// hidden entries included, keeping files whose extension is in the
/// configured list. Symlinked files are kept; symlinked directories are not
/// descended into. Entries that cannot be read are logged and skipped.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: vec!["py".to_string()],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Files in path order.
    pub fn walk(&self) -> Vec<PathBuf> {
        if !self.root.is_dir() {
            return vec![self.root.clone()];
        }

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        path = ?e.path().map(Path::display),
                        error = %e,
                        "skipping unreadable entry"
                    );
                    None
                }
            })
            .filter(|entry| is_file(entry) && self.should_process(entry.path()))
            .map(DirEntry::into_path)
            .collect()
    }

    fn should_process(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| *wanted == ext))
    }
}

/// Regular files, and symlinks whose target is a regular file.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

pub fn find_source_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    FileWalker::new(root.to_path_buf())
        .with_extensions(extensions.to_vec())
        .walk()
}
