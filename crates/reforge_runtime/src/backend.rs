//! A document backend over a directory of `MessagePack` files.

use std::fs;
use std::path::{Component as PathComponent, Path, PathBuf};

use reforge_foundation::{Error, ErrorKind, Result};
use reforge_storage::{Document, DocumentBackend};

use crate::serialize::{io_error, load_from_file, save_to_file};

const TEMP_SUFFIX: &str = ".reforge-tmp";

/// Stores each document as one file under a root directory.
///
/// A document path such as `scenes/level.agg` maps to the file
/// `<root>/scenes/level.agg`. Writes go to a temporary sibling file that is
/// renamed over the target, so a failed write never leaves a truncated
/// document behind.
#[derive(Clone, Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Opens a backend rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::new(ErrorKind::IoError(format!(
                "'{}' is not a directory",
                root.display()
            ))));
        }
        Ok(Self { root })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a document path to its file, rejecting paths that escape the root.
    fn file_for(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, PathComponent::Normal(_)));
        if path.is_empty() || escapes || path.ends_with(TEMP_SUFFIX) {
            return Err(Error::new(ErrorKind::IoError(format!(
                "invalid document path '{path}'"
            ))));
        }
        Ok(self.root.join(relative))
    }

    fn collect(&self, dir: &Path, paths: &mut Vec<String>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| io_error("list", dir, &e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list", dir, &e))?;
            let path = entry.path();
            if path.is_dir() {
                self.collect(&path, paths)?;
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !name.ends_with(TEMP_SUFFIX) {
                paths.push(name);
            }
        }
        Ok(())
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self, path: &str) -> Result<Option<Document>> {
        let file = self.file_for(path)?;
        if !file.is_file() {
            return Ok(None);
        }
        let mut document = load_from_file(&file)?;
        document.path = path.to_string();
        Ok(Some(document))
    }

    fn write(&mut self, document: &Document) -> Result<()> {
        let file = self.file_for(&document.path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create", parent, &e))?;
        }

        let mut temp = file.clone().into_os_string();
        temp.push(TEMP_SUFFIX);
        let temp = PathBuf::from(temp);

        if let Err(err) = save_to_file(document, &temp) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        fs::rename(&temp, &file).map_err(|e| {
            let _ = fs::remove_file(&temp);
            io_error("replace", &file, &e)
        })?;

        tracing::debug!(path = %document.path, file = %file.display(), "document written");
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<bool> {
        let file = self.file_for(path)?;
        if !file.is_file() {
            return Ok(false);
        }
        fs::remove_file(&file).map_err(|e| io_error("delete", &file, &e))?;
        Ok(true)
    }

    fn paths(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        self.collect(&self.root, &mut paths)?;
        paths.sort();
        Ok(paths)
    }
}
