use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ConfigDirectory, SourceLoader};
use crate::error::TfGraphError;

/// Memoises directory listings of an inner loader
///
/// Files are not expected to change during one traversal, so every
/// directory is read and parsed at most once. Failed loads are not cached.
pub struct CachedSourceLoader<L> {
    inner: L,
    directories: RefCell<HashMap<PathBuf, Rc<ConfigDirectory>>>,
}

impl<L: SourceLoader> CachedSourceLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            directories: RefCell::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn cached_directories(&self) -> usize {
        self.directories.borrow().len()
    }
}

impl<L: SourceLoader> SourceLoader for CachedSourceLoader<L> {
    fn load_directory(&self, dir: &Path) -> Result<Rc<ConfigDirectory>, TfGraphError> {
        if let Some(cached) = self.directories.borrow().get(dir) {
            return Ok(Rc::clone(cached));
        }

        let loaded = self.inner.load_directory(dir)?;
        self.directories
            .borrow_mut()
            .insert(dir.to_path_buf(), Rc::clone(&loaded));
        Ok(loaded)
    }
}
