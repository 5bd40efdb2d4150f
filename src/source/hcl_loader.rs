use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::WalkDir;

use super::{Attribute, ConfigDirectory, Declaration, SkippedFile, SourceFile, SourceLoader};
use crate::constants::traversal::CONFIG_EXTENSION;
use crate::error::TfGraphError;

/// Loads `.tf` files with the `hcl` parser
///
/// Only files directly inside the directory are considered; nested
/// directories are separate modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct HclSourceLoader;

impl HclSourceLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceLoader for HclSourceLoader {
    fn load_directory(&self, dir: &Path) -> Result<Rc<ConfigDirectory>, TfGraphError> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| TfGraphError::DirectoryScanError {
                path: dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if path.extension() != Some(OsStr::new(CONFIG_EXTENSION)) || !path.is_file() {
                continue;
            }

            match SourceFile::parse_file(path) {
                Ok(file) => files.push(file),
                Err(error) => skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    error,
                }),
            }
        }

        Ok(Rc::new(ConfigDirectory {
            path: dir.to_path_buf(),
            files,
            skipped,
        }))
    }
}

impl SourceFile {
    pub fn parse_file(path: &Path) -> Result<Self, TfGraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| TfGraphError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse_str(path, content)
    }

    pub fn parse_str(path: impl Into<PathBuf>, content: String) -> Result<Self, TfGraphError> {
        let path = path.into();
        let body = match hcl::parse(&content) {
            Ok(body) => body,
            Err(source) => return Err(TfGraphError::hcl_parse(&path, content, source)),
        };

        let declarations = body.blocks().map(Declaration::from_block).collect();

        Ok(SourceFile { path, declarations })
    }
}

impl Declaration {
    fn from_block(block: &hcl::Block) -> Self {
        let mut attributes = Vec::new();
        collect_attributes(block.body(), None, &mut attributes);

        Declaration {
            kind: block.identifier().to_string(),
            labels: block
                .labels()
                .iter()
                .map(|label| label.as_str().to_string())
                .collect(),
            attributes,
        }
    }
}

fn collect_attributes(body: &hcl::Body, prefix: Option<&str>, out: &mut Vec<Attribute>) {
    let qualified = |name: &str| match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    };

    for attr in body.attributes() {
        out.push(Attribute {
            name: qualified(attr.key()),
            expr: attr.expr().clone(),
        });
    }

    for nested in body.blocks() {
        let nested_prefix = qualified(nested.identifier());
        collect_attributes(nested.body(), Some(&nested_prefix), out);
    }
}
