//! # Configuration Source Module
//!
//! The front end that turns a directory of Terraform files into
//! declarations the analyzer can inspect.
//!
//! ## Components
//!
//! - **SourceLoader**: loads every configuration file of one directory
//! - **HclSourceLoader**: the `hcl`-backed loader used by the CLI
//! - **CachedSourceLoader**: memoises directory listings for one run
//! - **collect_variables**: variable traversals contained in an expression
//!
//! Files that cannot be read or parsed do not fail a directory load; they
//! are listed in [`ConfigDirectory::skipped`] instead.

mod cache;
mod hcl_loader;
mod variables;

use std::path::{Path, PathBuf};
use std::rc::Rc;

pub use cache::CachedSourceLoader;
pub use hcl_loader::HclSourceLoader;
pub use variables::{IndexKey, PathSegment, VariablePath, collect_variables};

use crate::core::DeclarationKind;
use crate::error::TfGraphError;

/// Loads the configuration files found directly inside a directory
pub trait SourceLoader {
    fn load_directory(&self, dir: &Path) -> Result<Rc<ConfigDirectory>, TfGraphError>;
}

impl<L: SourceLoader + ?Sized> SourceLoader for &L {
    fn load_directory(&self, dir: &Path) -> Result<Rc<ConfigDirectory>, TfGraphError> {
        (**self).load_directory(dir)
    }
}

/// The parsed configuration files of one directory, in scan order
#[derive(Debug, Default)]
pub struct ConfigDirectory {
    pub path: PathBuf,
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

impl ConfigDirectory {
    /// Every declaration of the directory with the file it was declared in
    pub fn declarations(&self) -> impl Iterator<Item = (&SourceFile, &Declaration)> {
        self.files
            .iter()
            .flat_map(|file| file.declarations.iter().map(move |decl| (file, decl)))
    }
}

/// A configuration file that was left out of a directory listing
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: TfGraphError,
}

/// A parsed configuration file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
}

/// A top-level block: kind keyword, labels and attributes
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: String,
    pub labels: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl Declaration {
    pub fn declaration_kind(&self) -> Option<DeclarationKind> {
        DeclarationKind::from_keyword(&self.kind)
    }

    /// The identifier of the declaration, if it is an addressable kind with
    /// enough labels
    pub fn identifier(&self) -> Option<String> {
        self.declaration_kind()?.identifier(&self.labels)
    }

    /// Short name: the last label
    pub fn name(&self) -> &str {
        self.labels.last().map(String::as_str).unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// An attribute of a declaration. Attributes of nested blocks are named by
/// their dotted block path, e.g. `vpc_config.subnet_ids`.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub expr: hcl::Expression,
}

impl Attribute {
    pub fn variables(&self) -> Vec<VariablePath> {
        collect_variables(&self.expr)
    }
}
