//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Kinds of declarations that can be addressed by an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationKind {
    Resource,
    Module,
    Data,
    Output,
}

impl DeclarationKind {
    /// Map a block keyword (`resource`, `module`, ...) to a declaration kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "resource" => Some(DeclarationKind::Resource),
            "module" => Some(DeclarationKind::Module),
            "data" => Some(DeclarationKind::Data),
            "output" => Some(DeclarationKind::Output),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Resource => "resource",
            DeclarationKind::Module => "module",
            DeclarationKind::Data => "data",
            DeclarationKind::Output => "output",
        }
    }

    /// Compute the identifier of a declaration of this kind from its labels.
    ///
    /// Returns `None` when the declaration lacks the labels its kind requires.
    pub fn identifier(&self, labels: &[String]) -> Option<String> {
        match (self, labels) {
            (DeclarationKind::Resource, [resource_type, name, ..]) => {
                Some(format!("{resource_type}.{name}"))
            }
            (DeclarationKind::Module, [name, ..]) => Some(format!("module.{name}")),
            (DeclarationKind::Data, [data_type, name, ..]) => {
                Some(format!("data.{data_type}.{name}"))
            }
            (DeclarationKind::Output, [name, ..]) => Some(format!("output.{name}")),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Classification of a reference by its address prefix
///
/// The derived ordering is the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceCategory {
    Variable,
    Module,
    Data,
    Resource,
    Output,
}

impl ReferenceCategory {
    /// Classify a reference by the first segment of its path
    pub fn classify(prefix: &str) -> Self {
        match prefix {
            "var" => ReferenceCategory::Variable,
            "module" => ReferenceCategory::Module,
            "data" => ReferenceCategory::Data,
            _ => ReferenceCategory::Resource,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceCategory::Variable => "variable",
            ReferenceCategory::Module => "module",
            ReferenceCategory::Data => "data",
            ReferenceCategory::Resource => "resource",
            ReferenceCategory::Output => "output",
        }
    }
}

impl From<DeclarationKind> for ReferenceCategory {
    fn from(kind: DeclarationKind) -> Self {
        match kind {
            DeclarationKind::Resource => ReferenceCategory::Resource,
            DeclarationKind::Module => ReferenceCategory::Module,
            DeclarationKind::Data => ReferenceCategory::Data,
            DeclarationKind::Output => ReferenceCategory::Output,
        }
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier observed inside a declaration, with the file it was seen in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub path: PathBuf,
}

impl Reference {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

/// References grouped by category, unique by identifier within a category
/// and kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedReferences {
    by_category: BTreeMap<ReferenceCategory, Vec<Reference>>,
}

impl CategorizedReferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference unless one with the same identifier is already
    /// recorded in that category. Returns whether it was added.
    pub fn insert(&mut self, category: ReferenceCategory, reference: Reference) -> bool {
        let refs = self.by_category.entry(category).or_default();
        if refs.iter().any(|existing| existing.id == reference.id) {
            return false;
        }
        refs.push(reference);
        true
    }

    pub fn get(&self, category: ReferenceCategory) -> &[Reference] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate categories in rendering order with their references
    pub fn iter(&self) -> impl Iterator<Item = (ReferenceCategory, &[Reference])> {
        self.by_category
            .iter()
            .map(|(category, refs)| (*category, refs.as_slice()))
    }

    /// Iterate every reference, tagged with its category
    pub fn all(&self) -> impl Iterator<Item = (ReferenceCategory, &Reference)> {
        self.iter()
            .flat_map(|(category, refs)| refs.iter().map(move |r| (category, r)))
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A declaration found in a configuration directory
#[derive(Debug, Clone)]
pub struct LocatedDeclaration {
    pub id: String,
    pub kind: DeclarationKind,
    pub name: String,
    pub path: PathBuf,
    pub references: CategorizedReferences,
}
