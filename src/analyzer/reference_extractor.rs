//! Reference extraction
//!
//! Turns the variable traversals of a declaration's attributes into
//! categorized, deduplicated references.

use std::path::Path;

use crate::constants::identifiers::DATA_ROOT;
use crate::core::{CategorizedReferences, Reference, ReferenceCategory};
use crate::source::{Declaration, IndexKey, PathSegment, VariablePath};

/// Extracts the identifiers a declaration depends on
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    /// Categorized references of every attribute of `declaration`, tagged
    /// with the file it was declared in
    pub fn extract(declaration: &Declaration, file: &Path) -> CategorizedReferences {
        let mut references = CategorizedReferences::new();

        for attribute in &declaration.attributes {
            for variable in attribute.variables() {
                let Some(id) = Self::reference_id(&variable) else {
                    continue;
                };

                let category = match id.split('.').next() {
                    Some(prefix) => ReferenceCategory::classify(prefix),
                    None => continue,
                };
                references.insert(category, Reference::new(id, file));
            }
        }

        references
    }

    /// The declaration identifier a traversal points at.
    ///
    /// Builds the dotted path (string index keys included, other indexes
    /// dropped) and keeps the segments that address a declaration: three
    /// for `data.<type>.<name>`, two otherwise. Paths shorter than two
    /// segments address nothing.
    pub fn reference_id(variable: &VariablePath) -> Option<String> {
        let segments: Vec<&str> = variable
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Root(name) | PathSegment::Attr(name) => Some(name.as_str()),
                PathSegment::Index(IndexKey::String(key)) => Some(key.as_str()),
                PathSegment::Index(IndexKey::Other) => None,
            })
            .collect();

        if segments.len() < 2 {
            return None;
        }

        let keep = if segments[0] == DATA_ROOT { 3 } else { 2 };
        Some(segments[..keep.min(segments.len())].join("."))
    }
}
