//! # Declaration Analysis Module
//!
//! Answers the three questions the graph traverser asks about a
//! configuration directory.
//!
//! ## Key Components
//!
//! - **DeclarationLocator**: finds the declaration with a given identifier
//! - **ReferenceExtractor**: lists the identifiers a declaration depends on,
//!   grouped by category
//! - **ModuleResolver**: maps a `module.<name>` reference to the directory
//!   of the called module
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tfgraph::analyzer::{DeclarationLocator, ModuleResolution, ModuleResolver};
//! use tfgraph::source::HclSourceLoader;
//!
//! let locator = DeclarationLocator::new(HclSourceLoader::new(), None);
//!
//! if let Some(web) = locator.locate(Path::new("infra"), "aws_instance.web") {
//!     for (category, reference) in web.references.all() {
//!         println!("{category}: {}", reference.id);
//!     }
//! }
//!
//! let resolver = ModuleResolver::new(&locator, None);
//! if let ModuleResolution::Resolved { dir, .. } = resolver.resolve(Path::new("infra"), "module.net")
//! {
//!     println!("module.net lives in {}", dir.display());
//! }
//! ```

mod locator;
mod module_resolver;
mod reference_extractor;

pub use locator::DeclarationLocator;
pub use module_resolver::{ModuleResolution, ModuleResolver, UnresolvedModule};
pub use reference_extractor::ReferenceExtractor;
