use std::path::{Path, PathBuf};

use hcl::Value;
use hcl::eval::{Context, Evaluate};
use thiserror::Error;

use super::DeclarationLocator;
use super::locator::located;
use crate::core::identifier::{module_call_id, module_name};
use crate::core::{DeclarationKind, LocatedDeclaration};
use crate::progress::TraversalObserver;
use crate::source::SourceLoader;
use crate::utils::path::resolve_relative;

const SOURCE_ATTRIBUTE: &str = "source";

/// Why a module call could not be expanded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedModule {
    #[error("no module call with that name is declared")]
    NotDeclared,

    #[error("the module call has no source attribute")]
    MissingSource,

    #[error("the source is not a static string")]
    NonStaticSource,

    #[error("source '{0}' is not a relative path")]
    NonRelativeSource(String),

    #[error("module directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),
}

/// Outcome of resolving a module reference
#[derive(Debug, Clone)]
pub enum ModuleResolution {
    Resolved {
        /// Directory holding the module's configuration
        dir: PathBuf,
        /// The module-call site, with its input arguments as references
        declaration: LocatedDeclaration,
    },
    Unresolved(UnresolvedModule),
}

/// Resolves `module.<name>` references to the directory of the called module
pub struct ModuleResolver<'l, 'a, L> {
    locator: &'l DeclarationLocator<'a, L>,
    observer: Option<&'a dyn TraversalObserver>,
}

impl<'l, 'a, L: SourceLoader> ModuleResolver<'l, 'a, L> {
    pub fn new(
        locator: &'l DeclarationLocator<'a, L>,
        observer: Option<&'a dyn TraversalObserver>,
    ) -> Self {
        Self { locator, observer }
    }

    /// Resolve a module reference, such as `module.net` or
    /// `module.net.subnet_id`, against the module calls declared in `dir`
    pub fn resolve(&self, dir: &Path, id: &str) -> ModuleResolution {
        let resolution = self.resolve_inner(dir, id);

        if let Some(observer) = self.observer {
            match &resolution {
                ModuleResolution::Resolved { dir, .. } => observer.module_resolved(id, dir),
                ModuleResolution::Unresolved(reason) => observer.module_unresolved(id, reason),
            }
        }

        resolution
    }

    fn resolve_inner(&self, dir: &Path, id: &str) -> ModuleResolution {
        let (Some(call_id), Some(name)) = (module_call_id(id), module_name(id)) else {
            return ModuleResolution::Unresolved(UnresolvedModule::NotDeclared);
        };

        let Some(directory) = self.locator.load(dir) else {
            return ModuleResolution::Unresolved(UnresolvedModule::NotDeclared);
        };

        let Some((file, declaration)) = DeclarationLocator::<L>::find(&directory, |decl| {
            decl.declaration_kind() == Some(DeclarationKind::Module)
                && decl.labels.first().map(String::as_str) == Some(name)
        }) else {
            return ModuleResolution::Unresolved(UnresolvedModule::NotDeclared);
        };

        let module_dir = match declaration.attribute(SOURCE_ATTRIBUTE) {
            Some(source) => match static_source(&source.expr) {
                Ok(source) => resolve_source(dir, &source),
                Err(reason) => Err(reason),
            },
            None => Err(UnresolvedModule::MissingSource),
        };

        let module_dir = match module_dir {
            Ok(module_dir) => module_dir,
            Err(reason) => return ModuleResolution::Unresolved(reason),
        };

        match located(call_id.to_string(), file, declaration) {
            Some(declaration) => ModuleResolution::Resolved {
                dir: module_dir,
                declaration,
            },
            None => ModuleResolution::Unresolved(UnresolvedModule::NotDeclared),
        }
    }
}

/// Evaluate a `source` expression without any variables in scope
fn static_source(expr: &hcl::Expression) -> Result<String, UnresolvedModule> {
    match expr.evaluate(&Context::new()) {
        Ok(Value::String(source)) => Ok(source),
        _ => Err(UnresolvedModule::NonStaticSource),
    }
}

fn resolve_source(base_dir: &Path, source: &str) -> Result<PathBuf, UnresolvedModule> {
    if !source.starts_with('.') {
        return Err(UnresolvedModule::NonRelativeSource(source.to_string()));
    }

    let module_dir = resolve_relative(base_dir, source);
    if module_dir.is_dir() {
        Ok(module_dir)
    } else {
        Err(UnresolvedModule::MissingDirectory(module_dir))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::core::ReferenceCategory;
    use crate::source::HclSourceLoader;

    fn setup(module_block: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("modules/net")).unwrap();
        fs::write(
            temp.path().join("modules/net/main.tf"),
            "resource \"aws_subnet\" \"s\" {}\n",
        )
        .unwrap();
        fs::write(temp.path().join("main.tf"), module_block).unwrap();
        temp
    }

    fn resolve(temp: &TempDir, id: &str) -> ModuleResolution {
        let locator = DeclarationLocator::new(HclSourceLoader::new(), None);
        ModuleResolver::new(&locator, None).resolve(temp.path(), id)
    }

    #[test]
    fn test_resolves_relative_source() {
        let temp = setup(
            r#"
module "net" {
  source = "./modules/net"
  cidr   = var.cidr
  vpc_id = aws_vpc.main.id
}
"#,
        );

        match resolve(&temp, "module.net.subnet_id") {
            ModuleResolution::Resolved { dir, declaration } => {
                assert_eq!(dir, temp.path().join("modules/net"));
                assert_eq!(declaration.id, "module.net");
                assert_eq!(declaration.name, "net");
                assert_eq!(declaration.kind, DeclarationKind::Module);
                assert_eq!(
                    declaration.references.get(ReferenceCategory::Variable)[0].id,
                    "var.cidr"
                );
                assert_eq!(
                    declaration.references.get(ReferenceCategory::Resource)[0].id,
                    "aws_vpc.main"
                );
            }
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_source_is_not_expanded() {
        let temp = setup("module \"net\" {\n  source = \"registry.example.com/ns/net\"\n}\n");

        match resolve(&temp, "module.net") {
            ModuleResolution::Unresolved(UnresolvedModule::NonRelativeSource(source)) => {
                assert_eq!(source, "registry.example.com/ns/net");
            }
            other => panic!("expected non-relative source, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_directory() {
        let temp = setup("module \"net\" {\n  source = \"./modules/missing\"\n}\n");

        assert!(matches!(
            resolve(&temp, "module.net"),
            ModuleResolution::Unresolved(UnresolvedModule::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_computed_source_is_not_static() {
        let temp = setup("module \"net\" {\n  source = var.module_source\n}\n");

        assert!(matches!(
            resolve(&temp, "module.net"),
            ModuleResolution::Unresolved(UnresolvedModule::NonStaticSource)
        ));
    }

    #[test]
    fn test_constant_expression_source_evaluates() {
        let temp = setup("module \"net\" {\n  source = true ? \"./modules/net\" : \"./other\"\n}\n");

        assert!(matches!(
            resolve(&temp, "module.net"),
            ModuleResolution::Resolved { .. }
        ));
    }

    #[test]
    fn test_undeclared_and_sourceless_modules() {
        let temp = setup("module \"net\" {\n  cidr = \"10.0.0.0/16\"\n}\n");

        assert!(matches!(
            resolve(&temp, "module.app"),
            ModuleResolution::Unresolved(UnresolvedModule::NotDeclared)
        ));
        assert!(matches!(
            resolve(&temp, "module.net"),
            ModuleResolution::Unresolved(UnresolvedModule::MissingSource)
        ));
    }
}
