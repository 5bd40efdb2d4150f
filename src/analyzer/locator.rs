use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::ReferenceExtractor;
use crate::core::LocatedDeclaration;
use crate::progress::TraversalObserver;
use crate::source::{ConfigDirectory, Declaration, SourceFile, SourceLoader};

/// Finds declarations by identifier in a configuration directory
///
/// Lookups never fail: an unreadable directory or a missing declaration is
/// reported to the observer and surfaces as `None`.
pub struct DeclarationLocator<'a, L> {
    loader: L,
    observer: Option<&'a dyn TraversalObserver>,
    reported: RefCell<HashSet<PathBuf>>,
}

impl<'a, L: SourceLoader> DeclarationLocator<'a, L> {
    pub fn new(loader: L, observer: Option<&'a dyn TraversalObserver>) -> Self {
        Self {
            loader,
            observer,
            reported: RefCell::new(HashSet::new()),
        }
    }

    /// The first declaration of `dir` whose identifier is `id`, with the
    /// references it makes
    pub fn locate(&self, dir: &Path, id: &str) -> Option<LocatedDeclaration> {
        let directory = self.load(dir)?;

        let Some((file, declaration)) = Self::find(&directory, |decl| {
            decl.identifier().as_deref() == Some(id)
        }) else {
            if let Some(observer) = self.observer {
                observer.declaration_missing(id, dir);
            }
            return None;
        };

        if let Some(observer) = self.observer {
            observer.declaration_found(id, &file.path);
        }

        located(id.to_string(), file, declaration)
    }

    /// Identifiers of every addressable declaration of `dir`, in scan order
    pub fn declared_ids(&self, dir: &Path) -> Vec<String> {
        let Some(directory) = self.load(dir) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        directory
            .declarations()
            .filter_map(|(_, decl)| decl.identifier())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// First declaration of a directory accepted by `predicate`
    pub(crate) fn find<'d>(
        directory: &'d ConfigDirectory,
        predicate: impl Fn(&Declaration) -> bool,
    ) -> Option<(&'d SourceFile, &'d Declaration)> {
        directory.declarations().find(|(_, decl)| predicate(decl))
    }

    /// Load a directory, reporting skipped files the first time it is seen
    pub(crate) fn load(&self, dir: &Path) -> Option<Rc<ConfigDirectory>> {
        let first_visit = self.reported.borrow_mut().insert(dir.to_path_buf());

        match self.loader.load_directory(dir) {
            Ok(directory) => {
                if first_visit && let Some(observer) = self.observer {
                    for skipped in &directory.skipped {
                        observer.file_skipped(&skipped.path, &skipped.error);
                    }
                }
                Some(directory)
            }
            Err(error) => {
                if first_visit && let Some(observer) = self.observer {
                    observer.directory_failed(dir, &error);
                }
                None
            }
        }
    }
}

/// Materialize a declaration found in `file` under the given identifier
pub(crate) fn located(
    id: String,
    file: &SourceFile,
    declaration: &Declaration,
) -> Option<LocatedDeclaration> {
    Some(LocatedDeclaration {
        id,
        kind: declaration.declaration_kind()?,
        name: declaration.name().to_string(),
        path: file.path.clone(),
        references: ReferenceExtractor::extract(declaration, &file.path),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::core::{DeclarationKind, ReferenceCategory};
    use crate::error::TfGraphError;
    use crate::source::{CachedSourceLoader, HclSourceLoader};

    #[derive(Default)]
    struct Recorder {
        skipped: Cell<usize>,
        missing: Cell<usize>,
        failed: Cell<usize>,
    }

    impl TraversalObserver for Recorder {
        fn declaration_missing(&self, _id: &str, _dir: &Path) {
            self.missing.set(self.missing.get() + 1);
        }

        fn file_skipped(&self, _path: &Path, _error: &TfGraphError) {
            self.skipped.set(self.skipped.get() + 1);
        }

        fn directory_failed(&self, _dir: &Path, _error: &TfGraphError) {
            self.failed.set(self.failed.get() + 1);
        }
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_locate_each_kind() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "main.tf",
            r#"
resource "aws_instance" "web" {
  ami = data.aws_ami.latest.id
}

data "aws_ami" "latest" {}

module "net" {
  source = "./modules/net"
  cidr   = var.cidr
}

output "ip" {
  value = aws_instance.web.private_ip
}
"#,
        );

        let locator = DeclarationLocator::new(HclSourceLoader::new(), None);

        let web = locator.locate(temp.path(), "aws_instance.web").unwrap();
        assert_eq!(web.kind, DeclarationKind::Resource);
        assert_eq!(web.name, "web");
        assert_eq!(web.path, temp.path().join("main.tf"));
        assert_eq!(
            web.references.get(ReferenceCategory::Data)[0].id,
            "data.aws_ami.latest"
        );

        let data = locator.locate(temp.path(), "data.aws_ami.latest").unwrap();
        assert_eq!(data.kind, DeclarationKind::Data);

        let module = locator.locate(temp.path(), "module.net").unwrap();
        assert_eq!(module.kind, DeclarationKind::Module);
        assert_eq!(module.name, "net");

        let output = locator.locate(temp.path(), "output.ip").unwrap();
        assert_eq!(output.kind, DeclarationKind::Output);

        assert!(locator.locate(temp.path(), "aws_instance.db").is_none());
    }

    #[test]
    fn test_first_match_in_file_order() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "b.tf",
            "resource \"aws_vpc\" \"main\" {\n  cidr = var.b\n}\n",
        );
        write(
            temp.path(),
            "a.tf",
            "resource \"aws_vpc\" \"main\" {\n  cidr = var.a\n}\n",
        );

        let locator = DeclarationLocator::new(HclSourceLoader::new(), None);
        let found = locator.locate(temp.path(), "aws_vpc.main").unwrap();

        assert_eq!(found.path, temp.path().join("a.tf"));
        assert_eq!(
            found.references.get(ReferenceCategory::Variable)[0].id,
            "var.a"
        );
    }

    #[test]
    fn test_unparsable_file_is_skipped_and_reported_once() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a_broken.tf", "resource \"aws_vpc\" {\n");
        write(temp.path(), "main.tf", "resource \"aws_vpc\" \"main\" {}\n");

        let recorder = Recorder::default();
        let locator = DeclarationLocator::new(
            CachedSourceLoader::new(HclSourceLoader::new()),
            Some(&recorder),
        );

        assert!(locator.locate(temp.path(), "aws_vpc.main").is_some());
        assert!(locator.locate(temp.path(), "aws_vpc.other").is_none());

        assert_eq!(recorder.skipped.get(), 1);
        assert_eq!(recorder.missing.get(), 1);
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let locator = DeclarationLocator::new(HclSourceLoader::new(), Some(&recorder));

        let missing = temp.path().join("missing");
        assert!(locator.locate(&missing, "aws_vpc.main").is_none());
        assert!(locator.declared_ids(&missing).is_empty());
        assert_eq!(recorder.failed.get(), 1);
    }

    #[test]
    fn test_declared_ids_skip_unaddressable_blocks() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "main.tf",
            r#"
variable "cidr" {}
locals {
  name = "x"
}
resource "aws_subnet" "s" {}
resource "aws_subnet" {}
output "id" {
  value = aws_subnet.s.id
}
"#,
        );

        let locator = DeclarationLocator::new(HclSourceLoader::new(), None);
        assert_eq!(
            locator.declared_ids(temp.path()),
            vec!["aws_subnet.s", "output.id"]
        );
    }
}
