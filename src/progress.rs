use std::cell::RefCell;
use std::path::Path;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::analyzer::UnresolvedModule;
use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::error::TfGraphError;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Why the traverser did not expand an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DepthExceeded,
    AlreadyVisited,
}

/// Receives notifications while the dependency graph is built
///
/// Observers only watch: every method returns `()` and the traversal makes
/// the same decisions with or without one.
pub trait TraversalObserver {
    fn visiting(&self, _id: &str, _depth: usize) {}

    fn skipped(&self, _id: &str, _depth: usize, _reason: SkipReason) {}

    fn declaration_found(&self, _id: &str, _path: &Path) {}

    fn declaration_missing(&self, _id: &str, _dir: &Path) {}

    fn module_resolved(&self, _id: &str, _dir: &Path) {}

    fn module_unresolved(&self, _id: &str, _reason: &UnresolvedModule) {}

    fn file_skipped(&self, _path: &Path, _error: &TfGraphError) {}

    fn directory_failed(&self, _dir: &Path, _error: &TfGraphError) {}
}

/// Console observer: spinner on an interactive terminal, warnings for
/// skipped files and unresolvable modules, step-by-step lines when verbose
pub struct ProgressReporter {
    term: Term,
    verbose: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            term: Term::stderr(),
            verbose,
            spinner: RefCell::new(None),
        }
    }

    pub fn start_traversal(&self, target: &str, base_dir: &Path) {
        eprintln!(
            "{} Tracing dependencies of {} in {}...",
            style("🔍").cyan(),
            style(target).bold(),
            style(base_dir.display()).dim()
        );

        if self.term.is_term() && !self.verbose {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(SPINNER_FRAMES),
            );
            spinner.enable_steady_tick(TICK_INTERVAL);
            *self.spinner.borrow_mut() = Some(spinner);
        }
    }

    pub fn finish_traversal(&self, node_count: usize) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }

        if node_count == 0 {
            eprintln!(
                "{} Target declaration not found; the graph is empty",
                style("✗").red()
            );
        } else {
            eprintln!(
                "{} Traversal complete: found {} {}",
                style("✓").green(),
                style(node_count).yellow().bold(),
                crate::utils::string::pluralize("node", node_count)
            );
        }
    }

    fn detail(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            eprintln!("  {} {}", style("·").dim(), message);
        }
    }

    fn warn(&self, message: std::fmt::Arguments<'_>) {
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.suspend(|| {
                eprintln!("{} {}", style("⚠").yellow(), message);
            }),
            None => eprintln!("{} {}", style("⚠").yellow(), message),
        }
    }
}

impl TraversalObserver for ProgressReporter {
    fn visiting(&self, id: &str, depth: usize) {
        if let Some(spinner) = self.spinner.borrow().as_ref() {
            spinner.set_message(format!("Traversing: {id}..."));
        }
        self.detail(format_args!("Traversing node: {id} at depth {depth}"));
    }

    fn skipped(&self, id: &str, depth: usize, reason: SkipReason) {
        match reason {
            SkipReason::DepthExceeded => {
                self.detail(format_args!("Depth limit reached at {id} (depth {depth})"))
            }
            SkipReason::AlreadyVisited => self.detail(format_args!("Already visited: {id}")),
        }
    }

    fn declaration_found(&self, id: &str, path: &Path) {
        self.detail(format_args!("Found {id} in {}", path.display()));
    }

    fn declaration_missing(&self, id: &str, dir: &Path) {
        self.detail(format_args!("Not found: {id} in {}", dir.display()));
    }

    fn module_resolved(&self, id: &str, dir: &Path) {
        self.detail(format_args!("Found module {id} at path: {}", dir.display()));
    }

    fn module_unresolved(&self, id: &str, reason: &UnresolvedModule) {
        match reason {
            UnresolvedModule::NotDeclared => {
                self.detail(format_args!("Module not found: {id}"));
            }
            UnresolvedModule::NonRelativeSource(_) => {
                self.detail(format_args!("Module {id} not expanded: {reason}"));
            }
            _ => self.warn(format_args!("Module {id} not expanded: {reason}")),
        }
    }

    fn file_skipped(&self, path: &Path, error: &TfGraphError) {
        self.warn(format_args!("Skipping {}: {}", path.display(), error));
    }

    fn directory_failed(&self, dir: &Path, error: &TfGraphError) {
        self.warn(format_args!("Failed to scan {}: {}", dir.display(), error));
    }
}
