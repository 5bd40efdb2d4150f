//! Configuration constants for tfgraph
//!
//! This module contains the constants used throughout the application.
//! Command-line defaults can be overridden through flags or environment
//! variables.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while walking the configuration
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒", "✓"];
}

/// Output configuration
pub mod output {
    /// Default diagram file
    pub const DEFAULT_OUTPUT: &str = "graph.dot";

    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "dot";
}

/// Traversal configuration
pub mod traversal {
    /// Default maximum reference depth
    pub const DEFAULT_MAX_DEPTH: usize = 3;

    /// Extension of the configuration files scanned in each directory
    pub const CONFIG_EXTENSION: &str = "tf";
}

/// Identifier prefixes and separators
pub mod identifiers {
    pub const MODULE_PREFIX: &str = "module.";
    pub const VARIABLE_PREFIX: &str = "var.";
    pub const LOCAL_PREFIX: &str = "local.";
    pub const DATA_ROOT: &str = "data";

    /// Separates a module-call identifier from the identifiers declared
    /// inside the module
    pub const NAMESPACE_SEPARATOR: &str = "/";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.len(), 5);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_OUTPUT, "graph.dot");
        assert_eq!(output::DEFAULT_FORMAT, "dot");
        assert_eq!(traversal::DEFAULT_MAX_DEPTH, 3);
    }
}
