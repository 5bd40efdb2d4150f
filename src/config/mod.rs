//! # Configuration Module
//!
//! Options for the graph command, built from parsed command-line arguments
//! with a builder.
//!
//! ## Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use tfgraph::cli::GraphFormat;
//! use tfgraph::common::ConfigBuilder;
//! use tfgraph::config::GraphOptions;
//!
//! let options = GraphOptions::builder()
//!     .with_path(PathBuf::from("infra/main.tf"))
//!     .with_resource_type("aws_instance".to_string())
//!     .with_resource_name("web".to_string())
//!     .with_output(PathBuf::from("graph.dot"))
//!     .with_format(GraphFormat::Dot)
//!     .with_max_depth(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.target_id(), "aws_instance.web");
//! ```

pub mod graph;

pub use graph::{GraphOptions, GraphOptionsBuilder};
