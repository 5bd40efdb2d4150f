use std::path::PathBuf;

use miette::{Diagnostic, NamedSource};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid HCL syntax in '{file}'")]
#[diagnostic(
    code(tfgraph::hcl_parse_error),
    help("Check the configuration syntax; the file is skipped during traversal")
)]
pub struct HclParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[source]
    pub source: hcl::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum TfGraphError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(tfgraph::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    HclParseError(Box<HclParseError>),

    #[error("Failed to scan directory '{path}'")]
    #[diagnostic(
        code(tfgraph::directory_scan_error),
        help("Check that the directory exists and is readable")
    )]
    DirectoryScanError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("File {path} does not exist")]
    #[diagnostic(
        code(tfgraph::input_not_found),
        help("Pass the path of an existing Terraform file with --path")
    )]
    InputNotFound { path: PathBuf },

    #[error("Failed to write output to '{path}'")]
    #[diagnostic(
        code(tfgraph::output_write_error),
        help("Check that the output directory exists and is writable")
    )]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(
        code(tfgraph::invalid_arguments),
        help("Run with --help to see the required arguments and supported formats")
    )]
    InvalidArguments { message: String },

    #[error("IO error")]
    #[diagnostic(
        code(tfgraph::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(tfgraph::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

impl TfGraphError {
    pub(crate) fn hcl_parse(path: &std::path::Path, content: String, source: hcl::Error) -> Self {
        let file = path.display().to_string();
        TfGraphError::HclParseError(Box::new(HclParseError {
            source_code: NamedSource::new(file.clone(), content),
            file,
            source,
        }))
    }
}
