//! Graph command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;
use crate::error::TfGraphError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub path: PathBuf,
    pub resource_type: String,
    pub resource_name: String,
    pub output: PathBuf,
    pub format: GraphFormat,
    pub max_depth: usize,
    pub full_graph: bool,
    pub verbose: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }

    /// Identifier of the declaration to trace, `<type>.<name>`
    pub fn target_id(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_name)
    }

    /// Directory holding the configuration: the parent of the input file
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    path: Option<PathBuf>,
    resource_type: Option<String>,
    resource_name: Option<String>,
    output: Option<PathBuf>,
    format: Option<GraphFormat>,
    max_depth: Option<usize>,
    full_graph: Option<bool>,
    verbose: Option<bool>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_resource_type(mut self, resource_type: String) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn with_resource_name(mut self, resource_name: String) -> Self {
        self.resource_name = Some(resource_name);
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_full_graph(mut self, full_graph: bool) -> Self {
        self.full_graph = Some(full_graph);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
}

fn missing(field: &str) -> TfGraphError {
    TfGraphError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, TfGraphError> {
        let resource_type = self.resource_type.ok_or_else(|| missing("resource_type"))?;
        let resource_name = self.resource_name.ok_or_else(|| missing("resource_name"))?;

        if resource_type.is_empty() || resource_name.is_empty() {
            return Err(TfGraphError::InvalidArguments {
                message: "Declaration type and name must not be empty".to_string(),
            });
        }

        Ok(GraphOptions {
            path: self.path.ok_or_else(|| missing("path"))?,
            resource_type,
            resource_name,
            output: self.output.ok_or_else(|| missing("output"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            max_depth: self.max_depth.ok_or_else(|| missing("max_depth"))?,
            full_graph: self.full_graph.unwrap_or_default(),
            verbose: self.verbose.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    fn complete() -> GraphOptionsBuilder {
        GraphOptions::builder()
            .with_path(PathBuf::from("infra/main.tf"))
            .with_resource_type("aws_instance".to_string())
            .with_resource_name("web".to_string())
            .with_output(PathBuf::from("graph.dot"))
            .with_format(GraphFormat::Dot)
            .with_max_depth(3)
    }

    #[test]
    fn test_build_complete() {
        let options = complete().build().unwrap();

        assert_eq!(options.target_id(), "aws_instance.web");
        assert_eq!(options.base_dir(), PathBuf::from("infra"));
        assert!(!options.full_graph);
    }

    #[test]
    fn test_missing_field() {
        let result = GraphOptions::builder()
            .with_path(PathBuf::from("main.tf"))
            .with_resource_type("aws_instance".to_string())
            .with_resource_name("web".to_string())
            .build();

        match result {
            Err(TfGraphError::ConfigurationError { message }) => {
                assert_eq!(message, "Missing required field: output");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = complete().with_resource_name(String::new()).build();
        assert!(matches!(
            result,
            Err(TfGraphError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        let options = complete().with_path(PathBuf::from("main.tf")).build().unwrap();
        assert_eq!(options.base_dir(), PathBuf::from("."));
    }
}
