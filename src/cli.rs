use std::path::PathBuf;

use clap::Parser;

use crate::constants::output::{DEFAULT_FORMAT, DEFAULT_OUTPUT};
use crate::constants::traversal::DEFAULT_MAX_DEPTH;

#[derive(Parser, Debug)]
#[command(
    name = "tfgraph",
    about = "Trace the dependencies of one Terraform declaration",
    long_about = "tfgraph locates a resource, module or data declaration in a Terraform \
                  configuration, follows the identifiers it references (including into local \
                  modules) up to a maximum depth, and writes the result as a Graphviz DOT \
                  diagram. Registry and remote module sources are recorded but not expanded.",
    version
)]
pub struct Cli {
    /// Terraform file inside the configuration directory to analyze
    #[arg(long, value_name = "FILE", env = "TFGRAPH_PATH")]
    pub path: PathBuf,

    /// Declaration type, e.g. `aws_instance`, `module` or `data.aws_ami`
    #[arg(long = "type", value_name = "TYPE", env = "TFGRAPH_TYPE")]
    pub resource_type: String,

    /// Declaration name
    #[arg(long, value_name = "NAME", env = "TFGRAPH_NAME")]
    pub name: String,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT, env = "TFGRAPH_OUTPUT")]
    pub output: PathBuf,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = DEFAULT_FORMAT,
        env = "TFGRAPH_FORMAT"
    )]
    pub format: GraphFormat,

    /// Maximum depth of dependency tracking
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH, env = "TFGRAPH_DEPTH")]
    pub depth: usize,

    /// Render every traversed node instead of the target and its direct
    /// references
    #[arg(long, env = "TFGRAPH_FULL_GRAPH")]
    pub full_graph: bool,

    /// Print every traversal step
    #[arg(short, long, env = "TFGRAPH_VERBOSE")]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Dot,
}
