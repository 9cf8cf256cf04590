pub mod error;
pub mod graph;
pub mod render;
pub mod script;
pub mod writer;

pub use error::{GraphError, ScriptError};
pub use graph::{Attrs, BuildGraph, Edge, Graph, GraphPath, Node, Subgraph, SubgraphMut, attrs};
pub use render::{DrawGraph, render};
pub use writer::GraphWriter;

/// Parse a graph script and render it as DOT.
pub fn render_script(input: &str) -> Result<String, ScriptError> {
    let graph = script::parse_script(input)?;
    Ok(render(&graph))
}
