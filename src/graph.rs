use std::collections::HashMap;
use std::ops::Deref;

use crate::error::GraphError;

/// Attribute map attached to graphs, nodes and edges. Rendered sorted.
pub type Attrs = HashMap<String, String>;

/// Location of a graph inside its root: the subgraph index taken at each level.
/// The root graph has the empty path.
pub type GraphPath = Vec<usize>;

/// Build an attribute map from borrowed pairs.
pub fn attrs(pairs: &[(&str, &str)]) -> Attrs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Default, PartialEq)]
pub struct Graph {
    pub directed: bool,
    pub attrs: Attrs,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    subgraphs: Vec<Subgraph>,
    node_index: HashMap<String, Node>,
    path: GraphPath,
}

/// A graph nested inside another graph. Read it through `Deref`; build it
/// through the [`SubgraphMut`] handle returned by [`Graph::add_subgraph`].
#[derive(Debug, PartialEq)]
pub struct Subgraph {
    graph: Graph,
    pub name: String,
    pub cluster: bool,
    parent: GraphPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub attrs: Attrs,
}

/// A reference between two node names. The names are not checked against the
/// graph, so edges may point at nodes declared later or elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub dest: String,
    pub attrs: Attrs,
}

impl Node {
    pub fn new(name: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }
}

impl Edge {
    pub fn new(source: impl Into<String>, dest: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            attrs,
        }
    }
}

impl Graph {
    pub fn new(attrs: Attrs) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    pub fn directed(attrs: Attrs) -> Self {
        Self {
            directed: true,
            ..Self::new(attrs)
        }
    }

    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Append a node. A node sharing its name with an earlier one replaces it
    /// in the lookup index, but both are still rendered.
    pub fn add_node(&mut self, node: Node) {
        self.node_index.insert(node.name.clone(), node.clone());
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn add_edge_between(
        &mut self,
        source: impl Into<String>,
        dest: impl Into<String>,
        attrs: Attrs,
    ) {
        self.add_edge(Edge::new(source, dest, attrs));
    }

    /// Append an empty subgraph and hand it back for further building.
    pub fn add_subgraph(&mut self, name: impl Into<String>) -> SubgraphMut<'_> {
        let name = name.into();
        let mut path = self.path.clone();
        path.push(self.subgraphs.len());
        tracing::debug!(name = %name, depth = path.len(), "adding subgraph");

        self.subgraphs.push(Subgraph {
            graph: Graph {
                path,
                ..Graph::default()
            },
            name,
            cluster: false,
            parent: self.path.clone(),
        });
        let last = self.subgraphs.len() - 1;
        SubgraphMut {
            inner: &mut self.subgraphs[last],
        }
    }

    pub fn get_node(&self, name: &str) -> Result<&Node, GraphError> {
        self.node_index
            .get(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    /// This graph's position below its root.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Resolve a path relative to this graph. The empty path yields `None`,
    /// since the graph itself is not a subgraph.
    pub fn subgraph_at(&self, path: &[usize]) -> Option<&Subgraph> {
        let (&first, rest) = path.split_first()?;
        let mut current = self.subgraphs.get(first)?;
        for &i in rest {
            current = current.graph.subgraphs.get(i)?;
        }
        Some(current)
    }

    pub fn subgraph_at_mut(&mut self, path: &[usize]) -> Option<SubgraphMut<'_>> {
        let (&first, rest) = path.split_first()?;
        let mut current = self.subgraphs.get_mut(first)?;
        for &i in rest {
            current = current.graph.subgraphs.get_mut(i)?;
        }
        Some(SubgraphMut { inner: current })
    }

    /// Total number of subgraphs at every depth.
    pub fn subgraph_count(&self) -> usize {
        self.subgraphs
            .iter()
            .map(|s| 1 + s.graph.subgraph_count())
            .sum()
    }
}

impl Subgraph {
    /// Path of the owning graph, resolvable from the root with
    /// [`Graph::subgraph_at`] (or the root itself when empty).
    pub fn parent(&self) -> &[usize] {
        &self.parent
    }
}

impl Deref for Subgraph {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

/// Mutable handle to a subgraph still owned by its parent.
///
/// Only appends are exposed. Subgraphs cannot be moved, replaced or
/// reordered once added, so every recorded path keeps resolving to the
/// graph it was taken from.
///
/// ```compile_fail
/// use dotgraph::{Attrs, Graph};
///
/// let mut g = Graph::new(Attrs::new());
/// let mut sub = g.add_subgraph("a");
/// **sub = Graph::default();
/// ```
#[derive(Debug)]
pub struct SubgraphMut<'a> {
    inner: &'a mut Subgraph,
}

impl SubgraphMut<'_> {
    pub fn set_cluster(&mut self, cluster: bool) -> &mut Self {
        self.inner.cluster = cluster;
        self
    }

    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.graph.add_attr(key, value);
    }

    pub fn add_node(&mut self, node: Node) {
        self.inner.graph.add_node(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.inner.graph.add_edge(edge);
    }

    pub fn add_edge_between(
        &mut self,
        source: impl Into<String>,
        dest: impl Into<String>,
        attrs: Attrs,
    ) {
        self.inner.graph.add_edge_between(source, dest, attrs);
    }

    pub fn add_subgraph(&mut self, name: impl Into<String>) -> SubgraphMut<'_> {
        self.inner.graph.add_subgraph(name)
    }
}

impl Deref for SubgraphMut<'_> {
    type Target = Subgraph;

    fn deref(&self) -> &Subgraph {
        &*self.inner
    }
}

/// Building operations shared by a root graph and a subgraph handle.
pub trait BuildGraph {
    fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>);

    fn add_node(&mut self, node: Node);

    fn add_edge(&mut self, edge: Edge);

    fn add_subgraph(&mut self, name: impl Into<String>) -> SubgraphMut<'_>;

    fn add_edge_between(
        &mut self,
        source: impl Into<String>,
        dest: impl Into<String>,
        attrs: Attrs,
    ) {
        self.add_edge(Edge::new(source, dest, attrs));
    }
}

impl BuildGraph for Graph {
    fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        Graph::add_attr(self, key, value);
    }

    fn add_node(&mut self, node: Node) {
        Graph::add_node(self, node);
    }

    fn add_edge(&mut self, edge: Edge) {
        Graph::add_edge(self, edge);
    }

    fn add_subgraph(&mut self, name: impl Into<String>) -> SubgraphMut<'_> {
        Graph::add_subgraph(self, name)
    }
}

impl BuildGraph for SubgraphMut<'_> {
    fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        SubgraphMut::add_attr(self, key, value);
    }

    fn add_node(&mut self, node: Node) {
        SubgraphMut::add_node(self, node);
    }

    fn add_edge(&mut self, edge: Edge) {
        SubgraphMut::add_edge(self, edge);
    }

    fn add_subgraph(&mut self, name: impl Into<String>) -> SubgraphMut<'_> {
        SubgraphMut::add_subgraph(self, name)
    }
}
