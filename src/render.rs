//! DOT emission.
//!
//! The root graph and every subgraph draw themselves through the same
//! [`DrawGraph`] phases, so nesting is handled by one recursive walk. Output is
//! deterministic: attribute, node and edge lines are each sorted as complete
//! rendered strings, while subgraphs keep insertion order.

use std::fmt::{self, Write};

use crate::graph::{Attrs, Edge, Graph, Node, Subgraph};
use crate::writer::GraphWriter;

/// One level of a graph that can be written as a DOT block.
pub trait DrawGraph {
    fn graph(&self) -> &Graph;

    /// Opening line of the block.
    fn draw_header(&self, w: &mut GraphWriter);

    /// Contents of the block, written one level deeper than the header.
    fn draw_body(&self, w: &mut GraphWriter) {
        draw_attrs(self.graph(), w);
        draw_contents(self.graph(), w);
    }

    fn draw_footer(&self, w: &mut GraphWriter) {
        writeln!(w, "}}");
    }
}

impl DrawGraph for Graph {
    fn graph(&self) -> &Graph {
        self
    }

    fn draw_header(&self, w: &mut GraphWriter) {
        if self.directed {
            writeln!(w, "digraph {{");
        } else {
            writeln!(w, "graph {{");
        }
        // Root attributes sit at depth 0, right under the header, as in the
        // expected two-node output. Keep them out of the indented body even
        // though subgraph attributes are indented.
        draw_attrs(self, w);
    }

    fn draw_body(&self, w: &mut GraphWriter) {
        draw_contents(self, w);
    }
}

impl DrawGraph for Subgraph {
    fn graph(&self) -> &Graph {
        self
    }

    fn draw_header(&self, w: &mut GraphWriter) {
        if self.cluster {
            writeln!(w, "subgraph {} {{", quote(&format!("cluster_{}", self.name)));
        } else {
            writeln!(w, "subgraph {} {{", quote(&self.name));
        }
    }
}

/// Render a graph level, and everything nested in it, to DOT text.
pub fn render(level: &impl DrawGraph) -> String {
    let graph = level.graph();
    tracing::debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        subgraphs = graph.subgraph_count(),
        "rendering graph"
    );
    let mut w = GraphWriter::new();
    draw(level, &mut w);
    w.into_string()
}

/// Header, indented body, footer.
pub fn draw(level: &impl DrawGraph, w: &mut GraphWriter) {
    tracing::trace!(depth = w.depth(), "drawing graph level");
    level.draw_header(w);
    w.indent();
    level.draw_body(w);
    w.unindent();
    level.draw_footer(w);
}

fn draw_attrs(graph: &Graph, w: &mut GraphWriter) {
    for line in attr_strings(&graph.attrs) {
        writeln!(w, "{line}");
    }
}

fn draw_contents(graph: &Graph, w: &mut GraphWriter) {
    let mut nodes: Vec<String> = graph.nodes().iter().map(Node::to_string).collect();
    nodes.sort();
    for line in &nodes {
        writeln!(w, "{line}");
    }

    let mut edges: Vec<String> = graph.edges().iter().map(Edge::to_string).collect();
    edges.sort();
    for line in &edges {
        writeln!(w, "{line}");
    }

    for sub in graph.subgraphs() {
        draw(sub, w);
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.name))?;
        write_attr_list(f, &self.attrs)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `->` regardless of whether the owning graph is directed.
        write!(f, "{} -> {}", quote(&self.source), quote(&self.dest))?;
        write_attr_list(f, &self.attrs)
    }
}

fn write_attr_list(f: &mut fmt::Formatter<'_>, attrs: &Attrs) -> fmt::Result {
    if attrs.is_empty() {
        return Ok(());
    }
    write!(f, " [{}]", attr_strings(attrs).join(", "))
}

/// `key = "value"` strings in sorted order.
pub fn attr_strings(attrs: &Attrs) -> Vec<String> {
    let mut out: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{k} = {}", quote(v)))
        .collect();
    out.sort();
    out
}

/// Double-quote `s`, escaping quotes, backslashes and non-printable
/// characters with C-style short escapes or hex.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Controls, separators other than the ASCII space, format characters and
/// private-use characters are escaped. Unassigned code points pass through.
fn is_printable(c: char) -> bool {
    !(c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{1680}'
                | '\u{180e}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{3000}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{f0000}'..='\u{10ffff}'
        ))
}
