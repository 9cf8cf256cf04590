//! Graph scripts: a line-oriented way to describe a [`Graph`] in a file.
//!
//! ```text
//! digraph
//! attr rankdir LR
//! node web shape=box
//! edge web db label="reads from"
//! cluster backend
//!     node db
//! end
//! ```

use winnow::ascii::{alpha1, line_ending, space0, space1, till_line_ending};
use winnow::combinator::{alt, dispatch, eof, fail, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::error::ScriptError;
use crate::graph::{Attrs, BuildGraph, Edge, Graph, Node};

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Attr(String, String),
    Node(String, Attrs),
    Edge(String, String, Attrs),
    Subgraph {
        name: String,
        cluster: bool,
        body: Vec<Statement>,
    },
}

pub fn parse_script(input: &str) -> Result<Graph, ScriptError> {
    let mut rest = input;
    let directed = graph_kind(&mut rest).map_err(|_| ScriptError::MissingKind)?;
    let statements = block(&mut rest, false).map_err(|_| syntax_error(input, rest))?;

    let mut graph = if directed {
        Graph::directed(Attrs::new())
    } else {
        Graph::new(Attrs::new())
    };
    apply(&mut graph, statements);
    tracing::debug!(
        directed,
        nodes = graph.nodes().len(),
        subgraphs = graph.subgraph_count(),
        "parsed graph script"
    );
    Ok(graph)
}

fn syntax_error(input: &str, rest: &str) -> ScriptError {
    let offset = input.len() - rest.len();
    let line = input[..offset].matches('\n').count() + 1;
    let context = input.lines().nth(line - 1).unwrap_or("").trim();
    let context = if context.chars().count() > 40 {
        format!("{}...", context.chars().take(40).collect::<String>())
    } else {
        context.to_string()
    };
    ScriptError::Syntax { line, context }
}

fn apply(graph: &mut impl BuildGraph, statements: Vec<Statement>) {
    for statement in statements {
        match statement {
            Statement::Attr(key, value) => graph.add_attr(key, value),
            Statement::Node(name, attrs) => graph.add_node(Node::new(name, attrs)),
            Statement::Edge(source, dest, attrs) => graph.add_edge(Edge::new(source, dest, attrs)),
            Statement::Subgraph {
                name,
                cluster,
                body,
            } => {
                let mut sub = graph.add_subgraph(name);
                sub.set_cluster(cluster);
                apply(&mut sub, body);
            }
        }
    }
}

fn graph_kind(input: &mut &str) -> winnow::Result<bool> {
    skip_blank_lines(input)?;
    space0.parse_next(input)?;
    let directed = alt(("digraph".value(true), "graph".value(false))).parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(directed)
}

/// Statements up to end of input, or up to the closing `end` when nested.
fn block(input: &mut &str, nested: bool) -> winnow::Result<Vec<Statement>> {
    let mut body = Vec::new();
    loop {
        skip_blank_lines(input)?;
        (space0, opt(comment)).void().parse_next(input)?;
        if input.is_empty() {
            // An unterminated block ends with the input.
            return Ok(body);
        }
        if nested && opt(end_line).parse_next(input)?.is_some() {
            return Ok(body);
        }
        body.push(statement.parse_next(input)?);
    }
}

fn statement(input: &mut &str) -> winnow::Result<Statement> {
    dispatch! {alpha1;
        "attr" => preceded(space1, attr_stmt),
        "node" => preceded(space1, node_stmt),
        "edge" => preceded(space1, edge_stmt),
        "subgraph" => preceded(space1, subgraph_stmt(false)),
        "cluster" => preceded(space1, subgraph_stmt(true)),
        _ => fail,
    }
    .parse_next(input)
}

fn attr_stmt(input: &mut &str) -> winnow::Result<Statement> {
    let (k, v) = alt((
        pair,
        (key, preceded(space1, value)).map(|(k, v)| (k.to_string(), v)),
    ))
    .parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(Statement::Attr(k, v))
}

fn node_stmt(input: &mut &str) -> winnow::Result<Statement> {
    let name = value.parse_next(input)?;
    let attrs = pairs.parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(Statement::Node(name, attrs))
}

fn edge_stmt(input: &mut &str) -> winnow::Result<Statement> {
    let source = value.parse_next(input)?;
    space1.parse_next(input)?;
    let dest = value.parse_next(input)?;
    let attrs = pairs.parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(Statement::Edge(source, dest, attrs))
}

fn subgraph_stmt(cluster: bool) -> impl FnMut(&mut &str) -> winnow::Result<Statement> {
    move |input: &mut &str| {
        let name = value.parse_next(input)?;
        line_end.parse_next(input)?;
        let body = block(input, true)?;
        Ok(Statement::Subgraph {
            name,
            cluster,
            body,
        })
    }
}

fn end_line(input: &mut &str) -> winnow::Result<()> {
    "end".parse_next(input)?;
    line_end.parse_next(input)
}

fn pairs(input: &mut &str) -> winnow::Result<Attrs> {
    repeat(0.., preceded(space1, pair)).parse_next(input)
}

fn pair(input: &mut &str) -> winnow::Result<(String, String)> {
    let k = key.parse_next(input)?;
    (space0, '=', space0).void().parse_next(input)?;
    let v = value.parse_next(input)?;
    Ok((k.to_string(), v))
}

fn key<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .parse_next(input)
}

fn value(input: &mut &str) -> winnow::Result<String> {
    alt((quoted, bare_word.map(str::to_string))).parse_next(input)
}

fn bare_word<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '"' | '#' | '=')
    })
    .parse_next(input)
}

/// A double-quoted string on a single line. `\n` and `\t` become the control
/// characters; any other escaped character stands for itself.
fn quoted(input: &mut &str) -> winnow::Result<String> {
    '"'.parse_next(input)?;
    let mut out = String::new();
    loop {
        let chunk = take_while(0.., |c: char| !matches!(c, '"' | '\\' | '\n' | '\r'))
            .parse_next(input)?;
        out.push_str(chunk);
        match any.parse_next(input)? {
            '"' => return Ok(out),
            '\\' => match any.parse_next(input)? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                '\n' | '\r' => return Err(winnow::error::ParserError::from_input(input)),
                c => out.push(c),
            },
            _ => return Err(winnow::error::ParserError::from_input(input)),
        }
    }
}

fn comment(input: &mut &str) -> winnow::Result<()> {
    ('#', till_line_ending).void().parse_next(input)
}

/// Trailing whitespace and comment, then a newline or end of input.
fn line_end(input: &mut &str) -> winnow::Result<()> {
    (space0, opt(comment), alt((line_ending.void(), eof.void())))
        .void()
        .parse_next(input)
}

fn blank_line(input: &mut &str) -> winnow::Result<()> {
    (space0, opt(comment), line_ending).void().parse_next(input)
}

fn skip_blank_lines(input: &mut &str) -> winnow::Result<()> {
    repeat(0.., blank_line).parse_next(input)
}
