use std::collections::HashMap;

use dotgraph::{Attrs, BuildGraph, Graph, Node, render};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Level {
    nodes: Vec<(String, Attrs)>,
    edges: Vec<(String, String, Attrs)>,
    children: Vec<(String, bool, Level)>,
}

fn attrs_strategy() -> impl Strategy<Value = Attrs> {
    prop::collection::hash_map("[a-z]{1,6}", "[a-zA-Z0-9 ._-]{0,8}", 0..3)
}

fn level_strategy() -> impl Strategy<Value = Level> {
    let leaf = (
        prop::collection::vec(("[a-z]{1,3}", attrs_strategy()), 0..5),
        prop::collection::vec(("[a-z]{1,3}", "[a-z]{1,3}", attrs_strategy()), 0..5),
    )
        .prop_map(|(nodes, edges)| Level {
            nodes,
            edges,
            children: Vec::new(),
        });
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            prop::collection::vec(("[a-z]{1,3}", attrs_strategy()), 0..5),
            prop::collection::vec(("[a-z]{1,3}", "[a-z]{1,3}", attrs_strategy()), 0..5),
            prop::collection::vec(("[a-z]{1,5}", any::<bool>(), inner), 0..3),
        )
            .prop_map(|(nodes, edges, children)| Level {
                nodes,
                edges,
                children,
            })
    })
}

fn fill(graph: &mut impl BuildGraph, level: &Level, reversed: bool) {
    let mut nodes: Vec<_> = level.nodes.iter().collect();
    let mut edges: Vec<_> = level.edges.iter().collect();
    if reversed {
        nodes.reverse();
        edges.reverse();
    }
    for (name, attrs) in nodes {
        graph.add_node(Node::new(name.as_str(), attrs.clone()));
    }
    for (src, dst, attrs) in edges {
        graph.add_edge_between(src.as_str(), dst.as_str(), attrs.clone());
    }
    for (name, cluster, child) in &level.children {
        let mut sub = graph.add_subgraph(name.as_str());
        sub.set_cluster(*cluster);
        fill(&mut sub, child, reversed);
    }
}

fn build(directed: bool, attrs: &Attrs, level: &Level, reversed: bool) -> Graph {
    let mut graph = if directed {
        Graph::directed(attrs.clone())
    } else {
        Graph::new(attrs.clone())
    };
    fill(&mut graph, level, reversed);
    graph
}

proptest! {
    #[test]
    fn render_is_deterministic(
        directed in any::<bool>(),
        attrs in attrs_strategy(),
        level in level_strategy(),
    ) {
        let g = build(directed, &attrs, &level, false);
        prop_assert_eq!(render(&g), render(&g));
    }

    #[test]
    fn node_and_edge_order_does_not_matter(
        directed in any::<bool>(),
        attrs in attrs_strategy(),
        level in level_strategy(),
    ) {
        let forward = build(directed, &attrs, &level, false);
        let backward = build(directed, &attrs, &level, true);
        prop_assert_eq!(render(&forward), render(&backward));
    }

    #[test]
    fn braces_balance(
        directed in any::<bool>(),
        attrs in attrs_strategy(),
        level in level_strategy(),
    ) {
        let g = build(directed, &attrs, &level, false);
        let output = render(&g);
        let open = output.matches('{').count();
        let close = output.matches('}').count();
        prop_assert_eq!(open, close);
        prop_assert_eq!(open, 1 + g.subgraph_count());
    }

    #[test]
    fn every_edge_uses_arrow_even_when_undirected(
        attrs in attrs_strategy(),
        level in level_strategy(),
    ) {
        let g = build(false, &attrs, &level, false);
        let output = render(&g);
        prop_assert!(output.ends_with("}\n"), "output does not end with closing brace");
        let edge_lines = output.lines().filter(|l| l.contains(" -> ")).count();
        let mut total_edges = 0;
        let mut stack = vec![&level];
        while let Some(l) = stack.pop() {
            total_edges += l.edges.len();
            stack.extend(l.children.iter().map(|(_, _, c)| c));
        }
        prop_assert_eq!(edge_lines, total_edges);
    }

    #[test]
    fn lookup_matches_last_added(
        names in prop::collection::vec(("[a-c]", "[0-9]"), 0..10),
    ) {
        let mut g = Graph::new(Attrs::new());
        let mut expected: HashMap<String, String> = HashMap::new();
        for (name, tag) in &names {
            g.add_node(Node::new(name.as_str(), dotgraph::attrs(&[("tag", tag.as_str())])));
            expected.insert(name.clone(), tag.clone());
        }
        prop_assert_eq!(g.nodes().len(), names.len());
        for name in ["a", "b", "c"] {
            match expected.get(name) {
                Some(tag) => {
                    prop_assert_eq!(&g.get_node(name).unwrap().attrs["tag"], tag);
                }
                None => {
                    prop_assert!(g.get_node(name).is_err());
                }
            }
        }
    }
}
