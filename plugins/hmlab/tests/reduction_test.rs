#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Transitive reduction of stratigraphic relations.

use hmlab::matrix::{
    HmNode, MatrixError, NodeGraph, remove_transitive_relations, transitive_reduction,
};

fn node(id: &str, earlier: &[&str]) -> HmNode {
    HmNode::new(
        id,
        vec![],
        earlier.iter().map(|s| (*s).to_string()).collect(),
    )
}

#[test]
fn cyclic_graphs_are_refused() {
    let mut nodes = vec![
        node("1", &["2", "3", "4"]),
        node("2", &["3"]),
        node("3", &["4"]),
        node("4", &["1"]),
    ];
    assert_eq!(
        remove_transitive_relations(&mut nodes),
        Err(MatrixError::Cyclic)
    );

    let mut nodes = vec![
        node("1", &["2", "3", "4"]),
        node("2", &["3"]),
        node("3", &["4"]),
        node("4", &[]),
    ];
    assert!(remove_transitive_relations(&mut nodes).is_ok());
}

#[test]
fn reduction_prunes_node_relations() {
    let mut nodes = vec![
        node("1", &["2", "3", "4"]),
        node("2", &["3"]),
        node("3", &["4"]),
        node("4", &[]),
    ];

    let removed = remove_transitive_relations(&mut nodes).unwrap();
    assert_eq!(
        removed,
        vec![
            ("1".to_string(), "3".to_string()),
            ("1".to_string(), "4".to_string()),
        ]
    );
    assert_eq!(nodes[0].earlier_nodes, vec!["2"]);
    assert_eq!(nodes[1].earlier_nodes, vec!["3"]);
    assert_eq!(nodes[2].earlier_nodes, vec!["4"]);
    assert!(nodes[3].earlier_nodes.is_empty());
}

fn graph(edges: &[(&str, &str)]) -> NodeGraph {
    let mut graph = NodeGraph::new();
    for id in ["T", "1", "2", "3"] {
        graph.add_node(id);
    }
    for (v, w) in edges {
        graph.add_edge(v, w);
    }
    graph
}

#[test]
fn transitive_relation_from_top_node() {
    let mut g = graph(&[("T", "1"), ("T", "3"), ("1", "2"), ("2", "3")]);
    transitive_reduction(&mut g).unwrap();
    assert_eq!(g.to_dot(), "\"T\"->\"1\"\n\"1\"->\"2\"\n\"2\"->\"3\"\n");
}

#[test]
fn transitive_relation_from_second_layer() {
    let mut g = graph(&[("T", "1"), ("T", "3"), ("1", "2"), ("1", "3"), ("2", "3")]);
    transitive_reduction(&mut g).unwrap();
    assert_eq!(g.to_dot(), "\"T\"->\"1\"\n\"1\"->\"2\"\n\"2\"->\"3\"\n");
}

#[test]
fn special_cases() {
    let mut g = NodeGraph::new();
    transitive_reduction(&mut g).unwrap();

    for id in ["T", "1", "2", "3"] {
        g.add_node(id);
    }
    transitive_reduction(&mut g).unwrap();

    g.add_edge("T", "1");
    transitive_reduction(&mut g).unwrap();
    assert_eq!(g.to_dot(), "\"T\"->\"1\"\n");

    g.add_edge("2", "3");
    transitive_reduction(&mut g).unwrap();
    assert_eq!(g.to_dot(), "\"T\"->\"1\"\n\"2\"->\"3\"\n");
}

#[test]
fn reduction_returns_the_removed_edges() {
    let mut g = graph(&[("T", "1"), ("T", "3"), ("1", "2"), ("1", "3"), ("2", "3")]);
    let removed = transitive_reduction(&mut g).unwrap();
    assert_eq!(
        removed,
        vec![
            ("T".to_string(), "3".to_string()),
            ("1".to_string(), "3".to_string()),
        ]
    );
    assert_eq!(g.to_dot(), "\"T\"->\"1\"\n\"1\"->\"2\"\n\"2\"->\"3\"\n");
}
