//! Transitive reduction of the stratigraphic DAG.
//!
//! A locus that is above B which is above C does not need its own
//! relation to C; the reduction drops such shortcut edges so the drawn
//! matrix only shows immediate relations.

use crate::matrix::MatrixError;
use crate::matrix::graph::NodeGraph;
use crate::matrix::node::HmNode;

/// Nodes without incoming edges, i.e. the latest loci.
pub fn top_nodes(graph: &NodeGraph, check_for_cycle: bool) -> Result<Vec<String>, MatrixError> {
    if check_for_cycle && !graph.is_acyclic() {
        return Err(MatrixError::Cyclic);
    }
    Ok(graph
        .nodes()
        .filter(|n| graph.in_degree(n) == 0)
        .map(str::to_string)
        .collect())
}

/// Remove all transitive edges from the graph, returning the removed
/// edges. Refuses cyclic input.
pub fn transitive_reduction(graph: &mut NodeGraph) -> Result<Vec<(String, String)>, MatrixError> {
    let tops = top_nodes(graph, true)?;
    let mut removed = Vec::new();
    for node in &tops {
        reduce_from(graph, node, &mut removed);
    }
    Ok(removed)
}

fn reduce_from(graph: &mut NodeGraph, node: &str, removed: &mut Vec<(String, String)>) {
    for target in graph.out_neighbors(node) {
        for child in graph.preorder(&target) {
            if child != target && graph.has_edge(node, &child) {
                graph.remove_edge(node, &child);
                removed.push((node.to_string(), child));
            }
        }
        reduce_from(graph, &target, removed);
    }
}

/// Prune each node's earlier-relations to the transitively reduced edge
/// set, returning the removed edges.
pub fn remove_transitive_relations(
    nodes: &mut [HmNode],
) -> Result<Vec<(String, String)>, MatrixError> {
    let mut graph = NodeGraph::from_nodes(nodes);
    let removed = transitive_reduction(&mut graph)?;
    for node in nodes.iter_mut() {
        let id = node.id.clone();
        node.earlier_nodes
            .retain(|rel| graph.has_edge(&id, rel) || graph.has_edge(rel, &id));
    }
    Ok(removed)
}
