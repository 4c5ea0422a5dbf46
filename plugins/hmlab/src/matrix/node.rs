//! Locus nodes of the stratigraphy.

use serde::{Deserialize, Serialize};

/// One locus in the stratigraphy.
///
/// `earlier_nodes` is a somewhat misleading term: earlier nodes in a
/// Harris Matrix appear deeper down in the DAG than the later ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contemporaries: Vec<String>,
    #[serde(default)]
    pub earlier_nodes: Vec<String>,
    #[serde(default)]
    pub locus_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The raw record this node was built from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl HmNode {
    pub fn new(id: &str, contemporaries: Vec<String>, earlier_nodes: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            contemporaries,
            earlier_nodes,
            locus_type: String::new(),
            tags: Vec::new(),
            data: None,
        }
    }
}

pub(crate) fn find_node<'a>(nodes: &'a [HmNode], id: &str) -> Option<&'a HmNode> {
    nodes.iter().find(|n| n.id == id)
}

pub(crate) fn find_node_index(nodes: &[HmNode], id: &str) -> Option<usize> {
    nodes.iter().position(|n| n.id == id)
}

/// Remove a relation from `from` to `to`; true when one was dropped.
pub(crate) fn remove_relation(nodes: &mut [HmNode], from: &str, to: &str, contemporary: bool) -> bool {
    let Some(node) = nodes.iter_mut().find(|n| n.id == from) else {
        return false;
    };
    let relations = if contemporary {
        &mut node.contemporaries
    } else {
        &mut node.earlier_nodes
    };
    match relations.iter().position(|id| id == to) {
        Some(idx) => {
            relations.remove(idx);
            true
        }
        None => false,
    }
}
