//! Conversion of kiosk API locus relation records into matrix nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::matrix::HmNode;

/// Locus relation rows as the kiosk query API returns them: column
/// names plus one array per relation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocusRelations {
    pub result: bool,
    pub headers: Vec<String>,
    pub relations: Vec<Vec<Value>>,
}

fn header_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell<'a>(record: &'a [Value], idx: Option<usize>) -> Option<&'a Value> {
    idx.and_then(|i| record.get(i))
}

/// Derive the chronology from the relation type when the record carries
/// no usable chronology column.
fn chronology_from_relation_type(relation_type: Option<&str>, locus_uid: &str) -> String {
    match relation_type.unwrap_or_default() {
        "abuts" | "cuts through" | "above" => "later",
        "cut" | "cut by" | "below" | "is abutted by" => "earlier",
        "bonds with" | "is adjacent to" => "same time as",
        other => {
            error!(
                locus = %locus_uid,
                relation_type = %other,
                "cannot read the chronology type and don't understand the relation type"
            );
            ""
        }
    }
    .to_string()
}

/// Build one [`HmNode`] per locus, with deduplicated relations. Loci
/// that only ever appear on the related side of a record get a bare
/// node, so every relation target can be resolved by the analysis.
pub fn nodes_from_relations(api_data: &LocusRelations) -> Vec<HmNode> {
    let locus_id_idx = header_index(&api_data.headers, "arch_context");
    let locus_uid_idx = header_index(&api_data.headers, "uid");
    let chron_idx = header_index(&api_data.headers, "chronology");
    let relation_type_idx = header_index(&api_data.headers, "relation_type");
    let related_locus_idx = header_index(&api_data.headers, "uid_locus_2_related");

    let mut nodes: Vec<HmNode> = Vec::new();
    for record in &api_data.relations {
        let Some(locus_uid) = cell(record, locus_uid_idx).and_then(Value::as_str) else {
            continue;
        };
        let chron_type = match cell(record, chron_idx).and_then(Value::as_str) {
            Some(chronology) => chronology.to_lowercase(),
            None => {
                let relation_type = cell(record, relation_type_idx).and_then(Value::as_str);
                chronology_from_relation_type(relation_type, locus_uid)
            }
        };

        let node_idx = match nodes.iter().position(|n| n.id == locus_uid) {
            Some(idx) => idx,
            None => {
                nodes.push(HmNode::new(locus_uid, Vec::new(), Vec::new()));
                nodes.len() - 1
            }
        };
        // The node may have started as a bare relation target; its own
        // record fills in the display name and raw data.
        if nodes[node_idx].data.is_none() {
            if let Some(name) = cell(record, locus_id_idx).and_then(Value::as_str) {
                nodes[node_idx].name = name.to_string();
            }
            nodes[node_idx].data = Some(Value::Array(record.clone()));
        }

        let Some(related_uid) = cell(record, related_locus_idx).and_then(Value::as_str) else {
            continue;
        };
        let later = chron_type.starts_with("later");
        let contemporary = chron_type.starts_with("same");
        if (later || contemporary) && !nodes.iter().any(|n| n.id == related_uid) {
            nodes.push(HmNode::new(related_uid, Vec::new(), Vec::new()));
        }
        if later {
            if !nodes[node_idx].earlier_nodes.iter().any(|x| x == related_uid) {
                nodes[node_idx].earlier_nodes.push(related_uid.to_string());
            }
        } else if contemporary
            && !nodes[node_idx].contemporaries.iter().any(|x| x == related_uid)
        {
            nodes[node_idx].contemporaries.push(related_uid.to_string());
        }
    }
    nodes
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_data(relations: Vec<Vec<Value>>) -> LocusRelations {
        LocusRelations {
            result: true,
            headers: vec![
                "arch_context".to_string(),
                "uid".to_string(),
                "chronology".to_string(),
                "relation_type".to_string(),
                "uid_locus_2_related".to_string(),
            ],
            relations,
        }
    }

    #[test]
    fn test_builds_nodes_with_relations() {
        let data = api_data(vec![
            vec![json!("L1"), json!("u1"), json!("later than"), json!("above"), json!("u2")],
            vec![json!("L1"), json!("u1"), json!("same time as"), json!("bonds with"), json!("u3")],
            vec![json!("L2"), json!("u2"), json!("earlier than"), json!("below"), json!("u1")],
        ]);
        let nodes = nodes_from_relations(&data);

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].id, "u1");
        assert_eq!(nodes[0].name, "L1");
        assert_eq!(nodes[0].earlier_nodes, vec!["u2"]);
        assert_eq!(nodes[0].contemporaries, vec!["u3"]);
        assert_eq!(nodes[1].id, "u2");
        assert_eq!(nodes[1].name, "L2");
        assert!(nodes[1].earlier_nodes.is_empty());
        assert_eq!(nodes[2].id, "u3");
    }

    #[test]
    fn test_related_locus_without_own_record_gets_a_node() {
        let data = api_data(vec![vec![
            json!("L2"),
            json!("u2"),
            json!("later than"),
            json!("above"),
            json!("u1"),
        ]]);
        let nodes = nodes_from_relations(&data);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].id, "u1");
        assert_eq!(nodes[1].name, "u1");
        assert!(nodes[1].data.is_none());
    }

    #[test]
    fn test_bare_relation_target_is_filled_by_its_own_record() {
        let data = api_data(vec![
            vec![json!("L2"), json!("u2"), json!("later than"), json!("above"), json!("u1")],
            vec![json!("L1"), json!("u1"), json!("earlier than"), json!("below"), json!("u2")],
        ]);
        let nodes = nodes_from_relations(&data);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].id, "u1");
        assert_eq!(nodes[1].name, "L1");
        assert!(nodes[1].data.is_some());
    }

    #[test]
    fn test_relation_type_fallback() {
        let data = api_data(vec![
            vec![json!("L1"), json!("u1"), Value::Null, json!("abuts"), json!("u2")],
            vec![json!("L2"), json!("u2"), Value::Null, json!("is adjacent to"), json!("u1")],
            vec![json!("L3"), json!("u3"), Value::Null, json!("cut by"), json!("u1")],
        ]);
        let nodes = nodes_from_relations(&data);

        assert_eq!(nodes[0].earlier_nodes, vec!["u2"]);
        assert_eq!(nodes[1].contemporaries, vec!["u1"]);
        // "earlier" relations add no edge of their own; the opposite
        // record carries the direction.
        assert!(nodes[2].earlier_nodes.is_empty());
        assert!(nodes[2].contemporaries.is_empty());
    }

    #[test]
    fn test_duplicate_relations_are_dropped() {
        let data = api_data(vec![
            vec![json!("L1"), json!("u1"), json!("later"), json!("above"), json!("u2")],
            vec![json!("L1"), json!("u1"), json!("later"), json!("above"), json!("u2")],
        ]);
        let nodes = nodes_from_relations(&data);
        assert_eq!(nodes[0].earlier_nodes, vec!["u2"]);
    }

    #[test]
    fn test_unknown_relation_type_is_skipped() {
        let data = api_data(vec![vec![
            json!("L1"),
            json!("u1"),
            Value::Null,
            json!("hovers above"),
            json!("u2"),
        ]]);
        let nodes = nodes_from_relations(&data);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].earlier_nodes.is_empty());
        assert!(nodes[0].contemporaries.is_empty());
    }
}
