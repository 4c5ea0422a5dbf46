//! Relation analysis.
//!
//! Removes contradictions, greedily solves chronological cycles, and
//! drops contemporary relations that would make the matrix cyclic. The
//! node lists are repaired in place; the report records everything that
//! was dropped so the browser can show it to the excavator.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error};

use crate::matrix::MatrixError;
use crate::matrix::graph::NodeGraph;
use crate::matrix::node::{HmNode, find_node, find_node_index, remove_relation};

/// Why a relation was dropped from the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationError {
    Contradiction,
    Cycle,
    NonTemporalRelation,
    Multiple,
    Faulty,
}

/// One dropped relation, directed from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRelation {
    pub from: String,
    pub to: String,
    pub error: RelationError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HmCycle {
    pub original_cycle: Vec<String>,
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub cycles: Vec<HmCycle>,
    pub removed: Vec<DroppedRelation>,
    pub result: bool,
    pub errors: Vec<String>,
}

/// Outcome of the contemporary-cycle scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContemporaryScan {
    pub cycles: Vec<HmCycle>,
    /// Dropped contemporary pairs, both directions recorded.
    pub dropped: Vec<(String, String)>,
}

fn add_removed(removed: &mut Vec<DroppedRelation>, from: &str, to: &str, error: RelationError) {
    if !removed.iter().any(|rel| rel.from == from && rel.to == to) {
        removed.push(DroppedRelation {
            from: from.to_string(),
            to: to.to_string(),
            error,
        });
    }
}

/// Analyze the relations of the given nodes and repair them in place.
///
/// Order of operations matters: contradictions first, then chronological
/// cycles, then cycles introduced by contemporary relations (the
/// contemporary scan requires the earlier-relations to be acyclic).
pub fn analyze_relations(nodes: &mut [HmNode]) -> Result<AnalysisReport, MatrixError> {
    let mut report = AnalysisReport {
        cycles: Vec::new(),
        removed: Vec::new(),
        result: false,
        errors: Vec::new(),
    };

    let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    for id in &ids {
        let earlier = match find_node(nodes, id) {
            Some(node) => node.earlier_nodes.clone(),
            None => continue,
        };
        for to_id in &earlier {
            let to_node = find_node(nodes, to_id)
                .ok_or_else(|| MatrixError::NodeNotFound(to_id.clone()))?;
            let mutual_earlier = to_node.earlier_nodes.iter().any(|from| from == id);
            let contemporary_back = to_node.contemporaries.iter().any(|from| from == id);
            if mutual_earlier {
                add_removed(&mut report.removed, id, to_id, RelationError::Contradiction);
                add_removed(&mut report.removed, to_id, id, RelationError::Contradiction);
                remove_relation(nodes, id, to_id, false);
                remove_relation(nodes, to_id, id, false);
            }
            if contemporary_back {
                add_removed(&mut report.removed, to_id, id, RelationError::Contradiction);
                remove_relation(nodes, to_id, id, true);
            }
        }
        let contemporaries = match find_node(nodes, id) {
            Some(node) => node.contemporaries.clone(),
            None => continue,
        };
        for to_id in &contemporaries {
            let to_node = find_node(nodes, to_id)
                .ok_or_else(|| MatrixError::NodeNotFound(to_id.clone()))?;
            if to_node.earlier_nodes.iter().any(|from| from == id) {
                add_removed(&mut report.removed, to_id, id, RelationError::Contradiction);
                remove_relation(nodes, id, to_id, true);
            }
        }
    }

    solve_chronology_cycles(nodes, &mut report);
    debug!(
        cycles = report.cycles.len(),
        "chronological cycle analysis complete"
    );

    let scan = find_contemporary_cycles(nodes)?;
    debug!(
        cycles = scan.cycles.len(),
        "contemporary cycle analysis complete"
    );

    let mut removed: Vec<DroppedRelation> = scan
        .dropped
        .iter()
        .map(|(from, to)| DroppedRelation {
            from: from.clone(),
            to: to.clone(),
            error: RelationError::Cycle,
        })
        .collect();
    removed.extend(report.removed);
    report.removed = removed;

    let mut cycles = scan.cycles;
    cycles.append(&mut report.cycles);
    report.cycles = cycles;

    report.result = report.errors.is_empty();
    Ok(report)
}

/// Greedily break chronological cycles by dropping earlier-relations
/// between cycle members until the overall cycle count decreases.
fn solve_chronology_cycles(nodes: &mut [HmNode], report: &mut AnalysisReport) {
    let cycles = NodeGraph::from_nodes(nodes).find_cycles();
    let mut cycles_left = cycles.len();
    for cycle in cycles {
        let mut hm_cycle = HmCycle {
            original_cycle: cycle.clone(),
            solved: false,
        };
        let mut solve_cycle = cycle.clone();
        while solve_cycle.len() > 1 && cycles_left > 0 {
            let node1 = solve_cycle[0].clone();
            let mut found = String::new();
            for related in &solve_cycle {
                if *related != node1 && remove_relation(nodes, &node1, related, false) {
                    found = related.clone();
                    break;
                }
            }
            if found.is_empty() {
                solve_cycle.remove(0);
            } else {
                add_removed(&mut report.removed, &node1, &found, RelationError::Cycle);
            }
            let new_cycles = NodeGraph::from_nodes(nodes).find_cycles();
            if new_cycles.len() < cycles_left {
                hm_cycle.solved = true;
                cycles_left = new_cycles.len();
                break;
            }
        }
        if !hm_cycle.solved {
            let first = cycle.first().cloned().unwrap_or_default();
            let last = cycle.last().cloned().unwrap_or_default();
            report.errors.push(format!(
                "cannot solve cycle {first}->{last}; the matrix cannot be rendered"
            ));
        }
        report.cycles.push(hm_cycle);
    }
}

const CONTEMPORARY_SCAN_DEADLINE_SECS: u64 = 2;

/// Find cycles introduced by contemporary relations and drop the
/// offending pairs symmetrically.
///
/// Don't call this while the graph is still cyclic from the
/// earlier-relations alone. The usual visited-marking does not survive
/// re-entering nodes through contemporary relations, so the walk is
/// brute force with a safety deadline of two seconds.
pub fn find_contemporary_cycles(nodes: &mut [HmNode]) -> Result<ContemporaryScan, MatrixError> {
    let graph = NodeGraph::from_nodes(nodes);
    let top_nodes: Vec<String> = graph
        .nodes()
        .filter(|n| graph.in_degree(n) == 0)
        .map(str::to_string)
        .collect();

    let mut scanner = Scanner {
        nodes,
        visited: HashMap::new(),
        stack: Vec::new(),
        cycles: Vec::new(),
        dropped: Vec::new(),
        deadline: Instant::now() + Duration::from_secs(CONTEMPORARY_SCAN_DEADLINE_SECS),
    };
    for node_id in &top_nodes {
        scanner.walk(node_id, "")?;
    }

    Ok(ContemporaryScan {
        cycles: scanner.cycles,
        dropped: scanner.dropped,
    })
}

struct Scanner<'a> {
    nodes: &'a mut [HmNode],
    /// True while a node is on the active walk path.
    visited: HashMap<String, bool>,
    stack: Vec<String>,
    cycles: Vec<HmCycle>,
    dropped: Vec<(String, String)>,
    deadline: Instant,
}

impl Scanner<'_> {
    /// Depth-first walk following earlier-relations and contemporary
    /// relations. Returns the id that closed a cycle, if any; the caller
    /// that entered through a contemporary relation consumes it.
    fn walk(&mut self, node_id: &str, predecessor: &str) -> Result<Option<String>, MatrixError> {
        let idx = find_node_index(self.nodes, node_id)
            .ok_or_else(|| MatrixError::NodeNotFound(node_id.to_string()))?;
        if Instant::now() > self.deadline {
            return Err(MatrixError::Deadline(CONTEMPORARY_SCAN_DEADLINE_SECS));
        }

        if self.visited.get(node_id).copied().unwrap_or(false) {
            return Ok(Some(node_id.to_string()));
        }

        self.stack.push(node_id.to_string());
        self.visited.insert(node_id.to_string(), true);

        let earlier = self.nodes[idx].earlier_nodes.clone();
        for successor in &earlier {
            if let Some(collision) = self.walk(successor, "")? {
                self.stack.pop();
                return Ok(Some(collision));
            }
        }

        let contemporaries = self.nodes[idx].contemporaries.clone();
        for contemporary in &contemporaries {
            // The list may have shrunk while iterating the snapshot.
            let still_present = self.nodes[idx]
                .contemporaries
                .iter()
                .any(|x| x == contemporary);
            if contemporary != predecessor && still_present {
                if let Some(collision) = self.walk(contemporary, node_id)? {
                    // The contemporary relation caused the cycle, so it must go.
                    match self.stack.iter().position(|x| *x == collision) {
                        Some(first_visit) => {
                            self.cycles.push(HmCycle {
                                original_cycle: self.stack[first_visit..].to_vec(),
                                solved: true,
                            });
                        }
                        None => {
                            error!(
                                node = %collision,
                                "collision node caused a cycle but was not on the walk stack"
                            );
                        }
                    }
                    self.dropped.push((node_id.to_string(), contemporary.clone()));
                    if let Some(pos) = self.nodes[idx]
                        .contemporaries
                        .iter()
                        .position(|x| x == contemporary)
                    {
                        self.nodes[idx].contemporaries.remove(pos);
                    }
                    if let Some(to_idx) = find_node_index(self.nodes, contemporary)
                        && let Some(pos) = self.nodes[to_idx]
                            .contemporaries
                            .iter()
                            .position(|x| x == node_id)
                    {
                        self.nodes[to_idx].contemporaries.remove(pos);
                    }
                    self.dropped.push((contemporary.clone(), node_id.to_string()));
                }
            }
        }

        self.stack.pop();
        self.visited.insert(node_id.to_string(), false);
        Ok(None)
    }
}
