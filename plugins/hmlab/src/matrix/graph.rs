//! Directed graph view over the earlier-relations of locus nodes.
//!
//! Contemporary relations are never part of this graph; they are handled
//! separately by the contemporary-cycle scan.

use std::collections::HashMap;

use crate::matrix::HmNode;

/// Adjacency-list digraph keyed by locus id, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the nodes' earlier-relations.
    ///
    /// The result may still be cyclic at this point. Relation targets
    /// without a node record become plain graph nodes.
    pub fn from_nodes(nodes: &[HmNode]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(&node.id);
        }
        for node in nodes {
            for rel in &node.earlier_nodes {
                graph.add_edge(&node.id, rel);
            }
        }
        graph
    }

    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.succ.push(Vec::new());
        self.pred.push(Vec::new());
        idx
    }

    /// Add an edge, creating missing endpoints. Parallel edges collapse.
    pub fn add_edge(&mut self, v: &str, w: &str) {
        let vi = self.add_node(v);
        let wi = self.add_node(w);
        if !self.succ[vi].contains(&wi) {
            self.succ[vi].push(wi);
            self.pred[wi].push(vi);
        }
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) {
        let (Some(&vi), Some(&wi)) = (self.index.get(v), self.index.get(w)) else {
            return;
        };
        if let Some(pos) = self.succ[vi].iter().position(|&x| x == wi) {
            self.succ[vi].remove(pos);
        }
        if let Some(pos) = self.pred[wi].iter().position(|&x| x == vi) {
            self.pred[wi].remove(pos);
        }
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        match (self.index.get(v), self.index.get(w)) {
            (Some(&vi), Some(&wi)) => self.succ[vi].contains(&wi),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// All edges, grouped by source node in insertion order.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for (vi, targets) in self.succ.iter().enumerate() {
            for &wi in targets {
                edges.push((self.ids[vi].clone(), self.ids[wi].clone()));
            }
        }
        edges
    }

    pub fn out_neighbors(&self, v: &str) -> Vec<String> {
        match self.index.get(v) {
            Some(&vi) => self.succ[vi].iter().map(|&wi| self.ids[wi].clone()).collect(),
            None => Vec::new(),
        }
    }

    pub fn in_degree(&self, v: &str) -> usize {
        match self.index.get(v) {
            Some(&vi) => self.pred[vi].len(),
            None => 0,
        }
    }

    /// DFS preorder starting at `start`, following out-edges.
    pub fn preorder(&self, start: &str) -> Vec<String> {
        let Some(&start_idx) = self.index.get(start) else {
            return Vec::new();
        };
        let mut visited = vec![false; self.ids.len()];
        let mut order = Vec::new();
        self.preorder_visit(start_idx, &mut visited, &mut order);
        order
    }

    fn preorder_visit(&self, idx: usize, visited: &mut [bool], order: &mut Vec<String>) {
        if visited[idx] {
            return;
        }
        visited[idx] = true;
        order.push(self.ids[idx].clone());
        for &next in &self.succ[idx] {
            self.preorder_visit(next, visited, order);
        }
    }

    pub fn is_acyclic(&self) -> bool {
        self.find_cycles().is_empty()
    }

    /// Strongly connected components with more than one node, plus
    /// single nodes carrying a self-loop.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        Tarjan::new(self)
            .components()
            .into_iter()
            .filter(|c| c.len() > 1 || c.first().is_some_and(|&i| self.succ[i].contains(&i)))
            .map(|c| c.into_iter().map(|i| self.ids[i].clone()).collect())
            .collect()
    }

    /// Graphviz-style edge list, one `"v"->"w"` line per edge.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        for (v, w) in self.edges() {
            dot.push_str(&format!("\"{v}\"->\"{w}\"\n"));
        }
        dot
    }
}

struct Tarjan<'a> {
    graph: &'a NodeGraph,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    components: Vec<Vec<usize>>,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a NodeGraph) -> Self {
        let n = graph.ids.len();
        Self {
            graph,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn components(mut self) -> Vec<Vec<usize>> {
        for v in 0..self.graph.ids.len() {
            if self.index[v].is_none() {
                self.strongconnect(v);
            }
        }
        self.components
    }

    fn strongconnect(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for i in 0..self.graph.succ[v].len() {
            let w = self.graph.succ[v][i];
            match self.index[w] {
                None => {
                    self.strongconnect(w);
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                }
                Some(w_index) => {
                    if self.on_stack[w] {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                }
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}
