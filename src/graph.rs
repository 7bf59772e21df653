//! Dependency graph over input records.
//!
//! Nodes are record names; a directed edge runs from each child
//! to each of its declared parents. A topological order of this
//! graph visits children before parents, so synthetic times
//! assigned in that order increase away from the samples.

use crate::error::ArgError;
use crate::record::ArgRecord;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Child→parent dependency graph of an ARG.
pub struct ArgGraph {
    graph: DiGraph<String, ()>,
    indexes: HashMap<String, NodeIndex>,
}

impl ArgGraph {
    /// Build the graph from parsed records.
    ///
    /// Parent order is not represented here; it lives in each
    /// record's `parents` list, which edge emission reads directly.
    ///
    /// # Errors
    ///
    /// [`ArgError::UnknownParent`] if a `parents` entry names a
    /// record that does not exist.
    pub fn new(records: &[ArgRecord]) -> Result<Self, ArgError> {
        let mut graph = DiGraph::new();
        let mut indexes = HashMap::new();
        for record in records {
            let index = graph.add_node(record.name.clone());
            indexes.insert(record.name.clone(), index);
        }
        for record in records {
            let child = indexes[&record.name];
            for parent in &record.parents {
                match indexes.get(parent) {
                    Some(&p) => {
                        graph.add_edge(child, p, ());
                    }
                    None => {
                        return Err(ArgError::UnknownParent {
                            child: record.name.clone(),
                            parent: parent.clone(),
                        })
                    }
                }
            }
        }
        Ok(Self { graph, indexes })
    }

    /// Number of graph nodes.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Return names in an order where every child precedes
    /// all of its parents.
    ///
    /// # Errors
    ///
    /// [`ArgError::CyclicArg`] if the parent references contain
    /// a cycle. This is fatal; a cyclic input has no valid
    /// ancestry interpretation.
    pub fn topological_order(&self) -> Result<Vec<&str>, ArgError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.iter().map(|i| self.graph[*i].as_str()).collect()),
            Err(cycle) => Err(ArgError::CyclicArg {
                name: self.graph[cycle.node_id()].clone(),
            }),
        }
    }

    /// Look up the graph index for a name.
    pub fn index(&self, name: &str) -> Option<NodeIndex> {
        self.indexes.get(name).copied()
    }
}
