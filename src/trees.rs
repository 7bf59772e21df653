//! Immutable tree sequence view over finished tables.

use crate::error::ArgError;
use crate::newtypes::{NodeId, Position};
use crate::tables::{Edge, Node, NodeFlags, TableCollection, TablesError};
use serde::de::DeserializeOwned;

/// A tree sequence.
///
/// Wraps a sorted, validated, indexed [``TableCollection``]
/// and makes it immutable.
pub struct TreeSequence {
    tables: TableCollection,
}

impl TreeSequence {
    /// Create a new tree sequence from a [``TableCollection``].
    ///
    /// # Errors
    ///
    /// [`TablesError::TablesNotIndexed`] if `tables` is not indexed.
    /// See [`TableCollection::build_indexes`].
    ///
    /// # Example
    ///
    /// ```
    /// let mut tables = argrustts::TableCollection::new(100).unwrap();
    /// tables.add_node(0.).unwrap();
    /// tables.build_indexes(argrustts::IndexTablesFlags::default()).unwrap();
    /// let ts = argrustts::TreeSequence::new(tables).unwrap();
    /// assert_eq!(ts.num_nodes(), 1);
    /// ```
    pub fn new(tables: TableCollection) -> Result<Self, TablesError> {
        if !tables.is_indexed() {
            return Err(TablesError::TablesNotIndexed);
        }
        Ok(Self { tables })
    }

    /// Access the underlying tables.
    pub fn tables(&self) -> &TableCollection {
        &self.tables
    }

    /// Get the genome length.
    pub fn genome_length(&self) -> Position {
        self.tables.genome_length()
    }

    /// Return immutable reference to the node table.
    pub fn nodes(&self) -> &[Node] {
        self.tables.nodes()
    }

    /// Return immutable reference to the edge table.
    pub fn edges(&self) -> &[Edge] {
        self.tables.edges()
    }

    /// Return number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.tables.num_nodes()
    }

    /// Return number of edges.
    pub fn num_edges(&self) -> usize {
        self.tables.num_edges()
    }

    /// Return the ids of all nodes flagged as samples.
    pub fn samples(&self) -> Vec<NodeId> {
        self.tables
            .enumerate_nodes()
            .filter(|(_, n)| n.flags & NodeFlags::IS_SAMPLE.bits() > 0)
            .map(|(i, _)| NodeId::from(i))
            .collect()
    }

    /// Count the number of marginal trees along the genome.
    pub fn num_trees(&self) -> u32 {
        // construction guarantees indexed tables
        match self.tables.count_trees() {
            Ok(n) => n,
            Err(_) => unreachable!("tables are indexed"),
        }
    }

    /// Decode a node's metadata.
    ///
    /// Returns `Ok(None)` for nodes with no metadata.
    ///
    /// # Errors
    ///
    /// [`ArgError::MetadataError`] if the bytes do not decode to `T`.
    pub fn node_metadata<T: DeserializeOwned>(
        &self,
        node: NodeId,
    ) -> Result<Option<T>, ArgError> {
        match &self.tables.node(node).metadata {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod test_trees {
    use super::*;
    use crate::tables::IndexTablesFlags;

    #[test]
    fn test_unindexed_tables_rejected() {
        let tables = TableCollection::new(100).unwrap();
        match TreeSequence::new(tables) {
            Err(TablesError::TablesNotIndexed) => (),
            _ => panic!(),
        }
    }

    #[test]
    fn test_samples() {
        let mut tables = TableCollection::new(100).unwrap();
        tables
            .add_node_with_flags(0., NodeFlags::IS_SAMPLE.bits(), None)
            .unwrap();
        tables.add_node(1.).unwrap();
        tables.add_edge(0, 100, 1, 0).unwrap();
        tables.build_indexes(IndexTablesFlags::default()).unwrap();
        let ts = TreeSequence::new(tables).unwrap();
        assert_eq!(ts.samples(), vec![NodeId::from(0)]);
        assert_eq!(ts.num_trees(), 1);
    }
}
