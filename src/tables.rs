//! Node and edge tables.
//!
//! The tables model follows `tskit` conventions:
//!
//! 1. Time is measured backwards. Sample nodes sit at time 0 and
//!    node times increase toward the past, so a child's time is
//!    strictly *less than* its parent's.
//! 2. Genomic intervals are half-open `[left, right)` with integer
//!    coordinates (see [``Position``]).
//! 3. Each node may carry opaque metadata bytes. The converter
//!    stores the original input record there as JSON.

use crate::newtypes::{EdgeId, NodeId, Position, Time};
use bitflags::bitflags;
use std::cmp::Ordering;
use thiserror::Error;

/// Error type related to [``TableCollection``]
#[derive(Error, Debug, PartialEq)]
pub enum TablesError {
    /// Returned by [``TableCollection::new``].
    #[error("Invalid genome length")]
    InvalidGenomeLength,
    /// Returned when invalid node `ID`s are encountered.
    #[error("Invalid node: {found:?}")]
    InvalidNodeValue {
        /// The invalid `ID`
        found: NodeId,
    },
    /// Returned when invalid positions are encountered.
    #[error("Invalid value for position: {found:?}")]
    InvalidPosition {
        /// The invalid position
        found: Position,
    },
    /// Returned when an [``Edge``]'s left/right
    /// values are invalid.
    #[error("Invalid position range: {found:?}")]
    InvalidLeftRight {
        /// The invalid `(left, right)`.
        found: (Position, Position),
    },
    /// Returned when a [``Node``]'s time field is not finite.
    #[error("Invalid Node time.")]
    InvalidNodeTime,
    #[error("Parent is NULL")]
    /// Can be returned by [``validate_edge_table``]
    NullParent,
    #[error("Child is NULL")]
    /// Can be returned by [``validate_edge_table``]
    NullChild,
    #[error("Node is out of bounds")]
    /// Can be returned by [``validate_edge_table``]
    NodeOutOfBounds,
    #[error("Node time order violation")]
    /// Can be returned by [``validate_edge_table``]
    NodeTimesUnordered,
    #[error("Parents not sorted by time")]
    /// Can be returned by [``validate_edge_table``]
    ParentTimesUnsorted,
    #[error("Parents not contiguous")]
    /// Can be returned by [``validate_edge_table``]
    ParentsNotContiguous,
    #[error("Edges not sorted by child")]
    /// Can be returned by [``validate_edge_table``]
    EdgesNotSortedByChild,
    #[error("Edges not sorted by left")]
    /// Can be returned by [``validate_edge_table``]
    EdgesNotSortedByLeft,
    #[error("Duplicate edges")]
    /// Can be returned by [``validate_edge_table``]
    DuplicateEdges,
    /// Can be returned by [`crate::TreeSequence::new`]
    #[error("Tables not indexed")]
    TablesNotIndexed,
}

/// Result type for operations on tables
pub type TablesResult<T> = std::result::Result<T, TablesError>;

/// A Node of a tree sequence
#[derive(Clone)]
pub struct Node {
    /// Node time, increasing into the past
    pub time: Time,
    /// Bit flags
    pub flags: u32,
    /// Opaque metadata bytes
    pub metadata: Option<Vec<u8>>,
}

/// An Edge is a transmission event
///
/// An edge is a record of transmission of
/// a half-open chunk of genome `[left, right)`
/// from `parent` to `child`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Left end
    pub left: Position,
    /// Right end
    pub right: Position,
    /// Index of parent in a [``NodeTable``]
    pub parent: NodeId,
    /// Index of child in a [``NodeTable``]
    pub child: NodeId,
}

/// A node table
pub type NodeTable = Vec<Node>;
/// An edge table
pub type EdgeTable = Vec<Edge>;

fn position_non_negative(x: Position) -> TablesResult<()> {
    if x.0 < 0 {
        Err(TablesError::InvalidPosition { found: x })
    } else {
        Ok(())
    }
}

fn node_non_negative(x: NodeId) -> TablesResult<()> {
    if x < 0 {
        Err(TablesError::InvalidNodeValue { found: x })
    } else {
        Ok(())
    }
}

fn edge_table_add_row(
    edges: &mut EdgeTable,
    left: Position,
    right: Position,
    parent: NodeId,
    child: NodeId,
) -> TablesResult<EdgeId> {
    if right <= left {
        return Err(TablesError::InvalidLeftRight {
            found: (left, right),
        });
    }
    position_non_negative(left)?;
    position_non_negative(right)?;
    node_non_negative(parent)?;
    node_non_negative(child)?;

    edges.push(Edge {
        left,
        right,
        parent,
        child,
    });

    Ok(EdgeId::from(edges.len() - 1))
}

fn node_table_add_row(
    nodes: &mut NodeTable,
    time: Time,
    flags: u32,
    metadata: Option<Vec<u8>>,
) -> TablesResult<NodeId> {
    if !f64::from(time).is_finite() {
        return Err(TablesError::InvalidNodeTime);
    }
    nodes.push(Node {
        time,
        flags,
        metadata,
    });

    Ok(NodeId::from(nodes.len() - 1))
}

fn sort_edges(nodes: &[Node], edges: &mut [Edge]) {
    edges.sort_by(|a, b| {
        let ta = nodes[usize::from(a.parent)].time;
        let tb = nodes[usize::from(b.parent)].time;
        match ta.partial_cmp(&tb) {
            Some(std::cmp::Ordering::Equal) => {
                if a.parent == b.parent {
                    if a.child == b.child {
                        return a.left.cmp(&b.left);
                    }
                    a.child.cmp(&b.child)
                } else {
                    a.parent.cmp(&b.parent)
                }
            }
            Some(x) => x,
            None => panic!("invalid parent times"),
        }
    });
}

bitflags! {
    /// Set properties of a [`Node`].
    #[derive(Default)]
    pub struct NodeFlags: u32 {
        /// Default
        const NONE = 0;
        /// The node is a sample node.
        /// The bit value matches tskit's `NODE_IS_SAMPLE`.
        const IS_SAMPLE = 1 << 0;
    }
}

bitflags! {
    /// Modifies behavior of
    /// [``TableCollection::validate``]
    ///
    /// ```
    /// let f = argrustts::TableValidationFlags::default();
    /// assert_eq!(f.contains(argrustts::TableValidationFlags::VALIDATE_ALL), true);
    /// ```
    pub struct TableValidationFlags: u32 {
        /// Validate the edge table
        const VALIDATE_EDGES = 1<<0;
        /// Validate the node table
        const VALIDATE_NODES = 1<<1;
        /// Validate all tables.
        /// This is also the "default" value.
        const VALIDATE_ALL = Self::VALIDATE_EDGES.bits|Self::VALIDATE_NODES.bits;
    }
}

impl Default for TableValidationFlags {
    fn default() -> Self {
        TableValidationFlags::VALIDATE_ALL
    }
}

bitflags! {
    /// Modifies behavior of
    /// [``TableCollection::sort_tables``]
    ///
    /// ```
    /// let f = argrustts::TableSortingFlags::empty();
    /// assert_eq!(f.contains(argrustts::TableSortingFlags::SORT_ALL), true);
    /// ```
    #[derive(Default)]
    pub struct TableSortingFlags: u32 {
        /// Sort all tables.
        /// This is also the "default"/empty.
        const SORT_ALL = 0;
        /// Do not sort the edge table.
        const SKIP_EDGE_TABLE = 1 << 0;
    }
}

bitflags! {
    /// Modifies behavior of
    /// [``TableCollection::build_indexes``]
    #[derive(Default)]
    pub struct IndexTablesFlags: u32 {
        /// Default behavior
        const NONE = 0;
        /// Do not validate edge table
        const NO_VALIDATION = 1<<0;
    }
}

/// Perform a data integrity check on an [``EdgeTable``].
///
/// This checks, amongst other things, the sorting order
/// of the edges: parents in nondecreasing time order
/// (time increasing into the past), each parent's edges
/// contiguous, sorted by child then left, no duplicates,
/// and every child strictly younger than its parent.
///
/// # Parameters
///
/// * `len`, the genome length of the tables.
///          Best obtained via [``TableCollection::genome_length``].
/// * `edges`, the [``EdgeTable``]
/// * `nodes`, the [``NodeTable``]
///
/// # Return
///
/// Returns ``Ok(true)`` if the tables pass all tests.
/// This return value allows this function to be used in
/// things like [``debug_assert``].
///
/// # Errors
///
/// Will return [``TablesError``] if the tables are not valid.
pub fn validate_edge_table(len: Position, edges: &[Edge], nodes: &[Node]) -> TablesResult<bool> {
    if edges.is_empty() {
        return Ok(true);
    }
    let mut parent_seen = vec![0; nodes.len()];
    let mut last_parent: usize = usize::from(edges[0].parent);
    let mut last_child: usize = usize::from(edges[0].child);
    let mut last_left: Position = edges[0].left;

    for (i, edge) in edges.iter().enumerate() {
        if edge.parent.is_null() {
            return Err(TablesError::NullParent);
        }
        if edge.child.is_null() {
            return Err(TablesError::NullChild);
        }
        if edge.parent < 0 || usize::from(edge.parent) >= nodes.len() {
            return Err(TablesError::NodeOutOfBounds);
        }
        if edge.child < 0 || usize::from(edge.child) >= nodes.len() {
            return Err(TablesError::NodeOutOfBounds);
        }
        if edge.left.0 < 0 || edge.left > len {
            return Err(TablesError::InvalidPosition { found: edge.left });
        }
        if edge.right.0 < 0 || edge.right > len {
            return Err(TablesError::InvalidPosition { found: edge.right });
        }
        if edge.left >= edge.right {
            return Err(TablesError::InvalidLeftRight {
                found: (edge.left, edge.right),
            });
        }

        // child time must be < parent time b/c time is age
        if nodes[usize::from(edge.child)].time >= nodes[usize::from(edge.parent)].time {
            return Err(TablesError::NodeTimesUnordered);
        }

        if parent_seen[usize::from(edge.parent)] == 1 {
            return Err(TablesError::ParentsNotContiguous);
        }

        if i > 0 {
            match nodes[usize::from(edge.parent)]
                .time
                .partial_cmp(&nodes[last_parent].time)
            {
                Some(std::cmp::Ordering::Less) => {
                    return Err(TablesError::ParentTimesUnsorted);
                }
                Some(std::cmp::Ordering::Equal) => {
                    if usize::from(edge.parent) == last_parent {
                        if usize::from(edge.child) < last_child {
                            return Err(TablesError::EdgesNotSortedByChild);
                        }
                        if usize::from(edge.child) == last_child {
                            match edge.left.cmp(&last_left) {
                                Ordering::Greater => (),
                                Ordering::Equal => return Err(TablesError::DuplicateEdges),
                                Ordering::Less => return Err(TablesError::EdgesNotSortedByLeft),
                            }
                        }
                    } else {
                        parent_seen[last_parent] = 1;
                    }
                }
                Some(_) => (),
                None => panic!("invalid node times"),
            }
        }
        last_parent = usize::from(edge.parent);
        last_child = usize::from(edge.child);
        last_left = edge.left;
    }

    Ok(true)
}

/// Check that all node times are finite.
pub fn validate_node_table(nodes: &[Node]) -> TablesResult<()> {
    for n in nodes {
        if !f64::from(n.time).is_finite() {
            return Err(TablesError::InvalidNodeTime);
        }
    }
    Ok(())
}

/// A collection of node and edge tables.
#[derive(Clone)]
pub struct TableCollection {
    length_: Position, // Not visible outside of this module

    pub(crate) nodes_: NodeTable,
    pub(crate) edges_: EdgeTable,
    pub(crate) edge_input_order: Vec<usize>,
    pub(crate) edge_output_order: Vec<usize>,
    pub(crate) is_indexed: bool,
}

impl TableCollection {
    /// Create a new instance.
    ///
    /// # Parameters
    ///
    /// * `genome_length`: the total genome length for the tables.
    ///
    /// # Errors
    ///
    /// Will return [``TablesError``] if `genome_length < 1`.
    pub fn new<P: Into<Position>>(genome_length: P) -> TablesResult<TableCollection> {
        let p = genome_length.into();
        if p.0 < 1 {
            return Err(TablesError::InvalidGenomeLength);
        }

        Ok(TableCollection {
            length_: p,
            nodes_: NodeTable::new(),
            edges_: EdgeTable::new(),
            edge_input_order: vec![],
            edge_output_order: vec![],
            is_indexed: false,
        })
    }

    /// Add a [``Node``] to the [``NodeTable``] with default
    /// flags and no metadata.
    ///
    /// # Example
    ///
    /// ```
    /// let mut tables = argrustts::TableCollection::new(100).unwrap();
    /// let id = tables.add_node(1.).unwrap();
    /// assert_eq!(id, 0);
    /// ```
    pub fn add_node<T: Into<Time>>(&mut self, time: T) -> TablesResult<NodeId> {
        self.add_node_with_flags(time, NodeFlags::default().bits(), None)
    }

    /// Add a [``Node``] to the [``NodeTable``].
    ///
    /// # Parameters
    ///
    /// * `time`: the node time.
    /// * `flags`: node flags.  See [`NodeFlags`].
    /// * `metadata`: optional opaque metadata bytes.
    ///
    /// # Returns
    ///
    /// A [``NodeId``].
    ///
    /// # Side effects
    ///
    /// Adding a node invalidates current table indexes.
    ///
    /// # Errors
    ///
    /// Will return [``TablesError``] if `time` is not finite.
    pub fn add_node_with_flags<T: Into<Time>>(
        &mut self,
        time: T,
        flags: u32,
        metadata: Option<Vec<u8>>,
    ) -> TablesResult<NodeId> {
        self.is_indexed = false;
        node_table_add_row(&mut self.nodes_, time.into(), flags, metadata)
    }

    /// Add an [``Edge``] to the [``EdgeTable``].
    ///
    /// # Parameters
    ///
    /// * `left`, the left end of the edge
    /// * `right`, the right end of the edge
    /// * `parent`, the parent of the edge
    /// * `child`, the child of the edge
    ///
    /// # Returns
    ///
    /// An [``EdgeId``].
    ///
    /// # Side effects
    ///
    /// Adding an edge invalidates current table indexes.
    ///
    /// # Errors
    ///
    /// Will return [``TablesError``] if any of the input
    /// are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// let mut tables = argrustts::TableCollection::new(100).unwrap();
    /// let id = tables.add_edge(0, 3, 5, 9).unwrap();
    /// assert_eq!(id, 0);
    /// ```
    pub fn add_edge<L: Into<Position>, R: Into<Position>, P: Into<NodeId>, C: Into<NodeId>>(
        &mut self,
        left: L,
        right: R,
        parent: P,
        child: C,
    ) -> TablesResult<EdgeId> {
        self.is_indexed = false;
        edge_table_add_row(
            &mut self.edges_,
            left.into(),
            right.into(),
            parent.into(),
            child.into(),
        )
    }

    /// Get genome length
    pub fn genome_length(&self) -> Position {
        self.length_
    }

    /// Return immutable reference to the [edge table](type.EdgeTable.html)
    pub fn edges(&self) -> &[Edge] {
        &self.edges_
    }

    /// Return number of edges
    pub fn num_edges(&self) -> usize {
        self.edges_.len()
    }

    /// Return number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes_.len()
    }

    /// Return immutable reference to [node table](type.NodeTable.html)
    pub fn nodes(&self) -> &[Node] {
        &self.nodes_
    }

    /// Return the i-th [``Node``].
    pub fn node<N: Into<NodeId>>(&self, i: N) -> &Node {
        &self.nodes_[usize::from(i.into())]
    }

    /// Return the i-th [``Edge``].
    pub fn edge<E: Into<EdgeId>>(&self, i: E) -> &Edge {
        &self.edges_[usize::from(i.into())]
    }

    /// Provide an enumeration over the [node table](type.NodeTable.html)
    pub fn enumerate_nodes(&self) -> std::iter::Enumerate<std::slice::Iter<Node>> {
        self.nodes_.iter().enumerate()
    }

    /// Provide an enumeration over the [edge table](type.EdgeTable.html)
    pub fn enumerate_edges(&self) -> std::iter::Enumerate<std::slice::Iter<Edge>> {
        self.edges_.iter().enumerate()
    }

    /// Sort all tables into canonical order.
    ///
    /// Edges are sorted by parent time (increasing into the past),
    /// then parent id, child id, and left coordinate.
    pub fn sort_tables(&mut self, flags: TableSortingFlags) {
        if !flags.contains(TableSortingFlags::SKIP_EDGE_TABLE) {
            self.is_indexed = false;
            sort_edges(&self.nodes_, &mut self.edges_);
        }
    }

    /// Run a validation check on the tables.
    pub fn validate(&self, flags: TableValidationFlags) -> TablesResult<bool> {
        if flags.contains(TableValidationFlags::VALIDATE_EDGES) {
            validate_edge_table(self.genome_length(), &self.edges_, &self.nodes_)?;
        }
        if flags.contains(TableValidationFlags::VALIDATE_NODES) {
            validate_node_table(self.nodes())?;
        }
        Ok(true)
    }

    fn sort_edge_input_order(edges: &[Edge], nodes: &[Node], edge_input_order: &mut [usize]) {
        edge_input_order.sort_by(|a, b| {
            let ea = &edges[*a];
            let eb = &edges[*b];
            if ea.left == eb.left {
                let ta = nodes[usize::from(ea.parent)].time;
                let tb = nodes[usize::from(eb.parent)].time;
                match ta.partial_cmp(&tb) {
                    Some(std::cmp::Ordering::Equal) => match ea.parent.cmp(&eb.parent) {
                        std::cmp::Ordering::Equal => ea.child.cmp(&eb.child),
                        x => x,
                    },
                    Some(x) => x,
                    None => panic!("invalid parent times"),
                }
            } else {
                ea.left.cmp(&eb.left)
            }
        });
    }

    fn sort_edge_output_order(edges: &[Edge], nodes: &[Node], edge_output_order: &mut [usize]) {
        edge_output_order.sort_by(|a, b| {
            let ea = &edges[*a];
            let eb = &edges[*b];
            if ea.right == eb.right {
                let ta = nodes[usize::from(ea.parent)].time;
                let tb = nodes[usize::from(eb.parent)].time;
                match ta.partial_cmp(&tb) {
                    Some(std::cmp::Ordering::Equal) => {
                        match ea.parent.cmp(&eb.parent).reverse() {
                            std::cmp::Ordering::Equal => ea.child.cmp(&eb.child).reverse(),
                            x => x,
                        }
                    }
                    Some(x) => x.reverse(),
                    None => panic!("invalid parent times"),
                }
            } else {
                ea.right.cmp(&eb.right)
            }
        });
    }

    /// Build table indexes
    ///
    /// The indexes record the order in which edges enter
    /// (sorted by left end) and leave (sorted by right end)
    /// as one moves along the genome.
    ///
    /// # Parameters
    ///
    /// * `flags`, see [`IndexTablesFlags`].
    ///
    /// # Errors
    ///
    /// [`TablesError`] if the input data are invalid.
    pub fn build_indexes(&mut self, flags: IndexTablesFlags) -> TablesResult<()> {
        if !flags.contains(IndexTablesFlags::NO_VALIDATION) {
            validate_edge_table(self.genome_length(), &self.edges_, &self.nodes_)?;
        }
        self.edge_input_order.clear();
        self.edge_output_order.clear();
        for (i, e) in self.edges_.iter().enumerate() {
            if e.parent.is_null() {
                return Err(TablesError::NullParent);
            }
            if e.child.is_null() {
                return Err(TablesError::NullChild);
            }
            if usize::from(e.parent) >= self.nodes_.len() {
                return Err(TablesError::NodeOutOfBounds);
            }
            if usize::from(e.child) >= self.nodes_.len() {
                return Err(TablesError::NodeOutOfBounds);
            }
            self.edge_input_order.push(i);
            self.edge_output_order.push(i);
        }
        Self::sort_edge_input_order(&self.edges_, &self.nodes_, &mut self.edge_input_order);
        Self::sort_edge_output_order(&self.edges_, &self.nodes_, &mut self.edge_output_order);
        self.is_indexed = true;
        Ok(())
    }

    /// Get the edge input order.
    ///
    /// The input order is generated by [`TableCollection::build_indexes`].
    ///
    /// Returns `None` if `self.is_indexed() == false`.
    pub fn edge_input_order(&self) -> Option<&[usize]> {
        if self.is_indexed {
            Some(&self.edge_input_order)
        } else {
            None
        }
    }

    /// Get the edge output order.
    ///
    /// The output order is generated by [`TableCollection::build_indexes`].
    ///
    /// Returns `None` if `self.is_indexed() == false`.
    pub fn edge_output_order(&self) -> Option<&[usize]> {
        if self.is_indexed {
            Some(&self.edge_output_order)
        } else {
            None
        }
    }

    /// Return `true` if tables are indexed, `false` otherwise.
    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    /// Count number of trees in O(E) time, where E
    /// is length of edge table.
    ///
    /// # Errors
    ///
    /// [`TablesError::TablesNotIndexed`] if tables are not indexed
    pub fn count_trees(&self) -> TablesResult<u32> {
        if !self.is_indexed() {
            Err(TablesError::TablesNotIndexed)
        } else {
            let mut num_trees = 0;
            let mut input_index: usize = 0;
            let mut output_index: usize = 0;
            let input = self.edge_input_order.as_slice();
            let output = self.edge_output_order.as_slice();
            let edges = self.edges_.as_slice();

            let mut tree_left = Position(0);
            while input_index < input.len() || tree_left < self.genome_length() {
                for idx in output[output_index..].iter() {
                    if edges[*idx].right != tree_left {
                        break;
                    }
                    output_index += 1;
                }
                for idx in input[input_index..].iter() {
                    if edges[*idx].left != tree_left {
                        break;
                    }
                    input_index += 1;
                }
                let mut tree_right = self.genome_length();
                if input_index < input.len() {
                    tree_right = std::cmp::min(tree_right, edges[input[input_index]].left);
                }
                if output_index < output.len() {
                    tree_right = std::cmp::min(tree_right, edges[output[output_index]].right);
                }
                tree_left = tree_right;
                num_trees += 1;
            }
            Ok(num_trees)
        }
    }
}

#[cfg(test)]
mod test_tables {

    use super::*;

    #[test]
    fn test_bad_genome_length() {
        let _ = TableCollection::new(Position(0)).map_or_else(
            |x: TablesError| assert_eq!(x, TablesError::InvalidGenomeLength),
            |_| panic!(),
        );
    }

    #[test]
    fn test_add_edge() {
        let mut tables = TableCollection::new(10).unwrap();

        let result = tables.add_edge(0, 1, 2, 3).unwrap();

        assert_eq!(0, result);
        assert_eq!(1, tables.edges().len());
        assert_eq!(1, tables.num_edges());
    }

    #[test]
    fn test_add_edge_bad_positions() {
        let mut tables = TableCollection::new(10).unwrap();

        let _ = tables.add_edge(-1, 1, 1, 2).map_or_else(
            |x: TablesError| {
                assert_eq!(
                    x,
                    TablesError::InvalidPosition {
                        found: Position(-1)
                    }
                )
            },
            |_| panic!(),
        );

        let _ = tables.add_edge(1, -1, 1, 2).map_or_else(
            |x: TablesError| {
                assert_eq!(
                    x,
                    TablesError::InvalidLeftRight {
                        found: (Position(1), Position(-1))
                    }
                )
            },
            |_| panic!(),
        );
    }

    #[test]
    fn test_add_edge_bad_nodes() {
        let mut tables = TableCollection::new(10).unwrap();

        let _ = tables.add_edge(0, 1, -1, 2).map_or_else(
            |x: TablesError| {
                assert_eq!(
                    x,
                    TablesError::InvalidNodeValue {
                        found: NodeId::NULL
                    }
                )
            },
            |_| panic!(),
        );
    }

    #[test]
    fn test_add_node_non_finite_time() {
        let mut tables = TableCollection::new(10).unwrap();
        let _ = tables.add_node(f64::INFINITY).map_or_else(
            |x: TablesError| assert_eq!(x, TablesError::InvalidNodeTime),
            |_| panic!(),
        );
    }

    #[test]
    fn test_node_metadata_storage() {
        let mut tables = TableCollection::new(10).unwrap();
        let id = tables
            .add_node_with_flags(0., NodeFlags::IS_SAMPLE.bits(), Some(b"{}".to_vec()))
            .unwrap();
        assert_eq!(tables.node(id).metadata.as_deref(), Some(&b"{}"[..]));
        assert!(tables.node(id).flags & NodeFlags::IS_SAMPLE.bits() > 0);
    }

    #[test]
    fn test_clone_tables() {
        let mut tables = TableCollection::new(10).unwrap();
        tables.add_edge(0, 5, 0, 1).unwrap();
        let tclone = tables.clone();

        assert_eq!(tclone.edges().len(), 1);
        let e = tclone.edge(0);
        assert_eq!(e.left, 0);
        assert_eq!(e.right, 5);
        assert_eq!(e.parent, 0);
        assert_eq!(e.child, 1);
    }
}


#[cfg(test)]
mod test_table_indexing {
    use super::*;

    fn indexed_tables() -> TableCollection {
        let mut t = TableCollection::new(10).unwrap();
        t.add_node(0.).unwrap();
        t.add_node(0.).unwrap();
        t.add_node(1.).unwrap();
        // recombination in node 0's history at position 4
        t.add_edge(0, 10, 2, 1).unwrap();
        t.add_edge(0, 4, 2, 0).unwrap();
        t.sort_tables(TableSortingFlags::empty());
        t.build_indexes(IndexTablesFlags::default()).unwrap();
        t
    }

    #[test]
    fn test_is_indexed() {
        let mut t = indexed_tables();
        assert!(t.is_indexed());
        assert!(t.edge_input_order().is_some());
        assert!(t.edge_output_order().is_some());
        t.add_node(5.).unwrap();
        assert!(!t.is_indexed());
        assert!(t.edge_input_order().is_none());
    }

    #[test]
    fn test_count_trees() {
        let t = indexed_tables();
        assert_eq!(t.count_trees().unwrap(), 2);
    }

    #[test]
    fn test_count_trees_no_edges() {
        let mut t = TableCollection::new(10).unwrap();
        t.add_node(0.).unwrap();
        t.build_indexes(IndexTablesFlags::default()).unwrap();
        assert_eq!(t.count_trees().unwrap(), 1);
    }

    #[test]
    fn test_count_trees_unindexed() {
        let t = TableCollection::new(10).unwrap();
        match t.count_trees() {
            Err(TablesError::TablesNotIndexed) => (),
            _ => panic!(),
        }
    }

    #[test]
    fn test_invalid_edge_table_fails_indexing() {
        let mut t = TableCollection::new(10).unwrap();
        t.add_node(0.).unwrap();
        t.add_node(1.).unwrap();
        t.add_edge(0, 10, 0, 1).unwrap(); // parent younger than child
        match t.build_indexes(IndexTablesFlags::default()) {
            Err(TablesError::NodeTimesUnordered) => (),
            _ => panic!(),
        }
    }
}
