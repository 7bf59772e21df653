//! Table simplification.
//!
//! The algorithm propagates ancestry segments from samples
//! toward the past, one parent at a time, emitting output
//! nodes and edges only for input rows that still matter.
//! With [`SimplificationFlags::KEEP_UNARY`], nodes covering a
//! single overlapping segment ("pass-through" nodes) are
//! retained rather than collapsed; the converter uses this to
//! preserve full node history at the cost of extra structure.
//!
//! Input tables must be sorted.
//! See [``TableCollection::sort_tables``].

use crate::error::ArgError;
use crate::newtypes::{NodeId, Position};
use crate::segment::Segment;
use crate::tables::{
    validate_edge_table, Edge, EdgeTable, Node, NodeTable, TableCollection,
};
use bitflags::bitflags;

bitflags! {
    /// Boolean flags affecting simplification
    /// behavior.
    ///
    /// # Example
    ///
    /// ```
    /// let e = argrustts::SimplificationFlags::empty();
    /// assert!(e.contains(argrustts::SimplificationFlags::NONE));
    /// ```
    #[derive(Default)]
    pub struct SimplificationFlags: u32 {
        /// Default
        const NONE = 0;
        /// Validate the edge table before simplifying.
        const VALIDATE_EDGES = 1 << 0;
        /// Retain unary (single-child) nodes in the output.
        const KEEP_UNARY = 1 << 1;
    }
}

/// Information about samples used for
/// table simplification.
#[derive(Default)]
pub struct SamplesInfo {
    /// A list of sample IDs.
    pub samples: Vec<NodeId>,
}

impl SamplesInfo {
    /// Generate a new instance.
    pub fn new() -> Self {
        SamplesInfo { samples: vec![] }
    }
}

/// Useful information output by table
/// simplification.
pub struct SimplificationOutput {
    /// Maps input node ID to output ID.
    /// Values are set to [``NodeId::NULL``]
    /// for input nodes that "simplify out".
    pub idmap: Vec<NodeId>,
}

impl SimplificationOutput {
    /// Create a new instance.
    pub fn new() -> Self {
        SimplificationOutput { idmap: vec![] }
    }
}

impl Default for SimplificationOutput {
    fn default() -> Self {
        SimplificationOutput::new()
    }
}

/// Holds internal memory used by
/// simplification machinery.
///
/// Allows the allocations to be re-used
/// when simplifying more than once.
pub struct SimplificationBuffers {
    new_nodes: NodeTable,
    new_edges: EdgeTable,
    temp_edge_buffer: EdgeTable,
    overlapper: SegmentOverlapper,
    // Per input node: its mapped ancestry segments.
    ancestry: Vec<Vec<Segment>>,
}

impl SimplificationBuffers {
    /// Create a new instance.
    pub fn new() -> SimplificationBuffers {
        SimplificationBuffers {
            new_nodes: NodeTable::new(),
            new_edges: EdgeTable::new(),
            temp_edge_buffer: EdgeTable::new(),
            overlapper: SegmentOverlapper::new(),
            ancestry: vec![],
        }
    }

    fn reset(&mut self, num_input_nodes: usize) {
        self.new_nodes.clear();
        self.new_edges.clear();
        self.temp_edge_buffer.clear();
        self.ancestry.clear();
        self.ancestry.resize(num_input_nodes, vec![]);
    }
}

impl Default for SimplificationBuffers {
    fn default() -> Self {
        SimplificationBuffers::new()
    }
}

struct SegmentOverlapper {
    segment_queue: Vec<Segment>,
    overlapping: Vec<Segment>,
    left: Position,
    right: Position,
    qbeg: usize,
    qend: usize,
    oend: usize,
}

impl SegmentOverlapper {
    fn new() -> SegmentOverlapper {
        SegmentOverlapper {
            segment_queue: vec![],
            overlapping: vec![],
            left: Position::from(0),
            right: Position::MAX,
            qbeg: usize::MAX,
            qend: usize::MAX,
            oend: usize::MAX,
        }
    }

    fn clear_queue(&mut self) {
        self.segment_queue.clear();
    }

    fn enqueue(&mut self, left: Position, right: Position, node: NodeId) {
        self.segment_queue.push(Segment { left, right, node });
    }

    // Sort the queue by left end and terminate it with a
    // sentinel past the end of the genome.
    fn finalize_queue(&mut self, maxlen: Position) {
        self.segment_queue.sort_by(|a, b| a.left.cmp(&b.left));
        self.segment_queue.push(Segment {
            left: maxlen,
            right: maxlen + Position::from(1),
            node: NodeId::NULL,
        });
    }

    fn init(&mut self) {
        self.qbeg = 0;
        self.qend = self.segment_queue.len() - 1;
        self.left = Position::from(0);
        self.right = Position::MAX;
        self.oend = 0;
        self.overlapping.clear();
    }

    // Drop overlaps ending at or before the current left end,
    // returning the minimum right end of those remaining.
    fn set_partition(&mut self) -> Position {
        let mut tright = Position::MAX;
        let mut b: usize = 0;

        for i in 0..self.oend {
            if self.overlapping[i].right > self.left {
                self.overlapping[b] = self.overlapping[i];
                tright = std::cmp::min(tright, self.overlapping[b].right);
                b += 1;
            }
        }

        self.oend = b;
        self.overlapping.truncate(b);

        tright
    }

    fn num_overlaps(&self) -> usize {
        self.oend
    }

    fn advance(&mut self) -> bool {
        let mut rv = false;

        if self.qbeg < self.qend {
            self.left = self.right;
            let mut tright = self.set_partition();
            if self.num_overlaps() == 0 {
                self.left = self.segment_queue[self.qbeg].left;
            }
            while self.qbeg < self.qend && self.segment_queue[self.qbeg].left == self.left {
                tright = std::cmp::min(tright, self.segment_queue[self.qbeg].right);
                self.overlapping.push(self.segment_queue[self.qbeg]);
                self.oend += 1;
                self.qbeg += 1;
            }
            self.right = std::cmp::min(self.segment_queue[self.qbeg].left, tright);
            rv = true;
        } else {
            self.left = self.right;
            self.right = Position::MAX;
            let tright = self.set_partition();
            if self.num_overlaps() > 0 {
                self.right = tright;
                rv = true
            }
        }

        rv
    }

    fn get_left(&self) -> Position {
        self.left
    }

    fn get_right(&self) -> Position {
        self.right
    }

    fn overlap(&self, i: usize) -> &Segment {
        &self.overlapping[i]
    }
}

// Append, coalescing with the tail segment when contiguous
// and mapped to the same output node.
fn add_ancestry(
    input_id: NodeId,
    left: Position,
    right: Position,
    node: NodeId,
    ancestry: &mut [Vec<Segment>],
) {
    let list = &mut ancestry[usize::from(input_id)];
    match list.last_mut() {
        Some(last) if last.right == left && last.node == node => last.right = right,
        _ => list.push(Segment::new(left, right, node)),
    }
}

fn buffer_edge(
    left: Position,
    right: Position,
    parent: NodeId,
    child: NodeId,
    temp_edge_buffer: &mut EdgeTable,
) {
    let i = temp_edge_buffer
        .iter()
        .rposition(|e: &Edge| e.child == child);

    match i {
        None => temp_edge_buffer.push(Edge {
            left,
            right,
            parent,
            child,
        }),
        Some(x) => {
            if temp_edge_buffer[x].right == left {
                temp_edge_buffer[x].right = right;
            } else {
                temp_edge_buffer.push(Edge {
                    left,
                    right,
                    parent,
                    child,
                });
            }
        }
    }
}

fn output_buffered_edges(temp_edge_buffer: &mut EdgeTable, new_edges: &mut EdgeTable) -> usize {
    temp_edge_buffer.sort_by(|a, b| a.child.cmp(&b.child));

    // Need to store size here b/c
    // append drains contents of input!!!
    let rv = temp_edge_buffer.len();
    new_edges.append(temp_edge_buffer);

    rv
}

fn record_sample_nodes(
    samples: &[NodeId],
    tables: &TableCollection,
    new_nodes: &mut NodeTable,
    ancestry: &mut [Vec<Segment>],
    idmap: &mut [NodeId],
) -> Result<(), ArgError> {
    for sample in samples.iter() {
        if sample.is_null() || usize::from(*sample) >= tables.num_nodes() {
            return Err(ArgError::SimplificationError {
                value: "invalid sample node id".to_string(),
            });
        }
        if !idmap[usize::from(*sample)].is_null() {
            return Err(ArgError::SimplificationError {
                value: "invalid sample list".to_string(),
            });
        }
        new_nodes.push(tables.node(*sample).clone());
        let output_id = NodeId::from(new_nodes.len() - 1);

        ancestry[usize::from(*sample)] = vec![Segment::new(
            Position::from(0),
            tables.genome_length(),
            output_id,
        )];

        idmap[usize::from(*sample)] = output_id;
    }
    Ok(())
}

// Intersect each of parent u's edges with the mapped ancestry of
// its child, queuing the overlaps. Returns the index one past u's
// last edge.
fn enqueue_parent_child_overlaps(
    edges: &[Edge],
    edge_index: usize,
    u: NodeId,
    ancestry: &[Vec<Segment>],
    overlapper: &mut SegmentOverlapper,
) -> usize {
    overlapper.clear_queue();

    let mut i = edge_index;

    while i < edges.len() && edges[i].parent == u {
        let edge = &edges[i];
        for seg in ancestry[usize::from(edge.child)].iter() {
            if seg.right > edge.left && edge.right > seg.left {
                overlapper.enqueue(
                    std::cmp::max(seg.left, edge.left),
                    std::cmp::min(seg.right, edge.right),
                    seg.node,
                );
            }
        }
        i += 1;
    }
    i
}

fn merge_ancestors(
    input_nodes: &[Node],
    maxlen: Position,
    parent_input_id: NodeId,
    keep_unary: bool,
    state: &mut SimplificationBuffers,
    idmap: &mut [NodeId],
) {
    let mut output_id = idmap[usize::from(parent_input_id)];
    let is_sample = !output_id.is_null();

    if is_sample {
        state.ancestry[usize::from(parent_input_id)].clear();
    }

    let mut previous_right = Position::from(0);
    let mut ancestry_node: NodeId;
    state.overlapper.init();
    state.temp_edge_buffer.clear();

    while state.overlapper.advance() {
        if state.overlapper.num_overlaps() == 1 {
            ancestry_node = state.overlapper.overlap(0).node;
            if is_sample || keep_unary {
                if output_id.is_null() {
                    state
                        .new_nodes
                        .push(input_nodes[usize::from(parent_input_id)].clone());
                    output_id = NodeId::from(state.new_nodes.len() - 1);
                    idmap[usize::from(parent_input_id)] = output_id;
                }
                buffer_edge(
                    state.overlapper.get_left(),
                    state.overlapper.get_right(),
                    output_id,
                    ancestry_node,
                    &mut state.temp_edge_buffer,
                );
                ancestry_node = output_id;
            }
        } else {
            if output_id.is_null() {
                state
                    .new_nodes
                    .push(input_nodes[usize::from(parent_input_id)].clone());
                output_id = NodeId::from(state.new_nodes.len() - 1);
                idmap[usize::from(parent_input_id)] = output_id;
            }
            ancestry_node = output_id;
            for i in 0..state.overlapper.num_overlaps() {
                let o = *state.overlapper.overlap(i);
                buffer_edge(
                    state.overlapper.get_left(),
                    state.overlapper.get_right(),
                    output_id,
                    o.node,
                    &mut state.temp_edge_buffer,
                );
            }
        }
        if is_sample && state.overlapper.get_left() != previous_right {
            add_ancestry(
                parent_input_id,
                previous_right,
                state.overlapper.get_left(),
                output_id,
                &mut state.ancestry,
            );
        }
        add_ancestry(
            parent_input_id,
            state.overlapper.get_left(),
            state.overlapper.get_right(),
            ancestry_node,
            &mut state.ancestry,
        );
        previous_right = state.overlapper.get_right();
    }
    if is_sample && previous_right != maxlen {
        add_ancestry(
            parent_input_id,
            previous_right,
            maxlen,
            output_id,
            &mut state.ancestry,
        );
    }

    if !output_id.is_null() {
        let n = output_buffered_edges(&mut state.temp_edge_buffer, &mut state.new_edges);

        if n == 0 && !is_sample {
            state.new_nodes.truncate(usize::from(output_id));
            idmap[usize::from(parent_input_id)] = NodeId::NULL;
        }
    }
}

fn setup_simplification(
    samples: &SamplesInfo,
    tables: &TableCollection,
    flags: SimplificationFlags,
    state: &mut SimplificationBuffers,
    output: &mut SimplificationOutput,
) -> Result<(), ArgError> {
    if flags.contains(SimplificationFlags::VALIDATE_EDGES) {
        validate_edge_table(tables.genome_length(), tables.edges(), tables.nodes())?;
    }

    output.idmap.clear();
    output.idmap.resize(tables.num_nodes(), NodeId::NULL);

    state.reset(tables.num_nodes());

    record_sample_nodes(
        &samples.samples,
        tables,
        &mut state.new_nodes,
        &mut state.ancestry,
        &mut output.idmap,
    )?;

    Ok(())
}

/// Simplify a [``TableCollection``].
///
/// This differs from [``simplify_tables_without_state``] in that the
/// memory allocations made during simplification are preserved in
/// an instance of [``SimplificationBuffers``].
///
/// # Parameters
///
/// * `samples`: the sample nodes of the input tables.
/// * `flags`: modify the behavior of the simplification algorithm.
/// * `state`: the internal data structures used
///            by the simplification algorithm.
/// * `tables`: a [``TableCollection``] to simplify.
/// * `output`: Where simplification output gets written.
///             See [``SimplificationOutput``].
///
/// # Notes
///
/// The input tables must be sorted.
/// See [``TableCollection::sort_tables``].
pub fn simplify_tables(
    samples: &SamplesInfo,
    flags: SimplificationFlags,
    state: &mut SimplificationBuffers,
    tables: &mut TableCollection,
    output: &mut SimplificationOutput,
) -> Result<(), ArgError> {
    setup_simplification(samples, tables, flags, state, output)?;

    let keep_unary = flags.contains(SimplificationFlags::KEEP_UNARY);
    let maxlen = tables.genome_length();
    let num_edges = tables.num_edges();
    let mut edge_i = 0;
    while edge_i < num_edges {
        let u = tables.edges_[edge_i].parent;
        edge_i = enqueue_parent_child_overlaps(
            &tables.edges_,
            edge_i,
            u,
            &state.ancestry,
            &mut state.overlapper,
        );
        state.overlapper.finalize_queue(maxlen);
        merge_ancestors(
            &tables.nodes_,
            maxlen,
            u,
            keep_unary,
            state,
            &mut output.idmap,
        );
    }

    tables.edges_.clear();
    tables.edges_.append(&mut state.new_edges);
    std::mem::swap(&mut tables.nodes_, &mut state.new_nodes);
    tables.is_indexed = false;

    Ok(())
}

/// Simplify a [``TableCollection``].
///
/// # Parameters
///
/// * `samples`: the sample nodes of the input tables.
/// * `flags`: modify the behavior of the simplification algorithm.
/// * `tables`: a [``TableCollection``] to simplify.
/// * `output`: Where simplification output gets written.
///             See [``SimplificationOutput``].
///
/// # Notes
///
/// The input tables must be sorted.
/// See [``TableCollection::sort_tables``].
pub fn simplify_tables_without_state(
    samples: &SamplesInfo,
    flags: SimplificationFlags,
    tables: &mut TableCollection,
    output: &mut SimplificationOutput,
) -> Result<(), ArgError> {
    let mut state = SimplificationBuffers::new();
    simplify_tables(samples, flags, &mut state, tables, output)
}
