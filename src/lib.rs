#![warn(missing_docs)]

//! Conversion of ARGweaver ancestral recombination graphs
//! to tree sequences in rust.
//!
//! # Overview
//!
//! The entry point is [`convert_argweaver`], which reads a
//! `.arg` file (the producer's v1 tabular node-list layout)
//! and returns an immutable [`TreeSequence`].
//!
//! The tables model follows `tskit` conventions:
//!
//! 1. Time is measured backwards. Sample nodes sit at time 0
//!    and times increase toward the past.
//! 2. Genomic intervals are half-open `[left, right)` with
//!    integer coordinates (see [`Position`]).
//! 3. Each output node carries its original input record as
//!    JSON metadata (see [`ArgRecord`]).
//!
//! # Example
//!
//! ```
//! let input = "start=0\tend=100\n\
//!              name\tevent\tage\tpos\tparents\n\
//!              n0\tgene\t0\t0\t2\n\
//!              n1\tgene\t0\t0\t2\n\
//!              2\tcoal\t120\t0\t\n";
//! let ts = argrustts::convert_argweaver(input.as_bytes()).unwrap();
//! assert_eq!(ts.num_nodes(), 3);
//! assert_eq!(ts.samples().len(), 2);
//! ```

mod macros;

mod convert;
mod error;
mod graph;
mod newtypes;
mod record;
mod segment;
mod simplification;
mod tables;
mod trees;

pub use convert::convert_argweaver;
pub use error::ArgError;
pub use graph::ArgGraph;
pub use newtypes::{EdgeId, NodeId, Position, Time};
pub use record::{parse_header, ArgFile, ArgRecord, EventType};
pub use segment::Segment;
pub use simplification::{
    simplify_tables, simplify_tables_without_state, SamplesInfo, SimplificationBuffers,
    SimplificationFlags, SimplificationOutput,
};
pub use tables::*;
pub use trees::TreeSequence;

/// Get the argrustts version number.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
