//! Conversion of ARGweaver `.arg` files to a [`TreeSequence`].

use crate::error::ArgError;
use crate::graph::ArgGraph;
use crate::newtypes::{NodeId, Position};
use crate::record::{ArgFile, ArgRecord, EventType};
use crate::simplification::{
    simplify_tables_without_state, SamplesInfo, SimplificationFlags, SimplificationOutput,
};
use crate::tables::{IndexTablesFlags, NodeFlags, TableCollection, TableSortingFlags};
use crate::trees::TreeSequence;
use std::collections::HashMap;
use std::io::BufRead;

fn assign_node(
    record: &ArgRecord,
    time_counter: &mut i64,
    tables: &mut TableCollection,
) -> Result<NodeId, ArgError> {
    let (flags, time) = if record.is_sample() {
        if record.age != 0.0 {
            return Err(ArgError::SampleAgeNonzero {
                name: record.name.clone(),
            });
        }
        if record.event != EventType::Gene {
            return Err(ArgError::SampleEventNotGene {
                name: record.name.clone(),
            });
        }
        (NodeFlags::IS_SAMPLE.bits(), 0)
    } else {
        // Topological rank stands in for node age for the moment;
        // it is an ordinal scheme with no biological meaning.
        *time_counter += 1;
        (NodeFlags::NONE.bits(), *time_counter)
    };
    let metadata = record.to_metadata()?;
    let id = tables.add_node_with_flags(time, flags, Some(metadata))?;
    Ok(id)
}

fn emit_edges(
    arg: &ArgFile,
    ids: &HashMap<&str, NodeId>,
    breakpoints: &[Position],
    tables: &mut TableCollection,
) -> Result<(), ArgError> {
    let lookup = |child: &ArgRecord, name: &str| -> Result<NodeId, ArgError> {
        ids.get(name).copied().ok_or_else(|| ArgError::UnknownParent {
            child: child.name.clone(),
            parent: name.to_string(),
        })
    };
    let length = tables.genome_length();
    for record in arg.records() {
        let child = lookup(record, &record.name)?;
        match record.parents.as_slice() {
            [] => (), // a root
            [parent] => {
                tables.add_edge(0, length, lookup(record, parent)?, child)?;
            }
            [first, second] => {
                // Recombination node: the genome is partitioned at
                // the breakpoint, each half inherited from a
                // different parent.
                let x = breakpoints[usize::from(child)];
                tables.add_edge(0, x, lookup(record, first)?, child)?;
                tables.add_edge(x, length, lookup(record, second)?, child)?;
            }
            parents => {
                return Err(ArgError::InvalidParentCount {
                    name: record.name.clone(),
                    count: parents.len(),
                })
            }
        }
    }
    Ok(())
}

/// Convert an ARGweaver `.arg` file to a tree sequence.
///
/// An example `.arg` file is at
/// <https://github.com/CshlSiepelLab/argweaver/blob/master/test/data/test_trans/0.arg>
///
/// Nodes receive synthetic integer times from their topological
/// rank (samples pinned to time 0), the original input record
/// attached as JSON metadata, and one edge per parent: full
/// length for single-parent nodes, split at the recorded
/// breakpoint for two-parent (recombination) nodes. The tables
/// are then sorted and simplified with unary nodes retained.
///
/// This stops short of a full GARG: recombination nodes are not
/// expanded into the two-parent canonical form. The ARG topology
/// is returned as defined.
///
/// # Errors
///
/// Any [`ArgError`] input violation aborts the conversion;
/// there is no partial result.
///
/// # Example
///
/// ```
/// let input = "start=0\tend=100\n\
///              name\tevent\tage\tpos\tparents\n\
///              n0\tgene\t0\t0\t1\n\
///              1\tcoal\t50\t0\t\n";
/// let ts = argrustts::convert_argweaver(input.as_bytes()).unwrap();
/// assert_eq!(ts.num_nodes(), 2);
/// assert_eq!(ts.num_edges(), 1);
/// ```
pub fn convert_argweaver<R: BufRead>(reader: R) -> Result<TreeSequence, ArgError> {
    let arg = ArgFile::read(reader)?;
    let graph = ArgGraph::new(arg.records())?;
    let order = graph.topological_order()?;

    let record_of: HashMap<&str, &ArgRecord> = arg
        .records()
        .iter()
        .map(|r| (r.name.as_str(), r))
        .collect();

    let mut tables = TableCollection::new(arg.end())?;
    let length = tables.genome_length();
    let mut breakpoints = vec![length; arg.records().len()];
    let mut ids: HashMap<&str, NodeId> = HashMap::new();
    let mut time_counter: i64 = 0;
    for name in order {
        // every ordered name came from a record
        let record = record_of[name];
        let id = assign_node(record, &mut time_counter, &mut tables)?;
        ids.insert(name, id);
        if record.event == EventType::Recomb {
            breakpoints[usize::from(id)] = Position::from(record.pos as i64);
        }
    }

    emit_edges(&arg, &ids, &breakpoints, &mut tables)?;

    tables.sort_tables(TableSortingFlags::empty());

    let mut samples = SamplesInfo::new();
    for (i, node) in tables.enumerate_nodes() {
        if node.flags & NodeFlags::IS_SAMPLE.bits() > 0 {
            samples.samples.push(NodeId::from(i));
        }
    }

    let mut output = SimplificationOutput::new();
    simplify_tables_without_state(
        &samples,
        SimplificationFlags::VALIDATE_EDGES | SimplificationFlags::KEEP_UNARY,
        &mut tables,
        &mut output,
    )?;

    tables.build_indexes(IndexTablesFlags::default())?;
    Ok(TreeSequence::new(tables)?)
}

#[cfg(test)]
mod test_convert {
    use super::*;

    #[test]
    fn test_three_or_more_parents_is_fatal() {
        let input = "start=0\tend=100\n\
                     name\tevent\tage\tpos\tparents\n\
                     n0\tgene\t0\t0\t1,2,3\n\
                     1\tcoal\t10\t0\t\n\
                     2\tcoal\t20\t0\t\n\
                     3\tcoal\t30\t0\t\n";
        match convert_argweaver(input.as_bytes()) {
            Err(ArgError::InvalidParentCount { name, count }) => {
                assert_eq!(name, "n0");
                assert_eq!(count, 3);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn test_sample_with_nonzero_age_is_fatal() {
        let input = "start=0\tend=100\n\
                     name\tevent\tage\tpos\tparents\n\
                     n0\tgene\t5\t0\t\n";
        match convert_argweaver(input.as_bytes()) {
            Err(ArgError::SampleAgeNonzero { name }) => assert_eq!(name, "n0"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_sample_with_wrong_event_is_fatal() {
        let input = "start=0\tend=100\n\
                     name\tevent\tage\tpos\tparents\n\
                     n0\tcoal\t0\t0\t\n";
        match convert_argweaver(input.as_bytes()) {
            Err(ArgError::SampleEventNotGene { name }) => assert_eq!(name, "n0"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_cyclic_parents_is_fatal() {
        let input = "start=0\tend=100\n\
                     name\tevent\tage\tpos\tparents\n\
                     a\tcoal\t1\t0\tb\n\
                     b\tcoal\t2\t0\ta\n";
        match convert_argweaver(input.as_bytes()) {
            Err(ArgError::CyclicArg { .. }) => (),
            _ => panic!(),
        }
    }
}
