use std::collections::HashMap;

use argrustts::*;
use proptest::prelude::*;

// Map each output node back to its input name via the
// record stored in its metadata.
fn names_by_node(ts: &TreeSequence) -> HashMap<String, NodeId> {
    let mut rv = HashMap::new();
    for i in 0..ts.num_nodes() {
        let record: ArgRecord = ts.node_metadata(NodeId::from(i)).unwrap().unwrap();
        rv.insert(record.name, NodeId::from(i));
    }
    rv
}

fn child_edges(ts: &TreeSequence, child: NodeId) -> Vec<Edge> {
    ts.edges()
        .iter()
        .filter(|e| e.child == child)
        .copied()
        .collect()
}

#[test]
fn test_singleton_sample() {
    let input = "start=0\tend=50\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t\n";
    let ts = convert_argweaver(input.as_bytes()).unwrap();
    assert_eq!(ts.num_nodes(), 1);
    assert_eq!(ts.num_edges(), 0);
    assert_eq!(ts.genome_length(), 50);
    assert_eq!(ts.samples(), vec![NodeId::from(0)]);
    assert_eq!(ts.nodes()[0].time, 0.0);
    assert!(ts.nodes()[0].flags & NodeFlags::IS_SAMPLE.bits() > 0);
    assert_eq!(ts.num_trees(), 1);
}

#[test]
fn test_unary_chain_is_retained() {
    let input = "start=0\tend=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t1\n\
                 1\tcoal\t250\t0\t2\n\
                 2\tcoal\t900\t0\t\n";
    let ts = convert_argweaver(input.as_bytes()).unwrap();
    assert_eq!(ts.num_nodes(), 3);
    assert_eq!(ts.num_edges(), 2);
    assert_eq!(ts.num_trees(), 1);

    let names = names_by_node(&ts);
    let n0 = names["n0"];
    let inner = names["1"];
    let root = names["2"];

    // synthetic times: sample at 0, ancestors at successive ranks
    assert_eq!(ts.nodes()[usize::from(n0)].time, 0.0);
    assert_eq!(ts.nodes()[usize::from(inner)].time, 1.0);
    assert_eq!(ts.nodes()[usize::from(root)].time, 2.0);

    // both edges span the whole genome
    for edge in ts.edges() {
        assert_eq!(edge.left, 0);
        assert_eq!(edge.right, 100);
    }
    assert_eq!(
        child_edges(&ts, n0),
        vec![Edge {
            left: Position::from(0),
            right: Position::from(100),
            parent: inner,
            child: n0,
        }]
    );
    assert_eq!(
        child_edges(&ts, inner),
        vec![Edge {
            left: Position::from(0),
            right: Position::from(100),
            parent: root,
            child: inner,
        }]
    );
}

#[test]
fn test_recombination_splits_the_genome() {
    // n0 descends from recombination node 3, which inherits
    // [0, 40) from parent 4 and [40, 100) from parent 5.
    let input = "start=0\tend=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t3\n\
                 n1\tgene\t0\t0\t4\n\
                 3\trecomb\t150\t40\t4,5\n\
                 4\tcoal\t300\t0\t5\n\
                 5\tcoal\t800\t0\t\n";
    let ts = convert_argweaver(input.as_bytes()).unwrap();
    assert_eq!(ts.num_nodes(), 5);
    assert_eq!(ts.samples().len(), 2);
    assert_eq!(ts.num_trees(), 2);

    let names = names_by_node(&ts);
    let recomb = names["3"];
    let left_parent = names["4"];
    let right_parent = names["5"];

    let mut edges = child_edges(&ts, recomb);
    edges.sort_by_key(|e| e.left);
    assert_eq!(
        edges,
        vec![
            Edge {
                left: Position::from(0),
                right: Position::from(40),
                parent: left_parent,
                child: recomb,
            },
            Edge {
                left: Position::from(40),
                right: Position::from(100),
                parent: right_parent,
                child: recomb,
            },
        ]
    );

    // the stored record survives the conversion verbatim
    let record: ArgRecord = ts.node_metadata(recomb).unwrap().unwrap();
    assert_eq!(record.event, EventType::Recomb);
    assert_eq!(record.pos, 40.0);
    assert_eq!(record.parents, vec!["4".to_string(), "5".to_string()]);
}

#[test]
fn test_numeric_names_stay_strings() {
    let input = "start=0\tend=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t007\n\
                 007\tcoal\t90\t0\t\n";
    let ts = convert_argweaver(input.as_bytes()).unwrap();
    let names = names_by_node(&ts);
    // "007" must not have been coerced to a number and back
    assert!(names.contains_key("007"));
    let record: ArgRecord = ts.node_metadata(names["n0"]).unwrap().unwrap();
    assert_eq!(record.parents, vec!["007".to_string()]);
}

#[test]
fn test_coalescence_of_two_samples() {
    let input = "start=0\tend=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t2\n\
                 n1\tgene\t0\t0\t2\n\
                 2\tcoal\t400\t0\t\n";
    let ts = convert_argweaver(input.as_bytes()).unwrap();
    assert_eq!(ts.num_nodes(), 3);
    assert_eq!(ts.num_edges(), 2);
    assert_eq!(ts.num_trees(), 1);
    let names = names_by_node(&ts);
    let root = names["2"];
    for sample in ts.samples() {
        assert_eq!(child_edges(&ts, sample)[0].parent, root);
    }
}

#[test]
fn test_malformed_header_is_fatal() {
    let input = "begin=0\tstop=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\t\n";
    match convert_argweaver(input.as_bytes()) {
        Err(ArgError::MalformedHeader { .. }) => (),
        _ => panic!("expected MalformedHeader"),
    }
}

#[test]
fn test_unknown_parent_is_fatal() {
    let input = "start=0\tend=100\n\
                 name\tevent\tage\tpos\tparents\n\
                 n0\tgene\t0\t0\tghost\n";
    match convert_argweaver(input.as_bytes()) {
        Err(ArgError::UnknownParent { child, parent }) => {
            assert_eq!(child, "n0");
            assert_eq!(parent, "ghost");
        }
        _ => panic!("expected UnknownParent"),
    }
}

// Build an input whose samples each sit below an independent
// chain of unary ancestors. Every node is on a sample path,
// so simplification with unary retention keeps them all.
fn chain_forest_input(chain_lengths: &[usize]) -> String {
    let mut input = String::from("start=0\tend=1000\nname\tevent\tage\tpos\tparents\n");
    for (i, len) in chain_lengths.iter().enumerate() {
        let parent = |level: usize| {
            if level < *len {
                format!("c{}_{}", i, level)
            } else {
                String::new()
            }
        };
        input.push_str(&format!("n{}\tgene\t0\t0\t{}\n", i, parent(0)));
        for level in 0..*len {
            input.push_str(&format!(
                "c{}_{}\tcoal\t{}\t0\t{}\n",
                i,
                level,
                (level + 1) * 10,
                parent(level + 1)
            ));
        }
    }
    input
}

proptest! {
    #[test]
    fn test_chain_forests_fully_retained(
        chain_lengths in proptest::collection::vec(0..5_usize, 1..6)
    ) {
        let input = chain_forest_input(&chain_lengths);
        let ts = convert_argweaver(input.as_bytes()).unwrap();
        let num_ancestors: usize = chain_lengths.iter().sum();
        prop_assert_eq!(ts.num_nodes(), chain_lengths.len() + num_ancestors);
        prop_assert_eq!(ts.num_edges(), num_ancestors);
        prop_assert_eq!(ts.samples().len(), chain_lengths.len());
        prop_assert_eq!(ts.num_trees(), 1);
        for sample in ts.samples() {
            prop_assert_eq!(ts.nodes()[usize::from(sample)].time, 0.0);
        }
        for edge in ts.edges() {
            let parent = &ts.nodes()[usize::from(edge.parent)];
            let child = &ts.nodes()[usize::from(edge.child)];
            prop_assert!(f64::from(child.time) < f64::from(parent.time));
            prop_assert_eq!(edge.left, 0);
            prop_assert_eq!(edge.right, 1000);
        }
    }
}
