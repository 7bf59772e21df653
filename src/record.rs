//! Parsing of the ARGweaver `.arg` node-list format.
//!
//! The format is line oriented. The first line declares the
//! sequence interval as two `key=value` tokens:
//!
//! ```text
//! start=0	end=10000
//! ```
//!
//! The remaining lines form a tab-separated table with a header
//! row naming at least `name`, `event`, `age`, `pos`, and
//! `parents`. Column order is free; fields are located by header
//! name. `name` and `parents` are kept as strings even when they
//! look numeric, so that identifiers never silently change type.

use crate::error::ArgError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::BufRead;

/// The closed set of event tags in a v1 `.arg` file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// A terminal (sampled) lineage.
    Gene,
    /// A coalescence of two lineages.
    Coal,
    /// A recombination event, splitting a lineage at `pos`.
    Recomb,
}

impl std::str::FromStr for EventType {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(EventType::Gene),
            "coal" => Ok(EventType::Coal),
            "recomb" => Ok(EventType::Recomb),
            _ => Err(ArgError::UnknownEvent {
                event: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::Gene => "gene",
            EventType::Coal => "coal",
            EventType::Recomb => "recomb",
        };
        write!(f, "{}", name)
    }
}

/// One row of the input table.
///
/// The whole record is attached to its output node as JSON
/// metadata, so decoding that metadata reconstructs the input
/// row field for field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArgRecord {
    /// Node identifier. Opaque; never coerced to a number.
    pub name: String,
    /// Event tag.
    pub event: EventType,
    /// Node age as declared by the producer. Only used to
    /// sanity-check sample nodes; output times are synthetic.
    pub age: f64,
    /// Genomic position. Meaningful for `recomb` events only.
    pub pos: f64,
    /// Parent identifiers in declared order. The first-listed
    /// parent owns the left interval of a recombination split.
    pub parents: Vec<String>,
    /// Child identifiers, carried through verbatim when the
    /// input has a `children` column.
    #[serde(default)]
    pub children: Vec<String>,
}

impl ArgRecord {
    /// Serialize the record to JSON bytes for node metadata.
    pub fn to_metadata(&self) -> Result<Vec<u8>, ArgError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a record from node metadata bytes.
    pub fn from_metadata(metadata: &[u8]) -> Result<Self, ArgError> {
        Ok(serde_json::from_slice(metadata)?)
    }

    /// `true` if the name marks this node as a sample.
    ///
    /// The producer's v1 layout names sampled lineages with an
    /// `n` prefix; there is no in-band flag.
    pub fn is_sample(&self) -> bool {
        self.name.starts_with('n')
    }
}

/// Parse the `start=<int> end=<int>` header line.
///
/// The two tokens are required, in that order.
///
/// # Errors
///
/// [`ArgError::MalformedHeader`] if either token is missing,
/// misnamed, or holds a non-integer payload.
pub fn parse_header(line: &str) -> Result<(i64, i64), ArgError> {
    let malformed = || ArgError::MalformedHeader {
        line: line.to_string(),
    };
    let mut tokens = line.split_whitespace();
    let start = tokens
        .next()
        .and_then(|t| t.strip_prefix("start="))
        .ok_or_else(malformed)?;
    let end = tokens
        .next()
        .and_then(|t| t.strip_prefix("end="))
        .ok_or_else(malformed)?;
    let start = start.parse::<i64>().map_err(|_| malformed())?;
    let end = end.parse::<i64>().map_err(|_| malformed())?;
    Ok((start, end))
}

fn split_name_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

struct ColumnIndexes {
    name: usize,
    event: usize,
    age: usize,
    pos: usize,
    parents: usize,
    children: Option<usize>,
}

impl ColumnIndexes {
    fn new(header: &str) -> Result<Self, ArgError> {
        let mut by_name = HashMap::new();
        for (i, column) in header.split('\t').enumerate() {
            by_name.insert(column, i);
        }
        let required = |column: &str| {
            by_name.get(column).copied().ok_or_else(|| ArgError::MissingColumn {
                column: column.to_string(),
            })
        };
        Ok(Self {
            name: required("name")?,
            event: required("event")?,
            age: required("age")?,
            pos: required("pos")?,
            parents: required("parents")?,
            children: by_name.get("children").copied(),
        })
    }
}

/// The parsed contents of one `.arg` file.
///
/// Records keep their input order. A duplicated `name`
/// overwrites the earlier record in place (last row wins);
/// duplicate identifiers are undefined input and draw no
/// further validation.
pub struct ArgFile {
    start: i64,
    end: i64,
    records: Vec<ArgRecord>,
}

impl ArgFile {
    /// Read and parse an entire input stream.
    ///
    /// # Errors
    ///
    /// Any [`ArgError`] parse failure aborts the read.
    pub fn read<R: BufRead>(reader: R) -> Result<Self, ArgError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ArgError::MalformedHeader {
                    line: String::new(),
                })
            }
        };
        let (start, end) = parse_header(&header)?;

        let columns = match lines.next() {
            Some(line) => ColumnIndexes::new(&line?)?,
            None => {
                return Ok(Self {
                    start,
                    end,
                    records: vec![],
                })
            }
        };

        let mut records: Vec<ArgRecord> = vec![];
        let mut index_of: HashMap<String, usize> = HashMap::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = Self::parse_row(&line, &columns)?;
            match index_of.get(&record.name) {
                Some(&i) => records[i] = record,
                None => {
                    index_of.insert(record.name.clone(), records.len());
                    records.push(record);
                }
            }
        }
        Ok(Self {
            start,
            end,
            records,
        })
    }

    fn parse_row(line: &str, columns: &ColumnIndexes) -> Result<ArgRecord, ArgError> {
        let malformed = || ArgError::MalformedRecord {
            line: line.to_string(),
        };
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let name = field(columns.name);
        if name.is_empty() {
            return Err(malformed());
        }
        let event = field(columns.event).parse::<EventType>()?;
        let age = field(columns.age).parse::<f64>().map_err(|_| malformed())?;
        let pos_field = field(columns.pos);
        let pos = if pos_field.is_empty() {
            0.0
        } else {
            pos_field.parse::<f64>().map_err(|_| malformed())?
        };
        let parents = split_name_list(field(columns.parents));
        let children = match columns.children {
            Some(i) => split_name_list(field(i)),
            None => vec![],
        };
        Ok(ArgRecord {
            name: name.to_string(),
            event,
            age,
            pos,
            parents,
            children,
        })
    }

    /// Left end of the declared sequence interval.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Right end of the declared sequence interval.
    ///
    /// This is the genome length bound used for full-length edges.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// All records, in input order.
    pub fn records(&self) -> &[ArgRecord] {
        &self.records
    }
}


#[cfg(test)]
mod test_records {
    use super::*;

    fn read(input: &str) -> Result<ArgFile, ArgError> {
        ArgFile::read(input.as_bytes())
    }

    #[test]
    fn test_basic_table() {
        let arg = read(
            "start=0\tend=100\n\
             name\tevent\tage\tpos\tparents\tchildren\n\
             1\tcoal\t50\t0\t\tn0\n\
             n0\tgene\t0\t0\t1\t\n",
        )
        .unwrap();
        assert_eq!(arg.start(), 0);
        assert_eq!(arg.end(), 100);
        assert_eq!(arg.records().len(), 2);
        // numeric-looking names stay strings
        assert_eq!(arg.records()[0].name, "1");
        assert_eq!(arg.records()[0].children, vec!["n0".to_string()]);
        assert_eq!(arg.records()[1].parents, vec!["1".to_string()]);
        assert!(arg.records()[1].is_sample());
        assert!(!arg.records()[0].is_sample());
    }

    #[test]
    fn test_column_order_is_free() {
        let arg = read(
            "start=0\tend=100\n\
             parents\tname\tage\tevent\tpos\n\
             \tn0\t0\tgene\t0\n",
        )
        .unwrap();
        assert_eq!(arg.records()[0].name, "n0");
        assert!(arg.records()[0].parents.is_empty());
    }

    #[test]
    fn test_missing_column() {
        match read("start=0\tend=100\nname\tevent\tage\tparents\n") {
            Err(ArgError::MissingColumn { column }) => assert_eq!(column, "pos"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_unknown_event() {
        match read(
            "start=0\tend=100\n\
             name\tevent\tage\tpos\tparents\n\
             x\tmigrate\t1\t0\t\n",
        ) {
            Err(ArgError::UnknownEvent { event }) => assert_eq!(event, "migrate"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_duplicate_name_last_row_wins() {
        let arg = read(
            "start=0\tend=100\n\
             name\tevent\tage\tpos\tparents\n\
             x\tcoal\t1\t0\t\n\
             x\tcoal\t2\t0\t\n",
        )
        .unwrap();
        assert_eq!(arg.records().len(), 1);
        assert_eq!(arg.records()[0].age, 2.0);
    }

    #[test]
    fn test_metadata_round_trip() {
        let record = ArgRecord {
            name: "8".to_string(),
            event: EventType::Recomb,
            age: 123.5,
            pos: 740.0,
            parents: vec!["9".to_string(), "10".to_string()],
            children: vec!["7".to_string()],
        };
        let encoded = record.to_metadata().unwrap();
        let decoded = ArgRecord::from_metadata(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
