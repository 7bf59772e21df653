//! Error handling
use crate::tables::TablesError;
use thiserror::Error;

/// Primary error type.
///
/// Some members of this enum implement ``From``
/// in order to redirect other error types.
///
/// All conversion failures are fatal: a malformed input
/// aborts the call and no partial result is returned.
#[derive(Error, Debug, PartialEq)]
pub enum ArgError {
    /// The first input line lacks valid `start=`/`end=` fields.
    #[error("malformed header: {line:?}")]
    MalformedHeader {
        /// The offending line
        line: String,
    },
    /// The record table header lacks a required column.
    #[error("missing required column: {column:?}")]
    MissingColumn {
        /// The column name
        column: String,
    },
    /// A record row could not be parsed.
    #[error("malformed record: {line:?}")]
    MalformedRecord {
        /// The offending line
        line: String,
    },
    /// The `event` field held an unrecognized tag.
    #[error("unknown event type: {event:?}")]
    UnknownEvent {
        /// The offending tag
        event: String,
    },
    /// A `parents` entry referenced a name with no record.
    #[error("node {child:?} references unknown parent {parent:?}")]
    UnknownParent {
        /// The referring node
        child: String,
        /// The missing parent name
        parent: String,
    },
    /// A node declared a parent count other than 0, 1, or 2.
    #[error("node {name:?} has {count} parents")]
    InvalidParentCount {
        /// The offending node name
        name: String,
        /// The declared parent count
        count: usize,
    },
    /// A sample node (name prefix `n`) had a nonzero age.
    #[error("sample node {name:?} has nonzero age")]
    SampleAgeNonzero {
        /// The offending node name
        name: String,
    },
    /// A sample node (name prefix `n`) was not a `gene` event.
    #[error("sample node {name:?} is not a gene event")]
    SampleEventNotGene {
        /// The offending node name
        name: String,
    },
    /// Parent references form a cycle; no topological order exists.
    #[error("cycle detected at node {name:?}")]
    CyclicArg {
        /// A node participating in the cycle
        name: String,
    },
    /// An error that occurs during simplification.
    #[error("{value:?}")]
    SimplificationError {
        /// The error message
        value: String,
    },
    /// A redirection of a [``TablesError``].
    #[error("{value:?}")]
    TablesError {
        /// The redirected error
        #[from]
        value: TablesError,
    },
    /// Node metadata could not be encoded or decoded.
    #[error("metadata error: {value:?}")]
    MetadataError {
        /// The error message
        value: String,
    },
    /// An I/O failure while reading the input stream.
    #[error("read error: {value:?}")]
    ReadError {
        /// The error message
        value: String,
    },
}

impl From<std::io::Error> for ArgError {
    fn from(value: std::io::Error) -> Self {
        ArgError::ReadError {
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for ArgError {
    fn from(value: serde_json::Error) -> Self {
        ArgError::MetadataError {
            value: value.to_string(),
        }
    }
}
