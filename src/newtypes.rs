//! Newtypes for table row ids, genomic positions, and node times.

type LowLevelIdType = i32;
type LowLevelTimeType = f64;
type LowLevelPositionType = i64;

/// The id of a row in a node table.
///
/// ```
/// use argrustts::NodeId;
///
/// let n = NodeId::from(-1);
/// assert_eq!(n, NodeId::NULL);
/// assert_eq!(n.into_raw(), -1);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct NodeId(pub(crate) LowLevelIdType);

/// The id of a row in an edge table.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct EdgeId(pub(crate) LowLevelIdType);

impl_table_id!(NodeId, LowLevelIdType);
impl_table_id!(EdgeId, LowLevelIdType);

/// A position/coordinate within a genome.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct Position(pub(crate) LowLevelPositionType);

/// A node time.
///
/// Time is measured backwards: sample nodes sit at
/// time 0 and times increase toward the past.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(pub(crate) LowLevelTimeType);

impl Position {
    /// Minimum value
    pub const MIN: Position = Position(LowLevelPositionType::MIN);
    /// Maximum value
    pub const MAX: Position = Position(LowLevelPositionType::MAX);
}

impl Time {
    /// Minimum value
    pub const MIN: Time = Time(LowLevelTimeType::MIN);
    /// Maximum value
    pub const MAX: Time = Time(LowLevelTimeType::MAX);
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time({})", self.0)
    }
}

impl From<LowLevelPositionType> for Position {
    fn from(value: LowLevelPositionType) -> Self {
        Self(value)
    }
}

impl From<Position> for LowLevelPositionType {
    fn from(value: Position) -> Self {
        value.0
    }
}

impl PartialEq<LowLevelPositionType> for Position {
    fn eq(&self, other: &LowLevelPositionType) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Position> for LowLevelPositionType {
    fn eq(&self, other: &Position) -> bool {
        *self == other.0
    }
}

impl PartialOrd<LowLevelPositionType> for Position {
    fn partial_cmp(&self, other: &LowLevelPositionType) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl PartialOrd<Position> for LowLevelPositionType {
    fn partial_cmp(&self, other: &Position) -> Option<std::cmp::Ordering> {
        self.partial_cmp(&other.0)
    }
}

impl From<LowLevelTimeType> for Time {
    fn from(value: LowLevelTimeType) -> Self {
        Self(value)
    }
}

impl From<i64> for Time {
    fn from(value: i64) -> Self {
        Self(value as LowLevelTimeType)
    }
}

impl From<i32> for Time {
    fn from(value: i32) -> Self {
        Self(value as LowLevelTimeType)
    }
}

impl From<Time> for f64 {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl PartialEq<LowLevelTimeType> for Time {
    fn eq(&self, other: &LowLevelTimeType) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Time> for LowLevelTimeType {
    fn eq(&self, other: &Time) -> bool {
        *self == other.0
    }
}

impl PartialOrd<Time> for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.0.partial_cmp(&other.0) {
            None => panic!("fatal: partial_cmp for Time received non-finite values"),
            Some(x) => Some(x),
        }
    }
}
