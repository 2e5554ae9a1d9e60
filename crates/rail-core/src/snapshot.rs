//! Opaque per-agent report values.

/// What one reportable contributes to a report.
///
/// The engine never inspects snapshot contents; it only groups them by agent
/// kind and timestamps the batch.  Single particles report their position,
/// multi-head composites a tuple of head positions.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Snapshot {
    /// A single track position.
    Pos(i64),
    /// One position per head of a composite, in head order.
    Tuple(Vec<i64>),
}

impl Snapshot {
    /// The position if this is a single-position snapshot.
    #[inline]
    pub fn pos(&self) -> Option<i64> {
        match self {
            Snapshot::Pos(p) => Some(*p),
            Snapshot::Tuple(_) => None,
        }
    }

    /// All positions in this snapshot, regardless of shape.
    pub fn positions(&self) -> Vec<i64> {
        match self {
            Snapshot::Pos(p) => vec![*p],
            Snapshot::Tuple(ps) => ps.clone(),
        }
    }
}
