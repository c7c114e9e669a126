use squadpath_core::Point;

/// Cost of stepping onto a free tile.
pub const STEP_COST: i32 = 1;

/// Saturated cost meaning "effectively unreachable".
///
/// Stepping onto an occupied tile costs this much. A frontier entry at this
/// cost is never selected for expansion.
pub const MAX_COST: i32 = i32::MAX;

/// Index of a [`SearchNode`] in the per-search node arena.
pub(crate) type NodeId = usize;

// ---------------------------------------------------------------------------
// Search node
// ---------------------------------------------------------------------------

/// Best known route to one coordinate during a single search.
///
/// A new node is created each time a coordinate is discovered or relaxed to
/// a lower cost, so older nodes stay valid as parents of their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchNode {
    pub(crate) coords: Point,
    pub(crate) cost: i32,
    /// `None` only for the start node. Always a smaller id than this node.
    pub(crate) parent: Option<NodeId>,
}

/// Cost of entering a tile given the cost of the tile we come from.
#[inline]
pub(crate) fn step_cost(from_cost: i32, free: bool) -> i32 {
    if free {
        from_cost.saturating_add(STEP_COST)
    } else {
        MAX_COST
    }
}

/// Whether `new_cost` should replace a node currently costing `existing`.
///
/// Non-positive and saturated values are never improvements.
#[inline]
pub(crate) fn improves(existing: i32, new_cost: i32) -> bool {
    new_cost > 0 && new_cost < MAX_COST && existing > new_cost
}

// ---------------------------------------------------------------------------
// Bookkeeping
// ---------------------------------------------------------------------------

/// Which set a coordinate currently belongs to, and through which node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Open(NodeId),
    Resolved(NodeId),
}

impl Slot {
    #[inline]
    pub(crate) fn node(self) -> NodeId {
        match self {
            Self::Open(id) | Self::Resolved(id) => id,
        }
    }
}

/// Frontier heap entry, ordered by cost then by insertion sequence.
///
/// Re-inserting a coordinate takes a fresh sequence number, so among equal
/// costs the entry that has sat in the frontier the longest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierRef {
    pub(crate) cost: i32,
    pub(crate) seq: u64,
    pub(crate) node: NodeId,
}

impl Ord for FrontierRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (cost, seq) first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
