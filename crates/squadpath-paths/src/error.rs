use std::fmt;

use squadpath_core::Point;

/// Why a route search produced no path.
///
/// None of these are fatal: a unit that gets one holds its position and the
/// caller decides whether to ask again on a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPath {
    /// The goal is not part of the map. Nothing was explored.
    GoalOutOfBounds { goal: Point },
    /// The goal lies farther from the start than the search radius allows.
    OutsideRadius { goal: Point, max_radius: i32 },
    /// Start and goal are the same tile, so there is no step to take.
    SameTile { at: Point },
    /// Every reachable tile was explored without meeting the goal.
    Unreachable { goal: Point },
    /// Only occupied tiles were left to explore.
    FrontierExhausted { goal: Point },
}

impl NoPath {
    /// Whether asking again later can succeed once tiles free up.
    pub fn is_retryable(self) -> bool {
        match self {
            Self::GoalOutOfBounds { .. } | Self::SameTile { .. } => false,
            Self::OutsideRadius { .. } | Self::Unreachable { .. } | Self::FrontierExhausted { .. } => {
                true
            }
        }
    }
}

impl fmt::Display for NoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalOutOfBounds { goal } => write!(f, "no path: goal {goal} is out of bounds"),
            Self::OutsideRadius { goal, max_radius } => {
                write!(f, "no path: goal {goal} is beyond search radius {max_radius}")
            }
            Self::SameTile { at } => write!(f, "no path: already standing on {at}"),
            Self::Unreachable { goal } => write!(f, "no path: goal {goal} is unreachable"),
            Self::FrontierExhausted { goal } => {
                write!(f, "no path: every route to {goal} is blocked by occupied tiles")
            }
        }
    }
}

impl std::error::Error for NoPath {}
