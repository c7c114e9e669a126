/// Search radius meaning "no limit".
pub const UNBOUNDED: i32 = i32::MAX;

/// Tunables for a [`GridPathfinder`](crate::GridPathfinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Largest Manhattan distance from the start a search may visit.
    ///
    /// Tiles farther away are treated like tiles outside the map. Negative
    /// values behave like 0.
    pub max_radius: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_radius: UNBOUNDED,
        }
    }
}

impl SearchConfig {
    /// Return a copy with the given search radius.
    pub fn with_max_radius(mut self, max_radius: i32) -> Self {
        self.max_radius = max_radius;
        self
    }
}
