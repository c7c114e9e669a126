use squadpath_core::{Point, TileStateProvider};

/// A found path, handed out one tile per tick.
///
/// Movement code asks for [`next_step`](Self::next_step) once per tick and
/// moves the unit there. Nothing here re-plans: when the next tile turns out
/// to be taken ([`is_blocked`](Self::is_blocked)) the caller decides whether
/// to wait or search again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoints {
    steps: Vec<Point>,
    next: usize,
}

impl Waypoints {
    /// Wrap a path as returned by the pathfinder (start excluded).
    pub fn new(steps: Vec<Point>) -> Self {
        Self { steps, next: 0 }
    }

    /// Take the next tile to move to.
    pub fn next_step(&mut self) -> Option<Point> {
        let p = self.steps.get(self.next).copied()?;
        self.next += 1;
        Some(p)
    }

    /// The next tile, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<Point> {
        self.steps.get(self.next).copied()
    }

    /// Tiles not handed out yet.
    #[inline]
    pub fn remaining(&self) -> &[Point] {
        self.steps.get(self.next..).unwrap_or(&[])
    }

    /// Final tile of the path.
    #[inline]
    pub fn destination(&self) -> Option<Point> {
        self.steps.last().copied()
    }

    /// Whether every step has been handed out.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    /// Whether the next tile is no longer free.
    pub fn is_blocked<P>(&self, tiles: &P) -> bool
    where
        P: TileStateProvider + ?Sized,
    {
        self.peek()
            .is_some_and(|p| !tiles.tile_state(p).is_free())
    }
}

impl From<Vec<Point>> for Waypoints {
    fn from(steps: Vec<Point>) -> Self {
        Self::new(steps)
    }
}
