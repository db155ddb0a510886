//! Phase-space trace for the current run

use glam::DVec2;

/// Ordered, append-only sequence of phase-plot points
///
/// Lives for exactly one run; the controller clears it whenever a run restarts.
/// There is no cap: one point is kept per tick, so memory grows for the life
/// of the run (roughly 16 bytes per tick, about 3.2 KB per simulated second).
#[derive(Debug, Clone, Default)]
pub struct PhaseTrace {
    points: Vec<DVec2>,
}

impl PhaseTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, returning the segment that connects it to the previous one
    pub fn push(&mut self, point: DVec2) -> Option<(DVec2, DVec2)> {
        let segment = self.points.last().map(|&prev| (prev, point));
        self.points.push(point);
        segment
    }

    /// Discard all points (run restart)
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
