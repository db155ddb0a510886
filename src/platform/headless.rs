//! Headless host: a manually pumped ticker and a renderer that only logs

use std::time::Duration;

use glam::DVec2;

use crate::sim::{Geometry, Renderer, SimulationController, Ticker};

/// Ticker whose firings are driven by the caller
#[derive(Debug, Default)]
pub struct ManualTicker {
    interval: Option<Duration>,
    starts: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval of the active sequence, if any
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Sequences started since creation
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, interval: Duration) {
        if self.interval.is_some() {
            log::warn!("Starting a tick sequence over a live one");
        }
        self.interval = Some(interval);
        self.starts += 1;
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}

/// Fire up to `ticks` ticks while the sequence stays active
///
/// With `realtime` set, sleeps the tick interval between firings. Returns
/// the number of ticks performed.
pub fn pump<R: Renderer>(
    controller: &mut SimulationController<ManualTicker, R>,
    ticks: u64,
    realtime: bool,
) -> u64 {
    let mut fired = 0;
    while fired < ticks {
        let Some(interval) = controller.ticker().interval() else {
            break;
        };
        if controller.tick().is_none() {
            break;
        }
        fired += 1;
        if realtime {
            std::thread::sleep(interval);
        }
    }
    fired
}

/// Renderer that logs what would be drawn
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    segments: u64,
    last: Option<Geometry>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn segments(&self) -> u64 {
        self.segments
    }

    pub fn last_geometry(&self) -> Option<&Geometry> {
        self.last.as_ref()
    }
}

impl Renderer for LogRenderer {
    fn draw_pendulum(&mut self, geometry: &Geometry) {
        self.frames += 1;
        self.last = Some(*geometry);
        log::debug!(
            "frame {}: bob1=({:.1}, {:.1}) bob2=({:.1}, {:.1})",
            self.frames,
            geometry.bob1.x,
            geometry.bob1.y,
            geometry.bob2.x,
            geometry.bob2.y
        );
    }

    fn begin_trace(&mut self, start: DVec2) {
        self.segments = 0;
        log::debug!("trace start at ({:.1}, {:.1})", start.x, start.y);
    }

    fn extend_trace(&mut self, from: DVec2, to: DVec2) {
        self.segments += 1;
        log::trace!("trace ({:.1}, {:.1}) -> ({:.1}, {:.1})", from.x, from.y, to.x, to.y);
    }
}
