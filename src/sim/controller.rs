//! Run control: owns the pendulum state, the phase trace and the tick sequence
//!
//! The controller emits geometry and trace segments to a `Renderer` and asks a
//! `Ticker` to fire `tick()` at a fixed wall-clock cadence. Both are host
//! adapters; the controller itself never draws and never touches a timer API.

use std::time::Duration;

use glam::DVec2;

use super::integrator;
use super::mapper::{Geometry, pendulum_geometry, phase_point};
use super::state::PendulumState;
use super::trace::PhaseTrace;
use crate::consts::*;
use crate::params::{ParamEdit, Params};

/// Repeating tick source
///
/// Implementations call `SimulationController::tick` on every firing and
/// must never fire reentrantly.
pub trait Ticker {
    /// Begin firing every `interval`
    fn start(&mut self, interval: Duration);
    /// Stop firing. No-op when nothing is active.
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Drawing collaborator
pub trait Renderer {
    /// Clear the pendulum surface and draw both rods and bobs
    fn draw_pendulum(&mut self, geometry: &Geometry);
    /// Clear the phase plot and start a new trace at `start`
    fn begin_trace(&mut self, start: DVec2);
    /// Draw one trace segment
    fn extend_trace(&mut self, from: DVec2, to: DVec2);
}

/// Fixed simulation and layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Integration step (simulation seconds)
    pub dt: f64,
    /// Wall-clock interval between ticks
    pub tick_interval: Duration,
    /// Pendulum anchor on the drawing surface
    pub anchor: DVec2,
    /// Phase plot width and height
    pub plot_size: DVec2,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS as u64),
            anchor: DVec2::new(ANCHOR_X, ANCHOR_Y),
            plot_size: DVec2::new(PLOT_WIDTH, PLOT_HEIGHT),
        }
    }
}

/// Whether a tick sequence is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No ticks; slider edits redraw a static preview
    Idle,
    /// Ticking; `run` counts submits since start-up (1-based)
    Running { run: u64 },
}

/// Output of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub geometry: Geometry,
    pub phase_point: DVec2,
}

/// Owns the single pendulum state and drives it one step per tick
pub struct SimulationController<T: Ticker, R: Renderer> {
    config: SimConfig,
    state: PendulumState,
    trace: PhaseTrace,
    phase: RunPhase,
    runs: u64,
    ticks: u64,
    ticker: T,
    renderer: R,
}

impl<T: Ticker, R: Renderer> SimulationController<T, R> {
    /// Create an idle controller at rest at the given parameters
    pub fn new(params: &Params, config: SimConfig, ticker: T, renderer: R) -> Self {
        Self {
            config,
            state: PendulumState::from_params(params),
            trace: PhaseTrace::new(),
            phase: RunPhase::Idle,
            runs: 0,
            ticks: 0,
            ticker,
            renderer,
        }
    }

    /// Start a new run, replacing any active one
    ///
    /// The previous tick sequence is cancelled before the new one starts, so
    /// at most one is ever live.
    pub fn submit(&mut self, params: &Params) {
        if let RunPhase::Running { run } = self.phase {
            log::info!("Replacing run {} after {} ticks", run, self.ticks);
        }
        self.ticker.cancel();

        self.state.reset(params);
        self.trace.clear();
        self.ticks = 0;

        let start = phase_point(&self.state, self.config.plot_size);
        self.trace.push(start);
        self.renderer.begin_trace(start);

        self.runs += 1;
        self.phase = RunPhase::Running { run: self.runs };
        self.ticker.start(self.config.tick_interval);

        log::info!(
            "Run {} started: m1={} m2={} phi1={}° phi2={}°",
            self.runs,
            params.mass1,
            params.mass2,
            params.phi1_deg,
            params.phi2_deg
        );
    }

    /// Apply a slider edit and redraw a static preview
    ///
    /// Never integrates and never touches the velocities. An edit during a
    /// run stops that run first; edits only ever mutate an idle state.
    pub fn preview(&mut self, edit: ParamEdit) -> Geometry {
        if let RunPhase::Running { run } = self.phase {
            self.ticker.cancel();
            self.phase = RunPhase::Idle;
            log::info!("Run {} stopped by parameter edit after {} ticks", run, self.ticks);
        }

        edit.apply(&mut self.state);
        let geometry = pendulum_geometry(&self.state, self.config.anchor);
        self.renderer.draw_pendulum(&geometry);
        log::debug!("Preview after {:?}", edit);
        geometry
    }

    /// Redraw the current state without changing it
    pub fn redraw(&mut self) -> Geometry {
        let geometry = pendulum_geometry(&self.state, self.config.anchor);
        self.renderer.draw_pendulum(&geometry);
        geometry
    }

    /// Advance one integration step and forward the results
    ///
    /// Returns `None` and does nothing while idle.
    pub fn tick(&mut self) -> Option<TickOutput> {
        if self.phase == RunPhase::Idle {
            return None;
        }

        self.state = integrator::step(&self.state, self.config.dt);
        self.ticks += 1;

        let geometry = pendulum_geometry(&self.state, self.config.anchor);
        let point = phase_point(&self.state, self.config.plot_size);

        self.renderer.draw_pendulum(&geometry);
        if let Some((from, to)) = self.trace.push(point) {
            self.renderer.extend_trace(from, to);
        }

        log::trace!(
            "tick {}: phi1={:.4} phi2={:.4} omega1={:.4} omega2={:.4}",
            self.ticks,
            self.state.phi1,
            self.state.phi2,
            self.state.omega1,
            self.state.omega2
        );

        Some(TickOutput {
            geometry,
            phase_point: point,
        })
    }

    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    pub fn trace(&self) -> &PhaseTrace {
        &self.trace
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running { .. })
    }

    /// Ticks performed in the current run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    /// Counts starts/cancels and fails loudly on overlapping sequences
    #[derive(Default)]
    struct RecordingTicker {
        active: bool,
        starts: u32,
        cancels: u32,
        interval: Option<Duration>,
    }

    impl Ticker for RecordingTicker {
        fn start(&mut self, interval: Duration) {
            assert!(!self.active, "tick sequence started while another is live");
            self.active = true;
            self.starts += 1;
            self.interval = Some(interval);
        }

        fn cancel(&mut self) {
            if self.active {
                self.cancels += 1;
            }
            self.active = false;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Geometry>,
        trace_starts: Vec<DVec2>,
        segments: Vec<(DVec2, DVec2)>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_pendulum(&mut self, geometry: &Geometry) {
            self.frames.push(*geometry);
        }

        fn begin_trace(&mut self, start: DVec2) {
            self.trace_starts.push(start);
            self.segments.clear();
        }

        fn extend_trace(&mut self, from: DVec2, to: DVec2) {
            self.segments.push((from, to));
        }
    }

    type TestController = SimulationController<RecordingTicker, RecordingRenderer>;

    fn controller() -> TestController {
        SimulationController::new(
            &Params::default(),
            SimConfig::default(),
            RecordingTicker::default(),
            RecordingRenderer::default(),
        )
    }

    fn params(m1: u32, m2: u32, phi1: i32, phi2: i32) -> Params {
        Params {
            mass1: NonZeroU32::new(m1).unwrap(),
            mass2: NonZeroU32::new(m2).unwrap(),
            phi1_deg: phi1,
            phi2_deg: phi2,
        }
    }

    #[test]
    fn test_starts_idle() {
        let mut c = controller();
        assert_eq!(c.phase(), RunPhase::Idle);
        assert!(!c.ticker().is_active());
        assert!(c.tick().is_none());
        assert!(c.renderer().frames.is_empty());
    }

    #[test]
    fn test_submit_starts_run() {
        let mut c = controller();
        c.submit(&Params::default());

        assert_eq!(c.phase(), RunPhase::Running { run: 1 });
        assert!(c.ticker().is_active());
        assert_eq!(c.ticker().interval, Some(Duration::from_millis(5)));
        // The trace is seeded with the starting point
        assert_eq!(c.trace().len(), 1);
        assert_eq!(c.renderer().trace_starts.len(), 1);
        assert_eq!(c.trace().last(), Some(c.renderer().trace_starts[0]));
    }

    #[test]
    fn test_tick_steps_once_and_forwards() {
        let mut c = controller();
        c.submit(&Params::default());
        let before = *c.state();

        let out = c.tick().unwrap();
        let expected = integrator::step(&before, SIM_DT);

        assert_eq!(*c.state(), expected);
        assert_eq!(c.ticks(), 1);
        assert_eq!(out.geometry, pendulum_geometry(&expected, c.config().anchor));
        assert_eq!(c.renderer().frames.len(), 1);
        assert_eq!(c.renderer().segments.len(), 1);
        assert_eq!(c.renderer().segments[0].1, out.phase_point);
        assert_eq!(c.trace().len(), 2);
    }

    #[test]
    fn test_resubmit_resets_run() {
        let mut c = controller();
        c.submit(&Params::default());
        for _ in 0..25 {
            c.tick();
        }
        assert!(!c.state().is_at_rest());

        c.submit(&params(5, 15, 120, -30));

        assert_eq!(c.phase(), RunPhase::Running { run: 2 });
        assert!(c.state().is_at_rest());
        assert_eq!(c.state().mass1, 5.0);
        assert_eq!(c.state().mass2, 15.0);
        assert_eq!(c.trace().len(), 1);
        assert_eq!(c.ticks(), 0);
        assert_eq!(c.ticker().starts, 2);
        assert_eq!(c.ticker().cancels, 1);
        assert!(c.renderer().segments.is_empty());
    }

    #[test]
    fn test_at_most_one_sequence_across_many_submits() {
        let mut c = controller();
        for i in 0..10 {
            c.submit(&params(10, 10, i, -i));
            c.tick();
            assert!(c.ticker().is_active());
        }
        assert_eq!(c.ticker().starts, 10);
        assert_eq!(c.ticker().cancels, 9);
    }

    #[test]
    fn test_preview_while_idle_does_not_integrate() {
        let mut c = controller();
        let before = *c.state();

        let geo = c.preview(ParamEdit::Phi1(90));

        assert_eq!(c.phase(), RunPhase::Idle);
        assert_eq!(c.state().omega1, before.omega1);
        assert_eq!(c.state().omega2, before.omega2);
        assert_eq!(c.state().phi2, before.phi2);
        assert!((geo.bob1.x - (ANCHOR_X + LENGTH1)).abs() < 1e-9);
        assert_eq!(c.renderer().frames, vec![geo]);
        assert!(c.trace().is_empty());
    }

    #[test]
    fn test_preview_mass_sets_radius() {
        let mut c = controller();
        let geo = c.preview(ParamEdit::Mass2(NonZeroU32::new(42).unwrap()));
        assert_eq!(geo.radius2, 42.0);
        assert_eq!(geo.radius1, DEFAULT_MASS1 as f64);
    }

    #[test]
    fn test_preview_during_run_stops_it() {
        let mut c = controller();
        c.submit(&Params::default());
        c.tick();
        let moving = *c.state();

        c.preview(ParamEdit::Mass1(NonZeroU32::new(3).unwrap()));

        assert_eq!(c.phase(), RunPhase::Idle);
        assert!(!c.ticker().is_active());
        assert_eq!(c.state().omega1, moving.omega1);
        assert_eq!(c.state().omega2, moving.omega2);
        assert!(c.tick().is_none());

        // A new submit starts run 2 from rest
        c.submit(&Params::default());
        assert_eq!(c.phase(), RunPhase::Running { run: 2 });
        assert!(c.state().is_at_rest());
    }

    #[test]
    fn test_rest_run_stays_put() {
        let mut c = controller();
        c.submit(&params(10, 10, 0, 0));
        for _ in 0..100 {
            c.tick();
        }
        let state = c.state();
        assert_eq!((state.phi1, state.phi2, state.omega1, state.omega2), (0.0, 0.0, 0.0, 0.0));
        let center = DVec2::new(PLOT_WIDTH / 2.0, PLOT_HEIGHT / 2.0);
        assert!(c.trace().points().iter().all(|p| (*p - center).length() < 1e-9));
    }

    #[test]
    fn test_geometry_consistent_every_tick() {
        let mut c = controller();
        c.submit(&params(7, 13, 170, -95));
        for _ in 0..500 {
            let out = c.tick().unwrap();
            let g = out.geometry;
            assert!((g.anchor.distance(g.bob1) - LENGTH1).abs() < 1e-6);
            assert!((g.bob1.distance(g.bob2) - LENGTH2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_redraw_keeps_state() {
        let mut c = controller();
        let before = *c.state();
        let geo = c.redraw();
        assert_eq!(*c.state(), before);
        assert_eq!(c.renderer().frames, vec![geo]);
    }
}
