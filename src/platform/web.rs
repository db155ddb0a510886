//! Browser host: `setInterval` ticks and 2D canvas drawing

use std::f64::consts::TAU;
use std::time::Duration;

use glam::DVec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::sim::{Geometry, Renderer, Ticker};

const ROD_COLOR: &str = "red";
const ROD_WIDTH: f64 = 5.0;
const BOB_COLOR: &str = "rgba(0,0,0,1)";
const TRACE_COLOR: &str = "green";
const LABEL_FONT: &str = "48px serif";

/// Tick source backed by `window.setInterval`
///
/// Owns the JS callback so it outlives every interval it is installed on.
pub struct IntervalTicker {
    window: Window,
    callback: Option<Closure<dyn FnMut()>>,
    handle: Option<i32>,
}

impl IntervalTicker {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
            handle: None,
        }
    }

    /// Install the tick handler (done once the controller exists)
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.cancel();
        self.callback = Some(callback);
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, interval: Duration) {
        let Some(callback) = self.callback.as_ref() else {
            log::error!("Tick requested before a handler was installed");
            return;
        };
        let millis = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref::<js_sys::Function>(),
                millis,
            ) {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_interval_with_handle(handle);
        }
    }

    fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A canvas and its 2D context
struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    fn from_id(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} element", id)))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    fn size(&self) -> DVec2 {
        DVec2::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x, size.y);
    }

    fn line(&self, from: DVec2, to: DVec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

/// Draws the pendulum on one canvas and the phase trace on another
pub struct CanvasRenderer {
    pendulum: Surface,
    plot: Surface,
}

impl CanvasRenderer {
    pub fn new(document: &Document, pendulum_id: &str, plot_id: &str) -> Result<Self, JsValue> {
        Ok(Self {
            pendulum: Surface::from_id(document, pendulum_id)?,
            plot: Surface::from_id(document, plot_id)?,
        })
    }

    /// Phase plot dimensions in canvas pixels
    pub fn plot_size(&self) -> DVec2 {
        self.plot.size()
    }

    fn draw_bob(&self, center: DVec2, radius: f64) {
        let ctx = &self.pendulum.ctx;
        ctx.begin_path();
        if let Err(e) = ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::warn!("Bob not drawn (radius {}): {:?}", radius, e);
            return;
        }
        ctx.set_fill_style_str(BOB_COLOR);
        ctx.fill();
    }

    fn draw_labels(&self) {
        let size = self.plot.size();
        let ctx = &self.plot.ctx;
        ctx.set_font(LABEL_FONT);
        let _ = ctx.fill_text("\u{03C6}\u{2081}", size.x / 2.0, size.y - 20.0);
        let _ = ctx.fill_text("\u{03C6}\u{2082}", 20.0, size.y / 2.0);
    }
}

impl Renderer for CanvasRenderer {
    fn draw_pendulum(&mut self, geometry: &Geometry) {
        self.pendulum.clear();

        self.pendulum.ctx.set_stroke_style_str(ROD_COLOR);
        self.pendulum.ctx.set_line_width(ROD_WIDTH);
        for (from, to) in geometry.segments() {
            self.pendulum.line(from, to);
        }

        self.draw_bob(geometry.bob1, geometry.radius1);
        self.draw_bob(geometry.bob2, geometry.radius2);
    }

    fn begin_trace(&mut self, _start: DVec2) {
        self.plot.clear();
        self.draw_labels();
        self.plot.ctx.set_stroke_style_str(TRACE_COLOR);
    }

    fn extend_trace(&mut self, from: DVec2, to: DVec2) {
        self.plot.line(from, to);
    }
}
