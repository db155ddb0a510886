//! Double Pendulum entry point
//!
//! Handles platform-specific initialization and wires input to the simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, HtmlInputElement};

    use double_pendulum::platform::web::{CanvasRenderer, IntervalTicker};
    use double_pendulum::sim::{SimConfig, SimulationController};
    use double_pendulum::{ParamEdit, Params, Settings};

    /// DOM ids
    const PENDULUM_CANVAS: &str = "myCanvas";
    const PLOT_CANVAS: &str = "graph";
    const PARAMS_FORM: &str = "set_variables_form";

    type Controller = SimulationController<IntervalTicker, CanvasRenderer>;

    /// Everything the event handlers share
    struct App {
        controller: Controller,
        settings: Settings,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Double pendulum starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        prime_form(&document, &settings)?;

        let renderer = CanvasRenderer::new(&document, PENDULUM_CANVAS, PLOT_CANVAS)?;
        let config = SimConfig {
            plot_size: renderer.plot_size(),
            ..SimConfig::default()
        };
        let ticker = IntervalTicker::new(window.clone());
        let controller = SimulationController::new(&settings.last_params, config, ticker, renderer);
        let app = Rc::new(RefCell::new(App {
            controller,
            settings,
        }));

        install_tick_handler(&app);
        setup_form(&document, app.clone())?;
        setup_sliders(&document, app.clone())?;

        // Static preview of the start-up parameters
        app.borrow_mut().controller.redraw();

        log::info!("Double pendulum ready");
        Ok(())
    }

    fn input(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} element", id)))?
            .dyn_into()
            .map_err(JsValue::from)
    }

    fn set_display(document: &Document, field: &str, value: &str) {
        if let Some(el) = document.get_element_by_id(&format!("{}Display", field)) {
            el.set_text_content(Some(value));
        }
    }

    /// Fill the form with the remembered parameters
    fn prime_form(document: &Document, settings: &Settings) -> Result<(), JsValue> {
        for field in ParamEdit::FIELDS {
            if let Some(value) = settings.field_value(field) {
                let value = value.to_string();
                input(document, field)?.set_value(&value);
                set_display(document, field, &value);
            }
        }
        Ok(())
    }

    /// The interval callback holds only a weak reference so the app can drop
    fn install_tick_handler(app: &Rc<RefCell<App>>) {
        let weak = Rc::downgrade(app);
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            match app.try_borrow_mut() {
                Ok(mut app) => {
                    app.controller.tick();
                }
                Err(_) => log::warn!("Tick skipped: controller busy"),
            }
        });
        app.borrow_mut()
            .controller
            .ticker_mut()
            .set_callback(closure);
    }

    fn setup_form(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let form = document
            .get_element_by_id(PARAMS_FORM)
            .ok_or_else(|| JsValue::from_str("no parameter form"))?;
        let mass1 = input(document, "mass1")?;
        let mass2 = input(document, "mass2")?;
        let phi1 = input(document, "phi1")?;
        let phi2 = input(document, "phi2")?;

        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();
            match Params::parse(&mass1.value(), &mass2.value(), &phi1.value(), &phi2.value()) {
                Ok(params) => {
                    let mut app = app.borrow_mut();
                    app.controller.submit(&params);
                    app.settings.remember(params);
                    app.settings.save();
                }
                Err(e) => log::warn!("Ignoring submit: {}", e),
            }
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_sliders(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for field in ParamEdit::FIELDS {
            let slider = input(document, field)?;
            let app = app.clone();
            let document = document.clone();
            let source = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let raw = source.value();
                set_display(&document, field, &raw);
                match ParamEdit::parse(field, &raw) {
                    Ok(edit) => {
                        app.borrow_mut().controller.preview(edit);
                    }
                    Err(e) => log::warn!("Ignoring slider edit: {}", e),
                }
            });
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_app::run()
}

/// Ticks to run headless when no count is given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 200;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use double_pendulum::Settings;
    use double_pendulum::platform::headless::{self, LogRenderer, ManualTicker};
    use double_pendulum::sim::{SimConfig, SimulationController};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let realtime = args.iter().any(|a| a == "--realtime");
    let ticks = args
        .iter()
        .find_map(|a| a.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICKS);

    log::info!("Double pendulum (headless) starting, {} ticks", ticks);

    let settings = Settings::load();
    let mut controller = SimulationController::new(
        &settings.last_params,
        SimConfig::default(),
        ManualTicker::new(),
        LogRenderer::new(),
    );
    controller.submit(&settings.last_params);

    let fired = headless::pump(&mut controller, ticks, realtime);
    log::info!(
        "Ran {} ticks ({:.2}s simulated), {} trace points",
        fired,
        fired as f64 * controller.config().dt,
        controller.trace().len()
    );

    match serde_json::to_string_pretty(controller.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode final state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
