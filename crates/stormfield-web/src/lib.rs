//! Browser bridge: `#[wasm_bindgen]` exports driving one [`StormRunner`] and an
//! optional carousel from the page's animation loop.
//!
//! ```ignore
//! await init();
//! storm_init("starCanvas", null);
//! carousel_init("floatingCarousel");
//! function frame(now) {
//!     storm_tick(dt);
//!     carousel_tick(dt);
//!     requestAnimationFrame(frame);
//! }
//! ```

pub mod canvas;
pub mod carousel;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use stormfield::{InputEvent, Rng, StormConfig};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use canvas::CanvasSurface;
pub use carousel::CarouselBinding;
pub use runner::StormRunner;

thread_local! {
    static RUNNER: RefCell<Option<StormRunner>> = RefCell::new(None);
    static CAROUSEL: RefCell<Option<Rc<RefCell<CarouselBinding>>>> = RefCell::new(None);
}

/// Run `f` against the runner. Calls made before `storm_init` are ignored.
fn with_runner<R>(f: impl FnOnce(&mut StormRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn with_carousel<R>(f: impl FnOnce(&mut CarouselBinding) -> R) -> Option<R> {
    CAROUSEL.with(|cell| cell.borrow().as_ref().map(|b| f(&mut b.borrow_mut())))
}

fn install_hooks() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_config(json: Option<String>) -> StormConfig {
    match json.as_deref().map(StormConfig::from_json) {
        None => StormConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("stormfield: bad config ({}), using defaults", e);
            StormConfig::default()
        }
    }
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Attach the storm to `<canvas id=canvas_id>`. `config_json` overrides any subset of the defaults.
/// Without a config every page load draws a different sky.
#[wasm_bindgen]
pub fn storm_init(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    install_hooks();

    let reseed = config_json.is_none();
    let mut config = parse_config(config_json);
    if reseed {
        config.seed = js_sys::Date::now() as u64;
    }

    let canvas = document()?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{} element", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()?;
    let surface = CanvasSurface::new(canvas)?;
    let runner = StormRunner::new(config, surface);

    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("stormfield: initialized on #{}", canvas_id);
    Ok(())
}

#[wasm_bindgen]
pub fn storm_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn storm_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn storm_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn storm_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn storm_resize(width: u32, height: u32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Carousel ----

/// Bind the carousel in `#container_id`. Returns `false` (and does nothing) when
/// the container or its images are missing.
#[wasm_bindgen]
pub fn carousel_init(container_id: &str) -> Result<bool, JsValue> {
    install_hooks();

    let config = with_runner(|r| r.storm().config().clone()).unwrap_or_default();
    let mut rng = Rng::new(config.seed.wrapping_add(1));
    let binding = CarouselBinding::attach(&document()?, container_id, config.carousel, &mut rng)?;
    let bound = binding.is_some();
    CAROUSEL.with(|cell| *cell.borrow_mut() = binding);
    Ok(bound)
}

#[wasm_bindgen]
pub fn carousel_tick(dt: f32) -> Result<(), JsValue> {
    with_carousel(|c| c.tick(dt)).unwrap_or(Ok(()))
}

#[wasm_bindgen]
pub fn carousel_resize() {
    with_carousel(|c| c.resize());
}

// ---- Vector accessors ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn storm_tessellate() {
    with_runner(|r| r.tessellate());
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
}
