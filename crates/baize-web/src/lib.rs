pub mod runner;

pub use runner::TableRunner;

use std::cell::RefCell;

use baize_engine::{InputEvent, Simulation};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Returns `None` before `game_init`.
fn with_runner<R>(f: impl FnOnce(&mut TableRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("table not initialized; call game_init() first");
                None
            }
        }
    })
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = TableRunner::new(Simulation::default());
    runner.init();

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("baize: initialized");
}

/// Advance by one animation frame. Returns whether to request another.
#[wasm_bindgen]
pub fn game_frame(dt: f32) -> bool {
    with_runner(|r| r.frame(dt)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_set_angle(degrees: f32) {
    with_runner(|r| r.push_input(InputEvent::SetAngle { degrees }));
}

#[wasm_bindgen]
pub fn game_set_force(value: f32) {
    with_runner(|r| r.push_input(InputEvent::SetForce { value }));
}

#[wasm_bindgen]
pub fn game_strike() {
    with_runner(|r| r.push_input(InputEvent::Strike));
}

#[wasm_bindgen]
pub fn game_reset() {
    with_runner(|r| r.push_input(InputEvent::Reset));
}

/// Replace the session with one built from a JSON config.
/// Returns false (and logs why) if the config is rejected.
#[wasm_bindgen]
pub fn game_load_config(json: &str) -> bool {
    let result = with_runner(|r| r.load_config(json));
    match result {
        Some(Ok(())) => true,
        Some(Err(e)) => {
            log::error!("{}", e);
            false
        }
        None => false,
    }
}

// ---- Draw data ----

#[wasm_bindgen]
pub fn get_draw_records_ptr() -> *const f32 {
    with_runner(|r| r.draw_records_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_draw_record_count() -> u32 {
    with_runner(|r| r.draw_record_count()).unwrap_or(0)
}

/// Copy of the draw records, for hosts that do not read linear memory.
#[wasm_bindgen]
pub fn get_draw_records() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.draw_record_floats()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_canvas_width() -> f32 {
    with_runner(|r| r.simulation().table().outer_size().x).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_canvas_height() -> f32 {
    with_runner(|r| r.simulation().table().outer_size().y).unwrap_or(0.0)
}

// ---- Panel ----

#[wasm_bindgen]
pub fn get_angle_text() -> String {
    with_runner(|r| r.simulation().panel().angle_text.clone()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_force_text() -> String {
    with_runner(|r| r.simulation().panel().force_text.clone()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_pocketed_count() -> u32 {
    with_runner(|r| r.simulation().panel().pocketed).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_controls_enabled() -> bool {
    with_runner(|r| r.simulation().panel().controls_enabled).unwrap_or(false)
}

// ---- Vector mesh (only with the vectors feature) ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_mesh_vertices_ptr() -> *const f32 {
    with_runner(|r| r.mesh_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_mesh_vertex_count() -> u32 {
    with_runner(|r| r.mesh_vertex_count()).unwrap_or(0)
}
