// ============================================================================
// APP VIEW - Vista raíz según la ruta activa
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::{AppState, Route};
use crate::views::{render_dashboard, render_login};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.current_route() {
        Route::Login => render_login(state),
        Route::Dashboard => render_dashboard(state),
    }
}
