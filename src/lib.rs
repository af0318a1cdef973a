// ============================================================================
// ADMIN PORTAL - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: estado + lógica UI (testeables sin navegador)
// - Services: SOLO comunicación con identidad, Firestore y renderizador QR
// - State: Rc<RefCell> + suscripciones con handle
// - Models: estructuras de dominio
// ============================================================================

mod app;
pub mod config;
mod dom;
pub mod models;
pub mod services;
pub mod state;
mod utils;
pub mod viewmodels;
mod views;

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;
use crate::state::UpdateType;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Admin Portal - Rust Puro + MVVM ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Programa una actualización fuera del callback que la originó
/// (los subscribers no pueden mutar estado de forma síncrona)
pub(crate) fn schedule_update(update_type: UpdateType) {
    Timeout::new(0, move || rerender_app_with_type(update_type)).forget();
}

pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            // Render en curso: se reintenta en el siguiente tick
            schedule_update(update_type);
            return;
        };
        let Some(app) = slot.as_mut() else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
            return;
        };

        let result = match update_type {
            UpdateType::Incremental(update) => app.update_incremental(update),
            UpdateType::FullRender => {
                log::debug!("🔄 [RERENDER] Re-render completo");
                app.render()
            }
        };
        if let Err(e) = result {
            log::error!("❌ [RERENDER] Error actualizando {:?}: {:?}", update_type, e);
        }
    });
}

/// Re-render completo llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
