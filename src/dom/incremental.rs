// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM
// ============================================================================
// Solo actualiza la parte que cambió, sin re-renderizar todo el dashboard
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::{get_element_by_id, replace_element_by_id, set_text_content};
use crate::state::AppState;
use crate::views::{render_qr_card, render_students_card, QR_CARD_ID, QR_CLOCK_ID, STUDENTS_CARD_ID};

/// Tick del reloj: reescribe solo el texto
pub fn update_clock(state: &AppState) -> Result<(), JsValue> {
    if let Some(clock) = get_element_by_id(QR_CLOCK_ID) {
        set_text_content(&clock, &state.qr.clock_text());
    }
    Ok(())
}

pub fn update_qr_card(state: &AppState) -> Result<(), JsValue> {
    let card = render_qr_card(state)?;
    if !replace_element_by_id(QR_CARD_ID, &card)? {
        log::debug!("⚠️ [UPDATE] #{} no está en el DOM", QR_CARD_ID);
    }
    Ok(())
}

pub fn update_students_card(state: &AppState) -> Result<(), JsValue> {
    let card = render_students_card(state)?;
    if !replace_element_by_id(STUDENTS_CARD_ID, &card)? {
        log::debug!("⚠️ [UPDATE] #{} no está en el DOM", STUDENTS_CARD_ID);
    }
    Ok(())
}
