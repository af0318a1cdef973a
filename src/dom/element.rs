// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Vaciar un contenedor
pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

/// Reemplazar el elemento con ese id por `replacement` (no-op si no existe)
pub fn replace_element_by_id(id: &str, replacement: &Element) -> Result<bool, JsValue> {
    match get_element_by_id(id) {
        Some(current) => {
            current.replace_with_with_node_1(replacement)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Ruta actual del navegador (`location.pathname`)
pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Cambia la URL sin recargar
pub fn push_path(path: &str) -> Result<(), JsValue> {
    if current_path() == path {
        return Ok(());
    }
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(path))
}
