// ============================================================================
// FIREBASE AUTH FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Solo wrappers para window.portalAuth (static/portal_auth.js) - Sin estado, sin lógica
// Los usuarios se intercambian como JSON: {uid, idToken, displayName, email}
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = portalAuth, js_name = init)]
    pub fn init_firebase_auth(config_json: &str);

    /// Resuelve con el usuario (JSON) o null si se cerró el popup
    #[wasm_bindgen(js_namespace = portalAuth, js_name = signInWithGoogle)]
    pub fn sign_in_with_google() -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = portalAuth, js_name = signOut)]
    pub fn sign_out() -> js_sys::Promise;

    /// Devuelve la función de baja
    #[wasm_bindgen(js_namespace = portalAuth, js_name = onAuthStateChanged)]
    pub fn on_auth_state_changed(callback: &js_sys::Function) -> js_sys::Function;
}
