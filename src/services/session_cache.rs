// ============================================================================
// SESSION CACHE - Persistencia de la sesión en localStorage
// ============================================================================
// Permite pintar el dashboard al recargar mientras el proveedor confirma el usuario
// ============================================================================

use gloo_storage::{LocalStorage, Storage};

use crate::models::Session;

const SESSION_KEY: &str = "gymi_portal_session";

pub fn load_session() -> Option<Session> {
    match LocalStorage::get::<Session>(SESSION_KEY) {
        Ok(session) => {
            log::info!("💾 [CACHE] Sesión restaurada: {}", session.header_label());
            Some(session)
        }
        Err(_) => None,
    }
}

/// Guarda la sesión sin el id token (caduca; el proveedor emite uno nuevo)
pub fn save_session(session: &Session) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session.without_token()) {
        log::warn!("⚠️ [CACHE] No se pudo guardar la sesión: {}", e);
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}

/// Refleja el store en localStorage
pub fn persist(session: Option<&Session>) {
    match session {
        Some(s) => save_session(s),
        None => clear_session(),
    }
}
