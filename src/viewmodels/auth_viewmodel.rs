// ============================================================================
// AUTH VIEWMODEL - Login / logout con el proveedor de identidad
// ============================================================================
// Los fallos se registran en consola y no cambian la sesión
// ============================================================================

use std::rc::Rc;

use crate::services::{bind_session, AuthWatch, IdentityProvider};
use crate::state::SessionStore;

pub struct AuthViewModel {
    provider: Rc<dyn IdentityProvider>,
    session: SessionStore,
}

impl AuthViewModel {
    pub fn new(provider: Rc<dyn IdentityProvider>, session: SessionStore) -> Self {
        Self { provider, session }
    }

    /// Mantiene el store sincronizado con el proveedor mientras viva el handle
    pub fn watch(&self) -> AuthWatch {
        bind_session(self.provider.as_ref(), &self.session)
    }

    pub async fn sign_in(&self) {
        log::info!("🔐 [AUTH] Iniciando sesión con Google...");
        match self.provider.sign_in().await {
            Ok(Some(session)) => {
                log::info!("✅ [AUTH] Login exitoso: {}", session.header_label());
                self.session.set(Some(session));
            }
            Ok(None) => log::info!("ℹ️ [AUTH] Login cancelado por el usuario"),
            Err(e) => log::error!("❌ [AUTH] Error en login: {}", e),
        }
    }

    pub async fn sign_out(&self) {
        match self.provider.sign_out().await {
            Ok(()) => {
                log::info!("👋 [AUTH] Logout completado");
                self.session.clear();
            }
            Err(e) => log::error!("❌ [AUTH] Error en logout: {}", e),
        }
    }
}
