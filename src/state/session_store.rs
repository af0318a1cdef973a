// ============================================================================
// SESSION STORE - Sesión de identidad inyectada en quien la necesite
// ============================================================================

use crate::models::Session;
use crate::state::reactivity::{ReactiveState, Subscription};

/// Estado de la sesión. Se crea una vez en `App` y se pasa por parámetro.
#[derive(Clone)]
pub struct SessionStore {
    state: ReactiveState<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: ReactiveState::new(None),
        }
    }

    pub fn with_session(session: Option<Session>) -> Self {
        Self {
            state: ReactiveState::new(session),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.get()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.with(Option::is_some)
    }

    /// Token para llamadas autenticadas
    pub fn id_token(&self) -> Option<String> {
        self.state
            .with(|s| s.as_ref().map(|session| session.id_token.clone()))
            .filter(|token| !token.is_empty())
    }

    /// Reemplaza la sesión y notifica solo si cambió
    pub fn set(&self, session: Option<Session>) {
        if self.state.with(|current| *current == session) {
            return;
        }
        match &session {
            Some(s) => log::info!("🔐 [SESSION] Sesión activa: {}", s.header_label()),
            None => log::info!("👋 [SESSION] Sesión cerrada"),
        }
        self.state.set(session);
    }

    pub fn clear(&self) {
        self.set(None);
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&Session>) + 'static,
    {
        self.state.subscribe(move |session| callback(session.as_ref()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
