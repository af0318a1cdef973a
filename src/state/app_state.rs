// ============================================================================
// APP STATE - Estado de la aplicación y colaboradores inyectados
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::services::{
    DemoIdentity, DocumentStore, FirebaseIdentity, FirestoreClient, IdentityProvider,
    InMemoryDocumentStore, QrRenderer, QrServerClient,
};
use crate::state::router::{resolve_route, Route};
use crate::state::SessionStore;
use crate::viewmodels::{AuthViewModel, QrViewModel, RosterViewModel};

/// Tipo de actualización del DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, cambio de ruta)
    FullRender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Solo el texto del reloj
    Clock,
    /// Tarjeta QR (imagen, error, fechas, botón)
    QrCard,
    /// Tarjeta de estudiantes (formulario, lista, diálogo)
    Students,
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub route: Rc<RefCell<Route>>,
    pub auth: Rc<AuthViewModel>,
    pub qr: Rc<QrViewModel>,
    pub roster: Rc<RosterViewModel>,
    store_requires_credentials: bool,
    /// Token con el que se cargó el roster (None = sin cargar)
    roster_loaded_with: Rc<RefCell<Option<String>>>,
}

impl AppState {
    /// Elige colaboradores reales o de demo según la configuración
    pub fn new(config: &AppConfig, session: SessionStore) -> Self {
        let (provider, store): (Rc<dyn IdentityProvider>, Rc<dyn DocumentStore>) =
            if config.is_demo_mode() {
                log::warn!("⚠️ [APP] Firebase no configurado: modo demo (datos en memoria)");
                (
                    Rc::new(DemoIdentity::with_session(session.current())) as Rc<dyn IdentityProvider>,
                    Rc::new(InMemoryDocumentStore::with_demo_students(&config.students_collection))
                        as Rc<dyn DocumentStore>,
                )
            } else {
                (
                    Rc::new(FirebaseIdentity::new(&config.firebase)) as Rc<dyn IdentityProvider>,
                    Rc::new(FirestoreClient::new(config, session.clone())) as Rc<dyn DocumentStore>,
                )
            };
        let renderer: Rc<dyn QrRenderer> = Rc::new(QrServerClient::new(&config.qr));

        Self::with_services(config, session, provider, store, renderer)
    }

    pub fn with_services(
        config: &AppConfig,
        session: SessionStore,
        provider: Rc<dyn IdentityProvider>,
        store: Rc<dyn DocumentStore>,
        renderer: Rc<dyn QrRenderer>,
    ) -> Self {
        Self {
            store_requires_credentials: store.requires_credentials(),
            roster_loaded_with: Rc::new(RefCell::new(None)),
            auth: Rc::new(AuthViewModel::new(provider, session.clone())),
            qr: Rc::new(QrViewModel::new(renderer, &config.qr)),
            roster: Rc::new(RosterViewModel::new(store, config.students_collection.clone())),
            route: Rc::new(RefCell::new(Route::Login)),
            session,
        }
    }

    pub fn current_route(&self) -> Route {
        *self.route.borrow()
    }

    /// Aplica el guard de autenticación y devuelve la ruta efectiva
    pub fn navigate(&self, requested: Route) -> Route {
        let route = resolve_route(requested, self.session.is_signed_in());
        if route != requested {
            log::info!("🔀 [ROUTER] {:?} → {:?}", requested, route);
        }
        *self.route.borrow_mut() = route;
        route
    }

    /// `true` si el roster debe cargarse con la sesión actual: primera vez
    /// en el dashboard o token renovado. Con un store autenticado y sin
    /// token (sesión restaurada de caché) se espera al proveedor.
    pub fn roster_load_due(&self) -> bool {
        let Some(token) = self.session.current().map(|s| s.id_token) else {
            return false;
        };
        if self.store_requires_credentials && token.is_empty() {
            return false;
        }
        let mut loaded = self.roster_loaded_with.borrow_mut();
        if loaded.as_deref() == Some(token.as_str()) {
            return false;
        }
        *loaded = Some(token);
        true
    }

    /// Al salir del dashboard la próxima entrada vuelve a cargar
    pub fn reset_roster_load(&self) {
        *self.roster_loaded_with.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, Session};
    use crate::services::ServiceError;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct NoRenderer;

    #[async_trait(?Send)]
    impl QrRenderer for NoRenderer {
        async fn render(&self, _data: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Network("offline".into()))
        }
    }

    /// Store que, como Firestore, necesita el id token
    struct AuthenticatedStore(InMemoryDocumentStore);

    #[async_trait(?Send)]
    impl DocumentStore for AuthenticatedStore {
        async fn list_all(&self, collection: &str) -> Result<Vec<Document>, ServiceError> {
            self.0.list_all(collection).await
        }

        async fn insert(
            &self,
            collection: &str,
            fields: BTreeMap<String, String>,
        ) -> Result<String, ServiceError> {
            self.0.insert(collection, fields).await
        }

        async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), ServiceError> {
            self.0.delete_by_id(collection, id).await
        }

        fn requires_credentials(&self) -> bool {
            true
        }
    }

    fn signed_in(token: &str) -> Session {
        Session {
            id_token: token.to_string(),
            ..Session::demo()
        }
    }

    fn state(session: SessionStore) -> AppState {
        AppState::with_services(
            &AppConfig::default(),
            session,
            Rc::new(DemoIdentity::new()),
            Rc::new(InMemoryDocumentStore::new()),
            Rc::new(NoRenderer),
        )
    }

    #[test]
    fn navigation_follows_the_session() {
        let session = SessionStore::new();
        let app = state(session.clone());

        assert_eq!(app.navigate(Route::Dashboard), Route::Login);
        assert_eq!(app.current_route(), Route::Login);

        session.set(Some(Session::demo()));
        assert_eq!(app.navigate(Route::Login), Route::Dashboard);
        assert_eq!(app.current_route(), Route::Dashboard);
    }

    #[test]
    fn roster_waits_for_a_fresh_token_and_reloads_on_renewal() {
        let session = SessionStore::with_session(Some(signed_in("")));
        let app = AppState::with_services(
            &AppConfig::default(),
            session.clone(),
            Rc::new(DemoIdentity::new()),
            Rc::new(AuthenticatedStore(InMemoryDocumentStore::new())),
            Rc::new(NoRenderer),
        );

        // Sesión de caché: sin token no se pide nada
        assert!(!app.roster_load_due());

        session.set(Some(signed_in("token-1")));
        assert!(app.roster_load_due());
        assert!(!app.roster_load_due());

        session.set(Some(signed_in("token-2")));
        assert!(app.roster_load_due());
        assert!(!app.roster_load_due());

        app.reset_roster_load();
        assert!(app.roster_load_due());

        session.clear();
        assert!(!app.roster_load_due());
    }

    #[test]
    fn local_store_loads_once_without_a_token() {
        let session = SessionStore::with_session(Some(Session::demo()));
        let app = state(session);

        assert!(app.roster_load_due());
        assert!(!app.roster_load_due());
    }

    #[tokio::test]
    async fn view_models_share_the_injected_session() {
        let session = SessionStore::new();
        let app = state(session.clone());

        app.auth.sign_in().await;
        assert!(app.session.is_signed_in());
        assert!(session.is_signed_in());
    }
}
