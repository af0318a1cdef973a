// ============================================================================
// AUTH SERVICE - Proveedor de identidad (Google vía Firebase Auth)
// ============================================================================

use async_trait::async_trait;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::FirebaseConfig;
use crate::models::Session;
use crate::services::error::ServiceError;
use crate::state::{ReactiveState, SessionStore};
use crate::utils::firebase_ffi;

/// Handle de observación del proveedor: al hacer drop se da de baja
pub struct AuthWatch {
    release: Option<Box<dyn FnOnce()>>,
}

impl AuthWatch {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for AuthWatch {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// `Ok(None)` si el usuario cancela el popup
    async fn sign_in(&self) -> Result<Option<Session>, ServiceError>;

    async fn sign_out(&self) -> Result<(), ServiceError>;

    /// Notifica el usuario actual y cada cambio posterior
    fn watch(&self, on_change: Box<dyn Fn(Option<Session>)>) -> AuthWatch;
}

/// Conecta el proveedor con el store de sesión
pub fn bind_session(provider: &dyn IdentityProvider, store: &SessionStore) -> AuthWatch {
    let store = store.clone();
    provider.watch(Box::new(move |session| store.set(session)))
}

fn parse_user(value: &JsValue) -> Result<Option<Session>, ServiceError> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let json = value
        .as_string()
        .ok_or_else(|| ServiceError::Parse("usuario no es JSON".to_string()))?;
    serde_json::from_str::<Session>(&json)
        .map(Some)
        .map_err(|e| ServiceError::Parse(e.to_string()))
}

fn js_error(err: JsValue) -> ServiceError {
    ServiceError::Identity(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Firebase Auth con popup de Google (vía window.portalAuth)
pub struct FirebaseIdentity;

impl FirebaseIdentity {
    pub fn new(config: &FirebaseConfig) -> Self {
        let config_json = serde_json::json!({
            "apiKey": config.api_key,
            "authDomain": config.auth_domain,
            "projectId": config.project_id,
        })
        .to_string();
        firebase_ffi::init_firebase_auth(&config_json);
        log::info!("🔐 [AUTH] Firebase Auth inicializado ({})", config.project_id);
        Self
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self) -> Result<Option<Session>, ServiceError> {
        let user = JsFuture::from(firebase_ffi::sign_in_with_google())
            .await
            .map_err(js_error)?;
        parse_user(&user)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        JsFuture::from(firebase_ffi::sign_out())
            .await
            .map(|_| ())
            .map_err(js_error)
    }

    fn watch(&self, on_change: Box<dyn Fn(Option<Session>)>) -> AuthWatch {
        let closure = Closure::wrap(Box::new(move |user: JsValue| match parse_user(&user) {
            Ok(session) => on_change(session),
            Err(e) => {
                log::error!("❌ [AUTH] Usuario inválido desde Firebase: {}", e);
                on_change(None);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let unsubscribe = firebase_ffi::on_auth_state_changed(closure.as_ref().unchecked_ref());

        // El closure vive hasta la baja; no se usa forget()
        AuthWatch::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(closure);
            log::debug!("🔌 [AUTH] Observador de Firebase liberado");
        })
    }
}

/// Identidad local para modo demo: cualquier click inicia sesión
pub struct DemoIdentity {
    current: ReactiveState<Option<Session>>,
}

impl DemoIdentity {
    pub fn new() -> Self {
        Self::with_session(None)
    }

    /// Arranca con la sesión restaurada de caché
    pub fn with_session(session: Option<Session>) -> Self {
        Self {
            current: ReactiveState::new(session),
        }
    }
}

impl Default for DemoIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl IdentityProvider for DemoIdentity {
    async fn sign_in(&self) -> Result<Option<Session>, ServiceError> {
        let session = Session::demo();
        self.current.set(Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        self.current.set(None);
        Ok(())
    }

    fn watch(&self, on_change: Box<dyn Fn(Option<Session>)>) -> AuthWatch {
        on_change(self.current.get());
        let subscription = self
            .current
            .subscribe(move |session| on_change(session.clone()));
        AuthWatch::new(move || drop(subscription))
    }
}
