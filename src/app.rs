// ============================================================================
// APP - Aplicación principal: raíz del DOM, ruta activa y ciclo de vida
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::incremental::{update_clock, update_qr_card, update_students_card};
use crate::dom::{append_child, clear_children, current_path, get_element_by_id, push_path};
use crate::services::{session_cache, AuthWatch};
use crate::state::{AppState, IncrementalUpdate, Route, SessionStore, Subscription, UpdateType};
use crate::viewmodels::QrTimers;
use crate::views::render_app;

/// Recursos vivos solo mientras se muestra el dashboard
struct DashboardHandles {
    _timers: QrTimers,
    _subscriptions: Vec<Subscription>,
}

pub struct App {
    state: AppState,
    root: Element,
    dashboard: Option<DashboardHandles>,
    _session_subscription: Subscription,
    _auth_watch: AuthWatch,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        // Sesión cacheada: evita rebotar al login mientras el proveedor responde
        let session = SessionStore::with_session(session_cache::load_session());
        let state = AppState::new(&CONFIG, session.clone());

        let session_subscription = session.subscribe(|current| {
            session_cache::persist(current);
            crate::schedule_update(UpdateType::FullRender);
        });
        let auth_watch = state.auth.watch();

        state.navigate(Route::from_path(&current_path()));

        Ok(Self {
            state,
            root,
            dashboard: None,
            _session_subscription: session_subscription,
            _auth_watch: auth_watch,
        })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let route = self.state.navigate(self.state.current_route());
        push_path(route.path())?;

        match route {
            Route::Dashboard => {
                if self.dashboard.is_none() {
                    self.mount_dashboard();
                }
                // Primera entrada o token renovado por el proveedor
                if self.state.roster_load_due() {
                    let roster = self.state.roster.clone();
                    spawn_local(async move { roster.load_all().await });
                }
            }
            Route::Login => self.unmount_dashboard(),
        }

        let view = render_app(&self.state)?;
        clear_children(&self.root);
        append_child(&self.root, &view)
    }

    pub fn update_incremental(&self, update: IncrementalUpdate) -> Result<(), JsValue> {
        if self.dashboard.is_none() {
            return Ok(());
        }
        match update {
            IncrementalUpdate::Clock => update_clock(&self.state),
            IncrementalUpdate::QrCard => update_qr_card(&self.state),
            IncrementalUpdate::Students => update_students_card(&self.state),
        }
    }

    fn mount_dashboard(&mut self) {
        log::info!("📊 [APP] Montando dashboard");
        let qr = &self.state.qr;
        let roster = &self.state.roster;

        let subscriptions = vec![
            qr.subscribe(|_| crate::schedule_update(UpdateType::Incremental(IncrementalUpdate::QrCard))),
            qr.subscribe_clock(|_| crate::schedule_update(UpdateType::Incremental(IncrementalUpdate::Clock))),
            roster.subscribe(|_| crate::schedule_update(UpdateType::Incremental(IncrementalUpdate::Students))),
        ];
        let timers = qr.mount();

        self.dashboard = Some(DashboardHandles {
            _timers: timers,
            _subscriptions: subscriptions,
        });
    }

    fn unmount_dashboard(&mut self) {
        self.state.reset_roster_load();
        if self.dashboard.take().is_some() {
            log::info!("🧹 [APP] Dashboard desmontado (timers y suscripciones liberados)");
        }
    }
}
