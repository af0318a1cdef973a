// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod router;
pub mod session_store;

pub use app_state::{AppState, IncrementalUpdate, UpdateType};
pub use reactivity::{ReactiveState, Subscription};
pub use router::{resolve_route, Route};
pub use session_store::SessionStore;
