// ============================================================================
// VIEWMODELS - Lógica de presentación (sin DOM)
// ============================================================================

pub mod auth_viewmodel;
pub mod qr_viewmodel;
pub mod roster_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use qr_viewmodel::{QrSnapshot, QrTimers, QrViewModel};
pub use roster_viewmodel::{RosterSnapshot, RosterViewModel};
