// ============================================================================
// SERVICES - Colaboradores externos (identidad, documentos, QR)
// ============================================================================

pub mod auth_service;
pub mod document_store;
pub mod error;
pub mod firestore_client;
pub mod memory_store;
pub mod qr_service;
pub mod scheduler;
pub mod session_cache;

pub use auth_service::{bind_session, AuthWatch, DemoIdentity, FirebaseIdentity, IdentityProvider};
pub use document_store::DocumentStore;
pub use error::ServiceError;
pub use firestore_client::FirestoreClient;
pub use memory_store::InMemoryDocumentStore;
pub use qr_service::{QrRenderer, QrServerClient};
pub use scheduler::{BrowserScheduler, LocalTask, Scheduler, TimerHandle};
