pub mod document;
pub mod firestore;
pub mod qr;
pub mod session;
pub mod student;

pub use document::Document;
pub use qr::QrPayload;
pub use session::Session;
pub use student::{FormField, NewStudent, StudentForm, StudentRecord};
