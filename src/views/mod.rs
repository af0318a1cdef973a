pub mod app;
pub mod dashboard;
pub mod login;
pub mod qr_card;
pub mod students;

pub use app::render_app;
pub use dashboard::render_dashboard;
pub use login::render_login;
pub use qr_card::{render_qr_card, QR_CARD_ID, QR_CLOCK_ID};
pub use students::{render_students_card, STUDENTS_CARD_ID};
