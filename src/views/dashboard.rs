// ============================================================================
// DASHBOARD VIEW - Header, bienvenida, QR, estudiantes y footer
// ============================================================================

use chrono::{Datelike, Utc};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::views::qr_card::render_qr_card;
use crate::views::students::render_students_card;

fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let user_label = state
        .session
        .current()
        .map(|s| s.header_label())
        .unwrap_or_default();
    let auth = state.auth.clone();

    let logout = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .text("Logout")
        .on_click(move |_| {
            let auth = auth.clone();
            spawn_local(async move { auth.sign_out().await });
        })?
        .build();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.text("Admin Portal").build())?
        .child(
            ElementBuilder::new("div")?
                .class("header-user")
                .child(ElementBuilder::new("span")?.class("user-label").text(&user_label).build())?
                .child(logout)?
                .build(),
        )?
        .build())
}

fn render_welcome(state: &AppState) -> Result<Element, JsValue> {
    let name = state
        .session
        .current()
        .map(|s| s.greeting_name())
        .unwrap_or_else(|| "User".to_string());

    Ok(ElementBuilder::new("section")?
        .class("card welcome-card")
        .child(ElementBuilder::new("h2")?.text(&format!("Welcome, {}", name)).build())?
        .child(
            ElementBuilder::new("p")?
                .text("Show the QR code below to mark attendance. It refreshes every few minutes.")
                .build(),
        )?
        .build())
}

fn render_footer() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("footer")?
        .class("app-footer")
        .text(&format!("© {} Admin Portal", Utc::now().year()))
        .build())
}

/// Renderizar dashboard completo
pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let main = ElementBuilder::new("main")?
        .class("dashboard-grid")
        .child(render_qr_card(state)?)?
        .child(render_students_card(state)?)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("dashboard")
        .child(render_header(state)?)?
        .child(render_welcome(state)?)?
        .child(main)?
        .child(render_footer()?)?
        .build())
}
