// ============================================================================
// LOGIN VIEW - Botón de Google
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");
    let auth = state.auth.clone();

    let button = ElementBuilder::new("button")?
        .class("btn btn-google")
        .text("Sign in with Google")
        .on_click(move |_| {
            let auth = auth.clone();
            spawn_local(async move { auth.sign_in().await });
        })?
        .build();

    let card = ElementBuilder::new("div")?
        .class("login-card")
        .child(ElementBuilder::new("h1")?.text("Admin Portal").build())?
        .child(
            ElementBuilder::new("p")?
                .class("login-subtitle")
                .text("Sign in to manage attendance and students")
                .build(),
        )?
        .child(button)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .child(card)?
        .build())
}
