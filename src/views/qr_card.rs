// ============================================================================
// QR CARD VIEW - Reloj, imagen QR y refresco manual
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;

pub const QR_CARD_ID: &str = "qr-card";
pub const QR_CLOCK_ID: &str = "qr-clock";

/// Renderizar tarjeta QR (se reemplaza entera en cada cambio del ciclo)
pub fn render_qr_card(state: &AppState) -> Result<Element, JsValue> {
    let qr = state.qr.clone();
    let snapshot = qr.snapshot();

    let header = ElementBuilder::new("div")?
        .class("card-header")
        .child(ElementBuilder::new("h2")?.text("Dynamic QR Code").build())?
        .child(
            ElementBuilder::new("span")?
                .id(QR_CLOCK_ID)?
                .class("clock")
                .text(&qr.clock_text())
                .build(),
        )?
        .build();

    let body = if snapshot.loading {
        ElementBuilder::new("div")?
            .class("qr-loading")
            .child(ElementBuilder::new("div")?.class("spinner").build())?
            .build()
    } else {
        let image = match &snapshot.image {
            Some(src) => Some(
                ElementBuilder::new("img")?
                    .class("qr-image")
                    .attr("src", src)?
                    .attr("alt", "Attendance QR code")?
                    .build(),
            ),
            None => None,
        };
        ElementBuilder::new("div")?
            .class("qr-body")
            .child_opt(image)?
            .build()
    };

    let error = match &snapshot.error {
        Some(message) => Some(ElementBuilder::new("div")?.class("error-box").text(message).build()),
        None => None,
    };

    let meta = ElementBuilder::new("div")?
        .class("qr-meta")
        .child(
            ElementBuilder::new("p")?
                .text(&format!("Last refreshed: {}", qr.last_refreshed_label()))
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .text(&format!("Next: {}", qr.next_refresh_label()))
                .build(),
        )?
        .build();

    let refresh_button = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .text(if snapshot.loading { "Refreshing..." } else { "Refresh QR" })
        .disabled(snapshot.loading)?
        .on_click(move |_| {
            log::info!("🔄 [QR] Refresco manual");
            qr.trigger_refresh();
        })?
        .build();

    Ok(ElementBuilder::new("section")?
        .id(QR_CARD_ID)?
        .class("card qr-card")
        .child(header)?
        .child(body)?
        .child_opt(error)?
        .child(meta)?
        .child(refresh_button)?
        .build())
}
