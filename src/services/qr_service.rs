// ============================================================================
// QR SERVICE - SOLO comunicación HTTP con el renderizador de QR
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::config::QrConfig;
use crate::services::error::ServiceError;

/// Renderizador externo: devuelve una referencia de imagen mostrable
#[async_trait(?Send)]
pub trait QrRenderer {
    async fn render(&self, data: &str) -> Result<String, ServiceError>;
}

/// Cliente de api.qrserver.com (`GET ?data=..&size=200x200`)
#[derive(Clone)]
pub struct QrServerClient {
    endpoint: String,
    size: String,
}

impl QrServerClient {
    pub fn new(config: &QrConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            size: config.size.clone(),
        }
    }
}

#[async_trait(?Send)]
impl QrRenderer for QrServerClient {
    async fn render(&self, data: &str) -> Result<String, ServiceError> {
        log::debug!("📡 [QR] Solicitando imagen ({} bytes de payload)", data.len());

        let response = Request::get(&self.endpoint)
            .query([("data", data), ("size", self.size.as_str())])
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ServiceError::http(response.status(), response.status_text()));
        }

        // La URL final de la respuesta es la imagen
        Ok(response.url())
    }
}
