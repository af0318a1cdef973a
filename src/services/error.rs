use thiserror::Error;

/// Fallos de los colaboradores externos (identidad, store, QR)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Documento no encontrado: {0}")]
    NotFound(String),

    #[error("No hay sesión activa")]
    Unauthenticated,

    #[error("Identity provider error: {0}")]
    Identity(String),
}

impl ServiceError {
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        ServiceError::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// Fallo de transporte (sin respuesta del servidor)
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::Network(_))
    }
}

impl From<gloo_net::Error> for ServiceError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ServiceError::Parse(e.to_string()),
            other => ServiceError::Network(other.to_string()),
        }
    }
}
