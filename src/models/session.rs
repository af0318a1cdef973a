use serde::{Deserialize, Serialize};

/// Sesión del proveedor de identidad (Firebase Auth / Google)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    /// Caduca a la hora; no se guarda en caché
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    /// Nombre para el header: display name, si no el email
    pub fn header_label(&self) -> String {
        non_blank(&self.display_name)
            .or_else(|| non_blank(&self.email))
            .unwrap_or_default()
    }

    /// Nombre para la tarjeta de bienvenida
    pub fn greeting_name(&self) -> String {
        non_blank(&self.display_name).unwrap_or_else(|| "User".to_string())
    }

    /// Copia apta para localStorage: sin credenciales
    pub fn without_token(&self) -> Self {
        Self {
            id_token: String::new(),
            ..self.clone()
        }
    }

    /// Sesión local para modo demo
    pub fn demo() -> Self {
        Self {
            uid: "demo-admin".to_string(),
            id_token: String::new(),
            display_name: Some("Demo Admin".to_string()),
            email: Some("admin@demo.local".to_string()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
