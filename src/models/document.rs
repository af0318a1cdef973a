use std::collections::BTreeMap;

/// Documento genérico del store: id asignado por el store + campos string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Campo como &str, vacío si no existe
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}
