use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::models::Document;
use crate::services::error::ServiceError;

/// Colaborador de persistencia. Cada llamada es atómica (todo o nada).
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Colección completa, en el orden que devuelva el store
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, ServiceError>;

    /// Inserta y devuelve el id asignado por el store
    async fn insert(
        &self,
        collection: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<String, ServiceError>;

    /// Falla con `NotFound` si el id no existe
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), ServiceError>;

    /// `true` si las llamadas necesitan el id token de la sesión
    fn requires_credentials(&self) -> bool {
        false
    }
}
