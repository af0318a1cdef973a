// ============================================================================
// IN-MEMORY STORE - Store local para modo demo (sin Firebase)
// ============================================================================

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::student::demo::get_demo_students;
use crate::models::Document;
use crate::services::document_store::DocumentStore;
use crate::services::error::ServiceError;

/// Colecciones en memoria; conserva el orden de inserción
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RefCell<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store con estudiantes de demo en `collection`
    pub fn with_demo_students(collection: &str) -> Self {
        let store = Self::new();
        {
            let mut collections = store.collections.borrow_mut();
            let docs = collections.entry(collection.to_string()).or_default();
            for student in get_demo_students() {
                docs.push(Document::new(new_id(), student.to_fields()));
            }
        }
        store
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .borrow()
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn new_id() -> String {
    // Formato parecido a los ids de Firestore (20 caracteres)
    Uuid::new_v4().simple().to_string()[..20].to_string()
}

#[async_trait(?Send)]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, ServiceError> {
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<String, ServiceError> {
        let id = new_id();
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        log::debug!("💾 [MEMORY] {} insertado en {}", id, collection);
        Ok(id)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), ServiceError> {
        let mut collections = self.collections.borrow_mut();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| ServiceError::NotFound(format!("{}/{}", collection, id)))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(ServiceError::NotFound(format!("{}/{}", collection, id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_unique_ids_and_lists_in_order() {
        let store = InMemoryDocumentStore::new();
        let a = store
            .insert("students", BTreeMap::from([("name".into(), "A".into())]))
            .await
            .unwrap();
        let b = store
            .insert("students", BTreeMap::from([("name".into(), "B".into())]))
            .await
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 20);

        let docs = store.list_all("students").await.unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.field("name")).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn deleting_a_missing_id_is_not_found() {
        let store = InMemoryDocumentStore::with_demo_students("students");
        assert_eq!(store.len("students"), 3);

        let err = store.delete_by_id("students", "nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.len("students"), 3);

        let err = store.delete_by_id("staff", "nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_collection_lists_empty() {
        let store = InMemoryDocumentStore::new();
        assert!(store.list_all("students").await.unwrap().is_empty());
    }
}
