// ============================================================================
// FIRESTORE CLIENT - SOLO comunicación HTTP (REST v1, stateless)
// ============================================================================
// NO tiene lógica de negocio: lista, crea y borra documentos de una colección
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};

use crate::config::AppConfig;
use crate::models::firestore::{FirestoreDocument, GoogleApiErrorBody, ListDocumentsResponse};
use crate::models::Document;
use crate::services::document_store::DocumentStore;
use crate::services::error::ServiceError;
use crate::state::SessionStore;

const PAGE_SIZE: &str = "300";

/// Cliente Firestore autenticado con el id token de la sesión actual
#[derive(Clone)]
pub struct FirestoreClient {
    documents_url: String,
    api_key: String,
    session: SessionStore,
}

impl FirestoreClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> Self {
        Self {
            documents_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                config.firestore_base_url.trim_end_matches('/'),
                config.firebase.project_id
            ),
            api_key: config.firebase.api_key.clone(),
            session,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_url, collection)
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, ServiceError> {
        let token = self.session.id_token().ok_or(ServiceError::Unauthenticated)?;
        let builder = builder.header("Authorization", &format!("Bearer {}", token));
        Ok(if self.api_key.is_empty() {
            builder
        } else {
            builder.query([("key", self.api_key.as_str())])
        })
    }
}

/// Convierte una respuesta no-OK en `ServiceError`, leyendo el cuerpo de Google si existe
async fn error_from_response(response: Response, resource: &str) -> ServiceError {
    let status = response.status();
    let status_text = response.status_text();
    let detail = response
        .json::<GoogleApiErrorBody>()
        .await
        .map(|body| body.error)
        .ok();

    match detail {
        Some(err) if status == 404 || err.status == "NOT_FOUND" => {
            ServiceError::NotFound(resource.to_string())
        }
        Some(err) if !err.message.is_empty() => ServiceError::http(status, err.message),
        _ => ServiceError::http(status, status_text),
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreClient {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, ServiceError> {
        let url = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        // Paginado de transporte: se sigue nextPageToken hasta agotar la colección
        loop {
            let mut builder = Request::get(&url).query([("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                builder = builder.query([("pageToken", token.as_str())]);
            }

            let response = self.authorize(builder)?.send().await?;
            if !response.ok() {
                return Err(error_from_response(response, collection).await);
            }

            let page = response.json::<ListDocumentsResponse>().await?;
            documents.extend(page.documents.into_iter().map(FirestoreDocument::into_document));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        log::info!("📋 [FIRESTORE] {} documentos en '{}'", documents.len(), collection);
        Ok(documents)
    }

    async fn insert(
        &self,
        collection: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<String, ServiceError> {
        let url = self.collection_url(collection);
        let body = FirestoreDocument::from_fields(&fields);

        let response = self
            .authorize(Request::post(&url))?
            .json(&body)?
            .send()
            .await?;
        if !response.ok() {
            return Err(error_from_response(response, collection).await);
        }

        let created = response.json::<FirestoreDocument>().await?;
        let id = created.document_id().to_string();
        if id.is_empty() {
            return Err(ServiceError::Parse("documento creado sin nombre".to_string()));
        }
        log::info!("✅ [FIRESTORE] Documento creado: {}/{}", collection, id);
        Ok(id)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), ServiceError> {
        let resource = format!("{}/{}", collection, id);
        let url = format!("{}/{}", self.documents_url, resource);

        // Sin la precondición Firestore responde 200 aunque el documento no exista
        let builder = Request::delete(&url).query([("currentDocument.exists", "true")]);
        let response = self.authorize(builder)?.send().await?;
        if !response.ok() {
            return Err(error_from_response(response, &resource).await);
        }

        log::info!("🗑️ [FIRESTORE] Documento eliminado: {}", resource);
        Ok(())
    }

    fn requires_credentials(&self) -> bool {
        true
    }
}
