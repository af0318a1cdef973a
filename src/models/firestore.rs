// ============================================================================
// FIRESTORE WIRE MODEL - Formato REST v1 de documentos
// ============================================================================

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::document::Document;

/// Valor tipado de Firestore (`{"stringValue": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    StringValue(String),
    /// Firestore envía enteros como string
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    /// timestampValue, nullValue, mapValue, arrayValue, referenceValue...
    /// Se conservan tal cual para no perder el documento entero.
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl FirestoreValue {
    pub fn into_display_string(self) -> String {
        match self {
            FirestoreValue::StringValue(s) | FirestoreValue::IntegerValue(s) => s,
            FirestoreValue::DoubleValue(d) => d.to_string(),
            FirestoreValue::BooleanValue(b) => b.to_string(),
            FirestoreValue::Other(value) => other_display(value),
        }
    }
}

/// `{"timestampValue": "2025-.."}` → `2025-..`; `nullValue` → vacío;
/// mapas y arrays quedan como JSON
fn other_display(value: serde_json::Value) -> String {
    let inner = match value {
        serde_json::Value::Object(map) if map.len() == 1 => {
            map.into_iter().next().map(|(_, v)| v).unwrap_or_default()
        }
        other => other,
    };
    match inner {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    /// Ruta completa `projects/../documents/<collection>/<id>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, FirestoreValue>,
}

impl FirestoreDocument {
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Self {
        Self {
            name: String::new(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.clone(), FirestoreValue::StringValue(v.clone())))
                .collect(),
        }
    }

    /// Último segmento de la ruta
    pub fn document_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }

    pub fn into_document(self) -> Document {
        let id = self.document_id().to_string();
        let fields = self
            .fields
            .into_iter()
            .map(|(k, v)| (k, v.into_display_string()))
            .collect();
        Document::new(id, fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Cuerpo de error de las APIs de Google
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleApiErrorBody {
    pub error: GoogleApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_list_page() {
        let json = r#"{
            "documents": [
                {
                    "name": "projects/gymi/databases/(default)/documents/students/Xy12",
                    "fields": {
                        "name": {"stringValue": "Asha"},
                        "roll": {"integerValue": "12"},
                        "email": {"stringValue": "a@x.com"}
                    },
                    "createTime": "2025-01-01T00:00:00Z",
                    "updateTime": "2025-01-01T00:00:00Z"
                }
            ],
            "nextPageToken": "page-2"
        }"#;
        let page: ListDocumentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("page-2"));

        let document = page.documents.into_iter().next().unwrap().into_document();
        assert_eq!(document.id, "Xy12");
        assert_eq!(document.field("name"), "Asha");
        assert_eq!(document.field("roll"), "12");
        assert_eq!(document.field("email"), "a@x.com");
    }

    #[test]
    fn unknown_value_types_do_not_sink_the_page() {
        let json = r#"{
            "documents": [
                {
                    "name": "projects/gymi/databases/(default)/documents/students/A1",
                    "fields": {
                        "name": {"stringValue": "Asha"},
                        "roll": {"stringValue": "12"},
                        "email": {"stringValue": "a@x.com"}
                    }
                },
                {
                    "name": "projects/gymi/databases/(default)/documents/students/B2",
                    "fields": {
                        "name": {"stringValue": "Ravi"},
                        "createdAt": {"timestampValue": "2025-01-01T00:00:00Z"},
                        "note": {"nullValue": null},
                        "tags": {"arrayValue": {"values": [{"stringValue": "x"}]}},
                        "class": {"referenceValue": "projects/gymi/databases/(default)/documents/classes/7"}
                    }
                }
            ]
        }"#;
        let page: ListDocumentsResponse = serde_json::from_str(json).unwrap();
        let documents: Vec<Document> = page
            .documents
            .into_iter()
            .map(FirestoreDocument::into_document)
            .collect();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].field("name"), "Asha");

        let ravi = &documents[1];
        assert_eq!(ravi.id, "B2");
        assert_eq!(ravi.field("name"), "Ravi");
        assert_eq!(ravi.field("createdAt"), "2025-01-01T00:00:00Z");
        assert_eq!(ravi.field("note"), "");
        assert_eq!(ravi.field("tags"), r#"{"values":[{"stringValue":"x"}]}"#);
        assert!(ravi.field("class").ends_with("/classes/7"));
    }

    #[test]
    fn empty_collection_has_no_documents_key() {
        let page: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn create_body_wraps_strings() {
        let fields = BTreeMap::from([("name".to_string(), "Asha".to_string())]);
        let body = serde_json::to_value(FirestoreDocument::from_fields(&fields)).unwrap();
        assert_eq!(body, serde_json::json!({"fields": {"name": {"stringValue": "Asha"}}}));
    }

    #[test]
    fn parses_google_error_body() {
        let json = r#"{"error":{"code":404,"message":"No document to update","status":"NOT_FOUND"}}"#;
        let body: GoogleApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.code, 404);
        assert_eq!(body.error.status, "NOT_FOUND");
    }
}
