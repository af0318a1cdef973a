use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::document::Document;

pub const FIELD_NAME: &str = "name";
pub const FIELD_ROLL: &str = "roll";
pub const FIELD_EMAIL: &str = "email";

/// Registro de estudiante tal como vive en la colección remota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub roll: String,
    pub email: String,
}

impl StudentRecord {
    /// Campos ausentes en el documento se muestran vacíos
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            name: document.field(FIELD_NAME).to_string(),
            roll: document.field(FIELD_ROLL).to_string(),
            email: document.field(FIELD_EMAIL).to_string(),
        }
    }
}

/// Alta de estudiante: los tres campos son obligatorios y no vacíos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub roll: String,
    pub email: String,
}

impl NewStudent {
    /// `None` si algún campo está vacío
    pub fn new(name: &str, roll: &str, email: &str) -> Option<Self> {
        if name.is_empty() || roll.is_empty() || email.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            roll: roll.to_string(),
            email: email.to_string(),
        })
    }

    pub fn to_fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (FIELD_NAME.to_string(), self.name.clone()),
            (FIELD_ROLL.to_string(), self.roll.clone()),
            (FIELD_EMAIL.to_string(), self.email.clone()),
        ])
    }
}

/// Valores del formulario de alta
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub roll: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Roll,
    Email,
}

impl StudentForm {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Roll => self.roll = value,
            FormField::Email => self.email = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Roll => &self.roll,
            FormField::Email => &self.email,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Datos de demo para modo sin Firebase
pub mod demo {
    use super::NewStudent;

    pub fn get_demo_students() -> Vec<NewStudent> {
        [
            ("Asha Rao", "12", "asha.rao@example.com"),
            ("Vikram Iyer", "17", "vikram.iyer@example.com"),
            ("Meera Nair", "23", "meera.nair@example.com"),
        ]
        .into_iter()
        .filter_map(|(name, roll, email)| NewStudent::new(name, roll, email))
        .collect()
    }
}
