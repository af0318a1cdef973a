// ============================================================================
// ROSTER VIEWMODEL - Gestión de estudiantes (listar, alta, baja)
// ============================================================================
// Un único flag `loading` compartido por todas las operaciones.
// Sin exclusión mutua: llamadas solapadas compiten y gana la última escritura.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{FormField, NewStudent, StudentForm, StudentRecord};
use crate::services::DocumentStore;
use crate::state::{ReactiveState, Subscription};

pub const FETCH_ERROR: &str = "Failed to fetch students data";
pub const ADD_ERROR: &str = "Failed to add student";
pub const DELETE_ERROR: &str = "Failed to delete student";

#[derive(Debug, Clone, PartialEq)]
pub struct RosterSnapshot {
    pub students: Vec<StudentRecord>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id pendiente de confirmación en el diálogo de borrado
    pub pending_delete: Option<String>,
}

impl Default for RosterSnapshot {
    fn default() -> Self {
        Self {
            students: Vec::new(),
            loading: true,
            error: None,
            pending_delete: None,
        }
    }
}

pub struct RosterViewModel {
    store: Rc<dyn DocumentStore>,
    collection: String,
    state: ReactiveState<RosterSnapshot>,
    // El formulario no es reactivo: teclear no re-renderiza la tarjeta
    form: RefCell<StudentForm>,
}

impl RosterViewModel {
    pub fn new(store: Rc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            state: ReactiveState::new(RosterSnapshot::default()),
            form: RefCell::new(StudentForm::default()),
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.state.get()
    }

    pub fn form(&self) -> StudentForm {
        self.form.borrow().clone()
    }

    pub fn set_field(&self, field: FormField, value: String) {
        self.form.borrow_mut().set(field, value);
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&RosterSnapshot) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    fn start_loading(&self) {
        self.state.update(|s| s.loading = true);
    }

    /// Carga la colección completa; si falla se conservan los datos anteriores
    pub async fn load_all(&self) {
        self.start_loading();
        let result = self.store.list_all(&self.collection).await;

        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(documents) => {
                    s.students = documents.iter().map(StudentRecord::from_document).collect();
                    s.error = None;
                    log::info!("📋 [ROSTER] {} estudiantes cargados", s.students.len());
                }
                Err(e) => {
                    log::error!("❌ [ROSTER] Error cargando estudiantes: {}", e);
                    s.error = Some(FETCH_ERROR.to_string());
                }
            }
        });
    }

    /// Alta de estudiante. Devuelve `true` si se insertó.
    /// Alta y recarga cuentan como una sola operación: si la recarga
    /// falla, el error visible es el del alta.
    pub async fn add(&self, name: &str, roll: &str, email: &str) -> bool {
        let Some(student) = NewStudent::new(name, roll, email) else {
            log::debug!("⚠️ [ROSTER] Alta ignorada: campos vacíos");
            return false;
        };

        self.start_loading();
        match self.store.insert(&self.collection, student.to_fields()).await {
            Ok(id) => {
                log::info!("✅ [ROSTER] Estudiante creado: {}", id);
                self.form.borrow_mut().clear();

                let reloaded = self.store.list_all(&self.collection).await;
                self.state.update(|s| {
                    s.loading = false;
                    match reloaded {
                        Ok(documents) => {
                            s.students = documents.iter().map(StudentRecord::from_document).collect();
                        }
                        Err(e) => {
                            log::error!("❌ [ROSTER] Error recargando tras el alta: {}", e);
                            s.error = Some(ADD_ERROR.to_string());
                        }
                    }
                });
                true
            }
            Err(e) => {
                log::error!("❌ [ROSTER] Error creando estudiante: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ADD_ERROR.to_string());
                });
                false
            }
        }
    }

    /// Alta con los valores actuales del formulario
    pub async fn submit_form(&self) -> bool {
        let form = self.form();
        self.add(&form.name, &form.roll, &form.email).await
    }

    pub fn request_delete(&self, id: &str) {
        let id = id.to_string();
        self.state.update(|s| s.pending_delete = Some(id));
    }

    pub fn cancel_delete(&self) {
        self.state.update(|s| s.pending_delete = None);
    }

    /// Borra el estudiante pendiente de confirmación (si hay)
    pub async fn confirm_delete(&self) -> bool {
        let pending = self.state.with(|s| s.pending_delete.clone());
        let Some(id) = pending else {
            return false;
        };
        self.delete(&id).await
    }

    /// Una sola llamada remota; el éxito filtra el estado local sin recargar.
    /// El diálogo de confirmación solo se cierra si el borrado tuvo éxito.
    pub async fn delete(&self, id: &str) -> bool {
        self.start_loading();
        match self.store.delete_by_id(&self.collection, id).await {
            Ok(()) => {
                log::info!("🗑️ [ROSTER] Estudiante eliminado: {}", id);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = None;
                    s.pending_delete = None;
                    s.students.retain(|student| student.id != id);
                });
                true
            }
            Err(e) => {
                log::error!("❌ [ROSTER] Error eliminando {}: {}", id, e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(DELETE_ERROR.to_string());
                });
                false
            }
        }
    }
}
