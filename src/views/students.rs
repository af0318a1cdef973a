// ============================================================================
// STUDENTS VIEW - Formulario de alta, lista y diálogo de borrado
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{FormField, StudentForm, StudentRecord};
use crate::state::AppState;
use crate::viewmodels::{RosterSnapshot, RosterViewModel};

pub const STUDENTS_CARD_ID: &str = "students-card";

fn render_input(
    roster: &Rc<RosterViewModel>,
    form: &StudentForm,
    field: FormField,
    input_type: &str,
    placeholder: &str,
) -> Result<Element, JsValue> {
    let roster = roster.clone();
    Ok(ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("value", form.get(field))?
        .on_input(move |value| roster.set_field(field, value))?
        .build())
}

fn render_form(roster: &Rc<RosterViewModel>, loading: bool) -> Result<Element, JsValue> {
    let form = roster.form();
    let submit_vm = roster.clone();

    ElementBuilder::new("form")?
        .class("student-form")
        .child(render_input(roster, &form, FormField::Name, "text", "Name")?)?
        .child(render_input(roster, &form, FormField::Roll, "text", "Roll Number")?)?
        .child(render_input(roster, &form, FormField::Email, "email", "Email")?)?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-primary")
                .attr("type", "submit")?
                .text("Add Student")
                .disabled(loading)?
                .build(),
        )?
        .on_submit(move |_| {
            let vm = submit_vm.clone();
            spawn_local(async move {
                vm.submit_form().await;
            });
        })
        .map(ElementBuilder::build)
}

fn render_row(roster: &Rc<RosterViewModel>, student: &StudentRecord) -> Result<Element, JsValue> {
    let roster = roster.clone();
    let id = student.id.clone();

    let delete_button = ElementBuilder::new("button")?
        .class("btn btn-danger btn-small")
        .text("Delete")
        .on_click(move |_| roster.request_delete(&id))?
        .build();

    let cells = [&student.name, &student.roll, &student.email]
        .into_iter()
        .map(|value| ElementBuilder::new("td").map(|td| td.text(value).build()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ElementBuilder::new("tr")?
        .children(cells)?
        .child(ElementBuilder::new("td")?.child(delete_button)?.build())?
        .build())
}

fn render_list(roster: &Rc<RosterViewModel>, snapshot: &RosterSnapshot) -> Result<Element, JsValue> {
    if snapshot.students.is_empty() {
        let message = if snapshot.loading {
            "Loading students..."
        } else {
            "No students data available"
        };
        return Ok(ElementBuilder::new("p")?.class("empty-state").text(message).build());
    }

    let headers = ["Name", "Roll Number", "Email", "Actions"]
        .into_iter()
        .map(|title| ElementBuilder::new("th").map(|th| th.text(title).build()))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = snapshot
        .students
        .iter()
        .map(|student| render_row(roster, student))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ElementBuilder::new("table")?
        .class("students-table")
        .child(
            ElementBuilder::new("thead")?
                .child(ElementBuilder::new("tr")?.children(headers)?.build())?
                .build(),
        )?
        .child(ElementBuilder::new("tbody")?.children(rows)?.build())?
        .build())
}

fn render_confirm_dialog(roster: &Rc<RosterViewModel>) -> Result<Element, JsValue> {
    let cancel_vm = roster.clone();
    let confirm_vm = roster.clone();

    let cancel = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .text("Cancel")
        .on_click(move |_| cancel_vm.cancel_delete())?
        .build();

    let confirm = ElementBuilder::new("button")?
        .class("btn btn-danger")
        .text("Delete")
        .on_click(move |_| {
            let vm = confirm_vm.clone();
            spawn_local(async move {
                vm.confirm_delete().await;
            });
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("modal-backdrop")
        .child(
            ElementBuilder::new("div")?
                .class("dialog")
                .child(ElementBuilder::new("h3")?.text("Confirm Delete").build())?
                .child(
                    ElementBuilder::new("p")?
                        .text("Are you sure you want to delete this student?")
                        .build(),
                )?
                .child(
                    ElementBuilder::new("div")?
                        .class("dialog-actions")
                        .child(cancel)?
                        .child(confirm)?
                        .build(),
                )?
                .build(),
        )?
        .build())
}

/// Renderizar tarjeta de gestión de estudiantes
pub fn render_students_card(state: &AppState) -> Result<Element, JsValue> {
    let roster = &state.roster;
    let snapshot = roster.snapshot();

    let alert = match &snapshot.error {
        Some(message) => Some(ElementBuilder::new("div")?.class("alert alert-error").text(message).build()),
        None => None,
    };
    let dialog = match snapshot.pending_delete {
        Some(_) => Some(render_confirm_dialog(roster)?),
        None => None,
    };

    Ok(ElementBuilder::new("section")?
        .id(STUDENTS_CARD_ID)?
        .class("card students-card")
        .child(ElementBuilder::new("h2")?.text("Student Management").build())?
        .child(render_form(roster, snapshot.loading)?)?
        .child_opt(alert)?
        .child(render_list(roster, &snapshot)?)?
        .child_opt(dialog)?
        .build())
}
