// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent};

use crate::dom::{append_child, create_element, on_click, on_input, on_submit, set_attribute, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// `disabled` solo se añade si `disabled == true`
    pub fn disabled(self, disabled: bool) -> Result<Self, JsValue> {
        if disabled {
            set_attribute(&self.element, "disabled", "")?;
        }
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn child_opt(self, child: Option<Element>) -> Result<Self, JsValue> {
        match child {
            Some(child) => self.child(child),
            None => Ok(self),
        }
    }

    pub fn children(self, children: impl IntoIterator<Item = Element>) -> Result<Self, JsValue> {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler)?;
        Ok(self)
    }

    /// Handler con el valor actual del input
    pub fn on_input<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(String) + 'static,
    {
        on_input(&self.element, handler)?;
        Ok(self)
    }

    pub fn on_submit<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        on_submit(&self.element, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
