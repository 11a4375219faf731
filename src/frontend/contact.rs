//! Inline validation for the `#contact` form.

use gloo_events::{EventListener, EventListenerOptions};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::{elements, Page};
use crate::{
    error::SetupError,
    form::{
        error_element_id, validate_field, validate_form, Field, FieldError, FieldKind,
        DEMO_SUBMIT_NOTICE,
    },
};

const GROUP: &str = ".form-group";
const INVALID_CLASS: &str = "is-invalid";
const MESSAGE_CLASS: &str = "error-message";

struct Snapshot {
    key: String,
    value: String,
    kind: FieldKind,
}

impl Snapshot {
    fn read(control: &Element) -> Option<Self> {
        let (value, kind) = if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            (
                input.value(),
                FieldKind::from_input_type(&input.type_(), input.checked()),
            )
        } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
            (select.value(), FieldKind::Select)
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            (area.value(), FieldKind::TextArea)
        } else {
            return None;
        };

        let key = control
            .get_attribute("name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| control.id());
        Some(Self { key, value, kind })
    }

    fn field(&self) -> Field<'_> {
        Field {
            key: &self.key,
            value: &self.value,
            kind: self.kind,
        }
    }
}

fn clear_error(control: &Element, group: &Element) {
    let _ = group.class_list().remove_1(INVALID_CLASS);
    let _ = control.remove_attribute("aria-invalid");
    let _ = control.remove_attribute("aria-describedby");
    if let Ok(Some(message)) = group.query_selector(&format!(".{MESSAGE_CLASS}")) {
        message.remove();
    }
}

fn show_error(
    document: &Document,
    control: &Element,
    group: &Element,
    key: &str,
    error: FieldError,
) -> Result<(), SetupError> {
    let id = error_element_id(key);
    let message = document.create_element("span")?;
    message.set_class_name(MESSAGE_CLASS);
    message.set_id(&id);
    message.set_attribute("role", "alert")?;
    message.set_text_content(Some(&error.to_string()));
    group.append_child(&message)?;

    group.class_list().add_1(INVALID_CLASS)?;
    control.set_attribute("aria-invalid", "true")?;
    control.set_attribute("aria-describedby", &id)?;
    Ok(())
}

/// Mirrors a validation result into the control's `.form-group`.
fn annotate(document: &Document, control: &Element, key: &str, result: Result<(), FieldError>) {
    if let Ok(Some(group)) = control.closest(GROUP) {
        clear_error(control, &group);
        if let Err(error) = result {
            let _ = show_error(document, control, &group, key, error);
        }
    }
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let form = page.query("#contact form")?;
    let controls = elements(&form.query_selector_all("input, select, textarea")?);

    for control in &controls {
        let document = page.document.clone();
        let target = control.clone();
        EventListener::new(control, "blur", move |_| {
            if let Some(snapshot) = Snapshot::read(&target) {
                annotate(&document, &target, &snapshot.key, validate_field(&snapshot.field()));
            }
        })
        .forget();
    }

    let page = page.clone();
    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();

            let snapshots: Vec<(&Element, Snapshot)> = controls
                .iter()
                .filter_map(|control| Snapshot::read(control).map(|snapshot| (control, snapshot)))
                .collect();
            let report = validate_form(
                snapshots.iter().map(|(_, snapshot)| snapshot.field()),
                |index, result| {
                    let (control, snapshot) = &snapshots[index];
                    annotate(&page.document, control, &snapshot.key, result);
                },
            );

            if report.is_valid() {
                page.logger
                    .info("form_submit_demo", json!({ "checked": report.checked }));
                let _ = page.window.alert_with_message(DEMO_SUBMIT_NOTICE);
            } else {
                page.logger.info(
                    "form_submit_blocked",
                    json!({ "checked": report.checked, "failures": report.failures }),
                );
            }
        },
    )
    .forget();

    Ok(())
}
