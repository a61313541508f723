//! DOM implementation of the control seams plus the page entry point.
//!
//! Every form matching the configured selector is bound once: its controls
//! are collected in document order, each control's `form-group` is resolved
//! up front, and the `input`/`blur`/`submit` listeners forward to a shared
//! [`FormBinding`]. Load this before any other script that listens for
//! `submit` on the same forms, otherwise `stopImmediatePropagation` cannot
//! keep those listeners from running on an invalid form.

use super::{Control, ErrorContainer, FormHandle};
use crate::{
    binding::{EventOutcome, FormBinding, FormEvent},
    config::ValidationConfig,
    errors::ControlError,
    validation::{BoundField, Form},
};
use js_sys::{Array, Function, Reflect};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

const CONTROL_SELECTOR: &str = "input, textarea, select";

/// Binds validation to every auth form on the page. Safe to call before the
/// DOM is parsed; binding is deferred to `DOMContentLoaded` in that case.
///
/// # Errors
///
/// Returns an error if there is no document or the listeners cannot be
/// registered.
#[wasm_bindgen]
pub fn init_form_validation() -> Result<(), JsValue> {
    let config = ValidationConfig::load();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    if document.ready_state() != "loading" {
        return bind_forms(&document, &config);
    }

    let ready_document = document.clone();
    let on_ready = Closure::once(move |_event: Event| {
        if let Err(err) = bind_forms(&ready_document, &config) {
            warn!("Failed to bind form validation: {}", describe(&err));
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();

    Ok(())
}

fn bind_forms(document: &Document, config: &ValidationConfig) -> Result<(), JsValue> {
    let nodes = document.query_selector_all(&config.form_selector)?;
    let mut bound = 0;

    for index in 0..nodes.length() {
        let Some(form) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };
        bind_form(&form, config)?;
        bound += 1;
    }

    debug!(forms = bound, selector = %config.form_selector, "Bound form validation");

    Ok(())
}

type DomBinding = FormBinding<DomForm, DomControl, DomErrorContainer>;

fn bind_form(form: &HtmlFormElement, config: &ValidationConfig) -> Result<(), JsValue> {
    let nodes = form.query_selector_all(CONTROL_SELECTOR)?;
    let mut fields = Vec::new();

    for index in 0..nodes.length() {
        let Some(control) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
            .and_then(DomControl::from_element)
        else {
            continue;
        };

        let group = find_group(control.element(), &config.group_class)
            .map(|group| DomErrorContainer::new(group, &config.errors_class));
        if group.is_none() {
            debug!(field = %control.name(), "Control has no form-group ancestor");
        }

        fields.push(BoundField::new(control, group));
    }

    let binding: Rc<DomBinding> = Rc::new(FormBinding::new(
        config,
        Form::new(DomForm(form.clone()), fields),
    ));

    for (index, field) in binding.form().fields().iter().enumerate() {
        let target = field.control().element();
        listen(target, "input", &binding, FormEvent::Input(index))?;
        listen(target, "blur", &binding, FormEvent::Blur(index))?;
    }
    listen(form, "submit", &binding, FormEvent::Submit)?;

    Ok(())
}

fn listen(
    target: &web_sys::EventTarget,
    event_name: &str,
    binding: &Rc<DomBinding>,
    form_event: FormEvent,
) -> Result<(), JsValue> {
    let binding = Rc::clone(binding);
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if binding.handle(form_event) == EventOutcome::CancelSubmit {
            event.prevent_default();
            event.stop_immediate_propagation();
        }
    });
    target.add_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    listener.forget();
    Ok(())
}

fn find_group(element: &Element, class: &str) -> Option<Element> {
    let mut parent = element.parent_element();
    while let Some(candidate) = parent {
        if candidate.class_list().contains(class) {
            return Some(candidate);
        }
        parent = candidate.parent_element();
    }
    None
}

/// Calls `target[method](...args)` when the method exists, without letting a
/// missing API or a thrown exception escape.
fn call_optional(
    target: &JsValue,
    method: &'static str,
    args: &Array,
) -> Result<JsValue, ControlError> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(ControlError::Unavailable(method))?;

    function.apply(target, args).map_err(|err| ControlError::Call {
        method,
        message: describe(&err),
    })
}

/// `"a b"` becomes `".a.b"`, one compound selector for the whole class list.
fn class_selector(classes: &str) -> String {
    classes
        .split_whitespace()
        .map(|class| format!(".{class}"))
        .collect()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[derive(Clone, Debug)]
pub enum DomControl {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl DomControl {
    #[must_use]
    pub fn from_element(element: Element) -> Option<Self> {
        element
            .dyn_into::<HtmlInputElement>()
            .map(Self::Input)
            .or_else(|element| element.dyn_into::<HtmlTextAreaElement>().map(Self::TextArea))
            .or_else(|element| element.dyn_into::<HtmlSelectElement>().map(Self::Select))
            .ok()
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Self::Input(element) => element,
            Self::TextArea(element) => element,
            Self::Select(element) => element,
        }
    }
}

impl Control for DomControl {
    fn name(&self) -> String {
        match self {
            Self::Input(element) => element.name(),
            Self::TextArea(element) => element.name(),
            Self::Select(element) => element.name(),
        }
    }

    fn input_type(&self) -> String {
        match self {
            Self::Input(element) => element.type_(),
            Self::TextArea(element) => element.type_(),
            Self::Select(element) => element.type_(),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(element) => element.value(),
            Self::TextArea(element) => element.value(),
            Self::Select(element) => element.value(),
        }
    }

    fn is_required(&self) -> bool {
        match self {
            Self::Input(element) => element.required(),
            Self::TextArea(element) => element.required(),
            Self::Select(element) => element.required(),
        }
    }

    fn is_disabled(&self) -> bool {
        match self {
            Self::Input(element) => element.disabled(),
            Self::TextArea(element) => element.disabled(),
            Self::Select(element) => element.disabled(),
        }
    }

    fn set_aria_invalid(&self, invalid: bool) {
        let element = self.element();
        let _ = if invalid {
            element.set_attribute("aria-invalid", "true")
        } else {
            element.remove_attribute("aria-invalid")
        };
    }

    fn set_custom_validity(&self, message: &str) -> Result<(), ControlError> {
        call_optional(
            self.element(),
            "setCustomValidity",
            &Array::of1(&JsValue::from_str(message)),
        )
        .map(|_| ())
    }

    fn focus(&self) -> Result<(), ControlError> {
        self.element().focus().map_err(|err| ControlError::Call {
            method: "focus",
            message: describe(&err),
        })
    }
}

/// Error container of one `form-group`. The container element is looked up
/// (or created) lazily, then cached for as long as it stays inside the group.
#[derive(Debug)]
pub struct DomErrorContainer {
    group: Element,
    errors_class: String,
    errors_selector: String,
    container: RefCell<Option<Element>>,
}

impl DomErrorContainer {
    #[must_use]
    pub fn new(group: Element, errors_class: &str) -> Self {
        Self {
            group,
            errors_class: errors_class.to_string(),
            errors_selector: class_selector(errors_class),
            container: RefCell::new(None),
        }
    }

    fn existing(&self) -> Option<Element> {
        let cached = self.container.borrow().clone();
        if let Some(container) = cached {
            if self.group.contains(Some(&*container)) {
                return Some(container);
            }
            debug!(class = %self.errors_class, "Cached error container was detached");
            *self.container.borrow_mut() = None;
        }

        let found = self
            .group
            .query_selector(&self.errors_selector)
            .ok()
            .flatten()?;
        *self.container.borrow_mut() = Some(found.clone());
        Some(found)
    }

    fn get_or_create(&self) -> Option<Element> {
        if let Some(container) = self.existing() {
            return Some(container);
        }

        let document = self.group.owner_document()?;
        let container = document.create_element("div").ok()?;
        container.set_class_name(&self.errors_class);
        self.group.append_child(&container).ok()?;
        debug!(class = %self.errors_class, "Created error container");

        *self.container.borrow_mut() = Some(container.clone());
        Some(container)
    }
}

impl ErrorContainer for DomErrorContainer {
    fn clear(&self) {
        if let Some(container) = self.existing() {
            container.set_inner_html("");
        }
    }

    fn append_message(&self, class: &str, text: &str) {
        let Some(container) = self.get_or_create() else {
            return;
        };
        let Some(message) = container
            .owner_document()
            .and_then(|document| document.create_element("span").ok())
        else {
            return;
        };
        message.set_class_name(class);
        message.set_text_content(Some(text));
        let _ = container.append_child(&message);
    }
}

#[derive(Clone, Debug)]
pub struct DomForm(HtmlFormElement);

impl FormHandle for DomForm {
    fn report_validity(&self) -> Result<(), ControlError> {
        call_optional(&self.0, "reportValidity", &Array::new()).map(|_| ())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Mounts `html` under a fresh root and binds only the forms inside it.
    fn mount(id: &str, html: &str, config: ValidationConfig) -> Element {
        let document = document();
        let root = document.create_element("div").unwrap();
        root.set_id(id);
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();

        let config = ValidationConfig {
            form_selector: format!("#{id} form"),
            ..config
        };
        bind_forms(&document, &config).unwrap();
        root
    }

    fn input(root: &Element, name: &str) -> HtmlInputElement {
        root.query_selector(&format!("input[name='{name}']"))
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn fire(target: &web_sys::EventTarget, name: &str) -> Event {
        let init = EventInit::new();
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict(name, &init).unwrap();
        target.dispatch_event(&event).unwrap();
        event
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector).unwrap().length()
    }

    const SIGNUP: &str = r#"
        <form class="auth-form">
          <div class="form-group" id="email-group">
            <label>Email <span><input name="email" type="email"></span></label>
          </div>
          <div class="form-group">
            <input name="password" type="password">
          </div>
          <input name="loose" required>
        </form>"#;

    #[wasm_bindgen_test]
    fn find_group_walks_past_intermediate_ancestors() {
        let root = mount("find-group", SIGNUP, ValidationConfig::default());

        let email = input(&root, "email");
        let group = find_group(&email, "form-group").unwrap();
        assert_eq!(group.id(), "email-group");
        assert!(find_group(&input(&root, "loose"), "form-group").is_none());
    }

    #[wasm_bindgen_test]
    fn input_creates_one_container_with_one_message() {
        let root = mount("create", SIGNUP, ValidationConfig::default());
        let email = input(&root, "email");

        email.set_value("nope");
        fire(&email, "input");
        fire(&email, "blur");

        assert_eq!(count(&root, "#email-group .form-errors"), 1);
        assert_eq!(count(&root, "#email-group span.helper.error"), 1);
        let message = root
            .query_selector("#email-group span.helper.error")
            .unwrap()
            .unwrap();
        assert_eq!(
            message.text_content().as_deref(),
            Some("Please enter a valid email address.")
        );
    }

    #[wasm_bindgen_test]
    fn existing_container_is_reused() {
        let html = r#"
            <form>
              <div class="form-group" id="g">
                <div class="form-errors" id="server-errors"></div>
                <input name="password" type="password">
              </div>
            </form>"#;
        let root = mount("reuse", html, ValidationConfig::default());
        let password = input(&root, "password");

        password.set_value("short");
        fire(&password, "input");

        assert_eq!(count(&root, "#g .form-errors"), 1);
        assert_eq!(count(&root, "#server-errors span.helper.error"), 1);
    }

    #[wasm_bindgen_test]
    fn aria_invalid_is_set_then_removed() {
        let root = mount("aria", SIGNUP, ValidationConfig::default());
        let email = input(&root, "email");

        email.set_value("nope");
        fire(&email, "input");
        assert_eq!(email.get_attribute("aria-invalid").as_deref(), Some("true"));
        assert_eq!(email.validation_message().unwrap(), "Invalid");

        email.set_value("a@b.co");
        fire(&email, "input");
        assert_eq!(email.get_attribute("aria-invalid"), None);
        assert_eq!(count(&root, "#email-group span.helper.error"), 0);
    }

    #[wasm_bindgen_test]
    fn invalid_submit_is_cancelled_before_later_listeners() {
        let root = mount("submit", SIGNUP, ValidationConfig::default());
        let form = root.query_selector("form").unwrap().unwrap();

        let reached = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reached);
        let later = Closure::<dyn FnMut(Event)>::new(move |_event: Event| flag.set(true));
        form.add_event_listener_with_callback("submit", later.as_ref().unchecked_ref())
            .unwrap();
        later.forget();

        let event = fire(&form, "submit");

        assert!(event.default_prevented());
        assert!(!reached.get());
        assert_eq!(count(&root, ".form-group span.helper.error"), 0);
        assert_eq!(
            input(&root, "loose").get_attribute("aria-invalid"),
            None,
            "ungrouped fields are not annotated"
        );
    }

    #[wasm_bindgen_test]
    fn valid_submit_reaches_later_listeners() {
        let root = mount("submit-ok", SIGNUP, ValidationConfig::default());
        let form = root.query_selector("form").unwrap().unwrap();
        input(&root, "email").set_value("a@b.co");
        input(&root, "password").set_value("long enough");
        input(&root, "loose").set_value("x");

        let reached = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reached);
        let later = Closure::<dyn FnMut(Event)>::new(move |_event: Event| flag.set(true));
        form.add_event_listener_with_callback("submit", later.as_ref().unchecked_ref())
            .unwrap();
        later.forget();

        let event = fire(&form, "submit");

        assert!(!event.default_prevented());
        assert!(reached.get());
    }

    #[wasm_bindgen_test]
    fn removed_container_is_recreated_inside_the_group() {
        let root = mount("detached", SIGNUP, ValidationConfig::default());
        let email = input(&root, "email");

        email.set_value("nope");
        fire(&email, "input");
        root.query_selector("#email-group .form-errors")
            .unwrap()
            .unwrap()
            .remove();

        fire(&email, "input");

        assert_eq!(count(&root, "#email-group .form-errors"), 1);
        assert_eq!(count(&root, "#email-group span.helper.error"), 1);
    }

    #[wasm_bindgen_test]
    fn multi_class_container_is_found_again() {
        let config = ValidationConfig {
            errors_class: "form-errors compact".to_string(),
            ..ValidationConfig::default()
        };
        let root = mount("multi-class", SIGNUP, config);
        let email = input(&root, "email");

        email.set_value("nope");
        fire(&email, "input");
        fire(&email, "blur");

        assert_eq!(count(&root, "#email-group .form-errors.compact"), 1);
        assert_eq!(count(&root, "#email-group span.helper.error"), 1);
    }
}
