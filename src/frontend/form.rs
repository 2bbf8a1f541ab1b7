use super::dom::{self, CONTACT_FORM_ID};
use super::notification::Notifier;
use crate::config::SiteConfig;
use crate::form::{
    FormController, FormFields, FormView, SubmitError, SubmitInput, SubmitTransport, HONEYPOT_FIELD,
};
use crate::log::Logger;
use crate::notification::Severity;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

pub enum ContactTransport {
    Simulated { latency_ms: u32 },
    Http { endpoint: String },
}

impl ContactTransport {
    fn from_config(config: &SiteConfig) -> Self {
        match config.submit_endpoint.clone() {
            Some(endpoint) => Self::Http { endpoint },
            None => Self::Simulated {
                latency_ms: config.submit_latency_ms,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Simulated { .. } => "simulated",
            Self::Http { .. } => "http",
        }
    }
}

impl SubmitTransport for ContactTransport {
    async fn send(&self, fields: &FormFields) -> Result<(), SubmitError> {
        match self {
            Self::Simulated { latency_ms } => {
                TimeoutFuture::new(*latency_ms).await;
                Ok(())
            }
            Self::Http { endpoint } => post_message(endpoint, fields).await,
        }
    }
}

async fn post_message(endpoint: &str, fields: &FormFields) -> Result<(), SubmitError> {
    let request = Request::post(endpoint)
        .header("Accept", "application/json")
        .json(fields)
        .map_err(|error| SubmitError::Encode(error.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|error| SubmitError::Network(error.to_string()))?;

    if !response.ok() {
        return Err(SubmitError::Status {
            status: response.status(),
        });
    }

    Ok(())
}

struct DomFormView {
    form: HtmlFormElement,
    button: Option<Element>,
    label: Option<HtmlElement>,
    loading: Option<HtmlElement>,
    notifier: Notifier,
}

impl DomFormView {
    fn new(form: HtmlFormElement, notifier: Notifier) -> Self {
        let button = form.query_selector(".btn").ok().flatten();
        let child = |selector: &str| {
            button
                .as_ref()
                .and_then(|button| button.query_selector(selector).ok().flatten())
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        };
        let label = child(".btn-text");
        let loading = child(".btn-loading");

        Self {
            form,
            button,
            label,
            loading,
            notifier,
        }
    }

    fn read_fields(&self) -> FormFields {
        FormFields {
            name: self.field_value("name"),
            email: self.field_value("email"),
            subject: self.field_value("subject"),
            message: self.field_value("message"),
        }
    }

    fn field_value(&self, name: &str) -> String {
        let Ok(Some(element)) = self.form.query_selector(&format!("[name=\"{name}\"]")) else {
            return String::new();
        };

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }
}

impl FormView for DomFormView {
    fn set_submitting(&self, submitting: bool) {
        if let Some(label) = &self.label {
            label.set_hidden(submitting);
        }
        if let Some(loading) = &self.loading {
            loading.set_hidden(!submitting);
        }
        if let Some(button) = &self.button {
            if submitting {
                let _ = button.set_attribute("disabled", "");
                let _ = button.set_attribute("aria-busy", "true");
            } else {
                let _ = button.remove_attribute("disabled");
                let _ = button.remove_attribute("aria-busy");
            }
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.show(message, severity);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

fn plant_honeypot(form: &HtmlFormElement) -> Option<HtmlInputElement> {
    let document = dom::document()?;
    let input = document
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;

    input.set_type("text");
    input.set_name(HONEYPOT_FIELD);
    input.set_tab_index(-1);
    let _ = input.set_attribute("autocomplete", "off");
    let _ = input.set_attribute("aria-hidden", "true");
    let _ = input.style().set_property("display", "none");
    form.append_child(&input).ok()?;

    Some(input)
}

pub fn init(config: &SiteConfig, logger: Logger, notifier: Notifier) -> Option<&'static str> {
    let Some(form) = dom::element_by_id::<HtmlFormElement>(CONTACT_FORM_ID) else {
        dom::missing(logger, "contact-form");
        return None;
    };
    let honeypot = plant_honeypot(&form)?;

    let transport = ContactTransport::from_config(config);
    let kind = transport.kind();
    let view = Rc::new(DomFormView::new(form.clone(), notifier));
    let controller = Rc::new(FormController::new(transport, logger));

    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();

            let input = SubmitInput {
                fields: view.read_fields(),
                honeypot: honeypot.value(),
            };
            let controller = Rc::clone(&controller);
            let view = Rc::clone(&view);
            spawn_local(async move {
                controller.submit(view.as_ref(), input).await;
            });
        },
    )
    .forget();

    Some(kind)
}
