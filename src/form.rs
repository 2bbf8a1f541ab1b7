use crate::log::Logger;
use crate::notification::Severity;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::cell::Cell;
use thiserror::Error;

pub const HONEYPOT_FIELD: &str = "website";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const ERROR_SEPARATOR: &str = ". ";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

impl ValidationError {
    pub fn field(self) -> &'static str {
        match self {
            Self::NameRequired | Self::NameTooShort => "name",
            Self::EmailRequired | Self::EmailInvalid => "email",
            Self::SubjectRequired => "subject",
            Self::MessageRequired | Self::MessageTooShort => "message",
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// At most one error per field, in form order. Expects trimmed input.
pub fn validate(fields: &FormFields) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if fields.name.is_empty() {
        errors.push(ValidationError::NameRequired);
    } else if fields.name.chars().count() < NAME_MIN_CHARS {
        errors.push(ValidationError::NameTooShort);
    }

    if fields.email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else if !is_valid_email(&fields.email) {
        errors.push(ValidationError::EmailInvalid);
    }

    if fields.subject.is_empty() {
        errors.push(ValidationError::SubjectRequired);
    }

    if fields.message.is_empty() {
        errors.push(ValidationError::MessageRequired);
    } else if fields.message.chars().count() < MESSAGE_MIN_CHARS {
        errors.push(ValidationError::MessageTooShort);
    }

    errors
}

pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ERROR_SEPARATOR)
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint answered with status {status}")]
    Status { status: u16 },
    #[error("could not encode message: {0}")]
    Encode(String),
}

impl SubmitError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Encode(_) => "encode",
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SubmitTransport {
    async fn send(&self, fields: &FormFields) -> Result<(), SubmitError>;
}

pub trait FormView {
    fn set_submitting(&self, submitting: bool);
    fn notify(&self, message: &str, severity: Severity);
    fn reset(&self);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitInput {
    pub fields: FormFields,
    pub honeypot: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Honeypot was filled in; nothing happened.
    Discarded,
    /// Another submission is still in flight.
    Busy,
    Rejected(Vec<ValidationError>),
    Sent,
    Failed(SubmitError),
}

/// Dropping it re-enables the form, even when the send future is abandoned.
struct SubmittingGuard<'a, V: FormView> {
    phase: &'a Cell<SubmitPhase>,
    view: &'a V,
}

impl<'a, V: FormView> SubmittingGuard<'a, V> {
    fn enter(phase: &'a Cell<SubmitPhase>, view: &'a V) -> Self {
        phase.set(SubmitPhase::Submitting);
        view.set_submitting(true);
        Self { phase, view }
    }
}

impl<V: FormView> Drop for SubmittingGuard<'_, V> {
    fn drop(&mut self) {
        self.phase.set(SubmitPhase::Idle);
        self.view.set_submitting(false);
    }
}

pub struct FormController<T> {
    transport: T,
    phase: Cell<SubmitPhase>,
    logger: Logger,
}

impl<T: SubmitTransport> FormController<T> {
    pub fn new(transport: T, logger: Logger) -> Self {
        Self {
            transport,
            phase: Cell::new(SubmitPhase::Idle),
            logger,
        }
    }

    #[cfg(test)]
    fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    pub async fn submit<V: FormView>(&self, view: &V, input: SubmitInput) -> SubmitOutcome {
        if !input.honeypot.is_empty() {
            self.logger.info("form.honeypot", json!({}));
            return SubmitOutcome::Discarded;
        }

        if self.phase.get() == SubmitPhase::Submitting {
            self.logger.debug("form.busy", json!({}));
            return SubmitOutcome::Busy;
        }

        let fields = input.fields.trimmed();
        let errors = validate(&fields);
        if !errors.is_empty() {
            self.logger.info(
                "form.invalid",
                json!({ "fields": errors.iter().map(|error| error.field()).collect::<Vec<_>>() }),
            );
            view.notify(&join_errors(&errors), Severity::Error);
            return SubmitOutcome::Rejected(errors);
        }

        let _submitting = SubmittingGuard::enter(&self.phase, view);

        match self.transport.send(&fields).await {
            Ok(()) => {
                self.logger.info("form.sent", json!({}));
                view.notify(SUCCESS_MESSAGE, Severity::Success);
                view.reset();
                SubmitOutcome::Sent
            }
            Err(error) => {
                self.logger.warn(
                    "form.failed",
                    json!({ "reason": error.kind(), "detail": error.to_string() }),
                );
                view.notify(FAILURE_MESSAGE, Severity::Error);
                SubmitOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogLevel;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::sync::Notify;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum ViewEvent {
        Submitting(bool),
        Notified(String, Severity),
        Reset,
    }

    #[derive(Default)]
    struct RecordingView {
        events: RefCell<Vec<ViewEvent>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<ViewEvent> {
            self.events.borrow().clone()
        }
    }

    impl FormView for RecordingView {
        fn set_submitting(&self, submitting: bool) {
            self.events.borrow_mut().push(ViewEvent::Submitting(submitting));
        }

        fn notify(&self, message: &str, severity: Severity) {
            self.events
                .borrow_mut()
                .push(ViewEvent::Notified(message.to_string(), severity));
        }

        fn reset(&self) {
            self.events.borrow_mut().push(ViewEvent::Reset);
        }
    }

    struct ScriptedTransport {
        result: Result<(), SubmitError>,
        sent: RefCell<Vec<FormFields>>,
    }

    impl ScriptedTransport {
        fn answering(result: Result<(), SubmitError>) -> Self {
            Self {
                result,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubmitTransport for ScriptedTransport {
        async fn send(&self, fields: &FormFields) -> Result<(), SubmitError> {
            self.sent.borrow_mut().push(fields.clone());
            self.result.clone()
        }
    }

    struct GatedTransport {
        gate: Rc<Notify>,
    }

    impl SubmitTransport for GatedTransport {
        async fn send(&self, _fields: &FormFields) -> Result<(), SubmitError> {
            self.gate.notified().await;
            Ok(())
        }
    }

    fn fields(name: &str, email: &str, subject: &str, message: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    fn valid_input() -> SubmitInput {
        SubmitInput {
            fields: fields("  Ada  ", "ada@example.com", "Hello", "A message long enough"),
            honeypot: String::new(),
        }
    }

    fn quiet_logger() -> Logger {
        Logger::new(LogLevel::Warn)
    }

    #[test]
    fn minimal_valid_form_has_no_errors() {
        assert!(validate(&fields("Al", "a@b.co", "Hi", "1234567890")).is_empty());
    }

    #[test]
    fn empty_form_reports_one_error_per_field() {
        let errors = validate(&fields("", "", "", ""));

        assert_eq!(
            errors,
            vec![
                ValidationError::NameRequired,
                ValidationError::EmailRequired,
                ValidationError::SubjectRequired,
                ValidationError::MessageRequired,
            ]
        );
    }

    #[test]
    fn short_names_are_flagged_and_longer_names_pass() {
        for name in ["", "A", "é"] {
            let errors = validate(&fields(name, "a@b.co", "Hi", "1234567890"));
            assert!(errors.iter().any(|error| error.field() == "name"), "{name:?}");
        }

        for name in ["Al", "Zoë", "Grace Hopper"] {
            let errors = validate(&fields(name, "a@b.co", "Hi", "1234567890"));
            assert!(errors.iter().all(|error| error.field() != "name"), "{name:?}");
        }
    }

    #[test]
    fn email_needs_at_sign_and_dot_after_it() {
        for email in ["userexample.com", "user@example", "user.name@example", "a b@c.d", "@x.io", "x@.io"] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
            let errors = validate(&fields("Al", email, "Hi", "1234567890"));
            assert_eq!(errors, vec![ValidationError::EmailInvalid]);
        }

        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn short_message_is_flagged() {
        let errors = validate(&fields("Al", "a@b.co", "Hi", "too short"));
        assert_eq!(errors, vec![ValidationError::MessageTooShort]);
    }

    #[test]
    fn errors_join_into_one_sentence_list() {
        let joined = join_errors(&[ValidationError::NameTooShort, ValidationError::SubjectRequired]);
        assert_eq!(joined, "Name must be at least 2 characters. Subject is required");
    }

    #[test]
    fn trimming_happens_before_length_checks() {
        let input = fields("  A ", " a@b.co ", "  ", " 1234567890 ").trimmed();
        assert_eq!(
            validate(&input),
            vec![ValidationError::NameTooShort, ValidationError::SubjectRequired]
        );
    }

    #[tokio::test]
    async fn honeypot_submission_is_silently_discarded() {
        let controller = FormController::new(ScriptedTransport::answering(Ok(())), quiet_logger());
        let view = RecordingView::default();
        let input = SubmitInput {
            fields: FormFields::default(),
            honeypot: "https://spam.example".to_string(),
        };

        assert_eq!(controller.submit(&view, input).await, SubmitOutcome::Discarded);
        assert!(view.events().is_empty());
        assert!(controller.transport.sent.borrow().is_empty());
        assert_eq!(controller.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn invalid_submission_notifies_without_sending() {
        let controller = FormController::new(ScriptedTransport::answering(Ok(())), quiet_logger());
        let view = RecordingView::default();
        let input = SubmitInput {
            fields: fields("A", "a@b.co", "Hi", "1234567890"),
            honeypot: String::new(),
        };

        let outcome = controller.submit(&view, input).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(vec![ValidationError::NameTooShort]));
        assert_eq!(
            view.events(),
            vec![ViewEvent::Notified(
                "Name must be at least 2 characters".to_string(),
                Severity::Error
            )]
        );
        assert!(controller.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn successful_submission_notifies_resets_and_reenables() {
        let controller = FormController::new(ScriptedTransport::answering(Ok(())), quiet_logger());
        let view = RecordingView::default();

        assert_eq!(controller.submit(&view, valid_input()).await, SubmitOutcome::Sent);
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Submitting(true),
                ViewEvent::Notified(SUCCESS_MESSAGE.to_string(), Severity::Success),
                ViewEvent::Reset,
                ViewEvent::Submitting(false),
            ]
        );
        assert_eq!(controller.transport.sent.borrow()[0].name, "Ada");
        assert_eq!(controller.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn failed_submission_keeps_fields_and_reenables() {
        let controller = FormController::new(
            ScriptedTransport::answering(Err(SubmitError::Status { status: 502 })),
            quiet_logger(),
        );
        let view = RecordingView::default();

        let outcome = controller.submit(&view, valid_input()).await;

        assert_eq!(outcome, SubmitOutcome::Failed(SubmitError::Status { status: 502 }));
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Submitting(true),
                ViewEvent::Notified(FAILURE_MESSAGE.to_string(), Severity::Error),
                ViewEvent::Submitting(false),
            ]
        );
        assert_eq!(controller.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_ignored() {
        let gate = Rc::new(Notify::new());
        let controller = FormController::new(GatedTransport { gate: gate.clone() }, quiet_logger());
        let view = RecordingView::default();

        let first = controller.submit(&view, valid_input());
        let second = async {
            tokio::task::yield_now().await;
            let outcome = controller.submit(&view, valid_input()).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, SubmitOutcome::Sent);
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(
            view.events()
                .iter()
                .filter(|event| matches!(event, ViewEvent::Submitting(true)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn abandoned_submission_still_leaves_submitting_state() {
        let gate = Rc::new(Notify::new());
        let controller = FormController::new(GatedTransport { gate }, quiet_logger());
        let view = RecordingView::default();

        tokio::select! {
            biased;
            _ = controller.submit(&view, valid_input()) => panic!("send never completes"),
            _ = async {} => {}
        }

        assert_eq!(
            view.events(),
            vec![ViewEvent::Submitting(true), ViewEvent::Submitting(false)]
        );
        assert_eq!(controller.phase(), SubmitPhase::Idle);
    }
}
