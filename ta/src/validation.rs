//! Form models and client-side validation
//!
//! Forms are plain structs with one field per input. Validation collects an
//! inline message per failing field; a form with no errors converts into the
//! value the controller acts on.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::dom;
use crate::tickets::{NewTicket, TicketChanges, TicketStatus};

/// Maximum ticket description length in characters
pub const DEFAULT_DESCRIPTION_MAX_LEN: usize = 2000;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email.";
pub const MSG_WEAK_PASSWORD: &str = "Password must be at least 8 characters and include letters, numbers, and a symbol.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_INVALID_STATUS: &str = "Invalid status";
pub const MSG_DESCRIPTION_TOO_LONG: &str = "Description too long";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("letter pattern is valid"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("digit pattern is valid"));
static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("symbol pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Length as a browser reports it: UTF-16 code units
pub fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// At least eight characters with a letter, a digit and a symbol
pub fn is_strong_password(password: &str) -> bool {
    input_len(password) >= MIN_PASSWORD_LEN
        && LETTER_RE.is_match(password)
        && DIGIT_RE.is_match(password)
        && SYMBOL_RE.is_match(password)
}

/// An input that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Title,
    Status,
    Description,
}

impl Field {
    /// Input `name` attribute
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Title => "title",
            Self::Status => "status",
            Self::Description => "description",
        }
    }

    /// Dedicated error slot id, for the fields whose template provides one
    pub fn error_slot(&self) -> Option<&'static str> {
        match self {
            Self::Email => Some(dom::EMAIL_ERROR),
            Self::Password => Some(dom::PASSWORD_ERROR),
            Self::ConfirmPassword => Some(dom::CONFIRM_ERROR),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inline error messages keyed by field, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: Vec<(Field, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` on `field`, replacing any previous message there
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.clear(field);
        self.errors.push((field, message.into()));
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// `#loginForm`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `#signupForm`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// `#ticketForm`; a non-empty `ticket_id` means edit rather than create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketForm {
    pub ticket_id: Option<String>,
    pub title: String,
    pub status: String,
    pub description: String,
}

/// Email accepted from an auth form. The password is checked for shape only
/// and never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
}

/// A ticket form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTicket {
    pub ticket_id: Option<String>,
    pub title: String,
    pub status: TicketStatus,
    pub description: String,
}

impl ValidTicket {
    pub fn to_new_ticket(&self) -> NewTicket {
        NewTicket {
            title: self.title.clone(),
            status: self.status,
            description: self.description.clone(),
        }
    }

    pub fn to_changes(&self) -> TicketChanges {
        TicketChanges {
            title: Some(self.title.clone()),
            status: Some(self.status),
            description: Some(self.description.clone()),
        }
    }
}

fn check_credentials(email: &str, password: &str, errors: &mut FieldErrors) {
    if is_valid_email(email) {
        errors.clear(Field::Email);
    } else {
        errors.set(Field::Email, MSG_INVALID_EMAIL);
    }

    if is_strong_password(password) {
        errors.clear(Field::Password);
    } else {
        errors.set(Field::Password, MSG_WEAK_PASSWORD);
    }
}

pub fn validate_login(form: &LoginForm) -> Result<Credentials, FieldErrors> {
    let email = form.email.trim();
    let mut errors = FieldErrors::new();
    check_credentials(email, &form.password, &mut errors);
    errors.into_result(Credentials {
        email: email.to_string(),
    })
}

pub fn validate_signup(form: &SignupForm) -> Result<Credentials, FieldErrors> {
    let email = form.email.trim();
    let mut errors = FieldErrors::new();
    check_credentials(email, &form.password, &mut errors);

    if form.confirm_password != form.password {
        errors.set(Field::ConfirmPassword, MSG_PASSWORD_MISMATCH);
    }

    errors.into_result(Credentials {
        email: email.to_string(),
    })
}

pub fn validate_ticket(form: &TicketForm, description_max_len: usize) -> Result<ValidTicket, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = form.title.trim();
    if title.is_empty() {
        errors.set(Field::Title, MSG_TITLE_REQUIRED);
    }

    let status = form.status.parse::<TicketStatus>();
    if status.is_err() {
        errors.set(Field::Status, MSG_INVALID_STATUS);
    }

    let description = form.description.trim();
    if input_len(description) > description_max_len {
        errors.set(Field::Description, MSG_DESCRIPTION_TOO_LONG);
    }

    match status {
        Ok(status) if errors.is_empty() => Ok(ValidTicket {
            ticket_id: form.ticket_id.clone().filter(|id| !id.is_empty()),
            title: title.to_string(),
            status,
            description: description.to_string(),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ticket_form(title: &str, status: &str) -> TicketForm {
        TicketForm {
            ticket_id: None,
            title: title.to_string(),
            status: status.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@x.io"));
        assert!(!is_valid_email("@x.io"));
    }

    #[test]
    fn test_password_complexity() {
        assert!(is_strong_password("abc123!@"));
        assert!(!is_strong_password("abc12!"));
        assert!(!is_strong_password("abcdefgh1"));
        assert!(!is_strong_password("abcdefgh!"));
        assert!(!is_strong_password("12345678!"));
    }

    #[test]
    fn test_login_collects_both_errors() {
        let errors = validate_login(&LoginForm {
            email: "nope".to_string(),
            password: "short".to_string(),
        })
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some(MSG_INVALID_EMAIL));
        assert_eq!(errors.get(Field::Password), Some(MSG_WEAK_PASSWORD));
    }

    #[test]
    fn test_login_trims_email() {
        let creds = validate_login(&LoginForm {
            email: "  user@example.com ".to_string(),
            password: "hunter2!x".to_string(),
        })
        .unwrap();
        assert_eq!(creds.email, "user@example.com");
    }

    #[test]
    fn test_signup_requires_matching_confirmation() {
        let errors = validate_signup(&SignupForm {
            email: "user@example.com".to_string(),
            password: "hunter2!x".to_string(),
            confirm_password: "hunter2!y".to_string(),
        })
        .unwrap_err();

        assert_eq!(errors.get(Field::ConfirmPassword), Some(MSG_PASSWORD_MISMATCH));
        assert_eq!(Field::ConfirmPassword.error_slot(), Some("confirmError"));
    }

    #[test]
    fn test_field_errors_set_replaces_and_clear_removes() {
        let mut errors = FieldErrors::new();
        errors.set(Field::Title, "first");
        errors.set(Field::Title, "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Title), Some("second"));

        errors.clear(Field::Title);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_ticket_requires_title() {
        let errors = validate_ticket(&ticket_form("   ", "open"), DEFAULT_DESCRIPTION_MAX_LEN).unwrap_err();
        assert_eq!(errors.get(Field::Title), Some(MSG_TITLE_REQUIRED));
    }

    #[test]
    fn test_ticket_rejects_unknown_status() {
        let errors = validate_ticket(&ticket_form("Printer", "done"), DEFAULT_DESCRIPTION_MAX_LEN).unwrap_err();
        assert_eq!(errors.get(Field::Status), Some(MSG_INVALID_STATUS));
    }

    #[test]
    fn test_ticket_description_limit() {
        let mut form = ticket_form("Printer", "open");
        form.description = "x".repeat(11);
        let errors = validate_ticket(&form, 10).unwrap_err();
        assert_eq!(errors.get(Field::Description), Some(MSG_DESCRIPTION_TOO_LONG));

        form.description = "x".repeat(10);
        assert!(validate_ticket(&form, 10).is_ok());
    }

    #[test]
    fn test_limits_count_utf16_units() {
        assert_eq!(input_len("a😀"), 3);
        // six characters, eight code units
        assert!(is_strong_password("a1!😀😀x"));

        let mut form = ticket_form("Printer", "open");
        form.description = "😀".repeat(6);
        let errors = validate_ticket(&form, 10).unwrap_err();
        assert_eq!(errors.get(Field::Description), Some(MSG_DESCRIPTION_TOO_LONG));

        form.description = "é".repeat(10);
        assert!(validate_ticket(&form, 10).is_ok());
    }

    #[test]
    fn test_ticket_empty_id_means_create() {
        let mut form = ticket_form(" Printer ", "in_progress");
        form.ticket_id = Some(String::new());
        let valid = validate_ticket(&form, DEFAULT_DESCRIPTION_MAX_LEN).unwrap();
        assert_eq!(valid.ticket_id, None);
        assert_eq!(valid.title, "Printer");
        assert_eq!(valid.status, TicketStatus::InProgress);
    }

    proptest! {
        #[test]
        fn prop_password_without_digit_rejected(password in "[A-Za-z!@#$%^&*]{0,40}") {
            prop_assert!(!is_strong_password(&password));
        }

        #[test]
        fn prop_password_with_all_classes_accepted(
            letters in "[A-Za-z]{1,10}",
            digits in "[0-9]{1,10}",
            symbols in "[!@#$%^&*]{6,10}",
        ) {
            let password = format!("{letters}{digits}{symbols}");
            prop_assert!(is_strong_password(&password));
        }

        #[test]
        fn prop_whitespace_title_never_validates(title in "[ \t\n]{0,20}") {
            prop_assert!(validate_ticket(&ticket_form(&title, "open"), DEFAULT_DESCRIPTION_MAX_LEN).is_err());
        }
    }
}
