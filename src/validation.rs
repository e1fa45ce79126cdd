// Contact form validation.
//
// Deliberately lenient: the goal is catching obvious typos before the
// booking request leaves the client, not enforcing a phone number format.

use regex::Regex;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_CHARS: usize = 8;

pub const MSG_NAME_TOO_SHORT: &str = "El nombre debe tener al menos 2 caracteres";
pub const MSG_PHONE_TOO_SHORT: &str = "El teléfono debe tener al menos 8 dígitos";
pub const MSG_PHONE_INVALID_CHARS: &str = "El teléfono contiene caracteres inválidos";

/// Per-field validation messages for the contact step. An empty value in
/// a field means that field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }

    /// Drop the name message, used when the user edits the name field.
    pub fn clear_name(&mut self) {
        self.name = None;
    }

    /// Drop the phone message, used when the user edits the phone field.
    pub fn clear_phone(&mut self) {
        self.phone = None;
    }
}

/// Validate the contact fields of the booking form.
///
/// Names need at least two characters after trimming. Phones need at
/// least eight characters after trimming and may only contain digits,
/// whitespace, hyphens and parentheses. An empty phone only reports the
/// length message; when both rules fail on a non-empty phone, the
/// character message wins.
pub fn validate_contact(name: &str, phone: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if name.trim().chars().count() < MIN_NAME_CHARS {
        errors.name = Some(MSG_NAME_TOO_SHORT.to_string());
    }

    if phone.trim().chars().count() < MIN_PHONE_CHARS {
        errors.phone = Some(MSG_PHONE_TOO_SHORT.to_string());
    }

    // The format check only applies once there is something to check.
    let phone_pattern = Regex::new(r"^[\d\s\-()]+$").expect("Invalid regex pattern");
    if !phone.is_empty() && !phone_pattern.is_match(phone) {
        errors.phone = Some(MSG_PHONE_INVALID_CHARS.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact_passes() {
        let errors = validate_contact("Juan Pérez", "11 4567-8901");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_short_name_rejected() {
        let errors = validate_contact("J", "12345678");
        assert_eq!(errors.name.as_deref(), Some(MSG_NAME_TOO_SHORT));
        assert!(errors.phone.is_none());
    }

    #[test]
    fn test_whitespace_only_name_rejected() {
        let errors = validate_contact("   ", "12345678");
        assert_eq!(errors.name.as_deref(), Some(MSG_NAME_TOO_SHORT));
    }

    #[test]
    fn test_two_char_name_accepted() {
        let errors = validate_contact("Jo", "12345678");
        assert!(errors.name.is_none());
    }

    #[test]
    fn test_short_phone_rejected() {
        let errors = validate_contact("Juan", "123");
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_TOO_SHORT));
    }

    #[test]
    fn test_empty_phone_reports_length_message() {
        let errors = validate_contact("Juan", "");
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_TOO_SHORT));

        let errors = validate_contact("Juan", "   ");
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_TOO_SHORT));
    }

    #[test]
    fn test_phone_with_letters_rejected() {
        let errors = validate_contact("Juan", "12a45678");
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_INVALID_CHARS));
    }

    #[test]
    fn test_character_message_wins_when_both_phone_rules_fail() {
        let errors = validate_contact("Juan", "12a");
        assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_INVALID_CHARS));
    }

    #[test]
    fn test_phone_allows_separators_and_parentheses() {
        let errors = validate_contact("Ana", "(011) 4567-8901");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_both_fields_reported_together() {
        let errors = validate_contact("", "12");
        assert!(errors.name.is_some());
        assert!(errors.phone.is_some());
        assert!(!errors.is_empty());
    }
}
