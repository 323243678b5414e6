use crate::form::FieldId;
use crate::models::{Credentials, Registration};

pub(crate) const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub(crate) const MSG_EMAIL_MALFORMED: &str = "Enter a valid email";
pub(crate) const MSG_PASSWORD_REQUIRED: &str = "Password is required";
pub(crate) const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub(crate) const MSG_NAME_REQUIRED: &str = "Name is required";

/// One broken rule: which field, and the message shown next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Violation {
    pub field: FieldId,
    pub message: &'static str,
}

impl Violation {
    fn new(field: FieldId, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn is_well_formed_email(email: &str) -> bool {
    email_address::EmailAddress::parse_with_options(
        email,
        email_address::Options::default().with_required_tld(),
    )
    .is_ok()
}

fn check_email(email: &str, out: &mut Vec<Violation>) {
    if email.is_empty() {
        out.push(Violation::new(FieldId::Email, MSG_EMAIL_REQUIRED));
    } else if !is_well_formed_email(email) {
        out.push(Violation::new(FieldId::Email, MSG_EMAIL_MALFORMED));
    }
}

/// Checks the sign-in rule set over the raw field values.
///
/// Collects every violation instead of stopping at the first, so each
/// offending field gets its own inline message. Values are passed
/// through untouched on success.
pub(crate) fn validate_sign_in(email: &str, password: &str) -> Result<Credentials, Vec<Violation>> {
    let mut violations = Vec::new();

    check_email(email, &mut violations);
    if password.is_empty() {
        violations.push(Violation::new(FieldId::Password, MSG_PASSWORD_REQUIRED));
    }

    if violations.is_empty() {
        Ok(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })
    } else {
        Err(violations)
    }
}

/// Sign-up rule set: name required, email as for sign-in, password with
/// a minimum length.
pub(crate) fn validate_sign_up(
    name: &str,
    email: &str,
    password: &str,
) -> Result<Registration, Vec<Violation>> {
    let mut violations = Vec::new();

    if name.trim().is_empty() {
        violations.push(Violation::new(FieldId::Name, MSG_NAME_REQUIRED));
    }
    check_email(email, &mut violations);
    if password.is_empty() {
        violations.push(Violation::new(FieldId::Password, MSG_PASSWORD_REQUIRED));
    } else if password.len() < 6 {
        violations.push(Violation::new(FieldId::Password, MSG_PASSWORD_TOO_SHORT));
    }

    if violations.is_empty() {
        Ok(Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_of(violations: &[Violation]) -> Vec<FieldId> {
        violations.iter().map(|v| v.field).collect()
    }

    #[test]
    fn test_sign_in_empty_fields_collects_both_violations() {
        let violations = validate_sign_in("", "").expect_err("empty form should not validate");
        assert_eq!(violations.len(), 2);
        assert!(fields_of(&violations).contains(&FieldId::Email));
        assert!(fields_of(&violations).contains(&FieldId::Password));
    }

    #[test]
    fn test_sign_in_empty_fields_messages() {
        let violations = validate_sign_in("", "").expect_err("empty form should not validate");
        assert_eq!(violations[0].message, MSG_EMAIL_REQUIRED);
        assert_eq!(violations[1].message, MSG_PASSWORD_REQUIRED);
    }

    #[test]
    fn test_sign_in_malformed_email_flags_email_only() {
        let violations =
            validate_sign_in("not-an-email", "hunter2").expect_err("bad email should not validate");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, FieldId::Email);
        assert_eq!(violations[0].message, MSG_EMAIL_MALFORMED);
    }

    #[test]
    fn test_sign_in_email_without_tld_is_malformed() {
        let violations =
            validate_sign_in("ada@localhost", "hunter2").expect_err("tld is required");
        assert_eq!(violations[0].field, FieldId::Email);
        assert_eq!(violations[0].message, MSG_EMAIL_MALFORMED);
    }

    #[test]
    fn test_sign_in_whitespace_email_is_malformed_not_missing() {
        // Mirrors the form widget: a non-empty value is never "required",
        // it just fails the well-formedness rule.
        let violations = validate_sign_in("   ", "hunter2").expect_err("blank email");
        assert_eq!(violations[0].message, MSG_EMAIL_MALFORMED);
    }

    #[test]
    fn test_sign_in_valid_input_passes_values_through_exactly() {
        let credentials =
            validate_sign_in("ada@example.com", " spaced pass ").expect("should validate");
        assert_eq!(credentials.email, "ada@example.com");
        assert_eq!(credentials.password, " spaced pass ");
    }

    #[test]
    fn test_sign_up_collects_all_violations() {
        let violations = validate_sign_up("", "nope", "abc").expect_err("should not validate");
        assert_eq!(
            fields_of(&violations),
            vec![FieldId::Name, FieldId::Email, FieldId::Password]
        );
        assert_eq!(violations[2].message, MSG_PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_sign_up_valid_input() {
        let registration =
            validate_sign_up("Ada", "ada@example.com", "hunter2").expect("should validate");
        assert_eq!(registration.name, "Ada");
        assert_eq!(registration.email, "ada@example.com");
    }

    #[test]
    fn test_sign_up_password_required_beats_length_rule() {
        let violations = validate_sign_up("Ada", "ada@example.com", "").expect_err("no password");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, MSG_PASSWORD_REQUIRED);
    }
}
