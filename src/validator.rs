//! Field Validators
//!
//! Pure checks used by the form. A validator receives the field's value and
//! the current value of the field it depends on, if any.

use std::sync::LazyLock;

use regex::Regex;

use crate::form::FieldState;

/// Plain validation function: `(value, dependent_value) -> valid`
pub type Validator = fn(&str, Option<&str>) -> bool;

/// Accepted number of digits for a cellphone
pub const CELLPHONE_DIGITS: usize = 9;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid"));

static CELLPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[0-9]{{{}}}$", CELLPHONE_DIGITS)).expect("cellphone pattern is valid")
});

/// Decide whether a field is valid given its dependent's value.
///
/// Required fields must be non-empty; the attached validator (if any) must
/// then accept the value.
pub fn evaluate(field: &FieldState, dependent: Option<&str>) -> bool {
    let spec = field.spec();
    if spec.required && field.value.is_empty() {
        return false;
    }
    match spec.validator {
        Some(validator) => validator(&field.value, dependent),
        None => true,
    }
}

/// `local@domain.tld` shape, no whitespace. Uniqueness is checked remotely.
pub fn valid_email(value: &str, _dependent: Option<&str>) -> bool {
    EMAIL_RE.is_match(value)
}

/// Digits only, exactly [`CELLPHONE_DIGITS`] of them
pub fn valid_cellphone(value: &str, _dependent: Option<&str>) -> bool {
    CELLPHONE_RE.is_match(value)
}
