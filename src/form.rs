//! Invitee Form State
//!
//! Per-field value/touched/validity tracking for the "add friend" form.
//! Every update replaces the whole `FieldState`; validity is recomputed on
//! each replacement so it never lags behind the value.

use crate::validator::{self, Validator};

/// Fields of the invitee form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Firstname,
    Lastname,
    Email,
    Cellphone,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Firstname,
        FieldName::Lastname,
        FieldName::Email,
        FieldName::Cellphone,
    ];

    fn index(self) -> usize {
        match self {
            FieldName::Firstname => 0,
            FieldName::Lastname => 1,
            FieldName::Email => 2,
            FieldName::Cellphone => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Firstname => "firstname",
            FieldName::Lastname => "lastname",
            FieldName::Email => "email",
            FieldName::Cellphone => "cellphone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Firstname => "First name",
            FieldName::Lastname => "Last name",
            FieldName::Email => "Email",
            FieldName::Cellphone => "Cellphone",
        }
    }
}

/// Static wiring of a field: survives `reset()`
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub required: bool,
    pub validator: Option<Validator>,
    /// Field whose current value is passed to `validator`
    pub depends_on: Option<FieldName>,
}

impl FieldSpec {
    pub fn required() -> Self {
        Self { required: true, validator: None, depends_on: None }
    }

    pub fn required_with(validator: Validator) -> Self {
        Self { required: true, validator: Some(validator), depends_on: None }
    }
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub is_valid: bool,
    spec: FieldSpec,
}

impl FieldState {
    /// Empty, untouched and invalid
    pub fn blank(spec: FieldSpec) -> Self {
        Self {
            value: String::new(),
            touched: false,
            is_valid: false,
            spec,
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Copy with a new value; validity is settled by the form
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self { value: value.into(), ..self.clone() }
    }

    fn touched(&self) -> Self {
        Self { touched: true, ..self.clone() }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    fields: [FieldState; 4],
}

impl Default for FormState {
    fn default() -> Self {
        Self::invitee_form()
    }
}

impl FormState {
    /// Four required fields; email and cellphone carry format validators
    pub fn invitee_form() -> Self {
        Self::from_specs(|name| match name {
            FieldName::Firstname | FieldName::Lastname => FieldSpec::required(),
            FieldName::Email => FieldSpec::required_with(validator::valid_email),
            FieldName::Cellphone => FieldSpec::required_with(validator::valid_cellphone),
        })
    }

    pub fn from_specs(spec_for: impl Fn(FieldName) -> FieldSpec) -> Self {
        Self {
            fields: FieldName::ALL.map(|name| FieldState::blank(spec_for(name))),
        }
    }

    pub fn field(&self, name: FieldName) -> &FieldState {
        &self.fields[name.index()]
    }

    pub fn value(&self, name: FieldName) -> &str {
        &self.field(name).value
    }

    pub fn set_value(&mut self, name: FieldName, raw: impl Into<String>) {
        let next = self.field(name).with_value(raw);
        self.replace(name, next);

        for dependent in FieldName::ALL {
            if dependent != name && self.field(dependent).spec.depends_on == Some(name) {
                let refreshed = self.field(dependent).clone();
                self.replace(dependent, refreshed);
            }
        }
    }

    pub fn mark_touched(&mut self, name: FieldName) {
        let next = self.field(name).touched();
        self.replace(name, next);
    }

    /// Surface every field's error at once
    pub fn touch_all(&mut self) {
        for name in FieldName::ALL {
            self.mark_touched(name);
        }
    }

    pub fn all_valid(&self) -> bool {
        self.fields.iter().all(|field| field.is_valid)
    }

    pub fn reset(&mut self) {
        self.fields = FieldName::ALL.map(|name| FieldState::blank(self.field(name).spec));
    }

    /// Error styling rule: only after the user has been in the field
    pub fn shows_error(&self, name: FieldName) -> bool {
        let field = self.field(name);
        field.touched && !field.is_valid
    }

    /// Store `next` under `name` with validity evaluated against the
    /// dependent's current value
    fn replace(&mut self, name: FieldName, mut next: FieldState) {
        let dependent = next
            .spec
            .depends_on
            .map(|other| self.value(other).to_owned());
        next.is_valid = validator::evaluate(&next, dependent.as_deref());
        self.fields[name.index()] = next;
    }
}
