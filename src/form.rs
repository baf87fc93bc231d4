//! Form state and field validation.
//!
//! A form is a list of text fields, each with an ordered rule list.
//! `validate()` checks rules in order and records the first failing
//! message per field; failures surface inline next to the field, never as
//! toasts.

use chrono::NaiveDate;

use crate::fmt::parse_money;

/// One validation rule. Rules run in declaration order; the first failure
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MaxLen(usize),
    /// Integer input.
    Numeric,
    /// Money amount like `12.34`.
    Money,
    /// Calendar date `YYYY-MM-DD`.
    Date,
}

fn check(rule: Rule, value: &str) -> Option<String> {
    let value = value.trim();
    match rule {
        Rule::Required => value.is_empty().then(|| "required".to_string()),
        Rule::MaxLen(max) => (value.chars().count() > max)
            .then(|| format!("must be at most {} characters", max)),
        Rule::Numeric => {
            (!value.is_empty() && value.parse::<i64>().is_err())
                .then(|| "must be a whole number".to_string())
        }
        Rule::Money => (!value.is_empty() && parse_money(value).is_none())
            .then(|| "must be an amount like 12.34".to_string()),
        Rule::Date => {
            (!value.is_empty() && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err())
                .then(|| "must be a date like 2025-03-01".to_string())
        }
    }
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

/// One editable field with its current value and validation error.
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    pub error: Option<String>,
}

/// Editable form: fields, focus cursor and validation state.
#[derive(Debug, Clone)]
pub struct FormState {
    pub title: String,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl FormState {
    pub fn new(title: impl Into<String>, specs: &'static [FieldSpec]) -> Self {
        Self {
            title: title.into(),
            fields: specs
                .iter()
                .map(|spec| FormField {
                    spec: *spec,
                    value: String::new(),
                    error: None,
                })
                .collect(),
            focused: 0,
        }
    }

    /// Prefills values by key, for edit forms.
    pub fn with_values(mut self, values: &[(&str, String)]) -> Self {
        for (key, value) in values {
            if let Some(field) = self.fields.iter_mut().find(|f| f.spec.key == *key) {
                field.value = value.clone();
            }
        }
        self
    }

    /// Runs every field's rules in order. Returns overall validity and
    /// records the first failing message per field.
    pub fn validate(&mut self) -> bool {
        let mut ok = true;
        for field in &mut self.fields {
            field.error = field
                .spec
                .rules
                .iter()
                .find_map(|&rule| check(rule, &field.value));
            ok &= field.error.is_none();
        }
        ok
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.spec.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Post-validation accessors. These assume `validate()` passed and
    /// fall back to zero values otherwise.
    pub fn int(&self, key: &str) -> i64 {
        self.value(key).trim().parse().unwrap_or(0)
    }

    pub fn money_cents(&self, key: &str) -> i64 {
        parse_money(self.value(key)).unwrap_or(0)
    }

    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value(key).trim(), "%Y-%m-%d").ok()
    }

    pub fn text(&self, key: &str) -> String {
        self.value(key).trim().to_string()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SPECS: &[FieldSpec] = &[
        FieldSpec {
            key: "name",
            label: "Name",
            rules: &[Rule::Required, Rule::MaxLen(5)],
        },
        FieldSpec {
            key: "price",
            label: "Price",
            rules: &[Rule::Required, Rule::Money],
        },
        FieldSpec {
            key: "stock",
            label: "Stock",
            rules: &[Rule::Numeric],
        },
    ];

    #[test]
    fn validate_records_first_failing_message_per_field() {
        let mut form = FormState::new("Test", SPECS)
            .with_values(&[("name", "much too long".to_string()), ("price", "x".to_string())]);
        assert!(!form.validate());

        // MaxLen is the first failing rule for "name" (Required passed).
        assert_eq!(
            form.fields[0].error.as_deref(),
            Some("must be at most 5 characters")
        );
        assert_eq!(
            form.fields[1].error.as_deref(),
            Some("must be an amount like 12.34")
        );
        // Optional numeric field left empty is fine.
        assert_eq!(form.fields[2].error, None);
    }

    #[test]
    fn empty_required_field_reports_required() {
        let mut form = FormState::new("Test", SPECS);
        assert!(!form.validate());
        assert_eq!(form.fields[0].error.as_deref(), Some("required"));
    }

    #[test]
    fn valid_form_passes_and_parses() {
        let mut form = FormState::new("Test", SPECS).with_values(&[
            ("name", "Tea".to_string()),
            ("price", "3.99".to_string()),
            ("stock", "35".to_string()),
        ]);
        assert!(form.validate());
        assert_eq!(form.money_cents("price"), 399);
        assert_eq!(form.int("stock"), 35);
    }

    #[test]
    fn editing_moves_focus_and_mutates_the_focused_field() {
        let mut form = FormState::new("Test", SPECS);
        form.insert_char('T');
        form.insert_char('e');
        form.insert_char('a');
        form.focus_next();
        form.insert_char('9');
        form.backspace();
        assert_eq!(form.value("name"), "Tea");
        assert_eq!(form.value("price"), "");
        form.focus_prev();
        assert_eq!(form.focused, 0);
    }
}
