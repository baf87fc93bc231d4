//! Expenses view configuration.

use crate::fmt::{format_date, format_money};
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Expense, ExpenseDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Expense {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "date" => FieldValue::Text(format_date(&self.spent_on)),
            "category" => FieldValue::Text(self.category.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "amount" => FieldValue::Int(self.amount_cents),
            _ => FieldValue::Missing,
        }
    }
}

fn render_amount(e: &Expense) -> String {
    format_money(e.amount_cents)
}

pub static COLUMNS: &[Column<Expense>] = &[
    Column {
        key: "date",
        title: "DATE",
        width: 11,
        sortable: true,
        render: None,
    },
    Column {
        key: "category",
        title: "CATEGORY",
        width: 14,
        sortable: true,
        render: None,
    },
    Column {
        key: "description",
        title: "DESCRIPTION",
        width: 30,
        sortable: false,
        render: None,
    },
    Column {
        key: "amount",
        title: "AMOUNT",
        width: 10,
        sortable: true,
        render: Some(render_amount),
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "category",
        label: "Category",
        rules: &[Rule::Required, Rule::MaxLen(30)],
    },
    FieldSpec {
        key: "description",
        label: "Description",
        rules: &[Rule::Required, Rule::MaxLen(120)],
    },
    FieldSpec {
        key: "amount",
        label: "Amount",
        rules: &[Rule::Required, Rule::Money],
    },
    FieldSpec {
        key: "date",
        label: "Date",
        rules: &[Rule::Required, Rule::Date],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("New expense", FORM_FIELDS)
}

pub fn edit_form(e: &Expense) -> FormState {
    FormState::new("Edit expense", FORM_FIELDS).with_values(&[
        ("category", e.category.clone()),
        ("description", e.description.clone()),
        ("amount", format!("{}.{:02}", e.amount_cents / 100, e.amount_cents % 100)),
        ("date", format_date(&e.spent_on)),
    ])
}

pub fn draft_from(form: &FormState) -> ExpenseDraft {
    ExpenseDraft {
        category: form.text("category"),
        description: form.text("description"),
        amount_cents: form.money_cents("amount"),
        spent_on: form.date("date").unwrap_or_default(),
    }
}

pub fn detail_lines(e: &Expense) -> Vec<(&'static str, String)> {
    vec![
        ("Date", format_date(&e.spent_on)),
        ("Category", e.category.clone()),
        ("Description", e.description.clone()),
        ("Amount", format_money(e.amount_cents)),
    ]
}
