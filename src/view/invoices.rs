//! Supplier invoices view configuration.

use crate::fmt::{format_date, format_money};
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Invoice, InvoiceDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Invoice {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "number" => FieldValue::Text(self.number.clone()),
            "supplier" => FieldValue::Text(self.supplier_name.clone()),
            "amount" => FieldValue::Int(self.amount_cents),
            "status" => FieldValue::Text(self.status.label().to_string()),
            "issued" => FieldValue::Text(format_date(&self.issued_on)),
            "due" => FieldValue::Text(format_date(&self.due_on)),
            _ => FieldValue::Missing,
        }
    }
}

fn render_amount(i: &Invoice) -> String {
    format_money(i.amount_cents)
}

pub static COLUMNS: &[Column<Invoice>] = &[
    Column {
        key: "number",
        title: "NUMBER",
        width: 10,
        sortable: true,
        render: None,
    },
    Column {
        key: "supplier",
        title: "SUPPLIER",
        width: 22,
        sortable: true,
        render: None,
    },
    Column {
        key: "amount",
        title: "AMOUNT",
        width: 10,
        sortable: true,
        render: Some(render_amount),
    },
    Column {
        key: "status",
        title: "STATUS",
        width: 8,
        sortable: true,
        render: None,
    },
    Column {
        key: "issued",
        title: "ISSUED",
        width: 11,
        sortable: true,
        render: None,
    },
    Column {
        key: "due",
        title: "DUE",
        width: 11,
        sortable: true,
        render: None,
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "number",
        label: "Number",
        rules: &[Rule::Required, Rule::MaxLen(20)],
    },
    FieldSpec {
        key: "supplier",
        label: "Supplier",
        rules: &[Rule::Required, Rule::MaxLen(60)],
    },
    FieldSpec {
        key: "amount",
        label: "Amount",
        rules: &[Rule::Required, Rule::Money],
    },
    FieldSpec {
        key: "issued",
        label: "Issued on",
        rules: &[Rule::Required, Rule::Date],
    },
    FieldSpec {
        key: "due",
        label: "Due on",
        rules: &[Rule::Required, Rule::Date],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("New invoice", FORM_FIELDS)
}

pub fn edit_form(i: &Invoice) -> FormState {
    FormState::new(format!("Edit invoice {}", i.number), FORM_FIELDS).with_values(&[
        ("number", i.number.clone()),
        ("supplier", i.supplier_name.clone()),
        ("amount", format!("{}.{:02}", i.amount_cents / 100, i.amount_cents % 100)),
        ("issued", format_date(&i.issued_on)),
        ("due", format_date(&i.due_on)),
    ])
}

/// Builds the payload from a validated form; the date rules guarantee the
/// unwrapped parses succeed.
pub fn draft_from(form: &FormState) -> InvoiceDraft {
    InvoiceDraft {
        number: form.text("number"),
        supplier_name: form.text("supplier"),
        amount_cents: form.money_cents("amount"),
        issued_on: form.date("issued").unwrap_or_default(),
        due_on: form.date("due").unwrap_or_default(),
    }
}

pub fn detail_lines(i: &Invoice) -> Vec<(&'static str, String)> {
    vec![
        ("Number", i.number.clone()),
        ("Supplier", i.supplier_name.clone()),
        ("Amount", format_money(i.amount_cents)),
        ("Status", i.status.label().to_string()),
        ("Issued on", format_date(&i.issued_on)),
        ("Due on", format_date(&i.due_on)),
    ]
}
