//! Customers view configuration.

use crate::fmt::format_datetime;
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Customer, CustomerDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Customer {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::Text(self.name.clone()),
            "phone" => FieldValue::Text(self.phone.clone()),
            "email" => FieldValue::Text(self.email.clone()),
            "address" => FieldValue::Text(self.address.clone()),
            "since" => FieldValue::Text(format_datetime(&self.created_at)),
            _ => FieldValue::Missing,
        }
    }
}

pub static COLUMNS: &[Column<Customer>] = &[
    Column {
        key: "name",
        title: "NAME",
        width: 20,
        sortable: true,
        render: None,
    },
    Column {
        key: "phone",
        title: "PHONE",
        width: 12,
        sortable: true,
        render: None,
    },
    Column {
        key: "email",
        title: "EMAIL",
        width: 26,
        sortable: true,
        render: None,
    },
    Column {
        key: "address",
        title: "ADDRESS",
        width: 22,
        sortable: false,
        render: None,
    },
    Column {
        key: "since",
        title: "SINCE",
        width: 17,
        sortable: true,
        render: None,
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "name",
        label: "Name",
        rules: &[Rule::Required, Rule::MaxLen(60)],
    },
    FieldSpec {
        key: "phone",
        label: "Phone",
        rules: &[Rule::Required, Rule::MaxLen(20)],
    },
    FieldSpec {
        key: "email",
        label: "Email",
        rules: &[Rule::MaxLen(80)],
    },
    FieldSpec {
        key: "address",
        label: "Address",
        rules: &[Rule::MaxLen(120)],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("New customer", FORM_FIELDS)
}

pub fn edit_form(c: &Customer) -> FormState {
    FormState::new(format!("Edit customer {}", c.name), FORM_FIELDS).with_values(&[
        ("name", c.name.clone()),
        ("phone", c.phone.clone()),
        ("email", c.email.clone()),
        ("address", c.address.clone()),
    ])
}

pub fn draft_from(form: &FormState) -> CustomerDraft {
    CustomerDraft {
        name: form.text("name"),
        phone: form.text("phone"),
        email: form.text("email"),
        address: form.text("address"),
    }
}

pub fn detail_lines(c: &Customer) -> Vec<(&'static str, String)> {
    vec![
        ("Name", c.name.clone()),
        ("Phone", c.phone.clone()),
        ("Email", c.email.clone()),
        ("Address", c.address.clone()),
        ("Customer since", format_datetime(&c.created_at)),
    ]
}
