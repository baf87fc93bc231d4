//! Suppliers view configuration.

use crate::fmt::format_datetime;
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Supplier, SupplierDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Supplier {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::Text(self.name.clone()),
            "contact" => FieldValue::Text(self.contact_person.clone()),
            "phone" => FieldValue::Text(self.phone.clone()),
            "email" => FieldValue::Text(self.email.clone()),
            "since" => FieldValue::Text(format_datetime(&self.created_at)),
            _ => FieldValue::Missing,
        }
    }
}

pub static COLUMNS: &[Column<Supplier>] = &[
    Column {
        key: "name",
        title: "NAME",
        width: 24,
        sortable: true,
        render: None,
    },
    Column {
        key: "contact",
        title: "CONTACT",
        width: 18,
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
        width: 30,
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
        key: "contact",
        label: "Contact person",
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
];

pub fn blank_form() -> FormState {
    FormState::new("New supplier", FORM_FIELDS)
}

pub fn edit_form(s: &Supplier) -> FormState {
    FormState::new(format!("Edit supplier {}", s.name), FORM_FIELDS).with_values(&[
        ("name", s.name.clone()),
        ("contact", s.contact_person.clone()),
        ("phone", s.phone.clone()),
        ("email", s.email.clone()),
    ])
}

pub fn draft_from(form: &FormState) -> SupplierDraft {
    SupplierDraft {
        name: form.text("name"),
        contact_person: form.text("contact"),
        phone: form.text("phone"),
        email: form.text("email"),
    }
}

pub fn detail_lines(s: &Supplier) -> Vec<(&'static str, String)> {
    vec![
        ("Name", s.name.clone()),
        ("Contact person", s.contact_person.clone()),
        ("Phone", s.phone.clone()),
        ("Email", s.email.clone()),
        ("Supplier since", format_datetime(&s.created_at)),
    ]
}
