//! Sales view configuration.
//!
//! Sales are recorded and deleted, never edited; the status cycles
//! through the `u` action instead.

use crate::fmt::{format_datetime, format_money};
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Sale, SaleDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Sale {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "receipt" => FieldValue::Text(self.receipt.clone()),
            "customer" => FieldValue::Text(self.customer_name.clone()),
            "items" => FieldValue::Int(self.item_count()),
            "total" => FieldValue::Int(self.total_cents),
            "status" => FieldValue::Text(self.status.label().to_string()),
            "date" => FieldValue::Text(format_datetime(&self.created_at)),
            _ => FieldValue::Missing,
        }
    }
}

fn render_total(s: &Sale) -> String {
    format_money(s.total_cents)
}

pub static COLUMNS: &[Column<Sale>] = &[
    Column {
        key: "receipt",
        title: "RECEIPT",
        width: 9,
        sortable: true,
        render: None,
    },
    Column {
        key: "customer",
        title: "CUSTOMER",
        width: 18,
        sortable: true,
        render: None,
    },
    Column {
        key: "items",
        title: "ITEMS",
        width: 6,
        sortable: true,
        render: None,
    },
    Column {
        key: "total",
        title: "TOTAL",
        width: 10,
        sortable: true,
        render: Some(render_total),
    },
    Column {
        key: "status",
        title: "STATUS",
        width: 10,
        sortable: true,
        render: None,
    },
    Column {
        key: "date",
        title: "DATE",
        width: 17,
        sortable: true,
        render: None,
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "customer",
        label: "Customer",
        rules: &[Rule::MaxLen(60)],
    },
    FieldSpec {
        key: "sku",
        label: "Product SKU",
        rules: &[Rule::Required, Rule::MaxLen(20)],
    },
    FieldSpec {
        key: "quantity",
        label: "Quantity",
        rules: &[Rule::Required, Rule::Numeric],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("Record sale", FORM_FIELDS)
}

pub fn draft_from(form: &FormState) -> SaleDraft {
    SaleDraft {
        customer_name: form.text("customer"),
        product_sku: form.text("sku"),
        quantity: form.int("quantity"),
    }
}

pub fn detail_lines(s: &Sale) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Receipt", s.receipt.clone()),
        ("Customer", s.customer_name.clone()),
        ("Status", s.status.label().to_string()),
        ("Date", format_datetime(&s.created_at)),
        ("Total", format_money(s.total_cents)),
    ];
    for item in &s.items {
        lines.push((
            "Line",
            format!(
                "{} × {} @ {}",
                item.quantity,
                item.name,
                format_money(item.unit_price_cents)
            ),
        ));
    }
    lines
}
