//! Sale returns view configuration.
//!
//! Returns are filed against an existing sale and cycle through pending /
//! approved / rejected; the refund amount comes from the backend.

use crate::fmt::{format_datetime, format_money};
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{ReturnDraft, SaleReturn};
use crate::table::{Column, FieldValue, Record};

impl Record for SaleReturn {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "sale" => FieldValue::Int(self.sale_id as i64),
            "product" => FieldValue::Text(self.product_name.clone()),
            "quantity" => FieldValue::Int(self.quantity),
            "refund" => FieldValue::Int(self.refund_cents),
            "reason" => FieldValue::Text(self.reason.clone()),
            "status" => FieldValue::Text(self.status.label().to_string()),
            "date" => FieldValue::Text(format_datetime(&self.created_at)),
            _ => FieldValue::Missing,
        }
    }
}

fn render_refund(r: &SaleReturn) -> String {
    format_money(r.refund_cents)
}

pub static COLUMNS: &[Column<SaleReturn>] = &[
    Column {
        key: "sale",
        title: "SALE",
        width: 6,
        sortable: true,
        render: None,
    },
    Column {
        key: "product",
        title: "PRODUCT",
        width: 22,
        sortable: true,
        render: None,
    },
    Column {
        key: "quantity",
        title: "QTY",
        width: 5,
        sortable: true,
        render: None,
    },
    Column {
        key: "refund",
        title: "REFUND",
        width: 9,
        sortable: true,
        render: Some(render_refund),
    },
    Column {
        key: "reason",
        title: "REASON",
        width: 24,
        sortable: false,
        render: None,
    },
    Column {
        key: "status",
        title: "STATUS",
        width: 9,
        sortable: true,
        render: None,
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "sale",
        label: "Sale id",
        rules: &[Rule::Required, Rule::Numeric],
    },
    FieldSpec {
        key: "product",
        label: "Product name",
        rules: &[Rule::Required, Rule::MaxLen(60)],
    },
    FieldSpec {
        key: "quantity",
        label: "Quantity",
        rules: &[Rule::Required, Rule::Numeric],
    },
    FieldSpec {
        key: "reason",
        label: "Reason",
        rules: &[Rule::Required, Rule::MaxLen(120)],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("File return", FORM_FIELDS)
}

pub fn draft_from(form: &FormState) -> ReturnDraft {
    ReturnDraft {
        sale_id: form.int("sale") as u64,
        product_name: form.text("product"),
        quantity: form.int("quantity"),
        reason: form.text("reason"),
    }
}

pub fn detail_lines(r: &SaleReturn) -> Vec<(&'static str, String)> {
    vec![
        ("Sale id", r.sale_id.to_string()),
        ("Product", r.product_name.clone()),
        ("Quantity", r.quantity.to_string()),
        ("Refund", format_money(r.refund_cents)),
        ("Reason", r.reason.clone()),
        ("Status", r.status.label().to_string()),
        ("Filed", format_datetime(&r.created_at)),
    ]
}
