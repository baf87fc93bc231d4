//! Inventory (products) view configuration.

use crate::fmt::{format_datetime, format_money};
use crate::form::{FieldSpec, FormState, Rule};
use crate::storage::model::{Product, ProductDraft};
use crate::table::{Column, FieldValue, Record};

impl Record for Product {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "sku" => FieldValue::Text(self.sku.clone()),
            "name" => FieldValue::Text(self.name.clone()),
            "category" => FieldValue::Text(self.category.clone()),
            "price" => FieldValue::Int(self.price_cents),
            "cost" => FieldValue::Int(self.cost_cents),
            "stock" => FieldValue::Int(self.stock),
            "reorder" => FieldValue::Int(self.reorder_level),
            "created" => FieldValue::Text(format_datetime(&self.created_at)),
            _ => FieldValue::Missing,
        }
    }
}

fn render_price(p: &Product) -> String {
    format_money(p.price_cents)
}

fn render_cost(p: &Product) -> String {
    format_money(p.cost_cents)
}

fn render_stock(p: &Product) -> String {
    if p.is_low_stock() {
        format!("{} LOW", p.stock)
    } else {
        p.stock.to_string()
    }
}

pub static COLUMNS: &[Column<Product>] = &[
    Column {
        key: "sku",
        title: "SKU",
        width: 10,
        sortable: true,
        render: None,
    },
    Column {
        key: "name",
        title: "NAME",
        width: 24,
        sortable: true,
        render: None,
    },
    Column {
        key: "category",
        title: "CATEGORY",
        width: 12,
        sortable: true,
        render: None,
    },
    Column {
        key: "price",
        title: "PRICE",
        width: 9,
        sortable: true,
        render: Some(render_price),
    },
    Column {
        key: "cost",
        title: "COST",
        width: 9,
        sortable: true,
        render: Some(render_cost),
    },
    Column {
        key: "stock",
        title: "STOCK",
        width: 9,
        sortable: true,
        render: Some(render_stock),
    },
];

pub static FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "sku",
        label: "SKU",
        rules: &[Rule::Required, Rule::MaxLen(20)],
    },
    FieldSpec {
        key: "name",
        label: "Name",
        rules: &[Rule::Required, Rule::MaxLen(60)],
    },
    FieldSpec {
        key: "category",
        label: "Category",
        rules: &[Rule::Required, Rule::MaxLen(30)],
    },
    FieldSpec {
        key: "price",
        label: "Price",
        rules: &[Rule::Required, Rule::Money],
    },
    FieldSpec {
        key: "cost",
        label: "Cost",
        rules: &[Rule::Required, Rule::Money],
    },
    FieldSpec {
        key: "stock",
        label: "Stock",
        rules: &[Rule::Required, Rule::Numeric],
    },
    FieldSpec {
        key: "reorder",
        label: "Reorder level",
        rules: &[Rule::Required, Rule::Numeric],
    },
];

pub fn blank_form() -> FormState {
    FormState::new("New product", FORM_FIELDS)
}

pub fn edit_form(p: &Product) -> FormState {
    FormState::new(format!("Edit product {}", p.sku), FORM_FIELDS).with_values(&[
        ("sku", p.sku.clone()),
        ("name", p.name.clone()),
        ("category", p.category.clone()),
        ("price", format!("{}.{:02}", p.price_cents / 100, p.price_cents % 100)),
        ("cost", format!("{}.{:02}", p.cost_cents / 100, p.cost_cents % 100)),
        ("stock", p.stock.to_string()),
        ("reorder", p.reorder_level.to_string()),
    ])
}

/// Builds the payload from a validated form.
pub fn draft_from(form: &FormState, existing: Option<&Product>) -> ProductDraft {
    ProductDraft {
        sku: form.text("sku"),
        name: form.text("name"),
        category: form.text("category"),
        price_cents: form.money_cents("price"),
        cost_cents: form.money_cents("cost"),
        stock: form.int("stock"),
        reorder_level: form.int("reorder"),
        supplier_id: existing.and_then(|p| p.supplier_id),
    }
}

pub fn detail_lines(p: &Product) -> Vec<(&'static str, String)> {
    vec![
        ("SKU", p.sku.clone()),
        ("Name", p.name.clone()),
        ("Category", p.category.clone()),
        ("Price", format_money(p.price_cents)),
        ("Cost", format_money(p.cost_cents)),
        ("Stock", p.stock.to_string()),
        ("Reorder level", p.reorder_level.to_string()),
        (
            "Supplier id",
            p.supplier_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        ),
        ("Created", format_datetime(&p.created_at)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_dataset;
    use crate::table::{TableConfig, TableState};

    #[test]
    fn low_stock_is_flagged_in_the_stock_column() {
        let ds = sample_dataset();
        let honey = ds.products.iter().find(|p| p.sku == "HON-340").unwrap();
        assert!(render_stock(honey).ends_with("LOW"));
    }

    #[test]
    fn price_column_sorts_numerically_not_lexically() {
        let ds = sample_dataset();
        let mut table = TableState::with_data(COLUMNS, TableConfig::default(), ds.products);
        // "price" is column 3.
        table.sort_by_column(3);
        let view = table.view();
        let prices: Vec<&str> = view.rows.iter().map(|r| r.cells[3].as_str()).collect();
        assert_eq!(prices.first(), Some(&"$1.59"));
    }

    #[test]
    fn edit_form_round_trips_a_product() {
        let ds = sample_dataset();
        let product = &ds.products[0];
        let mut form = edit_form(product);
        assert!(form.validate());
        let draft = draft_from(&form, Some(product));
        assert_eq!(draft.sku, product.sku);
        assert_eq!(draft.price_cents, product.price_cents);
        assert_eq!(draft.supplier_id, product.supplier_id);
    }
}
