//! Prebuilt sample dataset for first runs and tests.
//!
//! Seeded with fixed timestamps so repeated runs and tests see identical
//! data until the user mutates it.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::model::{
    Customer, Dataset, Expense, Invoice, InvoiceStatus, NextIds, Product, ReturnStatus, Sale,
    SaleItem, SaleReturn, SaleStatus, Supplier,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn product(
    id: u64,
    sku: &str,
    name: &str,
    category: &str,
    price_cents: i64,
    cost_cents: i64,
    stock: i64,
    reorder_level: i64,
    supplier_id: Option<u64>,
) -> Product {
    Product {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price_cents,
        cost_cents,
        stock,
        reorder_level,
        supplier_id,
        created_at: at(2025, 1, 6, 9, 0),
    }
}

fn sale(
    id: u64,
    customer_name: &str,
    items: Vec<SaleItem>,
    status: SaleStatus,
    created_at: DateTime<Utc>,
) -> Sale {
    let total_cents = items.iter().map(SaleItem::line_total_cents).sum();
    Sale {
        id,
        receipt: format!("R-{}", 1000 + id),
        customer_name: customer_name.to_string(),
        items,
        total_cents,
        status,
        created_at,
    }
}

fn line(product_id: u64, name: &str, quantity: i64, unit_price_cents: i64) -> SaleItem {
    SaleItem {
        product_id,
        name: name.to_string(),
        quantity,
        unit_price_cents,
    }
}

/// A small shop's worth of data across every resource.
pub fn sample_dataset() -> Dataset {
    let products = vec![
        product(1, "COF-250", "Ground Coffee 250g", "Beverages", 749, 420, 48, 10, Some(1)),
        product(2, "TEA-020", "Green Tea 20 bags", "Beverages", 399, 210, 35, 10, Some(1)),
        product(3, "MLK-1L", "Whole Milk 1L", "Dairy", 159, 95, 60, 24, Some(2)),
        product(4, "CHE-200", "Cheddar 200g", "Dairy", 449, 280, 22, 8, Some(2)),
        product(5, "BRD-800", "Sourdough Loaf", "Bakery", 329, 140, 14, 6, Some(3)),
        product(6, "CRS-6PK", "Croissants 6-pack", "Bakery", 549, 260, 9, 6, Some(3)),
        product(7, "RIC-1KG", "Basmati Rice 1kg", "Pantry", 489, 300, 40, 12, Some(4)),
        product(8, "OIL-500", "Olive Oil 500ml", "Pantry", 899, 610, 18, 6, Some(4)),
        product(9, "CHO-100", "Dark Chocolate 100g", "Snacks", 299, 160, 55, 15, Some(1)),
        product(10, "HON-340", "Wildflower Honey 340g", "Pantry", 749, 480, 5, 8, Some(4)),
    ];

    let customers = vec![
        Customer {
            id: 1,
            name: "Maria Keller".to_string(),
            phone: "555-0141".to_string(),
            email: "maria.keller@example.com".to_string(),
            address: "12 Birch Lane".to_string(),
            created_at: at(2025, 1, 8, 11, 30),
        },
        Customer {
            id: 2,
            name: "James Okafor".to_string(),
            phone: "555-0178".to_string(),
            email: "j.okafor@example.com".to_string(),
            address: "4 Harbor Street".to_string(),
            created_at: at(2025, 1, 12, 15, 10),
        },
        Customer {
            id: 3,
            name: "Lena Fischer".to_string(),
            phone: "555-0102".to_string(),
            email: "lena.f@example.com".to_string(),
            address: "89 Mill Road".to_string(),
            created_at: at(2025, 2, 2, 10, 5),
        },
        Customer {
            id: 4,
            name: "Tom Aldridge".to_string(),
            phone: "555-0190".to_string(),
            email: "tom.aldridge@example.com".to_string(),
            address: "31 Keats Avenue".to_string(),
            created_at: at(2025, 2, 17, 17, 45),
        },
    ];

    let suppliers = vec![
        Supplier {
            id: 1,
            name: "Northbean Roasters".to_string(),
            contact_person: "Ada Lindqvist".to_string(),
            phone: "555-0200".to_string(),
            email: "orders@northbean.example".to_string(),
            created_at: at(2025, 1, 3, 9, 0),
        },
        Supplier {
            id: 2,
            name: "Valley Dairy Co".to_string(),
            contact_person: "Pete Moran".to_string(),
            phone: "555-0211".to_string(),
            email: "sales@valleydairy.example".to_string(),
            created_at: at(2025, 1, 3, 9, 0),
        },
        Supplier {
            id: 3,
            name: "Stone Oven Bakery".to_string(),
            contact_person: "Ines Barro".to_string(),
            phone: "555-0222".to_string(),
            email: "supply@stoneoven.example".to_string(),
            created_at: at(2025, 1, 4, 14, 20),
        },
        Supplier {
            id: 4,
            name: "Harvest & Pantry Ltd".to_string(),
            contact_person: "Omar Haddad".to_string(),
            phone: "555-0233".to_string(),
            email: "accounts@harvestpantry.example".to_string(),
            created_at: at(2025, 1, 4, 14, 20),
        },
    ];

    let sales = vec![
        sale(
            1,
            "Maria Keller",
            vec![line(1, "Ground Coffee 250g", 2, 749), line(9, "Dark Chocolate 100g", 1, 299)],
            SaleStatus::Completed,
            at(2025, 3, 3, 10, 12),
        ),
        sale(
            2,
            "Walk-in",
            vec![line(3, "Whole Milk 1L", 3, 159), line(5, "Sourdough Loaf", 1, 329)],
            SaleStatus::Completed,
            at(2025, 3, 3, 12, 40),
        ),
        sale(
            3,
            "James Okafor",
            vec![line(8, "Olive Oil 500ml", 1, 899)],
            SaleStatus::Pending,
            at(2025, 3, 4, 9, 55),
        ),
        sale(
            4,
            "Lena Fischer",
            vec![line(7, "Basmati Rice 1kg", 2, 489), line(4, "Cheddar 200g", 1, 449)],
            SaleStatus::Completed,
            at(2025, 3, 4, 16, 30),
        ),
        sale(
            5,
            "Walk-in",
            vec![line(6, "Croissants 6-pack", 2, 549)],
            SaleStatus::Cancelled,
            at(2025, 3, 5, 8, 20),
        ),
        sale(
            6,
            "Tom Aldridge",
            vec![line(2, "Green Tea 20 bags", 1, 399), line(10, "Wildflower Honey 340g", 1, 749)],
            SaleStatus::Completed,
            at(2025, 3, 5, 14, 5),
        ),
    ];

    let invoices = vec![
        Invoice {
            id: 1,
            number: "INV-2031".to_string(),
            supplier_name: "Northbean Roasters".to_string(),
            amount_cents: 42_500,
            status: InvoiceStatus::Paid,
            issued_on: day(2025, 2, 1),
            due_on: day(2025, 3, 1),
        },
        Invoice {
            id: 2,
            number: "INV-2032".to_string(),
            supplier_name: "Valley Dairy Co".to_string(),
            amount_cents: 18_900,
            status: InvoiceStatus::Unpaid,
            issued_on: day(2025, 2, 20),
            due_on: day(2025, 3, 20),
        },
        Invoice {
            id: 3,
            number: "INV-2033".to_string(),
            supplier_name: "Harvest & Pantry Ltd".to_string(),
            amount_cents: 27_300,
            status: InvoiceStatus::Overdue,
            issued_on: day(2025, 1, 15),
            due_on: day(2025, 2, 15),
        },
    ];

    let expenses = vec![
        Expense {
            id: 1,
            category: "Rent".to_string(),
            description: "Shopfront rent, March".to_string(),
            amount_cents: 120_000,
            spent_on: day(2025, 3, 1),
        },
        Expense {
            id: 2,
            category: "Utilities".to_string(),
            description: "Electricity".to_string(),
            amount_cents: 8_450,
            spent_on: day(2025, 3, 2),
        },
        Expense {
            id: 3,
            category: "Maintenance".to_string(),
            description: "Fridge compressor service".to_string(),
            amount_cents: 15_600,
            spent_on: day(2025, 3, 4),
        },
        Expense {
            id: 4,
            category: "Utilities".to_string(),
            description: "Water".to_string(),
            amount_cents: 3_150,
            spent_on: day(2025, 3, 5),
        },
    ];

    let returns = vec![
        SaleReturn {
            id: 1,
            sale_id: 1,
            product_name: "Dark Chocolate 100g".to_string(),
            quantity: 1,
            refund_cents: 299,
            reason: "Melted in transit".to_string(),
            status: ReturnStatus::Approved,
            created_at: at(2025, 3, 4, 11, 0),
        },
        SaleReturn {
            id: 2,
            sale_id: 4,
            product_name: "Cheddar 200g".to_string(),
            quantity: 1,
            refund_cents: 449,
            reason: "Past best-before date".to_string(),
            status: ReturnStatus::Pending,
            created_at: at(2025, 3, 5, 9, 30),
        },
    ];

    Dataset {
        products,
        customers,
        suppliers,
        sales,
        invoices,
        expenses,
        returns,
        next_ids: NextIds {
            product: 10,
            customer: 4,
            supplier: 4,
            sale: 6,
            invoice: 3,
            expense: 4,
            sale_return: 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_counters_match_seeded_ids() {
        let ds = sample_dataset();
        assert_eq!(
            ds.products.iter().map(|p| p.id).max().unwrap(),
            ds.next_ids.product
        );
        assert_eq!(
            ds.sales.iter().map(|s| s.id).max().unwrap(),
            ds.next_ids.sale
        );
        assert_eq!(
            ds.returns.iter().map(|r| r.id).max().unwrap(),
            ds.next_ids.sale_return
        );
    }

    #[test]
    fn seed_sale_totals_are_consistent() {
        let ds = sample_dataset();
        for sale in &ds.sales {
            let computed: i64 = sale.items.iter().map(SaleItem::line_total_cents).sum();
            assert_eq!(sale.total_cents, computed, "sale {}", sale.receipt);
        }
    }
}
