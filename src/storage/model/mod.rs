//! Domain records.
//!
//! Pure data: serde-serializable structs with integer-cents money amounts
//! and chrono timestamps. No I/O and no UI concerns live here.

mod catalog;
mod contacts;
mod finance;
mod sales;

pub use catalog::*;
pub use contacts::*;
pub use finance::*;
pub use sales::*;

use serde::{Deserialize, Serialize};

/// Id counters per record type, persisted with the data so identities stay
/// stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NextIds {
    pub product: u64,
    pub customer: u64,
    pub supplier: u64,
    pub sale: u64,
    pub invoice: u64,
    pub expense: u64,
    pub sale_return: u64,
}

fn allocate(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// The full in-memory dataset for every resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub sales: Vec<Sale>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub returns: Vec<SaleReturn>,
    pub next_ids: NextIds,
}

impl Dataset {
    pub fn next_product_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.product)
    }

    pub fn next_customer_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.customer)
    }

    pub fn next_supplier_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.supplier)
    }

    pub fn next_sale_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.sale)
    }

    pub fn next_invoice_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.invoice)
    }

    pub fn next_expense_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.expense)
    }

    pub fn next_return_id(&mut self) -> u64 {
        allocate(&mut self.next_ids.sale_return)
    }
}
