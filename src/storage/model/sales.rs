//! Sales, invoices and returns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    Completed,
    Pending,
    Cancelled,
}

impl SaleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Pending => "pending",
            SaleStatus::Cancelled => "cancelled",
        }
    }

    /// Next status in the cycle order, for the status-cycling action.
    pub fn next(&self) -> SaleStatus {
        match self {
            SaleStatus::Completed => SaleStatus::Pending,
            SaleStatus::Pending => SaleStatus::Cancelled,
            SaleStatus::Cancelled => SaleStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Overdue,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn next(&self) -> InvoiceStatus {
        match self {
            InvoiceStatus::Paid => InvoiceStatus::Unpaid,
            InvoiceStatus::Unpaid => InvoiceStatus::Overdue,
            InvoiceStatus::Overdue => InvoiceStatus::Paid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReturnStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
        }
    }

    pub fn next(&self) -> ReturnStatus {
        match self {
            ReturnStatus::Pending => ReturnStatus::Approved,
            ReturnStatus::Approved => ReturnStatus::Rejected,
            ReturnStatus::Rejected => ReturnStatus::Pending,
        }
    }
}

/// One line of a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: u64,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl SaleItem {
    pub fn line_total_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: u64,
    /// Receipt number, e.g. `R-1042`.
    pub receipt: String,
    pub customer_name: String,
    pub items: Vec<SaleItem>,
    pub total_cents: i64,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Payload for recording a new sale: one product line, resolved by SKU.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer_name: String,
    pub product_sku: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    /// Invoice number, e.g. `INV-2031`.
    pub number: String,
    pub supplier_name: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub number: String,
    pub supplier_name: String,
    pub amount_cents: i64,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
}

impl InvoiceDraft {
    pub fn into_invoice(self, id: u64) -> Invoice {
        Invoice {
            id,
            number: self.number,
            supplier_name: self.supplier_name,
            amount_cents: self.amount_cents,
            status: InvoiceStatus::Unpaid,
            issued_on: self.issued_on,
            due_on: self.due_on,
        }
    }

    pub fn apply_to(self, invoice: &mut Invoice) {
        invoice.number = self.number;
        invoice.supplier_name = self.supplier_name;
        invoice.amount_cents = self.amount_cents;
        invoice.issued_on = self.issued_on;
        invoice.due_on = self.due_on;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReturn {
    pub id: u64,
    pub sale_id: u64,
    pub product_name: String,
    pub quantity: i64,
    pub refund_cents: i64,
    pub reason: String,
    pub status: ReturnStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for filing a return against an existing sale. The refund amount
/// is computed by the backend from the sale's line prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnDraft {
    pub sale_id: u64,
    pub product_name: String,
    pub quantity: i64,
    pub reason: String,
}
