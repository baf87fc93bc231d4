//! Data access facade.
//!
//! Every feature view talks to one uniform fallible interface,
//! [`RetailApi`], regardless of whether the backend is the in-memory mock
//! or a REST server. Implementations convert every failure into
//! [`ApiError`] — nothing panics across this boundary.

mod mock;
mod rest;
mod worker;

pub use mock::MockApi;
pub use rest::RestApi;
pub use worker::{ApiCommand, ApiData, ApiRequest, ApiResponse, spawn_worker};

use serde::{Deserialize, Serialize};

use crate::storage::model::{
    Customer, CustomerDraft, Expense, ExpenseDraft, Invoice, InvoiceDraft, InvoiceStatus,
    Product, ProductDraft, ReturnDraft, ReturnStatus, Sale, SaleDraft, SaleReturn, SaleStatus,
    Supplier, SupplierDraft,
};

/// Resource types served by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Sales,
    Products,
    Customers,
    Suppliers,
    Invoices,
    Expenses,
    Returns,
    Reports,
}

impl Resource {
    /// Loading scope key for this resource.
    pub fn scope(&self) -> &'static str {
        match self {
            Resource::Sales => "sales",
            Resource::Products => "products",
            Resource::Customers => "customers",
            Resource::Suppliers => "suppliers",
            Resource::Invoices => "invoices",
            Resource::Expenses => "expenses",
            Resource::Returns => "returns",
            Resource::Reports => "reports",
        }
    }
}

/// Errors crossing the facade boundary.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Network-level failure.
    Transport(String),
    /// Non-success HTTP status.
    Status(u16, String),
    /// Malformed response payload.
    Decode(String),
    NotFound(&'static str, u64),
    /// Rejected request payload.
    Invalid(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {}", msg),
            ApiError::Status(code, msg) => write!(f, "server returned {}: {}", code, msg),
            ApiError::Decode(msg) => write!(f, "bad response: {}", msg),
            ApiError::NotFound(kind, id) => write!(f, "{} {} not found", kind, id),
            ApiError::Invalid(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

/// Sales totals broken down by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_cents: i64,
    pub count: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

/// Expense totals by category, largest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub total_cents: i64,
    pub by_category: Vec<(String, i64)>,
}

/// One entry of the best-sellers aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

/// The uniform asynchronous contract every feature view calls.
///
/// Both backends implement the full surface; an operation a backend cannot
/// serve must return an error, never be absent.
pub trait RetailApi: Send {
    // Products
    fn list_products(&self) -> ApiResult<Vec<Product>>;
    fn get_product(&self, id: u64) -> ApiResult<Product>;
    fn create_product(&self, draft: ProductDraft) -> ApiResult<Product>;
    fn update_product(&self, id: u64, draft: ProductDraft) -> ApiResult<Product>;
    fn delete_product(&self, id: u64) -> ApiResult<()>;

    // Customers
    fn list_customers(&self) -> ApiResult<Vec<Customer>>;
    fn get_customer(&self, id: u64) -> ApiResult<Customer>;
    fn create_customer(&self, draft: CustomerDraft) -> ApiResult<Customer>;
    fn update_customer(&self, id: u64, draft: CustomerDraft) -> ApiResult<Customer>;
    fn delete_customer(&self, id: u64) -> ApiResult<()>;

    // Suppliers
    fn list_suppliers(&self) -> ApiResult<Vec<Supplier>>;
    fn get_supplier(&self, id: u64) -> ApiResult<Supplier>;
    fn create_supplier(&self, draft: SupplierDraft) -> ApiResult<Supplier>;
    fn update_supplier(&self, id: u64, draft: SupplierDraft) -> ApiResult<Supplier>;
    fn delete_supplier(&self, id: u64) -> ApiResult<()>;

    // Sales
    fn list_sales(&self) -> ApiResult<Vec<Sale>>;
    fn get_sale(&self, id: u64) -> ApiResult<Sale>;
    fn create_sale(&self, draft: SaleDraft) -> ApiResult<Sale>;
    fn delete_sale(&self, id: u64) -> ApiResult<()>;
    fn update_sale_status(&self, id: u64, status: SaleStatus) -> ApiResult<Sale>;

    // Invoices
    fn list_invoices(&self) -> ApiResult<Vec<Invoice>>;
    fn get_invoice(&self, id: u64) -> ApiResult<Invoice>;
    fn create_invoice(&self, draft: InvoiceDraft) -> ApiResult<Invoice>;
    fn update_invoice(&self, id: u64, draft: InvoiceDraft) -> ApiResult<Invoice>;
    fn delete_invoice(&self, id: u64) -> ApiResult<()>;
    fn update_invoice_status(&self, id: u64, status: InvoiceStatus) -> ApiResult<Invoice>;

    // Expenses
    fn list_expenses(&self) -> ApiResult<Vec<Expense>>;
    fn get_expense(&self, id: u64) -> ApiResult<Expense>;
    fn create_expense(&self, draft: ExpenseDraft) -> ApiResult<Expense>;
    fn update_expense(&self, id: u64, draft: ExpenseDraft) -> ApiResult<Expense>;
    fn delete_expense(&self, id: u64) -> ApiResult<()>;

    // Returns
    fn list_returns(&self) -> ApiResult<Vec<SaleReturn>>;
    fn get_return(&self, id: u64) -> ApiResult<SaleReturn>;
    fn create_return(&self, draft: ReturnDraft) -> ApiResult<SaleReturn>;
    fn delete_return(&self, id: u64) -> ApiResult<()>;
    fn update_return_status(&self, id: u64, status: ReturnStatus) -> ApiResult<SaleReturn>;

    // Report aggregates
    fn sales_report(&self) -> ApiResult<SalesReport>;
    fn expense_report(&self) -> ApiResult<ExpenseReport>;
    fn top_products(&self, limit: usize) -> ApiResult<Vec<TopProduct>>;
}
