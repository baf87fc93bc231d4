//! Facade request/response plumbing.
//!
//! Facade calls run on a dedicated worker thread so the UI thread never
//! blocks; completions re-enter the UI event loop via a callback. Each
//! request carries a caller-issued token — the UI applies only the latest
//! token per resource and discards stale completions.

use std::sync::mpsc::{self, Sender};
use std::thread;

use tracing::debug;

use crate::storage::model::{
    Customer, CustomerDraft, Expense, ExpenseDraft, Invoice, InvoiceDraft, InvoiceStatus,
    Product, ProductDraft, ReturnDraft, ReturnStatus, Sale, SaleDraft, SaleReturn, SaleStatus,
    Supplier, SupplierDraft,
};

use super::{
    ApiResult, ExpenseReport, Resource, RetailApi, SalesReport, TopProduct,
};

/// One facade operation, dispatchable by the worker.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    ListProducts,
    CreateProduct(ProductDraft),
    UpdateProduct(u64, ProductDraft),
    DeleteProduct(u64),

    ListCustomers,
    CreateCustomer(CustomerDraft),
    UpdateCustomer(u64, CustomerDraft),
    DeleteCustomer(u64),

    ListSuppliers,
    CreateSupplier(SupplierDraft),
    UpdateSupplier(u64, SupplierDraft),
    DeleteSupplier(u64),

    ListSales,
    CreateSale(SaleDraft),
    DeleteSale(u64),
    UpdateSaleStatus(u64, SaleStatus),

    ListInvoices,
    CreateInvoice(InvoiceDraft),
    UpdateInvoice(u64, InvoiceDraft),
    DeleteInvoice(u64),
    UpdateInvoiceStatus(u64, InvoiceStatus),

    ListExpenses,
    CreateExpense(ExpenseDraft),
    UpdateExpense(u64, ExpenseDraft),
    DeleteExpense(u64),

    ListReturns,
    CreateReturn(ReturnDraft),
    DeleteReturn(u64),
    UpdateReturnStatus(u64, ReturnStatus),

    LoadReports,
}

impl ApiCommand {
    /// The resource whose token/loading scope this command belongs to.
    pub fn resource(&self) -> Resource {
        use ApiCommand::*;
        match self {
            ListProducts | CreateProduct(..) | UpdateProduct(..) | DeleteProduct(..) => {
                Resource::Products
            }
            ListCustomers | CreateCustomer(..) | UpdateCustomer(..) | DeleteCustomer(..) => {
                Resource::Customers
            }
            ListSuppliers | CreateSupplier(..) | UpdateSupplier(..) | DeleteSupplier(..) => {
                Resource::Suppliers
            }
            ListSales | CreateSale(..) | DeleteSale(..) | UpdateSaleStatus(..) => Resource::Sales,
            ListInvoices | CreateInvoice(..) | UpdateInvoice(..) | DeleteInvoice(..)
            | UpdateInvoiceStatus(..) => Resource::Invoices,
            ListExpenses | CreateExpense(..) | UpdateExpense(..) | DeleteExpense(..) => {
                Resource::Expenses
            }
            ListReturns | CreateReturn(..) | DeleteReturn(..) | UpdateReturnStatus(..) => {
                Resource::Returns
            }
            LoadReports => Resource::Reports,
        }
    }

    /// Toast message on success; `None` for loads (no toast).
    pub fn success_message(&self) -> Option<&'static str> {
        use ApiCommand::*;
        match self {
            CreateProduct(..) => Some("Product created"),
            UpdateProduct(..) => Some("Product updated"),
            DeleteProduct(..) => Some("Product deleted"),
            CreateCustomer(..) => Some("Customer created"),
            UpdateCustomer(..) => Some("Customer updated"),
            DeleteCustomer(..) => Some("Customer deleted"),
            CreateSupplier(..) => Some("Supplier created"),
            UpdateSupplier(..) => Some("Supplier updated"),
            DeleteSupplier(..) => Some("Supplier deleted"),
            CreateSale(..) => Some("Sale recorded"),
            DeleteSale(..) => Some("Sale deleted"),
            UpdateSaleStatus(..) => Some("Sale status updated"),
            CreateInvoice(..) => Some("Invoice created"),
            UpdateInvoice(..) => Some("Invoice updated"),
            DeleteInvoice(..) => Some("Invoice deleted"),
            UpdateInvoiceStatus(..) => Some("Invoice status updated"),
            CreateExpense(..) => Some("Expense recorded"),
            UpdateExpense(..) => Some("Expense updated"),
            DeleteExpense(..) => Some("Expense deleted"),
            CreateReturn(..) => Some("Return filed"),
            DeleteReturn(..) => Some("Return deleted"),
            UpdateReturnStatus(..) => Some("Return status updated"),
            ListProducts | ListCustomers | ListSuppliers | ListSales | ListInvoices
            | ListExpenses | ListReturns | LoadReports => None,
        }
    }

    /// True for operations that change backend state; their completion
    /// triggers a reload of the owning resource.
    pub fn is_mutation(&self) -> bool {
        self.success_message().is_some()
    }
}

/// Successful payloads, one variant per result shape.
#[derive(Debug, Clone)]
pub enum ApiData {
    Products(Vec<Product>),
    Product(Product),
    Customers(Vec<Customer>),
    Customer(Customer),
    Suppliers(Vec<Supplier>),
    Supplier(Supplier),
    Sales(Vec<Sale>),
    Sale(Sale),
    Invoices(Vec<Invoice>),
    Invoice(Invoice),
    Expenses(Vec<Expense>),
    Expense(Expense),
    Returns(Vec<SaleReturn>),
    Return(SaleReturn),
    Reports {
        sales: SalesReport,
        expenses: ExpenseReport,
        top_products: Vec<TopProduct>,
    },
    Deleted,
}

#[derive(Debug)]
pub struct ApiRequest {
    pub token: u64,
    pub command: ApiCommand,
}

#[derive(Debug)]
pub struct ApiResponse {
    pub token: u64,
    pub command: ApiCommand,
    pub result: ApiResult<ApiData>,
}

/// Runs one command against the facade.
fn execute(api: &dyn RetailApi, command: &ApiCommand) -> ApiResult<ApiData> {
    use ApiCommand::*;
    match command {
        ListProducts => api.list_products().map(ApiData::Products),
        CreateProduct(draft) => api.create_product(draft.clone()).map(ApiData::Product),
        UpdateProduct(id, draft) => {
            api.update_product(*id, draft.clone()).map(ApiData::Product)
        }
        DeleteProduct(id) => api.delete_product(*id).map(|_| ApiData::Deleted),

        ListCustomers => api.list_customers().map(ApiData::Customers),
        CreateCustomer(draft) => api.create_customer(draft.clone()).map(ApiData::Customer),
        UpdateCustomer(id, draft) => {
            api.update_customer(*id, draft.clone()).map(ApiData::Customer)
        }
        DeleteCustomer(id) => api.delete_customer(*id).map(|_| ApiData::Deleted),

        ListSuppliers => api.list_suppliers().map(ApiData::Suppliers),
        CreateSupplier(draft) => api.create_supplier(draft.clone()).map(ApiData::Supplier),
        UpdateSupplier(id, draft) => {
            api.update_supplier(*id, draft.clone()).map(ApiData::Supplier)
        }
        DeleteSupplier(id) => api.delete_supplier(*id).map(|_| ApiData::Deleted),

        ListSales => api.list_sales().map(ApiData::Sales),
        CreateSale(draft) => api.create_sale(draft.clone()).map(ApiData::Sale),
        DeleteSale(id) => api.delete_sale(*id).map(|_| ApiData::Deleted),
        UpdateSaleStatus(id, status) => {
            api.update_sale_status(*id, *status).map(ApiData::Sale)
        }

        ListInvoices => api.list_invoices().map(ApiData::Invoices),
        CreateInvoice(draft) => api.create_invoice(draft.clone()).map(ApiData::Invoice),
        UpdateInvoice(id, draft) => {
            api.update_invoice(*id, draft.clone()).map(ApiData::Invoice)
        }
        DeleteInvoice(id) => api.delete_invoice(*id).map(|_| ApiData::Deleted),
        UpdateInvoiceStatus(id, status) => {
            api.update_invoice_status(*id, *status).map(ApiData::Invoice)
        }

        ListExpenses => api.list_expenses().map(ApiData::Expenses),
        CreateExpense(draft) => api.create_expense(draft.clone()).map(ApiData::Expense),
        UpdateExpense(id, draft) => {
            api.update_expense(*id, draft.clone()).map(ApiData::Expense)
        }
        DeleteExpense(id) => api.delete_expense(*id).map(|_| ApiData::Deleted),

        ListReturns => api.list_returns().map(ApiData::Returns),
        CreateReturn(draft) => api.create_return(draft.clone()).map(ApiData::Return),
        DeleteReturn(id) => api.delete_return(*id).map(|_| ApiData::Deleted),
        UpdateReturnStatus(id, status) => {
            api.update_return_status(*id, *status).map(ApiData::Return)
        }

        LoadReports => {
            let sales = api.sales_report()?;
            let expenses = api.expense_report()?;
            let top_products = api.top_products(5)?;
            Ok(ApiData::Reports {
                sales,
                expenses,
                top_products,
            })
        }
    }
}

/// Spawns the facade worker thread. Requests drain in order; each
/// completion is handed to `on_complete` (which forwards it into the UI
/// event channel). The worker exits when the request sender is dropped.
pub fn spawn_worker(
    api: Box<dyn RetailApi>,
    on_complete: impl Fn(ApiResponse) + Send + 'static,
) -> Sender<ApiRequest> {
    let (tx, rx) = mpsc::channel::<ApiRequest>();
    thread::spawn(move || {
        while let Ok(request) = rx.recv() {
            debug!(token = request.token, command = ?request.command, "executing facade request");
            let result = execute(api.as_ref(), &request.command);
            on_complete(ApiResponse {
                token: request.token,
                command: request.command,
                result,
            });
        }
    });
    tx
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::api::MockApi;
    use crate::storage::sample_dataset;

    fn worker() -> (Sender<ApiRequest>, mpsc::Receiver<ApiResponse>) {
        let api = MockApi::new(sample_dataset(), None, Duration::ZERO);
        let (tx, rx) = mpsc::channel();
        let requests = spawn_worker(Box::new(api), move |resp| {
            let _ = tx.send(resp);
        });
        (requests, rx)
    }

    #[test]
    fn worker_executes_and_echoes_the_token() {
        let (requests, responses) = worker();
        requests
            .send(ApiRequest {
                token: 42,
                command: ApiCommand::ListProducts,
            })
            .unwrap();

        let response = responses.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(response.token, 42);
        assert!(matches!(response.result, Ok(ApiData::Products(ref p)) if !p.is_empty()));
    }

    #[test]
    fn requests_complete_in_order() {
        let (requests, responses) = worker();
        for token in 1..=3 {
            requests
                .send(ApiRequest {
                    token,
                    command: ApiCommand::ListSales,
                })
                .unwrap();
        }
        for expected in 1..=3 {
            let response = responses.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(response.token, expected);
        }
    }

    #[test]
    fn errors_come_back_as_envelopes_not_panics() {
        let (requests, responses) = worker();
        requests
            .send(ApiRequest {
                token: 1,
                command: ApiCommand::DeleteProduct(9999),
            })
            .unwrap();
        let response = responses.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(response.result.is_err());
    }

    #[test]
    fn command_metadata_is_consistent() {
        assert_eq!(ApiCommand::ListProducts.resource(), Resource::Products);
        assert!(!ApiCommand::ListProducts.is_mutation());
        assert!(ApiCommand::DeleteSale(1).is_mutation());
        assert_eq!(
            ApiCommand::DeleteSale(1).success_message(),
            Some("Sale deleted")
        );
        assert_eq!(ApiCommand::LoadReports.resource(), Resource::Reports);
    }
}
