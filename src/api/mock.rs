//! In-memory mock backend.
//!
//! Serves the full facade surface from a [`Dataset`] behind a mutex, with
//! artificial latency so loading-state paths behave like the real thing,
//! and persists the dataset blob after every mutation.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::storage::model::{
    Customer, CustomerDraft, Dataset, Expense, ExpenseDraft, Invoice, InvoiceDraft,
    InvoiceStatus, Product, ProductDraft, ReturnDraft, ReturnStatus, Sale, SaleDraft, SaleItem,
    SaleReturn, SaleStatus, Supplier, SupplierDraft,
};
use crate::storage::{self, sample_dataset};

use super::{ApiError, ApiResult, ExpenseReport, RetailApi, SalesReport, TopProduct};

pub struct MockApi {
    state: Mutex<Dataset>,
    /// Blob path; `None` disables persistence (tests).
    path: Option<PathBuf>,
    latency: Duration,
}

impl MockApi {
    pub fn new(dataset: Dataset, path: Option<PathBuf>, latency: Duration) -> Self {
        Self {
            state: Mutex::new(dataset),
            path,
            latency,
        }
    }

    /// Loads the dataset blob at `path`, seeding the sample dataset on
    /// first run (or when the blob cannot be read).
    pub fn load_or_seed(path: PathBuf, latency: Duration) -> Self {
        let dataset = match storage::load(&path) {
            Ok(Some(dataset)) => dataset,
            Ok(None) => {
                info!(path = %path.display(), "no dataset found, seeding sample data");
                let dataset = sample_dataset();
                if let Err(e) = storage::save(&path, &dataset) {
                    warn!(error = %e, "failed to write seeded dataset");
                }
                dataset
            }
            Err(e) => {
                warn!(error = %e, "failed to load dataset, starting from sample data");
                sample_dataset()
            }
        };
        Self::new(dataset, Some(path), latency)
    }

    fn dataset(&self) -> MutexGuard<'_, Dataset> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn pause(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    fn persist(&self, dataset: &Dataset) {
        if let Some(path) = &self.path
            && let Err(e) = storage::save(path, dataset)
        {
            warn!(error = %e, "failed to persist dataset");
        }
    }
}

fn find<T>(items: &[T], id: u64, kind: &'static str, get_id: impl Fn(&T) -> u64) -> ApiResult<usize> {
    items
        .iter()
        .position(|item| get_id(item) == id)
        .ok_or(ApiError::NotFound(kind, id))
}

impl RetailApi for MockApi {
    fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.pause();
        Ok(self.dataset().products.clone())
    }

    fn get_product(&self, id: u64) -> ApiResult<Product> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.products, id, "product", |p| p.id)?;
        Ok(ds.products[idx].clone())
    }

    fn create_product(&self, draft: ProductDraft) -> ApiResult<Product> {
        self.pause();
        let mut ds = self.dataset();
        if ds.products.iter().any(|p| p.sku == draft.sku) {
            return Err(ApiError::Invalid(format!("SKU {} already exists", draft.sku)));
        }
        let id = ds.next_product_id();
        let product = draft.into_product(id, Utc::now());
        ds.products.push(product.clone());
        self.persist(&ds);
        Ok(product)
    }

    fn update_product(&self, id: u64, draft: ProductDraft) -> ApiResult<Product> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.products, id, "product", |p| p.id)?;
        draft.apply_to(&mut ds.products[idx]);
        let product = ds.products[idx].clone();
        self.persist(&ds);
        Ok(product)
    }

    fn delete_product(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.products, id, "product", |p| p.id)?;
        ds.products.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.pause();
        Ok(self.dataset().customers.clone())
    }

    fn get_customer(&self, id: u64) -> ApiResult<Customer> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.customers, id, "customer", |c| c.id)?;
        Ok(ds.customers[idx].clone())
    }

    fn create_customer(&self, draft: CustomerDraft) -> ApiResult<Customer> {
        self.pause();
        let mut ds = self.dataset();
        let id = ds.next_customer_id();
        let customer = draft.into_customer(id, Utc::now());
        ds.customers.push(customer.clone());
        self.persist(&ds);
        Ok(customer)
    }

    fn update_customer(&self, id: u64, draft: CustomerDraft) -> ApiResult<Customer> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.customers, id, "customer", |c| c.id)?;
        draft.apply_to(&mut ds.customers[idx]);
        let customer = ds.customers[idx].clone();
        self.persist(&ds);
        Ok(customer)
    }

    fn delete_customer(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.customers, id, "customer", |c| c.id)?;
        ds.customers.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn list_suppliers(&self) -> ApiResult<Vec<Supplier>> {
        self.pause();
        Ok(self.dataset().suppliers.clone())
    }

    fn get_supplier(&self, id: u64) -> ApiResult<Supplier> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.suppliers, id, "supplier", |s| s.id)?;
        Ok(ds.suppliers[idx].clone())
    }

    fn create_supplier(&self, draft: SupplierDraft) -> ApiResult<Supplier> {
        self.pause();
        let mut ds = self.dataset();
        let id = ds.next_supplier_id();
        let supplier = draft.into_supplier(id, Utc::now());
        ds.suppliers.push(supplier.clone());
        self.persist(&ds);
        Ok(supplier)
    }

    fn update_supplier(&self, id: u64, draft: SupplierDraft) -> ApiResult<Supplier> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.suppliers, id, "supplier", |s| s.id)?;
        draft.apply_to(&mut ds.suppliers[idx]);
        let supplier = ds.suppliers[idx].clone();
        self.persist(&ds);
        Ok(supplier)
    }

    fn delete_supplier(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.suppliers, id, "supplier", |s| s.id)?;
        ds.suppliers.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn list_sales(&self) -> ApiResult<Vec<Sale>> {
        self.pause();
        Ok(self.dataset().sales.clone())
    }

    fn get_sale(&self, id: u64) -> ApiResult<Sale> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.sales, id, "sale", |s| s.id)?;
        Ok(ds.sales[idx].clone())
    }

    /// Records a sale and decrements the sold product's stock.
    fn create_sale(&self, draft: SaleDraft) -> ApiResult<Sale> {
        self.pause();
        let mut ds = self.dataset();
        if draft.quantity <= 0 {
            return Err(ApiError::Invalid("quantity must be positive".to_string()));
        }
        let product_idx = ds
            .products
            .iter()
            .position(|p| p.sku == draft.product_sku)
            .ok_or_else(|| {
                ApiError::Invalid(format!("unknown SKU {}", draft.product_sku))
            })?;
        if ds.products[product_idx].stock < draft.quantity {
            return Err(ApiError::Invalid(format!(
                "only {} in stock for {}",
                ds.products[product_idx].stock, ds.products[product_idx].name
            )));
        }

        ds.products[product_idx].stock -= draft.quantity;
        let item = SaleItem {
            product_id: ds.products[product_idx].id,
            name: ds.products[product_idx].name.clone(),
            quantity: draft.quantity,
            unit_price_cents: ds.products[product_idx].price_cents,
        };
        let id = ds.next_sale_id();
        let customer_name = if draft.customer_name.trim().is_empty() {
            "Walk-in".to_string()
        } else {
            draft.customer_name.trim().to_string()
        };
        let sale = Sale {
            id,
            receipt: format!("R-{}", 1000 + id),
            customer_name,
            total_cents: item.line_total_cents(),
            items: vec![item],
            status: SaleStatus::Completed,
            created_at: Utc::now(),
        };
        ds.sales.push(sale.clone());
        self.persist(&ds);
        Ok(sale)
    }

    fn delete_sale(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.sales, id, "sale", |s| s.id)?;
        ds.sales.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn update_sale_status(&self, id: u64, status: SaleStatus) -> ApiResult<Sale> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.sales, id, "sale", |s| s.id)?;
        ds.sales[idx].status = status;
        let sale = ds.sales[idx].clone();
        self.persist(&ds);
        Ok(sale)
    }

    fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.pause();
        Ok(self.dataset().invoices.clone())
    }

    fn get_invoice(&self, id: u64) -> ApiResult<Invoice> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.invoices, id, "invoice", |i| i.id)?;
        Ok(ds.invoices[idx].clone())
    }

    fn create_invoice(&self, draft: InvoiceDraft) -> ApiResult<Invoice> {
        self.pause();
        let mut ds = self.dataset();
        let id = ds.next_invoice_id();
        let invoice = draft.into_invoice(id);
        ds.invoices.push(invoice.clone());
        self.persist(&ds);
        Ok(invoice)
    }

    fn update_invoice(&self, id: u64, draft: InvoiceDraft) -> ApiResult<Invoice> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.invoices, id, "invoice", |i| i.id)?;
        draft.apply_to(&mut ds.invoices[idx]);
        let invoice = ds.invoices[idx].clone();
        self.persist(&ds);
        Ok(invoice)
    }

    fn delete_invoice(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.invoices, id, "invoice", |i| i.id)?;
        ds.invoices.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn update_invoice_status(&self, id: u64, status: InvoiceStatus) -> ApiResult<Invoice> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.invoices, id, "invoice", |i| i.id)?;
        ds.invoices[idx].status = status;
        let invoice = ds.invoices[idx].clone();
        self.persist(&ds);
        Ok(invoice)
    }

    fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.pause();
        Ok(self.dataset().expenses.clone())
    }

    fn get_expense(&self, id: u64) -> ApiResult<Expense> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.expenses, id, "expense", |e| e.id)?;
        Ok(ds.expenses[idx].clone())
    }

    fn create_expense(&self, draft: ExpenseDraft) -> ApiResult<Expense> {
        self.pause();
        let mut ds = self.dataset();
        let id = ds.next_expense_id();
        let expense = draft.into_expense(id);
        ds.expenses.push(expense.clone());
        self.persist(&ds);
        Ok(expense)
    }

    fn update_expense(&self, id: u64, draft: ExpenseDraft) -> ApiResult<Expense> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.expenses, id, "expense", |e| e.id)?;
        draft.apply_to(&mut ds.expenses[idx]);
        let expense = ds.expenses[idx].clone();
        self.persist(&ds);
        Ok(expense)
    }

    fn delete_expense(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.expenses, id, "expense", |e| e.id)?;
        ds.expenses.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn list_returns(&self) -> ApiResult<Vec<SaleReturn>> {
        self.pause();
        Ok(self.dataset().returns.clone())
    }

    fn get_return(&self, id: u64) -> ApiResult<SaleReturn> {
        self.pause();
        let ds = self.dataset();
        let idx = find(&ds.returns, id, "return", |r| r.id)?;
        Ok(ds.returns[idx].clone())
    }

    /// Files a return; the refund is the sale's line price times quantity,
    /// capped at the quantity sold.
    fn create_return(&self, draft: ReturnDraft) -> ApiResult<SaleReturn> {
        self.pause();
        let mut ds = self.dataset();
        if draft.quantity <= 0 {
            return Err(ApiError::Invalid("quantity must be positive".to_string()));
        }
        let sale_idx = find(&ds.sales, draft.sale_id, "sale", |s| s.id)?;
        let item = ds.sales[sale_idx]
            .items
            .iter()
            .find(|i| i.name == draft.product_name)
            .ok_or_else(|| {
                ApiError::Invalid(format!(
                    "sale {} has no line for {}",
                    ds.sales[sale_idx].receipt, draft.product_name
                ))
            })?;
        if draft.quantity > item.quantity {
            return Err(ApiError::Invalid(format!(
                "sale only covers {} of {}",
                item.quantity, item.name
            )));
        }
        let refund_cents = draft.quantity * item.unit_price_cents;

        let id = ds.next_return_id();
        let sale_return = SaleReturn {
            id,
            sale_id: draft.sale_id,
            product_name: draft.product_name,
            quantity: draft.quantity,
            refund_cents,
            reason: draft.reason,
            status: ReturnStatus::Pending,
            created_at: Utc::now(),
        };
        ds.returns.push(sale_return.clone());
        self.persist(&ds);
        Ok(sale_return)
    }

    fn delete_return(&self, id: u64) -> ApiResult<()> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.returns, id, "return", |r| r.id)?;
        ds.returns.remove(idx);
        self.persist(&ds);
        Ok(())
    }

    fn update_return_status(&self, id: u64, status: ReturnStatus) -> ApiResult<SaleReturn> {
        self.pause();
        let mut ds = self.dataset();
        let idx = find(&ds.returns, id, "return", |r| r.id)?;
        ds.returns[idx].status = status;
        let sale_return = ds.returns[idx].clone();
        self.persist(&ds);
        Ok(sale_return)
    }

    fn sales_report(&self) -> ApiResult<SalesReport> {
        self.pause();
        let ds = self.dataset();
        let mut report = SalesReport {
            count: ds.sales.len(),
            ..SalesReport::default()
        };
        for sale in &ds.sales {
            match sale.status {
                SaleStatus::Completed => {
                    report.completed += 1;
                    report.total_cents += sale.total_cents;
                }
                SaleStatus::Pending => report.pending += 1,
                SaleStatus::Cancelled => report.cancelled += 1,
            }
        }
        Ok(report)
    }

    fn expense_report(&self) -> ApiResult<ExpenseReport> {
        self.pause();
        let ds = self.dataset();
        let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
        let mut total_cents = 0;
        for expense in &ds.expenses {
            *by_category.entry(expense.category.clone()).or_default() += expense.amount_cents;
            total_cents += expense.amount_cents;
        }
        let mut by_category: Vec<(String, i64)> = by_category.into_iter().collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(ExpenseReport {
            total_cents,
            by_category,
        })
    }

    fn top_products(&self, limit: usize) -> ApiResult<Vec<TopProduct>> {
        self.pause();
        let ds = self.dataset();
        let mut by_name: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for sale in &ds.sales {
            if sale.status != SaleStatus::Completed {
                continue;
            }
            for item in &sale.items {
                let entry = by_name.entry(item.name.clone()).or_default();
                entry.0 += item.quantity;
                entry.1 += item.line_total_cents();
            }
        }
        let mut top: Vec<TopProduct> = by_name
            .into_iter()
            .map(|(name, (quantity, revenue_cents))| TopProduct {
                name,
                quantity,
                revenue_cents,
            })
            .collect();
        top.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        top.truncate(limit);
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> MockApi {
        MockApi::new(sample_dataset(), None, Duration::ZERO)
    }

    fn product_draft(sku: &str) -> ProductDraft {
        ProductDraft {
            sku: sku.to_string(),
            name: "Oat Milk 1L".to_string(),
            category: "Dairy".to_string(),
            price_cents: 249,
            cost_cents: 150,
            stock: 20,
            reorder_level: 6,
            supplier_id: Some(2),
        }
    }

    #[test]
    fn product_crud_round_trip() {
        let api = api();
        let created = api.create_product(product_draft("OAT-1L")).unwrap();
        assert_eq!(created.id, 11);

        let fetched = api.get_product(created.id).unwrap();
        assert_eq!(fetched.name, "Oat Milk 1L");

        let mut draft = product_draft("OAT-1L");
        draft.price_cents = 269;
        let updated = api.update_product(created.id, draft).unwrap();
        assert_eq!(updated.price_cents, 269);

        api.delete_product(created.id).unwrap();
        assert!(matches!(
            api.get_product(created.id),
            Err(ApiError::NotFound("product", _))
        ));
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let api = api();
        assert!(matches!(
            api.create_product(product_draft("COF-250")),
            Err(ApiError::Invalid(_))
        ));
    }

    #[test]
    fn creating_a_sale_decrements_stock_and_prices_the_line() {
        let api = api();
        let before = api.get_product(1).unwrap().stock;
        let sale = api
            .create_sale(SaleDraft {
                customer_name: "".to_string(),
                product_sku: "COF-250".to_string(),
                quantity: 2,
            })
            .unwrap();
        assert_eq!(sale.customer_name, "Walk-in");
        assert_eq!(sale.total_cents, 2 * 749);
        assert_eq!(api.get_product(1).unwrap().stock, before - 2);
    }

    #[test]
    fn oversold_sale_is_rejected() {
        let api = api();
        let result = api.create_sale(SaleDraft {
            customer_name: "x".to_string(),
            product_sku: "HON-340".to_string(),
            quantity: 999,
        });
        assert!(matches!(result, Err(ApiError::Invalid(_))));
    }

    #[test]
    fn return_refund_is_computed_from_the_sale_line() {
        let api = api();
        let filed = api
            .create_return(ReturnDraft {
                sale_id: 2,
                product_name: "Whole Milk 1L".to_string(),
                quantity: 2,
                reason: "Leaking carton".to_string(),
            })
            .unwrap();
        assert_eq!(filed.refund_cents, 2 * 159);
        assert_eq!(filed.status, ReturnStatus::Pending);

        // More than the sale covered is rejected.
        assert!(matches!(
            api.create_return(ReturnDraft {
                sale_id: 2,
                product_name: "Whole Milk 1L".to_string(),
                quantity: 99,
                reason: "no".to_string(),
            }),
            Err(ApiError::Invalid(_))
        ));
    }

    #[test]
    fn status_updates_apply() {
        let api = api();
        let sale = api.update_sale_status(3, SaleStatus::Completed).unwrap();
        assert_eq!(sale.status, SaleStatus::Completed);
        let invoice = api.update_invoice_status(2, InvoiceStatus::Paid).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn sales_report_counts_by_status() {
        let api = api();
        let report = api.sales_report().unwrap();
        assert_eq!(report.count, 6);
        assert_eq!(report.completed, 4);
        assert_eq!(report.pending, 1);
        assert_eq!(report.cancelled, 1);
        // Only completed sales contribute revenue.
        assert!(report.total_cents > 0);
    }

    #[test]
    fn top_products_ranks_by_quantity_sold() {
        let api = api();
        let top = api.top_products(3).unwrap();
        assert!(top.len() <= 3);
        assert!(top.windows(2).all(|w| w[0].quantity >= w[1].quantity));
    }

    #[test]
    fn mutations_persist_the_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilltop.dat");
        let api = MockApi::new(sample_dataset(), Some(path.clone()), Duration::ZERO);
        api.create_customer(CustomerDraft {
            name: "New Customer".to_string(),
            phone: "555-0000".to_string(),
            email: "new@example.com".to_string(),
            address: "1 Test Way".to_string(),
        })
        .unwrap();

        let reloaded = crate::storage::load(&path).unwrap().unwrap();
        assert!(reloaded.customers.iter().any(|c| c.name == "New Customer"));
    }

    #[test]
    fn load_or_seed_seeds_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.dat");
        let api = MockApi::load_or_seed(path.clone(), Duration::ZERO);
        assert!(!api.list_products().unwrap().is_empty());
        assert!(path.exists());
    }
}
