//! REST backend: blocking JSON client against a base URL.
//!
//! Every failure — connection, non-success status, body decode — is mapped
//! to [`ApiError`]; nothing is raised past the facade.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::storage::model::{
    Customer, CustomerDraft, Expense, ExpenseDraft, Invoice, InvoiceDraft, InvoiceStatus,
    Product, ProductDraft, ReturnDraft, ReturnStatus, Sale, SaleDraft, SaleReturn, SaleStatus,
    Supplier, SupplierDraft,
};

use super::{ApiError, ApiResult, ExpenseReport, RetailApi, SalesReport, TopProduct};

pub struct RestApi {
    client: Client,
    base: String,
}

impl RestApi {
    /// Builds a client for `base_url` (with or without a trailing slash).
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let detail = body.chars().take(200).collect::<String>();
        Err(ApiError::Status(status.as_u16(), detail))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(Self::check(response)?)
    }

    fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(Self::check(response)?)
    }

    fn put_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(Self::check(response)?)
    }

    fn delete_path(&self, path: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check(response).map(|_| ())
    }
}

impl RetailApi for RestApi {
    fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("/products")
    }

    fn get_product(&self, id: u64) -> ApiResult<Product> {
        self.get_json(&format!("/products/{}", id))
    }

    fn create_product(&self, draft: ProductDraft) -> ApiResult<Product> {
        self.post_json("/products", &draft)
    }

    fn update_product(&self, id: u64, draft: ProductDraft) -> ApiResult<Product> {
        self.put_json(&format!("/products/{}", id), &draft)
    }

    fn delete_product(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/products/{}", id))
    }

    fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.get_json("/customers")
    }

    fn get_customer(&self, id: u64) -> ApiResult<Customer> {
        self.get_json(&format!("/customers/{}", id))
    }

    fn create_customer(&self, draft: CustomerDraft) -> ApiResult<Customer> {
        self.post_json("/customers", &draft)
    }

    fn update_customer(&self, id: u64, draft: CustomerDraft) -> ApiResult<Customer> {
        self.put_json(&format!("/customers/{}", id), &draft)
    }

    fn delete_customer(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/customers/{}", id))
    }

    fn list_suppliers(&self) -> ApiResult<Vec<Supplier>> {
        self.get_json("/suppliers")
    }

    fn get_supplier(&self, id: u64) -> ApiResult<Supplier> {
        self.get_json(&format!("/suppliers/{}", id))
    }

    fn create_supplier(&self, draft: SupplierDraft) -> ApiResult<Supplier> {
        self.post_json("/suppliers", &draft)
    }

    fn update_supplier(&self, id: u64, draft: SupplierDraft) -> ApiResult<Supplier> {
        self.put_json(&format!("/suppliers/{}", id), &draft)
    }

    fn delete_supplier(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/suppliers/{}", id))
    }

    fn list_sales(&self) -> ApiResult<Vec<Sale>> {
        self.get_json("/sales")
    }

    fn get_sale(&self, id: u64) -> ApiResult<Sale> {
        self.get_json(&format!("/sales/{}", id))
    }

    fn create_sale(&self, draft: SaleDraft) -> ApiResult<Sale> {
        self.post_json("/sales", &draft)
    }

    fn delete_sale(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/sales/{}", id))
    }

    fn update_sale_status(&self, id: u64, status: SaleStatus) -> ApiResult<Sale> {
        self.put_json(&format!("/sales/{}/status", id), &json!({ "status": status }))
    }

    fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.get_json("/invoices")
    }

    fn get_invoice(&self, id: u64) -> ApiResult<Invoice> {
        self.get_json(&format!("/invoices/{}", id))
    }

    fn create_invoice(&self, draft: InvoiceDraft) -> ApiResult<Invoice> {
        self.post_json("/invoices", &draft)
    }

    fn update_invoice(&self, id: u64, draft: InvoiceDraft) -> ApiResult<Invoice> {
        self.put_json(&format!("/invoices/{}", id), &draft)
    }

    fn delete_invoice(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/invoices/{}", id))
    }

    fn update_invoice_status(&self, id: u64, status: InvoiceStatus) -> ApiResult<Invoice> {
        self.put_json(
            &format!("/invoices/{}/status", id),
            &json!({ "status": status }),
        )
    }

    fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.get_json("/expenses")
    }

    fn get_expense(&self, id: u64) -> ApiResult<Expense> {
        self.get_json(&format!("/expenses/{}", id))
    }

    fn create_expense(&self, draft: ExpenseDraft) -> ApiResult<Expense> {
        self.post_json("/expenses", &draft)
    }

    fn update_expense(&self, id: u64, draft: ExpenseDraft) -> ApiResult<Expense> {
        self.put_json(&format!("/expenses/{}", id), &draft)
    }

    fn delete_expense(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/expenses/{}", id))
    }

    fn list_returns(&self) -> ApiResult<Vec<SaleReturn>> {
        self.get_json("/returns")
    }

    fn get_return(&self, id: u64) -> ApiResult<SaleReturn> {
        self.get_json(&format!("/returns/{}", id))
    }

    fn create_return(&self, draft: ReturnDraft) -> ApiResult<SaleReturn> {
        self.post_json("/returns", &draft)
    }

    fn delete_return(&self, id: u64) -> ApiResult<()> {
        self.delete_path(&format!("/returns/{}", id))
    }

    fn update_return_status(&self, id: u64, status: ReturnStatus) -> ApiResult<SaleReturn> {
        self.put_json(
            &format!("/returns/{}/status", id),
            &json!({ "status": status }),
        )
    }

    fn sales_report(&self) -> ApiResult<SalesReport> {
        self.get_json("/reports/sales")
    }

    fn expense_report(&self) -> ApiResult<ExpenseReport> {
        self.get_json("/reports/expenses")
    }

    fn top_products(&self, limit: usize) -> ApiResult<Vec<TopProduct>> {
        self.get_json(&format!("/reports/top-products?limit={}", limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = RestApi::new("http://localhost:8080/").unwrap();
        assert_eq!(api.url("/products"), "http://localhost:8080/products");

        let api = RestApi::new("http://localhost:8080").unwrap();
        assert_eq!(api.url("/products"), "http://localhost:8080/products");
    }
}
