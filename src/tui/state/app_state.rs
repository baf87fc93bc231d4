//! Main application state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::api::{
    ApiCommand, ApiData, ApiResponse, ExpenseReport, Resource, SalesReport, TopProduct,
};
use crate::form::FormState;
use crate::overlay::{LoadingTracker, ModalManager, ToastManager};
use crate::storage::model::{
    Customer, Expense, Invoice, Product, Sale, SaleReturn, Supplier,
};
use crate::table::{TableConfig, TableState, TableView};
use crate::view;

use super::{InputMode, PendingAction, PopupState, View};

/// Quiet period before a search edit is applied to the table.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Form being edited, bound to the resource it will be submitted to.
#[derive(Debug)]
pub struct ActiveForm {
    pub resource: Resource,
    /// `Some(id)` for edit forms, `None` for create forms.
    pub editing: Option<u64>,
    pub form: FormState,
}

/// Loaded report aggregates for the Reports view.
#[derive(Debug, Clone)]
pub struct ReportsData {
    pub sales: SalesReport,
    pub expenses: ExpenseReport,
    pub top_products: Vec<TopProduct>,
}

/// Main application state.
pub struct AppState {
    /// Current active view.
    pub view: View,
    pub input_mode: InputMode,
    /// Search input buffer (edited live, applied after the debounce).
    pub search_input: String,
    /// Set on each search keystroke; applied when the quiet period ends.
    pub search_dirty_at: Option<Instant>,
    pub sales: TableState<Sale>,
    pub products: TableState<Product>,
    pub customers: TableState<Customer>,
    pub suppliers: TableState<Supplier>,
    pub invoices: TableState<Invoice>,
    pub expenses: TableState<Expense>,
    pub returns: TableState<SaleReturn>,
    pub reports: Option<ReportsData>,
    pub toasts: ToastManager,
    pub modal: ModalManager<PendingAction>,
    pub loading: LoadingTracker,
    pub popup: PopupState,
    pub form: Option<ActiveForm>,
    /// Backend label for the header ("mock" or the API URL).
    pub backend: String,
    /// Latest issued request token per resource; stale completions are
    /// discarded.
    tokens: HashMap<Resource, u64>,
    next_token: u64,
}

impl AppState {
    pub fn new(backend: String) -> Self {
        let config = TableConfig::default();
        Self {
            view: View::Sales,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            search_dirty_at: None,
            sales: TableState::new(view::sales::COLUMNS, config),
            products: TableState::new(view::products::COLUMNS, config),
            customers: TableState::new(view::customers::COLUMNS, config),
            suppliers: TableState::new(view::suppliers::COLUMNS, config),
            invoices: TableState::new(view::invoices::COLUMNS, config),
            expenses: TableState::new(view::expenses::COLUMNS, config),
            returns: TableState::new(view::returns::COLUMNS, config),
            reports: None,
            toasts: ToastManager::new(),
            modal: ModalManager::new(),
            loading: LoadingTracker::new(),
            popup: PopupState::None,
            form: None,
            backend,
            tokens: HashMap::new(),
            next_token: 0,
        }
    }

    /// Issues a fresh request token and records it as the latest for the
    /// resource.
    pub fn issue_token(&mut self, resource: Resource) -> u64 {
        self.next_token += 1;
        self.tokens.insert(resource, self.next_token);
        self.next_token
    }

    fn is_latest(&self, resource: Resource, token: u64) -> bool {
        self.tokens.get(&resource) == Some(&token)
    }

    /// Switches views, syncing the search buffer from the new view's
    /// applied term and dropping any pending search edit.
    pub fn switch_view(&mut self, new_view: View) {
        if self.view != new_view {
            self.view = new_view;
            self.search_dirty_at = None;
            self.search_input = self.current_search_term().to_string();
        }
    }

    /// The applied search term of the active view's table.
    pub fn current_search_term(&self) -> &str {
        match self.view {
            View::Sales => self.sales.search_term(),
            View::Inventory => self.products.search_term(),
            View::Customers => self.customers.search_term(),
            View::Suppliers => self.suppliers.search_term(),
            View::Invoices => self.invoices.search_term(),
            View::Expenses => self.expenses.search_term(),
            View::Returns => self.returns.search_term(),
            View::Reports => "",
        }
    }

    /// Applies the search buffer to the active table (page resets to 1).
    pub fn apply_search(&mut self) {
        let term = self.search_input.clone();
        match self.view {
            View::Sales => self.sales.set_search(&term),
            View::Inventory => self.products.set_search(&term),
            View::Customers => self.customers.set_search(&term),
            View::Suppliers => self.suppliers.set_search(&term),
            View::Invoices => self.invoices.set_search(&term),
            View::Expenses => self.expenses.set_search(&term),
            View::Returns => self.returns.set_search(&term),
            View::Reports => {}
        }
        self.search_dirty_at = None;
    }

    pub fn sort_next_column(&mut self) {
        match self.view {
            View::Sales => self.sales.sort_next_column(),
            View::Inventory => self.products.sort_next_column(),
            View::Customers => self.customers.sort_next_column(),
            View::Suppliers => self.suppliers.sort_next_column(),
            View::Invoices => self.invoices.sort_next_column(),
            View::Expenses => self.expenses.sort_next_column(),
            View::Returns => self.returns.sort_next_column(),
            View::Reports => {}
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        match self.view {
            View::Sales => self.sales.toggle_sort_direction(),
            View::Inventory => self.products.toggle_sort_direction(),
            View::Customers => self.customers.toggle_sort_direction(),
            View::Suppliers => self.suppliers.toggle_sort_direction(),
            View::Invoices => self.invoices.toggle_sort_direction(),
            View::Expenses => self.expenses.toggle_sort_direction(),
            View::Returns => self.returns.toggle_sort_direction(),
            View::Reports => {}
        }
    }

    pub fn next_page(&mut self) {
        match self.view {
            View::Sales => self.sales.next_page(),
            View::Inventory => self.products.next_page(),
            View::Customers => self.customers.next_page(),
            View::Suppliers => self.suppliers.next_page(),
            View::Invoices => self.invoices.next_page(),
            View::Expenses => self.expenses.next_page(),
            View::Returns => self.returns.next_page(),
            View::Reports => {}
        }
    }

    pub fn prev_page(&mut self) {
        match self.view {
            View::Sales => self.sales.prev_page(),
            View::Inventory => self.products.prev_page(),
            View::Customers => self.customers.prev_page(),
            View::Suppliers => self.suppliers.prev_page(),
            View::Invoices => self.invoices.prev_page(),
            View::Expenses => self.expenses.prev_page(),
            View::Returns => self.returns.prev_page(),
            View::Reports => {}
        }
    }

    pub fn select_up(&mut self) {
        match self.view {
            View::Sales => self.sales.select_up(),
            View::Inventory => self.products.select_up(),
            View::Customers => self.customers.select_up(),
            View::Suppliers => self.suppliers.select_up(),
            View::Invoices => self.invoices.select_up(),
            View::Expenses => self.expenses.select_up(),
            View::Returns => self.returns.select_up(),
            View::Reports => {}
        }
    }

    pub fn select_down(&mut self) {
        match self.view {
            View::Sales => self.sales.select_down(),
            View::Inventory => self.products.select_down(),
            View::Customers => self.customers.select_down(),
            View::Suppliers => self.suppliers.select_down(),
            View::Invoices => self.invoices.select_down(),
            View::Expenses => self.expenses.select_down(),
            View::Returns => self.returns.select_down(),
            View::Reports => {}
        }
    }

    /// View model of the active table; `None` on the Reports view.
    pub fn table_view(&self) -> Option<TableView> {
        match self.view {
            View::Sales => Some(self.sales.view()),
            View::Inventory => Some(self.products.view()),
            View::Customers => Some(self.customers.view()),
            View::Suppliers => Some(self.suppliers.view()),
            View::Invoices => Some(self.invoices.view()),
            View::Expenses => Some(self.expenses.view()),
            View::Returns => Some(self.returns.view()),
            View::Reports => None,
        }
    }

    /// Headers plus all filtered rows of the active table, for export.
    pub fn export_data(&self) -> Option<(Vec<&'static str>, Vec<Vec<String>>)> {
        match self.view {
            View::Sales => Some(self.sales.export_rows()),
            View::Inventory => Some(self.products.export_rows()),
            View::Customers => Some(self.customers.export_rows()),
            View::Suppliers => Some(self.suppliers.export_rows()),
            View::Invoices => Some(self.invoices.export_rows()),
            View::Expenses => Some(self.expenses.export_rows()),
            View::Returns => Some(self.returns.export_rows()),
            View::Reports => None,
        }
    }

    /// Identity of the record under the cursor.
    pub fn selected_id(&self) -> Option<u64> {
        match self.view {
            View::Sales => self.sales.selected_id(),
            View::Inventory => self.products.selected_id(),
            View::Customers => self.customers.selected_id(),
            View::Suppliers => self.suppliers.selected_id(),
            View::Invoices => self.invoices.selected_id(),
            View::Expenses => self.expenses.selected_id(),
            View::Returns => self.returns.selected_id(),
            View::Reports => None,
        }
    }

    /// Detail-popup content for the record under the cursor.
    pub fn detail_for_selection(&self) -> Option<(String, Vec<(&'static str, String)>)> {
        match self.view {
            View::Sales => self
                .sales
                .selected_record()
                .map(|s| (format!("Sale {}", s.receipt), view::sales::detail_lines(s))),
            View::Inventory => self
                .products
                .selected_record()
                .map(|p| (format!("Product {}", p.sku), view::products::detail_lines(p))),
            View::Customers => self
                .customers
                .selected_record()
                .map(|c| (c.name.clone(), view::customers::detail_lines(c))),
            View::Suppliers => self
                .suppliers
                .selected_record()
                .map(|s| (s.name.clone(), view::suppliers::detail_lines(s))),
            View::Invoices => self
                .invoices
                .selected_record()
                .map(|i| (format!("Invoice {}", i.number), view::invoices::detail_lines(i))),
            View::Expenses => self
                .expenses
                .selected_record()
                .map(|e| ("Expense".to_string(), view::expenses::detail_lines(e))),
            View::Returns => self
                .returns
                .selected_record()
                .map(|r| (format!("Return #{}", r.id), view::returns::detail_lines(r))),
            View::Reports => None,
        }
    }

    /// Delete confirmation for the record under the cursor:
    /// `(action, question)`.
    pub fn delete_action(&self) -> Option<(PendingAction, String)> {
        let resource = self.view.resource();
        match self.view {
            View::Sales => self.sales.selected_record().map(|s| {
                (
                    PendingAction::Delete(resource, s.id),
                    format!("Delete sale {}?", s.receipt),
                )
            }),
            View::Inventory => self.products.selected_record().map(|p| {
                (
                    PendingAction::Delete(resource, p.id),
                    format!("Delete product {}?", p.name),
                )
            }),
            View::Customers => self.customers.selected_record().map(|c| {
                (
                    PendingAction::Delete(resource, c.id),
                    format!("Delete customer {}?", c.name),
                )
            }),
            View::Suppliers => self.suppliers.selected_record().map(|s| {
                (
                    PendingAction::Delete(resource, s.id),
                    format!("Delete supplier {}?", s.name),
                )
            }),
            View::Invoices => self.invoices.selected_record().map(|i| {
                (
                    PendingAction::Delete(resource, i.id),
                    format!("Delete invoice {}?", i.number),
                )
            }),
            View::Expenses => self.expenses.selected_record().map(|e| {
                (
                    PendingAction::Delete(resource, e.id),
                    format!("Delete expense \"{}\"?", e.description),
                )
            }),
            View::Returns => self.returns.selected_record().map(|r| {
                (
                    PendingAction::Delete(resource, r.id),
                    format!("Delete return #{}?", r.id),
                )
            }),
            View::Reports => None,
        }
    }

    /// Status-cycle command for the record under the cursor, on views that
    /// carry a status.
    pub fn status_cycle_command(&self) -> Option<ApiCommand> {
        match self.view {
            View::Sales => self
                .sales
                .selected_record()
                .map(|s| ApiCommand::UpdateSaleStatus(s.id, s.status.next())),
            View::Invoices => self
                .invoices
                .selected_record()
                .map(|i| ApiCommand::UpdateInvoiceStatus(i.id, i.status.next())),
            View::Returns => self
                .returns
                .selected_record()
                .map(|r| ApiCommand::UpdateReturnStatus(r.id, r.status.next())),
            _ => None,
        }
    }

    /// Create form for the active view, where supported.
    pub fn blank_form(&self) -> Option<ActiveForm> {
        let resource = self.view.resource();
        let form = match self.view {
            View::Sales => view::sales::blank_form(),
            View::Inventory => view::products::blank_form(),
            View::Customers => view::customers::blank_form(),
            View::Suppliers => view::suppliers::blank_form(),
            View::Invoices => view::invoices::blank_form(),
            View::Expenses => view::expenses::blank_form(),
            View::Returns => view::returns::blank_form(),
            View::Reports => return None,
        };
        Some(ActiveForm {
            resource,
            editing: None,
            form,
        })
    }

    /// Edit form for the record under the cursor. Sales and returns are
    /// immutable once recorded; `None` means "not editable here".
    pub fn edit_form_for_selection(&self) -> Option<ActiveForm> {
        let resource = self.view.resource();
        match self.view {
            View::Inventory => self.products.selected_record().map(|p| ActiveForm {
                resource,
                editing: Some(p.id),
                form: view::products::edit_form(p),
            }),
            View::Customers => self.customers.selected_record().map(|c| ActiveForm {
                resource,
                editing: Some(c.id),
                form: view::customers::edit_form(c),
            }),
            View::Suppliers => self.suppliers.selected_record().map(|s| ActiveForm {
                resource,
                editing: Some(s.id),
                form: view::suppliers::edit_form(s),
            }),
            View::Invoices => self.invoices.selected_record().map(|i| ActiveForm {
                resource,
                editing: Some(i.id),
                form: view::invoices::edit_form(i),
            }),
            View::Expenses => self.expenses.selected_record().map(|e| ActiveForm {
                resource,
                editing: Some(e.id),
                form: view::expenses::edit_form(e),
            }),
            _ => None,
        }
    }

    /// Builds the submit command for a validated form.
    pub fn form_command(&self, active: &ActiveForm) -> Option<ApiCommand> {
        let form = &active.form;
        match (active.resource, active.editing) {
            (Resource::Products, None) => {
                Some(ApiCommand::CreateProduct(view::products::draft_from(form, None)))
            }
            (Resource::Products, Some(id)) => {
                let existing = self.products.records().iter().find(|p| p.id == id);
                Some(ApiCommand::UpdateProduct(
                    id,
                    view::products::draft_from(form, existing),
                ))
            }
            (Resource::Customers, None) => {
                Some(ApiCommand::CreateCustomer(view::customers::draft_from(form)))
            }
            (Resource::Customers, Some(id)) => Some(ApiCommand::UpdateCustomer(
                id,
                view::customers::draft_from(form),
            )),
            (Resource::Suppliers, None) => {
                Some(ApiCommand::CreateSupplier(view::suppliers::draft_from(form)))
            }
            (Resource::Suppliers, Some(id)) => Some(ApiCommand::UpdateSupplier(
                id,
                view::suppliers::draft_from(form),
            )),
            (Resource::Sales, None) => {
                Some(ApiCommand::CreateSale(view::sales::draft_from(form)))
            }
            (Resource::Invoices, None) => {
                Some(ApiCommand::CreateInvoice(view::invoices::draft_from(form)))
            }
            (Resource::Invoices, Some(id)) => Some(ApiCommand::UpdateInvoice(
                id,
                view::invoices::draft_from(form),
            )),
            (Resource::Expenses, None) => {
                Some(ApiCommand::CreateExpense(view::expenses::draft_from(form)))
            }
            (Resource::Expenses, Some(id)) => Some(ApiCommand::UpdateExpense(
                id,
                view::expenses::draft_from(form),
            )),
            (Resource::Returns, None) => {
                Some(ApiCommand::CreateReturn(view::returns::draft_from(form)))
            }
            _ => None,
        }
    }

    /// Applies a facade completion.
    ///
    /// Stale tokens are discarded (last issued request wins). Returns the
    /// resource to reload when a mutation succeeded.
    pub fn apply_response(&mut self, response: ApiResponse, now: Instant) -> Option<Resource> {
        let resource = response.command.resource();
        if !self.is_latest(resource, response.token) {
            debug!(
                token = response.token,
                resource = resource.scope(),
                "discarding stale facade response"
            );
            return None;
        }
        self.loading.hide(Some(resource.scope()));

        match response.result {
            Err(error) => {
                self.toasts.error(error.to_string(), now);
                None
            }
            Ok(data) => {
                if let Some(message) = response.command.success_message() {
                    self.toasts.success(message, now);
                    return Some(resource);
                }
                self.apply_data(data);
                None
            }
        }
    }

    fn apply_data(&mut self, data: ApiData) {
        match data {
            ApiData::Sales(records) => self.sales.update_data(records),
            ApiData::Products(records) => self.products.update_data(records),
            ApiData::Customers(records) => self.customers.update_data(records),
            ApiData::Suppliers(records) => self.suppliers.update_data(records),
            ApiData::Invoices(records) => self.invoices.update_data(records),
            ApiData::Expenses(records) => self.expenses.update_data(records),
            ApiData::Returns(records) => self.returns.update_data(records),
            ApiData::Reports {
                sales,
                expenses,
                top_products,
            } => {
                self.reports = Some(ReportsData {
                    sales,
                    expenses,
                    top_products,
                });
            }
            // Single-record payloads only arrive from mutations, which
            // trigger a reload instead of a direct table update.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResponse};
    use crate::storage::sample_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::new("mock".to_string());
        let ds = sample_dataset();
        state.sales.update_data(ds.sales);
        state.products.update_data(ds.products);
        state
    }

    #[test]
    fn stale_responses_are_discarded() {
        let now = Instant::now();
        let mut state = loaded_state();
        let stale = state.issue_token(Resource::Products);
        let latest = state.issue_token(Resource::Products);

        let reload = state.apply_response(
            ApiResponse {
                token: stale,
                command: ApiCommand::ListProducts,
                result: Ok(ApiData::Products(vec![])),
            },
            now,
        );
        assert!(reload.is_none());
        // Stale payload did not overwrite the table.
        assert!(!state.products.records().is_empty());

        state.apply_response(
            ApiResponse {
                token: latest,
                command: ApiCommand::ListProducts,
                result: Ok(ApiData::Products(vec![])),
            },
            now,
        );
        assert!(state.products.records().is_empty());
    }

    #[test]
    fn latest_response_hides_the_loading_scope() {
        let now = Instant::now();
        let mut state = loaded_state();
        let token = state.issue_token(Resource::Sales);
        state.loading.show(Some(Resource::Sales.scope()));

        state.apply_response(
            ApiResponse {
                token,
                command: ApiCommand::ListSales,
                result: Ok(ApiData::Sales(vec![])),
            },
            now,
        );
        assert!(!state.loading.is_visible());
    }

    #[test]
    fn facade_errors_surface_as_error_toasts() {
        let now = Instant::now();
        let mut state = loaded_state();
        let token = state.issue_token(Resource::Sales);

        state.apply_response(
            ApiResponse {
                token,
                command: ApiCommand::ListSales,
                result: Err(ApiError::Transport("connection refused".to_string())),
            },
            now,
        );
        assert_eq!(state.toasts.live().len(), 1);
        assert!(state.toasts.live()[0].message.contains("connection refused"));
    }

    #[test]
    fn successful_mutations_toast_and_request_a_reload() {
        let now = Instant::now();
        let mut state = loaded_state();
        let token = state.issue_token(Resource::Sales);

        let reload = state.apply_response(
            ApiResponse {
                token,
                command: ApiCommand::DeleteSale(1),
                result: Ok(ApiData::Deleted),
            },
            now,
        );
        assert_eq!(reload, Some(Resource::Sales));
        assert_eq!(state.toasts.live()[0].message, "Sale deleted");
    }

    #[test]
    fn switching_views_syncs_the_search_buffer() {
        let mut state = loaded_state();
        state.search_input = "coffee".to_string();
        state.apply_search();
        assert_eq!(state.sales.search_term(), "coffee");

        state.switch_view(View::Inventory);
        assert_eq!(state.search_input, "");
        state.switch_view(View::Sales);
        assert_eq!(state.search_input, "coffee");
    }

    #[test]
    fn status_cycle_command_tracks_the_selected_sale() {
        let state = loaded_state();
        let command = state.status_cycle_command().unwrap();
        assert!(matches!(command, ApiCommand::UpdateSaleStatus(1, _)));
    }

    #[test]
    fn form_command_builds_create_and_update() {
        let mut state = loaded_state();
        state.switch_view(View::Inventory);

        let mut create = state.blank_form().unwrap();
        create.form = create.form.with_values(&[
            ("sku", "NEW-1".to_string()),
            ("name", "New thing".to_string()),
            ("category", "Misc".to_string()),
            ("price", "1.00".to_string()),
            ("cost", "0.50".to_string()),
            ("stock", "5".to_string()),
            ("reorder", "2".to_string()),
        ]);
        assert!(create.form.validate());
        assert!(matches!(
            state.form_command(&create),
            Some(ApiCommand::CreateProduct(_))
        ));

        let edit = state.edit_form_for_selection().unwrap();
        assert!(matches!(
            state.form_command(&edit),
            Some(ApiCommand::UpdateProduct(..))
        ));
    }
}
