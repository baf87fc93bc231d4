//! Main TUI application.

use std::io;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::api::{ApiCommand, ApiRequest, Resource, RetailApi, spawn_worker};
use crate::export::write_csv;

use super::event::{Event, EventHandler};
use super::input::{Effect, handle_key};
use super::render::render;
use super::state::{AppState, SEARCH_DEBOUNCE};

/// Main TUI application.
pub struct App {
    state: AppState,
    requests: Sender<ApiRequest>,
    events: EventHandler,
    /// Periodic reload of the active view; `None` disables it.
    refresh: Option<Duration>,
    last_refresh: Instant,
    should_quit: bool,
}

impl App {
    /// Creates the app around a facade backend. Facade calls run on a
    /// worker thread; completions come back through the event channel.
    pub fn new(
        api: Box<dyn RetailApi>,
        backend: String,
        tick_rate: Duration,
        refresh: Option<Duration>,
    ) -> Self {
        let events = EventHandler::new(tick_rate);
        let completions = events.sender();
        let requests = spawn_worker(api, move |response| {
            let _ = completions.send(Event::Api(response));
        });
        Self {
            state: AppState::new(backend),
            requests,
            events,
            refresh,
            last_refresh: Instant::now(),
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial data fetch for the starting view.
        self.load(self.state.view.resource());

        // Main loop
        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            match self.events.next() {
                Ok(Event::Tick) => self.on_tick(Instant::now()),
                Ok(Event::Key(key)) => {
                    let effect = handle_key(&mut self.state, key, Instant::now());
                    self.apply_effect(effect);
                }
                Ok(Event::Resize(_)) => {}
                Ok(Event::Api(response)) => {
                    if let Some(resource) = self.state.apply_response(response, Instant::now()) {
                        self.load(resource);
                    }
                }
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Quit => self.should_quit = true,
            Effect::Load(resource) => self.load(resource),
            Effect::Mutate(command) => self.dispatch(command),
            Effect::Export => self.export(),
        }
    }

    /// Issues a tokened list request and shows the resource's loading
    /// scope.
    fn load(&mut self, resource: Resource) {
        self.dispatch(list_command(resource));
    }

    fn dispatch(&mut self, command: ApiCommand) {
        let resource = command.resource();
        let token = self.state.issue_token(resource);
        self.state.loading.show(Some(resource.scope()));
        if self.requests.send(ApiRequest { token, command }).is_err() {
            warn!("facade worker is gone");
            self.state.loading.hide(Some(resource.scope()));
            self.state
                .toasts
                .error("Backend worker stopped", Instant::now());
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.state.toasts.tick(now);
        self.state.modal.tick(now);

        // Apply a pending search edit once the quiet period has elapsed.
        if let Some(dirty_at) = self.state.search_dirty_at
            && now.duration_since(dirty_at) >= SEARCH_DEBOUNCE
        {
            self.state.apply_search();
        }

        // Periodic reload of the active view, but never underneath an
        // open modal, popup or form.
        if let Some(every) = self.refresh
            && now.duration_since(self.last_refresh) >= every
        {
            self.last_refresh = now;
            if !self.state.modal.is_active()
                && !self.state.popup.is_open()
                && self.state.form.is_none()
            {
                self.load(self.state.view.resource());
            }
        }
    }

    /// Writes the active view's filtered rows (all pages) to a CSV file
    /// next to the working directory.
    fn export(&mut self) {
        let now = Instant::now();
        let Some((headers, rows)) = self.state.export_data() else {
            return;
        };
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let filename = format!(
            "tilltop-{}-{}.csv",
            self.state.view.title().to_lowercase(),
            stamp
        );
        match write_csv(std::path::Path::new(&filename), &headers, &rows) {
            Ok(()) => {
                self.state
                    .toasts
                    .success(format!("Exported {}", filename), now);
            }
            Err(e) => {
                self.state
                    .toasts
                    .error(format!("Export failed: {}", e), now);
            }
        }
    }
}

/// The list operation that refreshes one resource.
fn list_command(resource: Resource) -> ApiCommand {
    match resource {
        Resource::Sales => ApiCommand::ListSales,
        Resource::Products => ApiCommand::ListProducts,
        Resource::Customers => ApiCommand::ListCustomers,
        Resource::Suppliers => ApiCommand::ListSuppliers,
        Resource::Invoices => ApiCommand::ListInvoices,
        Resource::Expenses => ApiCommand::ListExpenses,
        Resource::Returns => ApiCommand::ListReturns,
        Resource::Reports => ApiCommand::LoadReports,
    }
}
