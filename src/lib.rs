//! tilltop — terminal retail management dashboard.
//!
//! Provides:
//! - `table` — generic table engine (search, sort, pagination)
//! - `overlay` — toast, modal and loading-scope managers
//! - `api` — data access facade (mock and REST backends, worker plumbing)
//! - `storage` — domain records and dataset blob persistence
//! - `form` — form state and field validation
//! - `view` — per-resource columns, forms and detail configuration
//! - `fmt` — shared formatting helpers (money, dates, truncation)
//! - `export` — CSV export of table views
//! - `tui` — terminal UI (ratatui/crossterm): state, input, rendering

pub mod api;
pub mod export;
pub mod fmt;
pub mod form;
pub mod overlay;
pub mod storage;
pub mod table;
pub mod tui;
pub mod view;
