//! Generic data table engine: search, sort, pagination over an in-memory
//! collection.
//!
//! The engine is schema-agnostic: it works against any type implementing
//! [`Record`] (a key-value capability plus a stable identity) and a static
//! set of [`Column`] descriptors. Output is a renderer-independent
//! [`TableView`]; the TUI maps it to ratatui rows, another frontend could
//! map it to anything else.

use std::cmp::Ordering;

/// A single field value exposed by a record.
///
/// `Missing` is the degenerate case for absent/undefined fields: it never
/// matches a search term and sorts below every present value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    /// Display form of the value, `None` when missing.
    pub fn display(&self) -> Option<String> {
        match self {
            FieldValue::Int(v) => Some(v.to_string()),
            FieldValue::Float(v) => Some(format!("{:.2}", v)),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Missing => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Comparator over field values: numeric when both operands are numeric,
/// lexicographic otherwise; `Missing` sorts lowest.
fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Less,
        (_, FieldValue::Missing) => Ordering::Greater,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => {
                let x = a.display().unwrap_or_default();
                let y = b.display().unwrap_or_default();
                x.cmp(&y)
            }
        },
    }
}

/// Row contract for the engine: a stable identity used to key row actions
/// and a field lookup by column key.
pub trait Record {
    fn id(&self) -> u64;
    fn field(&self, key: &str) -> FieldValue;
}

/// Column descriptor: maps a record field to a displayed column.
///
/// `render` overrides the default stringification; synthetic columns
/// (keys not present on the record) must provide one.
pub struct Column<R> {
    pub key: &'static str,
    pub title: &'static str,
    pub width: u16,
    pub sortable: bool,
    pub render: Option<fn(&R) -> String>,
}

impl<R: Record> Column<R> {
    /// Display text of this column for one record.
    pub fn cell(&self, record: &R) -> String {
        match self.render {
            Some(f) => f(record),
            None => record.field(self.key).display().unwrap_or_default(),
        }
    }
}

/// Recognized construction options.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    pub searchable: bool,
    pub sortable: bool,
    pub pagination: bool,
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            searchable: true,
            sortable: true,
            pagination: true,
            page_size: 10,
        }
    }
}

/// One header in the rendered view, with the active sort indicator.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub title: &'static str,
    pub width: u16,
    /// `Some(true)` = sorted ascending, `Some(false)` = descending.
    pub sort: Option<bool>,
}

/// One rendered row: the record identity plus its display cells.
#[derive(Debug, Clone)]
pub struct RowView {
    pub id: u64,
    pub cells: Vec<String>,
}

/// Pagination controls for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub current: usize,
    pub total: usize,
    /// Visible page numbers: up to 2 either side of current.
    pub window: Vec<usize>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Filtered record count across all pages.
    pub matched: usize,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    /// Cursor position within `rows`.
    pub selected: Option<usize>,
    pub pager: Option<PagerView>,
    /// Set when `rows` is empty; rendered across the full column span.
    pub placeholder: Option<String>,
}

/// State for one table: backing records, search/sort/page state and the
/// selection cursor.
///
/// State is mutated only through the interaction operations below;
/// [`TableState::update_data`] is the one external mutation and resets the
/// page while preserving sort and search.
pub struct TableState<R: Record + 'static> {
    columns: &'static [Column<R>],
    config: TableConfig,
    records: Vec<R>,
    current_page: usize,
    sort_column: Option<usize>,
    sort_ascending: bool,
    search_term: String,
    /// Cursor within the current page (TUI selection, not part of the
    /// filter/sort/page pipeline).
    pub selected: usize,
}

impl<R: Record> TableState<R> {
    pub fn new(columns: &'static [Column<R>], config: TableConfig) -> Self {
        Self {
            columns,
            config,
            records: Vec::new(),
            current_page: 1,
            sort_column: None,
            sort_ascending: true,
            search_term: String::new(),
            selected: 0,
        }
    }

    pub fn with_data(
        columns: &'static [Column<R>],
        config: TableConfig,
        records: Vec<R>,
    ) -> Self {
        let mut state = Self::new(columns, config);
        state.records = records;
        state
    }

    pub fn columns(&self) -> &'static [Column<R>] {
        self.columns
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the backing collection. Resets the page to 1, preserves
    /// sort column, direction and search term.
    pub fn update_data(&mut self, records: Vec<R>) {
        self.records = records;
        self.current_page = 1;
        self.selected = 0;
    }

    /// Updates the search term and resets the page to 1.
    ///
    /// The caller owns debouncing; this applies immediately.
    pub fn set_search(&mut self, term: &str) {
        if !self.config.searchable {
            return;
        }
        if self.search_term != term {
            self.search_term = term.to_string();
            self.current_page = 1;
            self.selected = 0;
        }
    }

    /// Header-click semantics: a repeated column toggles direction, a new
    /// column sorts ascending. The page is not reset.
    pub fn sort_by_column(&mut self, column: usize) {
        if !self.config.sortable || column >= self.columns.len() {
            return;
        }
        if !self.columns[column].sortable {
            return;
        }
        if self.sort_column == Some(column) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = Some(column);
            self.sort_ascending = true;
        }
    }

    /// Cycles the sort to the next sortable column (ascending).
    pub fn sort_next_column(&mut self) {
        if !self.config.sortable || self.columns.is_empty() {
            return;
        }
        let start = self.sort_column.map(|c| c + 1).unwrap_or(0);
        for off in 0..self.columns.len() {
            let idx = (start + off) % self.columns.len();
            if self.columns[idx].sortable {
                self.sort_column = Some(idx);
                self.sort_ascending = true;
                return;
            }
        }
    }

    /// Toggles direction on the active sort column, if any.
    pub fn toggle_sort_direction(&mut self) {
        if let Some(col) = self.sort_column {
            self.sort_by_column(col);
        }
    }

    /// Indices into `records` after search and sort.
    ///
    /// Search: case-insensitive substring over every configured column's
    /// display text; a record matches if ANY column matches. Sort: stable,
    /// ties keep original order in both directions.
    pub fn filtered_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = if self.search_term.is_empty() {
            (0..self.records.len()).collect()
        } else {
            let needle = self.search_term.to_lowercase();
            (0..self.records.len())
                .filter(|&i| self.matches(&self.records[i], &needle))
                .collect()
        };

        if let Some(col) = self.sort_column {
            let key = self.columns[col].key;
            let asc = self.sort_ascending;
            indices.sort_by(|&a, &b| {
                let cmp = compare_values(
                    &self.records[a].field(key),
                    &self.records[b].field(key),
                );
                if asc { cmp } else { cmp.reverse() }
            });
        }
        indices
    }

    fn matches(&self, record: &R, needle: &str) -> bool {
        self.columns.iter().any(|col| {
            let text = match col.render {
                Some(f) => f(record),
                None => match record.field(col.key).display() {
                    Some(t) => t,
                    None => return false,
                },
            };
            text.to_lowercase().contains(needle)
        })
    }

    /// Number of pages for the current filter; at least 1.
    pub fn total_pages(&self) -> usize {
        if !self.config.pagination {
            return 1;
        }
        let matched = self.filtered_indices().len();
        matched.div_ceil(self.config.page_size).max(1)
    }

    /// Sets the page when the target differs from current and lies within
    /// `[1, total_pages]`; anything else is a no-op.
    pub fn set_page(&mut self, page: usize) {
        if !self.config.pagination {
            return;
        }
        if page == self.current_page || page < 1 || page > self.total_pages() {
            return;
        }
        self.current_page = page;
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        // Guard: current_page is 1-based, page 0 is never valid.
        if self.current_page > 1 {
            self.set_page(self.current_page - 1);
        }
    }

    /// The slice of filtered indices belonging to the current page.
    fn page_indices(&self, filtered: &[usize]) -> Vec<usize> {
        if !self.config.pagination {
            return filtered.to_vec();
        }
        let start = (self.current_page - 1) * self.config.page_size;
        filtered
            .iter()
            .skip(start)
            .take(self.config.page_size)
            .copied()
            .collect()
    }

    /// Visible page-number window: up to 2 pages either side of current.
    fn page_window(&self, total: usize) -> Vec<usize> {
        let lo = self.current_page.saturating_sub(2).max(1);
        let hi = (self.current_page + 2).min(total);
        (lo..=hi).collect()
    }

    /// Identity of the record under the cursor, if any.
    pub fn selected_id(&self) -> Option<u64> {
        let filtered = self.filtered_indices();
        let page = self.page_indices(&filtered);
        page.get(self.selected.min(page.len().saturating_sub(1)))
            .map(|&i| self.records[i].id())
    }

    /// Reference to the record under the cursor, if any.
    pub fn selected_record(&self) -> Option<&R> {
        let filtered = self.filtered_indices();
        let page = self.page_indices(&filtered);
        page.get(self.selected.min(page.len().saturating_sub(1)))
            .map(|&i| &self.records[i])
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let filtered = self.filtered_indices();
        let max = self.page_indices(&filtered).len().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(max);
    }

    /// Recomputes filter → sort → page slice and produces the view model.
    pub fn view(&self) -> TableView {
        let filtered = self.filtered_indices();
        let page = self.page_indices(&filtered);

        let headers = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| HeaderView {
                title: col.title,
                width: col.width,
                sort: match self.sort_column {
                    Some(s) if s == i => Some(self.sort_ascending),
                    _ => None,
                },
            })
            .collect();

        let rows: Vec<RowView> = page
            .iter()
            .map(|&i| {
                let record = &self.records[i];
                RowView {
                    id: record.id(),
                    cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                }
            })
            .collect();

        let pager = if self.config.pagination {
            let total = filtered.len().div_ceil(self.config.page_size).max(1);
            Some(PagerView {
                current: self.current_page,
                total,
                window: self.page_window(total),
                prev_enabled: self.current_page > 1,
                next_enabled: self.current_page < total,
                matched: filtered.len(),
            })
        } else {
            None
        };

        let placeholder = if rows.is_empty() {
            Some(if self.search_term.is_empty() {
                "No records".to_string()
            } else {
                format!("No records match \"{}\"", self.search_term)
            })
        } else {
            None
        };

        let selected = if rows.is_empty() {
            None
        } else {
            Some(self.selected.min(rows.len() - 1))
        };

        TableView {
            headers,
            rows,
            selected,
            pager,
            placeholder,
        }
    }

    /// Headers plus every filtered row (all pages), for export.
    pub fn export_rows(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        let headers = self.columns.iter().map(|c| c.title).collect();
        let rows = self
            .filtered_indices()
            .iter()
            .map(|&i| {
                let record = &self.records[i];
                self.columns.iter().map(|c| c.cell(record)).collect()
            })
            .collect();
        (headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Item {
        id: u64,
        name: &'static str,
        price: Option<i64>,
    }

    impl Record for Item {
        fn id(&self) -> u64 {
            self.id
        }

        fn field(&self, key: &str) -> FieldValue {
            match key {
                "name" => FieldValue::Text(self.name.to_string()),
                "price" => match self.price {
                    Some(p) => FieldValue::Int(p),
                    None => FieldValue::Missing,
                },
                _ => FieldValue::Missing,
            }
        }
    }

    static COLUMNS: &[Column<Item>] = &[
        Column {
            key: "name",
            title: "NAME",
            width: 16,
            sortable: true,
            render: None,
        },
        Column {
            key: "price",
            title: "PRICE",
            width: 8,
            sortable: true,
            render: None,
        },
    ];

    fn item(id: u64, name: &'static str, price: i64) -> Item {
        Item {
            id,
            name,
            price: Some(price),
        }
    }

    fn table(records: Vec<Item>) -> TableState<Item> {
        TableState::with_data(COLUMNS, TableConfig::default(), records)
    }

    fn names(state: &TableState<Item>) -> Vec<String> {
        state
            .filtered_indices()
            .iter()
            .map(|&i| state.records()[i].name.to_string())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_substring_over_all_columns() {
        let mut t = table(vec![
            item(1, "Green Tea", 250),
            item(2, "Coffee", 400),
            item(3, "Tea Pot", 1250),
        ]);
        t.set_search("tea");
        assert_eq!(names(&t), vec!["Green Tea", "Tea Pot"]);

        // Matching against the price column's stringified value.
        t.set_search("400");
        assert_eq!(names(&t), vec!["Coffee"]);
    }

    #[test]
    fn search_output_is_subset_and_non_matches_are_excluded() {
        let data = vec![
            item(1, "Apple", 100),
            item(2, "Banana", 50),
            item(3, "apple pie", 300),
        ];
        let mut t = table(data.clone());
        t.set_search("APPLE");
        let matched = names(&t);
        assert_eq!(matched, vec!["Apple", "apple pie"]);
        // Non-matching records have no matching column at all.
        assert!(!matched.contains(&"Banana".to_string()));
    }

    #[test]
    fn missing_field_never_matches_search() {
        let mut t = table(vec![
            Item {
                id: 1,
                name: "Ghost",
                price: None,
            },
            item(2, "Real", 42),
        ]);
        t.set_search("42");
        assert_eq!(names(&t), vec!["Real"]);
    }

    #[test]
    fn sort_numeric_and_direction_toggle() {
        let mut t = table(vec![
            item(1, "a", 300),
            item(2, "b", 100),
            item(3, "c", 200),
        ]);
        t.sort_by_column(1);
        assert_eq!(names(&t), vec!["b", "c", "a"]);
        assert!(t.sort_ascending());

        // Same column again toggles direction.
        t.sort_by_column(1);
        assert!(!t.sort_ascending());
        assert_eq!(names(&t), vec!["a", "c", "b"]);

        // A new column resets to ascending.
        t.sort_by_column(0);
        assert!(t.sort_ascending());
        assert_eq!(names(&t), vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_is_idempotent_and_reverses_exactly() {
        let mut t = table(vec![
            item(1, "d", 4),
            item(2, "a", 1),
            item(3, "c", 3),
            item(4, "b", 2),
        ]);
        t.sort_by_column(0);
        let ascending = names(&t);
        // Re-applying the same comparator changes nothing.
        assert_eq!(names(&t), ascending);

        t.sort_by_column(0);
        let descending = names(&t);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn sort_is_stable_on_ties_in_both_directions() {
        let mut t = table(vec![
            item(1, "first", 5),
            item(2, "second", 5),
            item(3, "third", 5),
            item(4, "cheap", 1),
        ]);
        t.sort_by_column(1);
        assert_eq!(names(&t), vec!["cheap", "first", "second", "third"]);

        t.sort_by_column(1);
        // Descending: the tied group stays in original relative order.
        assert_eq!(names(&t), vec!["first", "second", "third", "cheap"]);
    }

    #[test]
    fn missing_sorts_lowest() {
        let mut t = table(vec![
            item(1, "a", 10),
            Item {
                id: 2,
                name: "b",
                price: None,
            },
            item(3, "c", 5),
        ]);
        t.sort_by_column(1);
        assert_eq!(names(&t), vec!["b", "c", "a"]);
    }

    #[test]
    fn unsortable_state_ignores_header_clicks() {
        let config = TableConfig {
            sortable: false,
            ..TableConfig::default()
        };
        let mut t =
            TableState::with_data(COLUMNS, config, vec![item(1, "b", 2), item(2, "a", 1)]);
        t.sort_by_column(0);
        assert_eq!(t.sort_column(), None);
        assert_eq!(names(&t), vec!["b", "a"]);
    }

    #[test]
    fn pagination_slices_25_records_into_10_10_5() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);
        assert_eq!(t.total_pages(), 3);
        assert_eq!(t.view().rows.len(), 10);

        t.set_page(2);
        assert_eq!(t.view().rows.len(), 10);
        t.set_page(3);
        assert_eq!(t.view().rows.len(), 5);
    }

    #[test]
    fn out_of_range_pages_are_no_ops() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);
        t.set_page(2);
        t.set_page(0);
        assert_eq!(t.current_page(), 2);
        t.set_page(4);
        assert_eq!(t.current_page(), 2);
        // Same-page click is also a no-op.
        t.set_page(2);
        assert_eq!(t.current_page(), 2);
    }

    #[test]
    fn prev_next_are_disabled_at_boundaries() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);

        let pager = t.view().pager.unwrap();
        assert!(!pager.prev_enabled);
        assert!(pager.next_enabled);

        t.prev_page();
        assert_eq!(t.current_page(), 1);

        t.set_page(3);
        let pager = t.view().pager.unwrap();
        assert!(pager.prev_enabled);
        assert!(!pager.next_enabled);

        t.next_page();
        assert_eq!(t.current_page(), 3);
    }

    #[test]
    fn page_window_holds_at_most_five_pages() {
        let records: Vec<Item> = (0..100).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);
        assert_eq!(t.total_pages(), 10);

        assert_eq!(t.view().pager.unwrap().window, vec![1, 2, 3]);

        t.set_page(5);
        assert_eq!(t.view().pager.unwrap().window, vec![3, 4, 5, 6, 7]);

        t.set_page(10);
        assert_eq!(t.view().pager.unwrap().window, vec![8, 9, 10]);
    }

    #[test]
    fn update_data_resets_page_and_preserves_sort_and_search() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);
        t.sort_by_column(1);
        t.set_search("rec");
        t.set_page(3);

        t.update_data((0..12).map(|i| item(i, "rec", i as i64)).collect());
        assert_eq!(t.current_page(), 1);
        assert_eq!(t.sort_column(), Some(1));
        assert_eq!(t.search_term(), "rec");
    }

    #[test]
    fn search_resets_page_sort_does_not() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let mut t = table(records);
        t.set_page(3);
        t.sort_by_column(1);
        assert_eq!(t.current_page(), 3);
        t.set_search("rec");
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn empty_result_renders_placeholder() {
        let mut t = table(vec![item(1, "Apple", 100)]);
        t.set_search("zzz");
        let view = t.view();
        assert!(view.rows.is_empty());
        assert!(view.placeholder.as_deref().unwrap().contains("zzz"));
        assert_eq!(view.selected, None);
    }

    #[test]
    fn three_records_page_size_two_scenario() {
        let config = TableConfig {
            page_size: 2,
            ..TableConfig::default()
        };
        let mut t = TableState::with_data(
            COLUMNS,
            config,
            vec![item(1, "one", 1), item(2, "two", 2), item(3, "three", 3)],
        );

        let view = t.view();
        assert_eq!(view.rows.len(), 2);
        let pager = view.pager.unwrap();
        assert!(pager.next_enabled);
        assert!(!pager.prev_enabled);

        t.next_page();
        let view = t.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, 3);
        let pager = view.pager.unwrap();
        assert!(!pager.next_enabled);
        assert!(pager.prev_enabled);
    }

    #[test]
    fn pagination_disabled_returns_full_set() {
        let config = TableConfig {
            pagination: false,
            ..TableConfig::default()
        };
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let t = TableState::with_data(COLUMNS, config, records);
        let view = t.view();
        assert_eq!(view.rows.len(), 25);
        assert!(view.pager.is_none());
    }

    #[test]
    fn selection_follows_page_and_data_changes() {
        let config = TableConfig {
            page_size: 2,
            ..TableConfig::default()
        };
        let mut t = TableState::with_data(
            COLUMNS,
            config,
            vec![item(1, "one", 1), item(2, "two", 2), item(3, "three", 3)],
        );
        t.select_down();
        assert_eq!(t.selected_id(), Some(2));
        // Cursor clamps to the page.
        t.select_down();
        assert_eq!(t.selected_id(), Some(2));

        t.next_page();
        assert_eq!(t.selected_id(), Some(3));
    }

    #[test]
    fn export_covers_all_filtered_pages() {
        let records: Vec<Item> = (0..25).map(|i| item(i, "rec", i as i64)).collect();
        let t = table(records);
        let (headers, rows) = t.export_rows();
        assert_eq!(headers, vec!["NAME", "PRICE"]);
        assert_eq!(rows.len(), 25);
    }
}
