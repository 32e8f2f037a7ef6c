//! Visible rows, cursor and row-to-record mapping

use crate::filter::filter;
use crate::repository::DisplayRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub identifier: String,
    pub username: String,
}

#[derive(Debug, Default)]
pub struct ListController {
    query: String,
    rows: Vec<VisibleRow>,
    /// Master-list index of each visible row
    view: Vec<usize>,
    cursor: usize,
}

impl ListController {
    /// Controller showing every record
    pub fn new(records: &[DisplayRecord]) -> Self {
        let mut list = Self::default();
        list.rebuild(records);
        list
    }

    /// Re-filter from scratch for `query`
    pub fn on_query_changed(&mut self, records: &[DisplayRecord], query: &str) {
        self.query = query.to_string();
        self.rebuild(records);
    }

    fn rebuild(&mut self, records: &[DisplayRecord]) {
        self.view = filter(records, &self.query);
        self.rows = self
            .view
            .iter()
            .map(|&index| VisibleRow {
                identifier: records[index].identifier.clone(),
                username: records[index].username.clone(),
            })
            .collect();
        if self.cursor >= self.rows.len() {
            self.cursor = 0;
        }
        tracing::debug!(
            "Filter {:?} shows {} of {} items",
            self.query,
            self.rows.len(),
            records.len()
        );
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Master-list index under the cursor, `None` when the view is empty
    pub fn selected_master_index(&self) -> Option<usize> {
        self.view.get(self.cursor).copied()
    }

    /// Move the cursor by `delta`, clamped to the visible rows
    pub fn navigate(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Put the cursor on `row` if it exists
    pub fn select_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.cursor = row;
        }
    }
}
