//! Tabular view controller.
//!
//! [`TableView`] holds a caller-supplied list of [`TableRecord`]s together
//! with the current filter text and sort state, and exposes the derived
//! (filtered, then sorted) rows. The derived list is rebuilt from scratch by
//! [`derive_rows`] whenever any of the four inputs changes.

use std::cmp::Ordering;

// ── TableRecord ────────────────────────────────────────────────────────────────

/// One row: six display strings plus the resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account handle.
    pub username: String,
    /// Role label.
    pub role: String,
    /// Stage or status label.
    pub stage: String,
    /// Location label.
    pub location: String,
    /// Formatted duration label.
    pub duration: String,
}

impl TableRecord {
    /// Value of the column addressed by `key`.
    pub fn field(&self, key: SortKey) -> &str {
        match key {
            SortKey::Name => &self.name,
            SortKey::Username => &self.username,
            SortKey::Role => &self.role,
            SortKey::Stage => &self.stage,
            SortKey::Location => &self.location,
            SortKey::Duration => &self.duration,
        }
    }

    /// All six display fields, in column order.
    pub fn fields(&self) -> [&str; 6] {
        SortKey::ALL.map(|key| self.field(key))
    }
}

// ── SortKey ────────────────────────────────────────────────────────────────────

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Username,
    Role,
    Stage,
    Location,
    Duration,
}

impl SortKey {
    /// Columns in display order.
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Username,
        SortKey::Role,
        SortKey::Stage,
        SortKey::Location,
        SortKey::Duration,
    ];

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Username => "User",
            SortKey::Role => "Role",
            SortKey::Stage => "Stage",
            SortKey::Location => "Location",
            SortKey::Duration => "Time",
        }
    }

    /// Column for a zero-based index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

// ── Derivation ─────────────────────────────────────────────────────────────────

/// `true` when any display field contains `query` case-insensitively.
///
/// `query` is expected to be trimmed and lower-cased already; an empty query
/// matches everything.
pub fn matches_filter(record: &TableRecord, query: &str) -> bool {
    query.is_empty()
        || record
            .fields()
            .iter()
            .any(|field| field.to_lowercase().contains(query))
}

/// Normalise raw filter input: surrounding whitespace trimmed, lower-cased.
pub fn normalize_filter(filter_text: &str) -> String {
    filter_text.trim().to_lowercase()
}

/// Filter `source` by `filter_text`, then order by `sort_key`.
///
/// Without a key the filtered rows keep source order. With a key the rows are
/// ordered by plain string comparison of that column, descending when
/// `reversed`. The sort is stable in both directions, so ties keep their
/// source-relative order.
pub fn derive_rows(
    source: &[TableRecord],
    filter_text: &str,
    sort_key: Option<SortKey>,
    reversed: bool,
) -> Vec<TableRecord> {
    let query = normalize_filter(filter_text);

    let mut rows: Vec<TableRecord> = source
        .iter()
        .filter(|record| matches_filter(record, &query))
        .cloned()
        .collect();

    if let Some(key) = sort_key {
        rows.sort_by(|a, b| {
            let ord: Ordering = a.field(key).cmp(b.field(key));
            if reversed {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    rows
}

// ── TableView ──────────────────────────────────────────────────────────────────

/// Search + sort state over a record list, with the derived rows cached.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    source: Vec<TableRecord>,
    filter_text: String,
    sort_key: Option<SortKey>,
    sort_reversed: bool,
    rows: Vec<TableRecord>,
    selected: usize,
}

impl TableView {
    /// View over `source` with no filter and no sort.
    pub fn new(source: Vec<TableRecord>) -> Self {
        let mut view = Self {
            source,
            ..Self::default()
        };
        view.recompute();
        view
    }

    /// Replace the source list.
    pub fn set_source(&mut self, source: Vec<TableRecord>) {
        self.source = source;
        self.recompute();
    }

    /// Replace the filter text.
    pub fn set_filter(&mut self, filter_text: impl Into<String>) {
        self.filter_text = filter_text.into();
        self.recompute();
    }

    /// Append one character to the filter text.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_text.push(c);
        self.recompute();
    }

    /// Remove the last filter character, if any.
    pub fn pop_filter_char(&mut self) {
        if self.filter_text.pop().is_some() {
            self.recompute();
        }
    }

    /// Set the sort state directly.
    pub fn set_sort(&mut self, sort_key: Option<SortKey>, reversed: bool) {
        self.sort_key = sort_key;
        self.sort_reversed = reversed;
        self.recompute();
    }

    /// Select `key`: the active key flips direction, any other key becomes
    /// active in ascending order.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let reversed = if self.sort_key == Some(key) {
            !self.sort_reversed
        } else {
            false
        };
        self.set_sort(Some(key), reversed);
    }

    pub fn source(&self) -> &[TableRecord] {
        &self.source
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn sort_reversed(&self) -> bool {
        self.sort_reversed
    }

    /// Derived rows for display.
    pub fn rows(&self) -> &[TableRecord] {
        &self.rows
    }

    /// `true` when the derived list is empty and a "no results" state should
    /// be rendered.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the highlighted row within [`rows`](Self::rows).
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Currently highlighted record, if any.
    pub fn selected_record(&self) -> Option<&TableRecord> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn recompute(&mut self) {
        self.rows = derive_rows(
            &self.source,
            &self.filter_text,
            self.sort_key,
            self.sort_reversed,
        );
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
