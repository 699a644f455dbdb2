use std::collections::BTreeMap;

use crate::data::aggregate::{self, SummaryStats};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::RecordStore;
use crate::data::page::{self, Page};

/// Rows per page of the record table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How many manufacturers the top-makes distribution keeps.
pub const TOP_MAKES: usize = 5;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// The store starts empty and transitions to loaded exactly once
/// ([`set_store`](Self::set_store)); every query accessor is legal in both
/// states and degenerates to zero/empty results before the load completes.
pub struct DashboardState {
    /// The loaded dataset (empty until the one-time load completes).
    pub store: RecordStore,
    /// Whether the store holds a completed load.
    pub loaded: bool,

    /// Current filter-control selection.
    pub selection: FilterSelection,

    /// Indices of records passing the current selection (cached).
    pub visible: Vec<usize>,

    /// Current 1-based page of the record table.
    pub page_number: usize,
    pub page_size: usize,

    /// Status / error message for the consumer.
    pub status_message: Option<String>,

    /// Whether the one-time dataset load is still in flight.
    pub loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            store: RecordStore::default(),
            loaded: false,
            selection: FilterSelection::default(),
            visible: Vec::new(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            status_message: None,
            loading: false,
        }
    }
}

impl DashboardState {
    /// Ingest the loaded store, reset the selection, show page one.
    pub fn set_store(&mut self, store: RecordStore) {
        self.visible = (0..store.len()).collect();
        self.store = store;
        self.loaded = true;
        self.selection = FilterSelection::default();
        self.page_number = 1;
        self.status_message = None;
        self.loading = false;
    }

    /// Record a failed load. The store stays empty indefinitely; retry is
    /// the caller's policy, not scheduled here.
    pub fn set_load_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.loading = false;
    }

    /// Recompute the visible set after a selection change, then re-clamp
    /// the current page, which may now point past the new last page.
    pub fn refilter(&mut self) {
        self.visible = filtered_indices(&self.store, &self.selection);
        self.page_number = page::clamp_page(self.page_number, self.visible.len(), self.page_size);
    }

    /// Set or clear the year constraint.
    pub fn set_year(&mut self, year: Option<u16>) {
        self.selection.year = year;
        self.refilter();
    }

    /// Set or clear the make constraint.
    pub fn set_make(&mut self, make: Option<String>) {
        self.selection.make = make;
        self.refilter();
    }

    // ---- pagination controls (clamped here, not in the paginator) ----

    /// Jump to an absolute 1-based page, clamped into range.
    pub fn set_page(&mut self, page_number: usize) {
        self.page_number = page::clamp_page(page_number, self.visible.len(), self.page_size);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page_number + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page_number.saturating_sub(1));
    }

    pub fn page_count(&self) -> usize {
        page::page_count(self.visible.len(), self.page_size)
    }

    // ---- query accessors: fresh value objects over the current view ----

    pub fn summary(&self) -> SummaryStats {
        aggregate::summarize(&self.store, &self.visible)
    }

    /// Vehicle-type distribution of the current view.
    pub fn type_distribution(&self) -> BTreeMap<String, usize> {
        aggregate::distribution_by(&self.store, &self.visible, |r| r.vehicle_type.as_str())
    }

    /// The [`TOP_MAKES`] largest manufacturers of the current view.
    pub fn top_makes(&self) -> Vec<(String, usize)> {
        aggregate::top_n(&self.store, &self.visible, |r| r.make.as_str(), TOP_MAKES)
    }

    /// Mean electric range per model year of the current view.
    pub fn range_by_year(&self) -> Vec<(u16, f64)> {
        aggregate::average_by_year(&self.store, &self.visible)
    }

    pub fn current_page(&self) -> Page<'_> {
        page::paginate(&self.store, &self.visible, self.page_number, self.page_size)
    }
}
