//! Draft / active filter state plus the derived result list.
//!
//! Edits touch only the draft. `apply` copies draft to active and
//! recomputes results from the full record set; `sort_change` only
//! reorders the current results.

use super::history::{HistoryError, SearchHistory};
use super::{filter_records, sort_records, Searchable};
use crate::models::SortOption;

pub struct SearchState<R: Searchable> {
    all: Vec<R>,
    draft: R::Filters,
    active: R::Filters,
    results: Vec<R>,
    sort: SortOption<R::SortField>,
    history: Option<SearchHistory<R::Filters>>,
}

impl<R: Searchable> SearchState<R> {
    /// Results start as the full record set, in input order.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            results: records.clone(),
            all: records,
            draft: R::Filters::default(),
            active: R::Filters::default(),
            sort: R::default_sort(),
            history: None,
        }
    }

    pub fn with_history(mut self, history: SearchHistory<R::Filters>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn records(&self) -> &[R] {
        &self.all
    }

    pub fn draft(&self) -> &R::Filters {
        &self.draft
    }

    pub fn active(&self) -> &R::Filters {
        &self.active
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn sort_option(&self) -> SortOption<R::SortField> {
        self.sort
    }

    pub fn history(&self) -> Option<&SearchHistory<R::Filters>> {
        self.history.as_ref()
    }

    /// Draft has edits not yet applied.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.active
    }

    /// Mutate the draft. Results are not recomputed.
    pub fn edit(&mut self, f: impl FnOnce(&mut R::Filters)) {
        f(&mut self.draft);
    }

    /// Replace the draft wholesale.
    pub fn set_draft(&mut self, filters: R::Filters) {
        self.draft = filters;
    }

    /// Promote the draft and recompute results.
    ///
    /// A non-blank query is pushed to recent history as typed. History write
    /// failures are logged and do not undo the apply.
    pub fn apply(&mut self) -> &[R] {
        self.active = self.draft.clone();
        self.recompute();

        if let Some(history) = self.history.as_mut() {
            if let Err(e) = history.add_recent(R::query(&self.active)) {
                tracing::warn!(error = %e, "Could not record recent search");
            }
        }
        tracing::debug!(results = self.results.len(), "Search applied");
        &self.results
    }

    /// Edit the draft and recompute from it without touching recent history.
    ///
    /// Used when a filter chip is removed from the results panel: other
    /// unapplied draft edits are kept and become active too.
    pub fn refine(&mut self, f: impl FnOnce(&mut R::Filters)) -> &[R] {
        f(&mut self.draft);
        self.active = self.draft.clone();
        self.recompute();
        &self.results
    }

    /// Back to default filters; results are all records in input order.
    pub fn reset(&mut self) {
        self.draft = R::Filters::default();
        self.active = R::Filters::default();
        self.results = self.all.clone();
    }

    /// Reorder current results. Active filters are untouched.
    pub fn sort_change(&mut self, option: SortOption<R::SortField>) -> &[R] {
        self.sort = option;
        sort_records(&mut self.results, option);
        &self.results
    }

    /// Apply a past query on top of default filters and bump it in history.
    pub fn apply_recent(&mut self, query: &str) -> &[R] {
        self.draft = R::filters_with_query(query);
        self.apply()
    }

    /// Snapshot the active filters under `name`.
    pub fn save_active(&mut self, name: &str) -> Result<(), HistoryError> {
        let active = self.active.clone();
        self.history_mut()?.save(name, &active)
    }

    /// Load a saved search into draft and active, then recompute.
    pub fn apply_saved(&mut self, name: &str) -> Result<&[R], HistoryError> {
        let filters = self
            .history_mut()?
            .find_saved(name)
            .map(|s| s.filters.clone())
            .ok_or_else(|| HistoryError::NotFound(name.to_string()))?;
        self.draft = filters.clone();
        self.active = filters;
        self.recompute();
        Ok(&self.results)
    }

    pub fn delete_saved(&mut self, name: &str) -> Result<bool, HistoryError> {
        self.history_mut()?.delete_saved(name)
    }

    pub fn clear_recent(&mut self) -> Result<(), HistoryError> {
        self.history_mut()?.clear_recent()
    }

    fn recompute(&mut self) {
        let mut results = filter_records(&self.all, &self.active);
        sort_records(&mut results, self.sort);
        self.results = results;
    }

    fn history_mut(&mut self) -> Result<&mut SearchHistory<R::Filters>, HistoryError> {
        self.history
            .as_mut()
            .ok_or(HistoryError::Unavailable)
    }
}
