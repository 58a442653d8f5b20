//! Record search: predicate composition, stable sorting, the draft/active
//! state container and persisted search history.
//!
//! Patients and appointments share the pipeline through [`Searchable`].

pub mod history;
pub mod predicate;
pub mod sort;
pub mod state;

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    AppointmentFilters, AppointmentSortField, CalendarAppointment, PatientRecord,
    PatientSortField, SearchFilters, SortOption,
};

pub use history::{HistoryError, RecentSearch, SavedSearch, SearchHistory};
pub use predicate::{filter_records, matches_text};
pub use sort::sort_records;
pub use state::SearchState;

/// A record type that can run through the filter → sort pipeline.
pub trait Searchable: Clone {
    /// Persisted as-is in saved searches.
    type Filters: Clone + Default + PartialEq + Serialize + DeserializeOwned;
    type SortField: Copy;

    /// All active predicates hold (logical AND).
    fn matches(&self, filters: &Self::Filters) -> bool;

    /// Ascending comparison on one field. Missing data compares equal.
    fn compare_by(&self, other: &Self, field: Self::SortField) -> Ordering;

    /// Free-text part of the filters.
    fn query(filters: &Self::Filters) -> &str;

    /// Default filters carrying only `query`.
    fn filters_with_query(query: &str) -> Self::Filters;

    fn default_sort() -> SortOption<Self::SortField>;
}

impl Searchable for PatientRecord {
    type Filters = SearchFilters;
    type SortField = PatientSortField;

    fn matches(&self, filters: &SearchFilters) -> bool {
        predicate::patient_matches(self, filters)
    }

    fn compare_by(&self, other: &Self, field: PatientSortField) -> Ordering {
        sort::compare_patients(self, other, field)
    }

    fn query(filters: &SearchFilters) -> &str {
        &filters.query
    }

    fn filters_with_query(query: &str) -> SearchFilters {
        SearchFilters::with_query(query)
    }

    fn default_sort() -> SortOption<PatientSortField> {
        SortOption::default()
    }
}

impl Searchable for CalendarAppointment {
    type Filters = AppointmentFilters;
    type SortField = AppointmentSortField;

    fn matches(&self, filters: &AppointmentFilters) -> bool {
        predicate::appointment_matches(self, filters)
    }

    fn compare_by(&self, other: &Self, field: AppointmentSortField) -> Ordering {
        sort::compare_appointments(self, other, field)
    }

    fn query(filters: &AppointmentFilters) -> &str {
        &filters.query
    }

    fn filters_with_query(query: &str) -> AppointmentFilters {
        AppointmentFilters {
            query: query.to_string(),
            ..AppointmentFilters::default()
        }
    }

    fn default_sort() -> SortOption<AppointmentSortField> {
        SortOption::default()
    }
}
