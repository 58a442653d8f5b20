//! Field-selectable stable sort.
//!
//! `desc` reverses the comparator, not the output, so ties keep their
//! input order in both directions.

use std::cmp::Ordering;

use super::Searchable;
use crate::models::{
    AppointmentSortField, CalendarAppointment, PatientRecord, PatientSortField, SortDirection,
    SortOption,
};

/// Stable in-place sort by `option`.
pub fn sort_records<R: Searchable>(records: &mut [R], option: SortOption<R::SortField>) {
    merge_sort_by(records, &mut |a: &R, b: &R| {
        let ord = a.compare_by(b, option.field);
        match option.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Top-down merge sort. Stable, and well-defined for comparators that are
/// not a total order (a missing date equals everything), where
/// `slice::sort_by` is allowed to panic.
fn merge_sort_by<T: Clone, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], cmp: &mut F) {
    let len = v.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut v[..mid], cmp);
    merge_sort_by(&mut v[mid..], cmp);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        // Right side wins only when strictly smaller.
        if cmp(&v[j], &v[i]) == Ordering::Less {
            merged.push(v[j].clone());
            j += 1;
        } else {
            merged.push(v[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&v[i..mid]);
    merged.extend_from_slice(&v[j..]);
    v.clone_from_slice(&merged);
}

/// Case-insensitive lexicographic order, raw text as tie-breaker.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Missing on either side compares equal.
fn compare_present<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

pub fn compare_patients(a: &PatientRecord, b: &PatientRecord, field: PatientSortField) -> Ordering {
    match field {
        PatientSortField::Name => compare_text(&a.name, &b.name),
        PatientSortField::Id => compare_text(&a.id, &b.id),
        PatientSortField::Age => a.age.cmp(&b.age),
        PatientSortField::Date => compare_present(a.admission_date, b.admission_date),
    }
}

pub fn compare_appointments(
    a: &CalendarAppointment,
    b: &CalendarAppointment,
    field: AppointmentSortField,
) -> Ordering {
    match field {
        AppointmentSortField::Time => compare_present(a.time_of_day(), b.time_of_day()),
        AppointmentSortField::Date => a.date.cmp(&b.date),
        AppointmentSortField::Patient => compare_text(&a.patient_name, &b.patient_name),
    }
}
