//! Per-dimension predicates, AND-composed.
//!
//! An empty set filter is vacuously true. A missing optional field never
//! matches a non-empty set and is skipped by the text search.

use std::collections::BTreeSet;

use super::Searchable;
use crate::models::{AppointmentFilters, CalendarAppointment, PatientRecord, SearchFilters};

/// Keep the records matching `filters`, in input order.
pub fn filter_records<R: Searchable>(records: &[R], filters: &R::Filters) -> Vec<R> {
    records
        .iter()
        .filter(|r| r.matches(filters))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against any of `fields` (OR).
///
/// A blank query matches everything; `None` fields are skipped.
pub fn matches_text<'a>(query: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn in_set(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    set.is_empty() || value.is_some_and(|v| set.contains(v))
}

pub fn patient_matches(p: &PatientRecord, f: &SearchFilters) -> bool {
    let text = matches_text(
        &f.query,
        [
            Some(p.name.as_str()),
            Some(p.id.as_str()),
            p.email.as_deref(),
            p.condition.as_deref(),
            p.notes.as_deref(),
        ],
    );

    let admission = match f.admission_date_range.bounds() {
        Some((start, end)) => p
            .admission_date
            .is_some_and(|d| start <= d && d <= end),
        None => true,
    };

    text
        && in_set(&f.gender, Some(p.gender.as_str()))
        && f.age_range.contains(p.age)
        && in_set(&f.blood_type, p.blood_type.as_deref())
        && in_set(&f.insurance_provider, p.insurance_provider.as_deref())
        && admission
        && in_set(&f.department, p.department.as_deref())
        && in_set(&f.condition, p.condition.as_deref())
        && in_set(&f.status, p.status.as_deref())
}

pub fn appointment_matches(a: &CalendarAppointment, f: &AppointmentFilters) -> bool {
    f.date.map_or(true, |day| a.date == day)
        && matches_text(
            &f.query,
            [
                Some(a.patient_name.as_str()),
                Some(a.doctor_name.as_str()),
                Some(a.appointment_type.as_str()),
            ],
        )
        && (f.status.is_empty() || f.status.contains(&a.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, AppointmentStatus, DateRange, FilterDimension};
    use crate::sample_data::sample_patients;
    use chrono::NaiveDate;

    fn ids(records: &[PatientRecord]) -> Vec<&str> {
        records.iter().map(|p| p.id.as_str()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appt(id: &str, patient: &str, kind: &str, status: AppointmentStatus, day: u32) -> CalendarAppointment {
        CalendarAppointment {
            id: id.into(),
            patient_name: patient.into(),
            doctor_name: "Dr. Sarah Johnson".into(),
            time: "9:00 AM".into(),
            appointment_type: kind.into(),
            status,
            date: date(2025, 4, day),
        }
    }

    /// Every single-value refinement of the sample roster.
    fn refinements() -> Vec<SearchFilters> {
        let mut out = Vec::new();
        for dim in FilterDimension::ALL {
            let values: BTreeSet<String> = sample_patients()
                .iter()
                .filter_map(|p| match dim {
                    FilterDimension::Gender => Some(p.gender.clone()),
                    FilterDimension::BloodType => p.blood_type.clone(),
                    FilterDimension::InsuranceProvider => p.insurance_provider.clone(),
                    FilterDimension::Department => p.department.clone(),
                    FilterDimension::Condition => p.condition.clone(),
                    FilterDimension::Status => p.status.clone(),
                })
                .collect();
            for value in values {
                let mut f = SearchFilters::default();
                f.dimension_mut(*dim).insert(value);
                out.push(f);
            }
        }
        out.push(SearchFilters::with_query("wilson"));
        let mut aged = SearchFilters::default();
        aged.age_range = AgeRange::new(30, 60).unwrap();
        out.push(aged);
        out
    }

    #[test]
    fn single_condition_match() {
        let mut f = SearchFilters::default();
        f.condition.insert("Diabetes".into());
        let result = filter_records(&sample_patients(), &f);
        assert_eq!(ids(&result), vec!["P-1003"]);
    }

    #[test]
    fn age_range_is_inclusive() {
        let mut young = PatientRecord::new("A", "Young", 27, "Female");
        young.condition = Some("Asthma".into());
        let mid = PatientRecord::new("B", "Mid", 35, "Male");
        let edge = PatientRecord::new("C", "Edge", 40, "Male");
        let mut f = SearchFilters::default();
        f.age_range = AgeRange::new(30, 40).unwrap();
        let result = filter_records(&[young, mid, edge], &f);
        assert_eq!(ids(&result), vec!["B", "C"]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let result = filter_records(&sample_patients(), &SearchFilters::with_query("smith"));
        assert_eq!(ids(&result), vec!["P-1001"]);
        let result = filter_records(&sample_patients(), &SearchFilters::with_query("SMITH"));
        assert_eq!(ids(&result), vec!["P-1001"]);
    }

    #[test]
    fn query_whitespace_is_part_of_the_needle() {
        let patients = sample_patients();
        let result = filter_records(&patients, &SearchFilters::with_query("john "));
        assert_eq!(ids(&result), vec!["P-1001"]);
        let result = filter_records(&patients, &SearchFilters::with_query("   "));
        assert_eq!(result.len(), patients.len());
    }

    #[test]
    fn query_searches_id_email_condition_and_notes() {
        let patients = sample_patients();
        assert_eq!(ids(&filter_records(&patients, &SearchFilters::with_query("p-1020"))), vec!["P-1020"]);
        assert_eq!(
            ids(&filter_records(&patients, &SearchFilters::with_query("olivia.garcia@"))),
            vec!["P-1012"]
        );
        assert_eq!(
            ids(&filter_records(&patients, &SearchFilters::with_query("chemotherapy"))),
            vec!["P-1009"]
        );
    }

    #[test]
    fn query_ignores_missing_optional_fields() {
        let bare = PatientRecord::new("X-1", "No Extras", 50, "Male");
        assert!(filter_records(&[bare], &SearchFilters::with_query("hypertension")).is_empty());
    }

    #[test]
    fn missing_field_never_matches_set_filter() {
        let bare = PatientRecord::new("X-1", "No Extras", 50, "Male");
        let mut f = SearchFilters::default();
        f.blood_type.insert("O+".into());
        assert!(filter_records(&[bare.clone()], &f).is_empty());
        f.blood_type.insert(String::new());
        assert!(filter_records(&[bare], &f).is_empty());
    }

    #[test]
    fn date_range_needs_both_bounds() {
        let patients = sample_patients();
        let mut f = SearchFilters::default();
        f.admission_date_range = DateRange { start: Some(date(2025, 4, 14)), end: None };
        assert_eq!(filter_records(&patients, &f).len(), patients.len());

        f.admission_date_range = DateRange::between(date(2025, 4, 14), date(2025, 4, 16));
        assert_eq!(ids(&filter_records(&patients, &f)), vec!["P-1005", "P-1011", "P-1012"]);
    }

    #[test]
    fn date_range_excludes_records_without_date() {
        let bare = PatientRecord::new("X-1", "No Date", 50, "Male");
        let mut f = SearchFilters::default();
        f.admission_date_range = DateRange::between(date(2000, 1, 1), date(2100, 1, 1));
        assert!(filter_records(&[bare], &f).is_empty());
    }

    #[test]
    fn dimensions_compose_by_and() {
        let mut f = SearchFilters::default();
        f.department.insert("Cardiology".into());
        f.status.insert("Critical".into());
        assert_eq!(ids(&filter_records(&sample_patients(), &f)), vec!["P-1005"]);
    }

    #[test]
    fn empty_filters_are_identity() {
        let patients = sample_patients();
        assert_eq!(filter_records(&patients, &SearchFilters::default()), patients);
    }

    #[test]
    fn result_is_subset_of_input() {
        let patients = sample_patients();
        for f in refinements() {
            for p in filter_records(&patients, &f) {
                assert!(patients.contains(&p));
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let patients = sample_patients();
        for f in refinements() {
            let once = filter_records(&patients, &f);
            assert_eq!(filter_records(&once, &f), once);
        }
    }

    #[test]
    fn adding_a_constraint_never_grows_result() {
        let patients = sample_patients();
        let mut base = SearchFilters::default();
        base.gender.insert("Female".into());
        let before = filter_records(&patients, &base);
        // Refinements on other dimensions only: a second gender widens the set.
        for f in refinements().into_iter().filter(|f| f.gender.is_empty()) {
            let mut narrowed = base.clone();
            for dim in FilterDimension::ALL {
                for v in f.dimension(*dim) {
                    narrowed.dimension_mut(*dim).insert(v.clone());
                }
            }
            narrowed.query = f.query.clone();
            narrowed.age_range = f.age_range;
            let after = filter_records(&patients, &narrowed);
            assert!(after.iter().all(|p| before.contains(p)));
        }
    }

    #[test]
    fn appointment_query_matches_patient_doctor_or_type() {
        let appts = vec![
            appt("1", "John Smith", "Check-up", AppointmentStatus::Scheduled, 14),
            appt("2", "Emily Johnson", "Procedure", AppointmentStatus::Completed, 14),
        ];
        let f = AppointmentFilters { query: "procedure".into(), ..Default::default() };
        assert_eq!(filter_records(&appts, &f).len(), 1);
        let f = AppointmentFilters { query: "sarah".into(), ..Default::default() };
        assert_eq!(filter_records(&appts, &f).len(), 2);
    }

    #[test]
    fn appointment_status_and_day_filters() {
        let appts = vec![
            appt("1", "John Smith", "Check-up", AppointmentStatus::Scheduled, 14),
            appt("2", "Emily Johnson", "Procedure", AppointmentStatus::Completed, 14),
            appt("3", "Sarah Davis", "Follow-up", AppointmentStatus::Scheduled, 15),
        ];
        let mut f = AppointmentFilters::default();
        f.toggle_status(AppointmentStatus::Scheduled);
        assert_eq!(filter_records(&appts, &f).len(), 2);
        f.date = Some(date(2025, 4, 15));
        let result = filter_records(&appts, &f);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "3");
    }
}
