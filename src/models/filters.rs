use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{
    AppointmentSortField, AppointmentStatus, FilterDimension, ParseEnumError, PatientSortField,
    SortDirection,
};

/// Default (non-filtering) age bounds.
pub const AGE_MIN: u32 = 0;
pub const AGE_MAX: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Age range is inverted: {min} > {max}")]
    InvertedAgeRange { min: u32, max: u32 },
    #[error("Invalid sort option: {0}")]
    InvalidSortOption(String),
}

// ═══════════════════════════════════════════════════════════
// Ranges
// ═══════════════════════════════════════════════════════════

/// Inclusive age bounds; `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvertedAgeRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }

    /// Narrower than the default `[0, 100]`.
    pub fn is_narrowed(&self) -> bool {
        self.min > AGE_MIN || self.max < AGE_MAX
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: AGE_MIN,
            max: AGE_MAX,
        }
    }
}

// Stored filters go back through `new`, so a hand-edited inverted range is rejected.
impl<'de> Deserialize<'de> for AgeRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            min: u32,
            max: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        AgeRange::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

/// Date bounds; the range only filters when both ends are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds present.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

// ═══════════════════════════════════════════════════════════
// Patient search filters
// ═══════════════════════════════════════════════════════════

/// Full patient filter state (used for both draft and active filters).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub query: String,
    pub gender: BTreeSet<String>,
    pub age_range: AgeRange,
    pub blood_type: BTreeSet<String>,
    pub insurance_provider: BTreeSet<String>,
    pub admission_date_range: DateRange,
    pub department: BTreeSet<String>,
    pub condition: BTreeSet<String>,
    pub status: BTreeSet<String>,
}

impl SearchFilters {
    /// Default filters carrying only a text query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn dimension(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Gender => &self.gender,
            FilterDimension::BloodType => &self.blood_type,
            FilterDimension::InsuranceProvider => &self.insurance_provider,
            FilterDimension::Department => &self.department,
            FilterDimension::Condition => &self.condition,
            FilterDimension::Status => &self.status,
        }
    }

    pub fn dimension_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Gender => &mut self.gender,
            FilterDimension::BloodType => &mut self.blood_type,
            FilterDimension::InsuranceProvider => &mut self.insurance_provider,
            FilterDimension::Department => &mut self.department,
            FilterDimension::Condition => &mut self.condition,
            FilterDimension::Status => &mut self.status,
        }
    }

    /// Count of active structured dimensions. The text query is not counted.
    pub fn active_filter_count(&self) -> usize {
        let sets = FilterDimension::ALL
            .iter()
            .filter(|d| !self.dimension(**d).is_empty())
            .count();
        sets + usize::from(self.age_range.is_narrowed())
            + usize::from(self.admission_date_range.is_set())
    }
}

// ═══════════════════════════════════════════════════════════
// Appointment list filters
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentFilters {
    pub query: String,
    pub status: BTreeSet<AppointmentStatus>,
    /// Only appointments on this day.
    pub date: Option<NaiveDate>,
}

impl AppointmentFilters {
    /// Add the status if absent, remove it if present.
    pub fn toggle_status(&mut self, status: AppointmentStatus) {
        if !self.status.remove(&status) {
            self.status.insert(status);
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Sort options
// ═══════════════════════════════════════════════════════════

/// `(field, direction)` pair, written `"<field>-<direction>"` (e.g. `name-asc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption<F> {
    pub field: F,
    pub direction: SortDirection,
}

pub type PatientSortOption = SortOption<PatientSortField>;
pub type AppointmentSortOption = SortOption<AppointmentSortField>;

impl<F> SortOption<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for PatientSortOption {
    fn default() -> Self {
        Self::new(PatientSortField::Name, SortDirection::Asc)
    }
}

impl Default for AppointmentSortOption {
    fn default() -> Self {
        Self::new(AppointmentSortField::Time, SortDirection::Asc)
    }
}

impl<F: FromStr<Err = ParseEnumError>> FromStr for SortOption<F> {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FilterError::InvalidSortOption(s.to_string());
        let (field, direction) = s.rsplit_once('-').ok_or_else(invalid)?;
        Ok(Self {
            field: field.parse().map_err(|_| invalid())?,
            direction: direction.parse().map_err(|_| invalid())?,
        })
    }
}

impl<F: fmt::Display> fmt::Display for SortOption<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.direction)
    }
}

impl<F: fmt::Display> Serialize for SortOption<F> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, F: FromStr<Err = ParseEnumError>> Deserialize<'de> for SortOption<F> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn age_range_rejects_inverted_bounds() {
        assert_eq!(
            AgeRange::new(40, 30),
            Err(FilterError::InvertedAgeRange { min: 40, max: 30 })
        );
        let r = AgeRange::new(30, 40).unwrap();
        assert!(r.contains(30) && r.contains(40) && !r.contains(27));
    }

    #[test]
    fn default_age_range_is_not_narrowed() {
        assert!(!AgeRange::default().is_narrowed());
        assert!(AgeRange::new(0, 99).unwrap().is_narrowed());
        assert!(AgeRange::new(1, 100).unwrap().is_narrowed());
    }

    #[test]
    fn inverted_age_range_rejected_on_deserialize() {
        let err = serde_json::from_str::<AgeRange>(r#"{"min":50,"max":10}"#);
        assert!(err.is_err());
    }

    #[test]
    fn date_range_needs_both_bounds() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let half = DateRange { start: Some(d), end: None };
        assert!(half.is_set());
        assert!(half.bounds().is_none());
        assert_eq!(DateRange::between(d, d).bounds(), Some((d, d)));
    }

    #[test]
    fn active_filter_count_ignores_query() {
        let mut f = SearchFilters::with_query("smith");
        assert_eq!(f.active_filter_count(), 0);
        f.gender = set(&["Male"]);
        f.condition = set(&["Diabetes", "Asthma"]);
        f.age_range = AgeRange::new(30, 40).unwrap();
        f.admission_date_range.start = NaiveDate::from_ymd_opt(2025, 4, 1);
        assert_eq!(f.active_filter_count(), 4);
    }

    #[test]
    fn dimension_mut_edits_one_set() {
        let mut f = SearchFilters::default();
        f.blood_type = set(&["O+", "A-"]);
        f.dimension_mut(FilterDimension::BloodType).remove("O+");
        assert_eq!(f.dimension(FilterDimension::BloodType), &set(&["A-"]));
        assert!(f.gender.is_empty());
    }

    #[test]
    fn filters_serialize_camel_case() {
        let json = serde_json::to_value(SearchFilters::with_query("x")).unwrap();
        assert_eq!(json["ageRange"]["max"], 100);
        assert!(json["admissionDateRange"]["start"].is_null());
        assert!(json["insuranceProvider"].as_array().unwrap().is_empty());
    }

    #[test]
    fn toggle_status_adds_then_removes() {
        let mut f = AppointmentFilters::default();
        f.toggle_status(AppointmentStatus::NoShow);
        assert!(f.status.contains(&AppointmentStatus::NoShow));
        f.toggle_status(AppointmentStatus::NoShow);
        assert!(f.status.is_empty());
    }

    #[test]
    fn sort_option_parses_and_prints() {
        let opt: PatientSortOption = "age-desc".parse().unwrap();
        assert_eq!(opt, SortOption::new(PatientSortField::Age, SortDirection::Desc));
        assert_eq!(opt.to_string(), "age-desc");
        assert_eq!(PatientSortOption::default().to_string(), "name-asc");
    }

    #[test]
    fn sort_option_rejects_garbage() {
        assert!("name".parse::<PatientSortOption>().is_err());
        assert!("height-asc".parse::<PatientSortOption>().is_err());
        assert!("name-sideways".parse::<PatientSortOption>().is_err());
    }

    #[test]
    fn sort_option_serde_as_string() {
        let opt: AppointmentSortOption = serde_json::from_str("\"patient-asc\"").unwrap();
        assert_eq!(opt.field, AppointmentSortField::Patient);
        assert_eq!(serde_json::to_string(&opt).unwrap(), "\"patient-asc\"");
    }
}
