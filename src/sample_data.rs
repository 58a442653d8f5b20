//! Fixed patient roster and randomized appointment / analytics feeds.
//!
//! Appointment and metric generators take the RNG as a parameter so tests
//! can seed them.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::{format_display_time, AppointmentStatus, CalendarAppointment, PatientRecord};

// ═══════════════════════════════════════════════════════════
// Patients
// ═══════════════════════════════════════════════════════════

struct PatientSeed {
    id: &'static str,
    name: &'static str,
    age: u32,
    gender: &'static str,
    email: &'static str,
    phone: &'static str,
    blood_type: &'static str,
    condition: &'static str,
    department: &'static str,
    status: &'static str,
    admitted: (i32, u32, u32),
    insurance: &'static str,
    notes: &'static str,
    allergies: &'static [&'static str],
    medications: &'static [&'static str],
}

const PATIENTS: &[PatientSeed] = &[
    PatientSeed {
        id: "P-1001",
        name: "John Smith",
        age: 45,
        gender: "Male",
        email: "john.smith@example.com",
        phone: "(555) 123-4567",
        blood_type: "O+",
        condition: "Hypertension",
        department: "Cardiology",
        status: "Stable",
        admitted: (2025, 3, 15),
        insurance: "Blue Cross",
        notes: "Patient has a history of high blood pressure and is currently on medication.",
        allergies: &["Penicillin", "Peanuts"],
        medications: &["Lisinopril", "Aspirin"],
    },
    PatientSeed {
        id: "P-1002",
        name: "Emily Johnson",
        age: 32,
        gender: "Female",
        email: "emily.johnson@example.com",
        phone: "(555) 234-5678",
        blood_type: "A+",
        condition: "Pregnancy",
        department: "Obstetrics",
        status: "Outpatient",
        admitted: (2025, 4, 2),
        insurance: "Aetna",
        notes: "Patient is in her second trimester, regular check-up scheduled.",
        allergies: &[],
        medications: &[],
    },
    PatientSeed {
        id: "P-1003",
        name: "Michael Brown",
        age: 58,
        gender: "Male",
        email: "michael.brown@example.com",
        phone: "(555) 345-6789",
        blood_type: "B+",
        condition: "Diabetes",
        department: "Endocrinology",
        status: "Inpatient",
        admitted: (2025, 4, 10),
        insurance: "Medicare",
        notes: "Patient admitted for diabetic ketoacidosis, blood sugar levels stabilizing.",
        allergies: &["Sulfa drugs"],
        medications: &["Insulin", "Metformin"],
    },
    PatientSeed {
        id: "P-1004",
        name: "Sarah Davis",
        age: 27,
        gender: "Female",
        email: "sarah.davis@example.com",
        phone: "(555) 456-7890",
        blood_type: "AB-",
        condition: "Asthma",
        department: "Pulmonology",
        status: "Outpatient",
        admitted: (2025, 3, 28),
        insurance: "Cigna",
        notes: "Patient experiencing increased frequency of asthma attacks, adjusting medication.",
        allergies: &["Dust", "Pollen"],
        medications: &["Albuterol", "Fluticasone"],
    },
    PatientSeed {
        id: "P-1005",
        name: "Robert Wilson",
        age: 62,
        gender: "Male",
        email: "robert.wilson@example.com",
        phone: "(555) 567-8901",
        blood_type: "O-",
        condition: "Heart Disease",
        department: "Cardiology",
        status: "Critical",
        admitted: (2025, 4, 15),
        insurance: "Medicare",
        notes: "Patient admitted after myocardial infarction, scheduled for angioplasty.",
        allergies: &["Iodine"],
        medications: &["Clopidogrel", "Atorvastatin", "Metoprolol"],
    },
    PatientSeed {
        id: "P-1006",
        name: "Jennifer Lee",
        age: 41,
        gender: "Female",
        email: "jennifer.lee@example.com",
        phone: "(555) 678-9012",
        blood_type: "A-",
        condition: "Migraine",
        department: "Neurology",
        status: "Outpatient",
        admitted: (2025, 4, 5),
        insurance: "UnitedHealthcare",
        notes: "Patient reporting increased frequency and severity of migraines.",
        allergies: &[],
        medications: &["Sumatriptan", "Propranolol"],
    },
    PatientSeed {
        id: "P-1007",
        name: "David Martinez",
        age: 35,
        gender: "Male",
        email: "david.martinez@example.com",
        phone: "(555) 789-0123",
        blood_type: "B-",
        condition: "Fracture",
        department: "Orthopedics",
        status: "Inpatient",
        admitted: (2025, 4, 12),
        insurance: "Blue Cross",
        notes: "Patient admitted after car accident with multiple fractures, scheduled for surgery.",
        allergies: &["Codeine"],
        medications: &["Hydrocodone", "Ibuprofen"],
    },
    PatientSeed {
        id: "P-1008",
        name: "Amanda Wilson",
        age: 29,
        gender: "Female",
        email: "amanda.wilson@example.com",
        phone: "(555) 890-1234",
        blood_type: "AB+",
        condition: "Anxiety",
        department: "Psychiatry",
        status: "Outpatient",
        admitted: (2025, 3, 20),
        insurance: "Aetna",
        notes: "Patient experiencing increased anxiety attacks, adjusting medication and therapy.",
        allergies: &[],
        medications: &["Sertraline", "Lorazepam"],
    },
    PatientSeed {
        id: "P-1009",
        name: "Thomas Anderson",
        age: 55,
        gender: "Male",
        email: "thomas.anderson@example.com",
        phone: "(555) 901-2345",
        blood_type: "O+",
        condition: "Cancer",
        department: "Oncology",
        status: "Inpatient",
        admitted: (2025, 4, 1),
        insurance: "Medicare",
        notes: "Patient undergoing chemotherapy for stage 3 colon cancer.",
        allergies: &["Latex"],
        medications: &["Ondansetron", "Dexamethasone"],
    },
    PatientSeed {
        id: "P-1010",
        name: "Jessica Taylor",
        age: 38,
        gender: "Female",
        email: "jessica.taylor@example.com",
        phone: "(555) 012-3456",
        blood_type: "A+",
        condition: "Chronic Pain",
        department: "Pain Management",
        status: "Outpatient",
        admitted: (2025, 4, 8),
        insurance: "Cigna",
        notes: "Patient with chronic back pain following workplace injury, exploring alternative treatments.",
        allergies: &["NSAIDs"],
        medications: &["Gabapentin", "Tramadol"],
    },
    PatientSeed {
        id: "P-1011",
        name: "William Johnson",
        age: 72,
        gender: "Male",
        email: "william.johnson@example.com",
        phone: "(555) 123-7890",
        blood_type: "B+",
        condition: "Stroke",
        department: "Neurology",
        status: "Inpatient",
        admitted: (2025, 4, 14),
        insurance: "Medicare",
        notes: "Patient admitted after ischemic stroke, beginning rehabilitation therapy.",
        allergies: &[],
        medications: &["Clopidogrel", "Atorvastatin", "Lisinopril"],
    },
    PatientSeed {
        id: "P-1012",
        name: "Olivia Garcia",
        age: 25,
        gender: "Female",
        email: "olivia.garcia@example.com",
        phone: "(555) 234-8901",
        blood_type: "O-",
        condition: "Appendicitis",
        department: "Surgery",
        status: "Emergency",
        admitted: (2025, 4, 16),
        insurance: "Blue Cross",
        notes: "Patient admitted with acute appendicitis, scheduled for emergency appendectomy.",
        allergies: &["Morphine"],
        medications: &["Cefazolin", "Hydromorphone"],
    },
    PatientSeed {
        id: "P-1013",
        name: "James Wilson",
        age: 48,
        gender: "Male",
        email: "james.wilson@example.com",
        phone: "(555) 345-9012",
        blood_type: "AB-",
        condition: "Kidney Disease",
        department: "Nephrology",
        status: "Inpatient",
        admitted: (2025, 4, 3),
        insurance: "Medicare",
        notes: "Patient with chronic kidney disease, evaluating for dialysis.",
        allergies: &["Contrast dye"],
        medications: &["Furosemide", "Calcitriol"],
    },
    PatientSeed {
        id: "P-1014",
        name: "Sophia Martinez",
        age: 31,
        gender: "Female",
        email: "sophia.martinez@example.com",
        phone: "(555) 456-0123",
        blood_type: "A+",
        condition: "Pneumonia",
        department: "Pulmonology",
        status: "Inpatient",
        admitted: (2025, 4, 11),
        insurance: "UnitedHealthcare",
        notes: "Patient admitted with severe pneumonia, responding well to antibiotics.",
        allergies: &["Sulfa drugs"],
        medications: &["Azithromycin", "Ceftriaxone"],
    },
    PatientSeed {
        id: "P-1015",
        name: "Benjamin Taylor",
        age: 65,
        gender: "Male",
        email: "benjamin.taylor@example.com",
        phone: "(555) 567-1234",
        blood_type: "B-",
        condition: "COPD",
        department: "Pulmonology",
        status: "Inpatient",
        admitted: (2025, 4, 9),
        insurance: "Medicare",
        notes: "Patient with exacerbation of COPD, requiring oxygen therapy.",
        allergies: &["Aspirin"],
        medications: &["Albuterol", "Prednisone", "Tiotropium"],
    },
    PatientSeed {
        id: "P-1016",
        name: "Emma Brown",
        age: 42,
        gender: "Female",
        email: "emma.brown@example.com",
        phone: "(555) 678-2345",
        blood_type: "O+",
        condition: "Rheumatoid Arthritis",
        department: "Rheumatology",
        status: "Outpatient",
        admitted: (2025, 3, 25),
        insurance: "Aetna",
        notes: "Patient experiencing increased joint pain and swelling, adjusting medication regimen.",
        allergies: &["Shellfish"],
        medications: &["Methotrexate", "Prednisone"],
    },
    PatientSeed {
        id: "P-1017",
        name: "Alexander Davis",
        age: 52,
        gender: "Male",
        email: "alexander.davis@example.com",
        phone: "(555) 789-3456",
        blood_type: "AB+",
        condition: "Liver Disease",
        department: "Gastroenterology",
        status: "Inpatient",
        admitted: (2025, 4, 7),
        insurance: "Cigna",
        notes: "Patient with cirrhosis, admitted for management of ascites.",
        allergies: &["Tetracycline"],
        medications: &["Furosemide", "Spironolactone"],
    },
    PatientSeed {
        id: "P-1018",
        name: "Mia Johnson",
        age: 36,
        gender: "Female",
        email: "mia.johnson@example.com",
        phone: "(555) 890-4567",
        blood_type: "A-",
        condition: "Multiple Sclerosis",
        department: "Neurology",
        status: "Outpatient",
        admitted: (2025, 4, 4),
        insurance: "Blue Cross",
        notes: "Patient experiencing new symptoms, scheduled for MRI.",
        allergies: &[],
        medications: &["Interferon beta-1a", "Baclofen"],
    },
    PatientSeed {
        id: "P-1019",
        name: "Ethan Wilson",
        age: 28,
        gender: "Male",
        email: "ethan.wilson@example.com",
        phone: "(555) 901-5678",
        blood_type: "B+",
        condition: "Crohn's Disease",
        department: "Gastroenterology",
        status: "Outpatient",
        admitted: (2025, 3, 30),
        insurance: "UnitedHealthcare",
        notes: "Patient with flare-up of Crohn's disease, adjusting biologic therapy.",
        allergies: &["Dairy"],
        medications: &["Adalimumab", "Azathioprine"],
    },
    PatientSeed {
        id: "P-1020",
        name: "Ava Martinez",
        age: 33,
        gender: "Female",
        email: "ava.martinez@example.com",
        phone: "(555) 012-6789",
        blood_type: "O-",
        condition: "Thyroid Disorder",
        department: "Endocrinology",
        status: "Outpatient",
        admitted: (2025, 4, 13),
        insurance: "Aetna",
        notes: "Patient with hypothyroidism, adjusting levothyroxine dosage.",
        allergies: &[],
        medications: &["Levothyroxine"],
    },
];

impl PatientSeed {
    fn to_record(&self) -> PatientRecord {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let (y, m, d) = self.admitted;
        PatientRecord {
            email: Some(self.email.into()),
            phone: Some(self.phone.into()),
            blood_type: Some(self.blood_type.into()),
            condition: Some(self.condition.into()),
            department: Some(self.department.into()),
            status: Some(self.status.into()),
            admission_date: NaiveDate::from_ymd_opt(y, m, d),
            insurance_provider: Some(self.insurance.into()),
            notes: Some(self.notes.into()),
            allergies: owned(self.allergies),
            medications: owned(self.medications),
            ..PatientRecord::new(self.id, self.name, self.age, self.gender)
        }
    }
}

/// The 20-patient demo roster, ids `P-1001` through `P-1020`.
pub fn sample_patients() -> Vec<PatientRecord> {
    PATIENTS.iter().map(PatientSeed::to_record).collect()
}

// ═══════════════════════════════════════════════════════════
// Appointments
// ═══════════════════════════════════════════════════════════

pub const APPOINTMENT_PATIENTS: &[&str] = &[
    "John Smith",
    "Emily Johnson",
    "Michael Brown",
    "Sarah Davis",
    "Robert Wilson",
    "Jennifer Lee",
    "David Martinez",
    "Amanda Wilson",
    "Thomas Anderson",
    "Jessica Taylor",
];

pub const DOCTORS: &[&str] = &[
    "Dr. Sarah Johnson",
    "Dr. Michael Williams",
    "Dr. Robert Brown",
    "Dr. David Martinez",
    "Dr. Thomas Anderson",
];

pub const APPOINTMENT_TYPES: &[&str] =
    &["Check-up", "Follow-up", "Consultation", "Procedure", "Emergency"];

/// Days before `today` the calendar starts; the window runs to `today + 14`.
const WINDOW_BEFORE: i64 = 15;
const WINDOW_AFTER: i64 = 15;

fn pick(rng: &mut StdRng, items: &'static [&'static str]) -> String {
    items.choose(rng).copied().unwrap_or_default().to_string()
}

/// Random calendar around `today`: weekdays only, 2 to 5 slots a day,
/// on the hour or half hour between 8:00 AM and 4:30 PM.
pub fn sample_appointments(rng: &mut StdRng, today: NaiveDate) -> Vec<CalendarAppointment> {
    let mut appointments = Vec::new();

    for offset in -WINDOW_BEFORE..WINDOW_AFTER {
        let date = today + Duration::days(offset);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let per_day = rng.gen_range(2..=5);
        for n in 0..per_day {
            let hour = rng.gen_range(8..=16);
            let minute = if rng.gen_bool(0.5) { 0 } else { 30 };
            let time = NaiveTime::from_hms_opt(hour, minute, 0)
                .map(format_display_time)
                .unwrap_or_default();
            let status = AppointmentStatus::ALL
                .choose(rng)
                .copied()
                .unwrap_or(AppointmentStatus::Scheduled);

            appointments.push(CalendarAppointment {
                id: format!("appt-{offset}-{n}"),
                patient_name: pick(rng, APPOINTMENT_PATIENTS),
                doctor_name: pick(rng, DOCTORS),
                time,
                appointment_type: pick(rng, APPOINTMENT_TYPES),
                status,
                date,
            });
        }
    }

    tracing::debug!(count = appointments.len(), %today, "Sample appointments generated");
    appointments
}

// ═══════════════════════════════════════════════════════════
// Analytics
// ═══════════════════════════════════════════════════════════

/// A headline number with its period-over-period change in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendMetric<T> {
    pub value: T,
    pub trend: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCapacity {
    pub name: String,
    pub total: u32,
    pub occupied: u32,
}

impl DepartmentCapacity {
    /// Occupied share in whole percent.
    pub fn occupancy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.occupied * 100 / self.total
    }
}

/// Analytics screen feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalMetrics {
    pub total_patients: TrendMetric<u32>,
    pub bed_occupancy: TrendMetric<u32>,
    pub avg_length_of_stay: TrendMetric<f64>,
    pub revenue: TrendMetric<u64>,
    pub expenses: TrendMetric<u64>,
    pub admissions: TrendMetric<u32>,
    pub discharges: TrendMetric<u32>,
    pub er_visits: TrendMetric<u32>,
    pub er_wait_minutes: TrendMetric<u32>,
    pub department_capacity: Vec<DepartmentCapacity>,
}

const DEPARTMENT_CAPACITY: &[(&str, u32, u32)] = &[
    ("Cardiology", 40, 32),
    ("Neurology", 35, 28),
    ("Pediatrics", 30, 21),
    ("Emergency", 25, 22),
    ("Surgery", 20, 15),
    ("Oncology", 30, 24),
];

/// Jittered headline metrics; `trend` ranges are `[low, high)`.
pub fn hospital_metrics(rng: &mut StdRng) -> HospitalMetrics {
    let stay = 4.2 + rng.gen_range(-0.3..0.3_f64);
    HospitalMetrics {
        total_patients: TrendMetric {
            value: 1284 + rng.gen_range(0..100),
            trend: rng.gen_range(-2..8),
        },
        bed_occupancy: TrendMetric {
            value: 78 + rng.gen_range(0..10),
            trend: rng.gen_range(-3..5),
        },
        avg_length_of_stay: TrendMetric {
            value: (stay * 10.0).round() / 10.0,
            trend: rng.gen_range(-3..3),
        },
        revenue: TrendMetric {
            value: 2_450_000 + rng.gen_range(0..200_000),
            trend: rng.gen_range(-4..8),
        },
        expenses: TrendMetric {
            value: 1_980_000 + rng.gen_range(0..150_000),
            trend: rng.gen_range(-2..6),
        },
        admissions: TrendMetric {
            value: 320 + rng.gen_range(0..40),
            trend: rng.gen_range(-6..8),
        },
        discharges: TrendMetric {
            value: 310 + rng.gen_range(0..40),
            trend: rng.gen_range(-5..7),
        },
        er_visits: TrendMetric {
            value: 850 + rng.gen_range(0..100),
            trend: rng.gen_range(-3..7),
        },
        er_wait_minutes: TrendMetric {
            value: 42 + rng.gen_range(0..15),
            trend: rng.gen_range(-5..5),
        },
        department_capacity: DEPARTMENT_CAPACITY
            .iter()
            .map(|(name, total, occupied)| DepartmentCapacity {
                name: name.to_string(),
                total: *total,
                occupied: *occupied,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()
    }

    #[test]
    fn roster_has_twenty_unique_ids() {
        let patients = sample_patients();
        assert_eq!(patients.len(), 20);
        let ids: HashSet<_> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(patients[0].id, "P-1001");
        assert_eq!(patients[19].id, "P-1020");
    }

    #[test]
    fn optional_lists_left_empty_when_absent() {
        let patients = sample_patients();
        let emily = &patients[1];
        assert_eq!(emily.name, "Emily Johnson");
        assert!(emily.allergies.is_empty());
        assert!(emily.medications.is_empty());
        assert_eq!(patients[4].medications.len(), 3);
    }

    #[test]
    fn appointments_skip_weekends_and_stay_in_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let appts = sample_appointments(&mut rng, today());
        assert!(!appts.is_empty());
        for a in &appts {
            assert!(!matches!(a.date.weekday(), Weekday::Sat | Weekday::Sun));
            let offset = (a.date - today()).num_days();
            assert!((-15..15).contains(&offset));
        }
    }

    #[test]
    fn two_to_five_per_day_within_working_hours() {
        let mut rng = StdRng::seed_from_u64(3);
        let appts = sample_appointments(&mut rng, today());
        let mut per_day = std::collections::HashMap::new();
        for a in &appts {
            *per_day.entry(a.date).or_insert(0) += 1;
            let t = a.time_of_day().expect("display time parses");
            assert!(t >= NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            assert!(t <= NaiveTime::from_hms_opt(16, 30, 0).unwrap());
            assert!(t.format("%M").to_string() == "00" || t.format("%M").to_string() == "30");
        }
        assert!(per_day.values().all(|n| (2..=5).contains(n)));
    }

    #[test]
    fn appointment_ids_unique_and_draw_from_fixed_lists() {
        let mut rng = StdRng::seed_from_u64(9);
        let appts = sample_appointments(&mut rng, today());
        let ids: HashSet<_> = appts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), appts.len());
        for a in &appts {
            assert!(APPOINTMENT_PATIENTS.contains(&a.patient_name.as_str()));
            assert!(DOCTORS.contains(&a.doctor_name.as_str()));
            assert!(APPOINTMENT_TYPES.contains(&a.appointment_type.as_str()));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = sample_appointments(&mut StdRng::seed_from_u64(11), today());
        let b = sample_appointments(&mut StdRng::seed_from_u64(11), today());
        assert_eq!(a, b);
    }

    #[test]
    fn metrics_stay_in_expected_bands() {
        let m = hospital_metrics(&mut StdRng::seed_from_u64(5));
        assert!((1284..1384).contains(&m.total_patients.value));
        assert!((78..88).contains(&m.bed_occupancy.value));
        assert!((3.9..=4.5).contains(&m.avg_length_of_stay.value));
        assert_eq!(m.department_capacity.len(), 6);
        assert_eq!(m.department_capacity[0].occupancy_percent(), 80);
    }

    #[test]
    fn metrics_serialize_camel_case() {
        let json = serde_json::to_value(hospital_metrics(&mut StdRng::seed_from_u64(1))).unwrap();
        assert!(json["totalPatients"]["value"].is_u64());
        assert!(json["departmentCapacity"].is_array());
    }
}
