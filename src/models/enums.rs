use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string that names no variant of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// Serde goes through the same strings, so stored JSON matches the
/// dashboard's wire values (`"checked-in"`, not `"CheckedIn"`).
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Role {
    Admin => "admin",
    Doctor => "doctor",
    Nurse => "nurse",
    Lab => "lab",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Confirmed => "confirmed",
    CheckedIn => "checked-in",
    InProgress => "in-progress",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no-show",
});

str_enum!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

str_enum!(PatientSortField {
    Name => "name",
    Id => "id",
    Age => "age",
    Date => "date",
});

str_enum!(AppointmentSortField {
    Time => "time",
    Date => "date",
    Patient => "patient",
});

// Set-valued patient filter dimensions.
str_enum!(FilterDimension {
    Gender => "gender",
    BloodType => "bloodType",
    InsuranceProvider => "insuranceProvider",
    Department => "department",
    Condition => "condition",
    Status => "status",
});

impl AppointmentStatus {
    /// Human-readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked In",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No Show",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [
            (Role::Admin, "admin"),
            (Role::Doctor, "doctor"),
            (Role::Nurse, "nurse"),
            (Role::Lab, "lab"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn appointment_status_uses_hyphenated_values() {
        assert_eq!(AppointmentStatus::CheckedIn.as_str(), "checked-in");
        assert_eq!(AppointmentStatus::InProgress.as_str(), "in-progress");
        assert_eq!(AppointmentStatus::NoShow.as_str(), "no-show");
        assert_eq!(AppointmentStatus::ALL.len(), 7);
    }

    #[test]
    fn status_serializes_as_str() {
        let json = serde_json::to_string(&AppointmentStatus::CheckedIn).unwrap();
        assert_eq!(json, "\"checked-in\"");
        let back: AppointmentStatus = serde_json::from_str("\"no-show\"").unwrap();
        assert_eq!(back, AppointmentStatus::NoShow);
    }

    #[test]
    fn unknown_value_fails_to_deserialize() {
        assert!(serde_json::from_str::<Role>("\"janitor\"").is_err());
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Role::from_str("").is_err());
        assert!(AppointmentStatus::from_str("CheckedIn").is_err());
        assert!(SortDirection::from_str("up").is_err());
    }

    #[test]
    fn parse_error_names_the_enum() {
        let err = FilterDimension::from_str("shoeSize").unwrap_err();
        assert_eq!(err.kind, "FilterDimension");
        assert_eq!(err.to_string(), "Invalid FilterDimension value: shoeSize");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(FilterDimension::BloodType.to_string(), "bloodType");
        assert_eq!(AppointmentStatus::NoShow.label(), "No Show");
    }
}
