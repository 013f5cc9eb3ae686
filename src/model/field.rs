use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Identifies one input on the registration form.
///
/// Variants are declared in display order; [`Field::all`] returns them in the
/// same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Institution,
    TotalPrograms,
    UgcPolicyFollowed,
    UgProgramsNumber,
    UgProgramsPercentage,
    RegulatingCouncilsNumber,
    RegulatingCouncilsPercentage,
    RegulatingCouncilsNames,
    CcfugpProgramsNumber,
    CcfugpProgramsPercentage,
    BachelorDegreeNumber,
    BachelorDegreePercentage,
    BachelorDegreeList,
    BVocNumber,
    BVocPercentage,
    BVocList,
}

static ALL_FIELDS: &[Field] = &[
    Field::Institution,
    Field::TotalPrograms,
    Field::UgcPolicyFollowed,
    Field::UgProgramsNumber,
    Field::UgProgramsPercentage,
    Field::RegulatingCouncilsNumber,
    Field::RegulatingCouncilsPercentage,
    Field::RegulatingCouncilsNames,
    Field::CcfugpProgramsNumber,
    Field::CcfugpProgramsPercentage,
    Field::BachelorDegreeNumber,
    Field::BachelorDegreePercentage,
    Field::BachelorDegreeList,
    Field::BVocNumber,
    Field::BVocPercentage,
    Field::BVocList,
];

/// Fields overwritten when an institution is selected from the lookup table.
static DERIVED_FIELDS: &[Field] = &[
    Field::TotalPrograms,
    Field::UgProgramsNumber,
    Field::UgProgramsPercentage,
    Field::RegulatingCouncilsNumber,
    Field::RegulatingCouncilsPercentage,
    Field::BachelorDegreeNumber,
    Field::BachelorDegreePercentage,
    Field::BVocNumber,
    Field::BVocPercentage,
];

/// How a field is edited and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of the lookup table's institutions, or nothing.
    Choice,
    /// Yes / No radio choice.
    YesNo,
    /// Non-negative count.
    Count,
    /// Percentage in `[0, 100]`.
    Percentage,
    /// Free text.
    Text,
}

impl Field {
    /// Returns all fields in display order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }

    /// Returns the fields filled in from the lookup table.
    pub fn derived() -> &'static [Field] {
        DERIVED_FIELDS
    }

    /// Key used for this field in submitted records.
    pub fn key(self) -> &'static str {
        match self {
            Field::Institution => "institution",
            Field::TotalPrograms => "totalPrograms",
            Field::UgcPolicyFollowed => "ugcPolicyFollowed",
            Field::UgProgramsNumber => "ugProgramsNumber",
            Field::UgProgramsPercentage => "ugProgramsPercentage",
            Field::RegulatingCouncilsNumber => "regulatingCouncilsNumber",
            Field::RegulatingCouncilsPercentage => "regulatingCouncilsPercentage",
            Field::RegulatingCouncilsNames => "regulatingCouncilsNames",
            Field::CcfugpProgramsNumber => "ccfugpProgramsNumber",
            Field::CcfugpProgramsPercentage => "ccfugpProgramsPercentage",
            Field::BachelorDegreeNumber => "bachelorDegreeNumber",
            Field::BachelorDegreePercentage => "bachelorDegreePercentage",
            Field::BachelorDegreeList => "bachelorDegreeList",
            Field::BVocNumber => "bVocNumber",
            Field::BVocPercentage => "bVocPercentage",
            Field::BVocList => "bVocList",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Institution => "Select Institution",
            Field::TotalPrograms => "Total Number of Programs",
            Field::UgcPolicyFollowed => "Is UGC CCFUGP followed?",
            Field::UgProgramsNumber => "Number of UG programmes aligned to UGC CCFUGP",
            Field::UgProgramsPercentage => "Percentage of UG programmes aligned to UGC CCFUGP",
            Field::RegulatingCouncilsNumber => {
                "Number of UG programmes aligned to Regulating Councils"
            }
            Field::RegulatingCouncilsPercentage => "Percentage aligned to Regulating Councils",
            Field::RegulatingCouncilsNames => "Names of Regulating Councils",
            Field::CcfugpProgramsNumber => "Number of programmes neither CCFUGP nor Council",
            Field::CcfugpProgramsPercentage => {
                "Percentage of programmes neither CCFUGP nor Council"
            }
            Field::BachelorDegreeNumber => {
                "Number of 3-year bachelor Degree programmes (non-B.VOC)"
            }
            Field::BachelorDegreePercentage => {
                "Percentage of 3-year bachelor Degree programmes (non-B.VOC)"
            }
            Field::BachelorDegreeList => "List of 3-year bachelor Degree programmes (non-B.VOC)",
            Field::BVocNumber => "Number of B.VOC programmes",
            Field::BVocPercentage => "Percentage of B.VOC programmes",
            Field::BVocList => "List of B.VOC programmes",
        }
    }

    /// Returns how this field is edited.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Institution => FieldKind::Choice,
            Field::UgcPolicyFollowed => FieldKind::YesNo,
            Field::TotalPrograms
            | Field::UgProgramsNumber
            | Field::RegulatingCouncilsNumber
            | Field::CcfugpProgramsNumber
            | Field::BachelorDegreeNumber
            | Field::BVocNumber => FieldKind::Count,
            Field::UgProgramsPercentage
            | Field::RegulatingCouncilsPercentage
            | Field::CcfugpProgramsPercentage
            | Field::BachelorDegreePercentage
            | Field::BVocPercentage => FieldKind::Percentage,
            Field::RegulatingCouncilsNames | Field::BachelorDegreeList | Field::BVocList => {
                FieldKind::Text
            }
        }
    }

    /// Returns `true` if the field must be filled in before submitting.
    pub fn is_required(self) -> bool {
        matches!(self, Field::Institution | Field::UgcPolicyFollowed)
    }

    /// Placeholder shown while the field is empty.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::Institution => Some("-- Select Institution --"),
            Field::RegulatingCouncilsNames => {
                Some("Enter council names separated by commas (e.g., AICTE, UGC, NCTE)")
            }
            Field::BachelorDegreeList => {
                Some("Enter program names separated by commas (e.g., B.A., B.Sc., B.Com)")
            }
            Field::BVocList => Some("Enter B.VOC program names separated by commas"),
            _ => match self.kind() {
                FieldKind::Count => Some("0 or more"),
                FieldKind::Percentage => Some("0 to 100"),
                _ => None,
            },
        }
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Answer to "Is UGC CCFUGP followed?".
///
/// An unanswered question is represented as `Option::<UgcPolicy>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UgcPolicy {
    Yes,
    No,
}

impl UgcPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UgcPolicy::Yes => "Yes",
            UgcPolicy::No => "No",
        }
    }
}

#[mutants::skip]
impl fmt::Display for UgcPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UgcPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(UgcPolicy::Yes),
            "No" => Ok(UgcPolicy::No),
            _ => Err(()),
        }
    }
}

/// Value held by a numeric or free-text field.
///
/// `Empty` is distinct from zero. `Text` keeps whatever the user typed, even
/// when it does not parse as a number; `Number` is written by auto-population.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Returns `true` for `Empty` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Collapses empty text to `Empty`.
    pub(crate) fn normalized(self) -> Self {
        match self {
            FieldValue::Text(s) if s.is_empty() => FieldValue::Empty,
            other => other,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string()).normalized()
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s).normalized()
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<UgcPolicy> for FieldValue {
    fn from(policy: UgcPolicy) -> Self {
        FieldValue::Text(policy.as_str().to_string())
    }
}

/// Integral numbers are written without a fractional part (`10`, not `10.0`).
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Empty => serializer.serialize_str(""),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            FieldValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}
