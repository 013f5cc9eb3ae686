use serde::{Deserialize, Serialize};

use super::field::{Field, FieldValue, UgcPolicy};

/// A program count together with its share of all programs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramShare {
    pub number: u32,
    pub percentage: f64,
}

impl ProgramShare {
    pub const fn new(number: u32, percentage: f64) -> Self {
        Self { number, percentage }
    }
}

/// Reference statistics for one institution.
///
/// Counts and percentages are descriptive and are not checked against each
/// other; categories may overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub programs: u32,
    /// Reference answer only; selecting an institution never copies it.
    pub ugc_followed: UgcPolicy,
    pub ug_programs: ProgramShare,
    pub regulating_councils: ProgramShare,
    pub bachelor_degree: ProgramShare,
    pub b_voc: ProgramShare,
}

impl LookupRecord {
    /// Values for each of [`Field::derived`], in the same order.
    pub fn derived_values(&self) -> [(Field, FieldValue); 9] {
        [
            (Field::TotalPrograms, self.programs.into()),
            (Field::UgProgramsNumber, self.ug_programs.number.into()),
            (Field::UgProgramsPercentage, self.ug_programs.percentage.into()),
            (
                Field::RegulatingCouncilsNumber,
                self.regulating_councils.number.into(),
            ),
            (
                Field::RegulatingCouncilsPercentage,
                self.regulating_councils.percentage.into(),
            ),
            (Field::BachelorDegreeNumber, self.bachelor_degree.number.into()),
            (
                Field::BachelorDegreePercentage,
                self.bachelor_degree.percentage.into(),
            ),
            (Field::BVocNumber, self.b_voc.number.into()),
            (Field::BVocPercentage, self.b_voc.percentage.into()),
        ]
    }
}

/// A named entry in the [`LookupTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    #[serde(flatten)]
    pub record: LookupRecord,
}

/// Read-only mapping from institution name to [`LookupRecord`].
///
/// Entries keep the order they were supplied in; the institution selector
/// cycles through them in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    entries: Vec<Institution>,
}

impl LookupTable {
    /// Creates a table from entries. Names are matched exactly; if a name
    /// appears twice the first entry wins.
    pub fn new(entries: Vec<Institution>) -> Self {
        Self { entries }
    }

    /// The reference data shipped with the application.
    pub fn builtin() -> Self {
        let entry = |name: &str, programs, ugc_followed, ug, councils, bachelor, b_voc| {
            Institution {
                name: name.to_string(),
                record: LookupRecord {
                    programs,
                    ugc_followed,
                    ug_programs: ug,
                    regulating_councils: councils,
                    bachelor_degree: bachelor,
                    b_voc,
                },
            }
        };
        Self::new(vec![
            entry(
                "JCBUST",
                20,
                UgcPolicy::Yes,
                ProgramShare::new(2, 10.0),
                ProgramShare::new(10, 50.0),
                ProgramShare::new(3, 15.0),
                ProgramShare::new(5, 25.0),
            ),
            entry(
                "GJU",
                10,
                UgcPolicy::Yes,
                ProgramShare::new(3, 30.0),
                ProgramShare::new(5, 50.0),
                ProgramShare::new(0, 0.0),
                ProgramShare::new(1, 10.0),
            ),
            entry(
                "Manav Rachna",
                15,
                UgcPolicy::No,
                ProgramShare::new(0, 0.0),
                ProgramShare::new(10, 66.6666667),
                ProgramShare::new(2, 13.3333333),
                ProgramShare::new(1, 6.6666667),
            ),
            entry(
                "DCRUST",
                25,
                UgcPolicy::Yes,
                ProgramShare::new(6, 24.0),
                ProgramShare::new(12, 48.0),
                ProgramShare::new(0, 0.0),
                ProgramShare::new(3, 12.0),
            ),
        ])
    }

    /// Returns the record for `name`, if the institution is known.
    pub fn lookup(&self, name: &str) -> Option<&LookupRecord> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.record)
    }

    /// Institution names in table order.
    pub fn institutions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[Institution] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::builtin()
    }
}
