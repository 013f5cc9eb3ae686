use serde::{Serialize, Serializer};

use super::field::{Field, FieldValue, UgcPolicy};

/// Values entered on the registration form.
///
/// Serializes as a flat object keyed by [`Field::key`], which is the shape
/// handed to a [`SubmissionSink`](crate::storage::SubmissionSink).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub institution: String,
    pub total_programs: FieldValue,
    #[serde(serialize_with = "serialize_policy")]
    pub ugc_policy_followed: Option<UgcPolicy>,
    pub ug_programs_number: FieldValue,
    pub ug_programs_percentage: FieldValue,
    pub regulating_councils_number: FieldValue,
    pub regulating_councils_percentage: FieldValue,
    pub regulating_councils_names: FieldValue,
    pub ccfugp_programs_number: FieldValue,
    pub ccfugp_programs_percentage: FieldValue,
    pub bachelor_degree_number: FieldValue,
    pub bachelor_degree_percentage: FieldValue,
    pub bachelor_degree_list: FieldValue,
    pub b_voc_number: FieldValue,
    pub b_voc_percentage: FieldValue,
    pub b_voc_list: FieldValue,
}

fn serialize_policy<S: Serializer>(
    policy: &Option<UgcPolicy>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(policy.map(UgcPolicy::as_str).unwrap_or(""))
}

impl FormRecord {
    /// Returns `true` if every field is unset.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the current value of `field`.
    ///
    /// The institution and UGC answer are reported as text.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Institution => FieldValue::from(self.institution.as_str()),
            Field::UgcPolicyFollowed => self
                .ugc_policy_followed
                .map(FieldValue::from)
                .unwrap_or_default(),
            other => self.slot(other).cloned().unwrap_or_default(),
        }
    }

    /// Replaces the value of `field`, leaving every other field untouched.
    ///
    /// Text that is not `Yes` or `No` unsets the UGC answer.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let value = value.normalized();
        match field {
            Field::Institution => self.institution = value.to_string(),
            Field::UgcPolicyFollowed => {
                self.ugc_policy_followed = value.to_string().parse().ok();
            }
            other => {
                if let Some(slot) = self.slot_mut(other) {
                    *slot = value;
                }
            }
        }
    }

    fn slot(&self, field: Field) -> Option<&FieldValue> {
        let slot = match field {
            Field::Institution | Field::UgcPolicyFollowed => return None,
            Field::TotalPrograms => &self.total_programs,
            Field::UgProgramsNumber => &self.ug_programs_number,
            Field::UgProgramsPercentage => &self.ug_programs_percentage,
            Field::RegulatingCouncilsNumber => &self.regulating_councils_number,
            Field::RegulatingCouncilsPercentage => &self.regulating_councils_percentage,
            Field::RegulatingCouncilsNames => &self.regulating_councils_names,
            Field::CcfugpProgramsNumber => &self.ccfugp_programs_number,
            Field::CcfugpProgramsPercentage => &self.ccfugp_programs_percentage,
            Field::BachelorDegreeNumber => &self.bachelor_degree_number,
            Field::BachelorDegreePercentage => &self.bachelor_degree_percentage,
            Field::BachelorDegreeList => &self.bachelor_degree_list,
            Field::BVocNumber => &self.b_voc_number,
            Field::BVocPercentage => &self.b_voc_percentage,
            Field::BVocList => &self.b_voc_list,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut FieldValue> {
        let slot = match field {
            Field::Institution | Field::UgcPolicyFollowed => return None,
            Field::TotalPrograms => &mut self.total_programs,
            Field::UgProgramsNumber => &mut self.ug_programs_number,
            Field::UgProgramsPercentage => &mut self.ug_programs_percentage,
            Field::RegulatingCouncilsNumber => &mut self.regulating_councils_number,
            Field::RegulatingCouncilsPercentage => &mut self.regulating_councils_percentage,
            Field::RegulatingCouncilsNames => &mut self.regulating_councils_names,
            Field::CcfugpProgramsNumber => &mut self.ccfugp_programs_number,
            Field::CcfugpProgramsPercentage => &mut self.ccfugp_programs_percentage,
            Field::BachelorDegreeNumber => &mut self.bachelor_degree_number,
            Field::BachelorDegreePercentage => &mut self.bachelor_degree_percentage,
            Field::BachelorDegreeList => &mut self.bachelor_degree_list,
            Field::BVocNumber => &mut self.b_voc_number,
            Field::BVocPercentage => &mut self.b_voc_percentage,
            Field::BVocList => &mut self.b_voc_list,
        };
        Some(slot)
    }
}
