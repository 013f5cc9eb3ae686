use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::field::{Field, FieldValue};
use super::lookup::LookupTable;
use super::record::FormRecord;
use super::validation::{ValidationErrors, validate_record};
use crate::storage::{StorageError, SubmissionSink};

/// How long the acknowledgment stays up before the form clears itself.
pub const RESET_DELAY: Duration = Duration::from_millis(3000);

/// Result of [`RegistrationSession::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record passed validation and was delivered to the sink.
    Accepted,
    /// A required answer is missing; errors are available from
    /// [`RegistrationSession::errors`].
    Invalid,
}

/// One active registration form.
///
/// Owns the field values, the current validation messages, the
/// acknowledgment flag shown after a successful submission, and the deadline
/// of the one-shot reset that follows it. All transitions take `&mut self`
/// and complete before returning.
#[derive(Debug, Clone)]
pub struct RegistrationSession {
    table: LookupTable,
    record: FormRecord,
    errors: ValidationErrors,
    acknowledged: bool,
    pending_reset: Option<Instant>,
}

impl RegistrationSession {
    /// Creates an empty session backed by `table`.
    pub fn new(table: LookupTable) -> Self {
        Self {
            table,
            record: FormRecord::default(),
            errors: ValidationErrors::default(),
            acknowledged: false,
            pending_reset: None,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Returns `true` while the "submitted successfully" message is shown.
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// When the scheduled reset will fire, if one is pending.
    pub fn pending_reset(&self) -> Option<Instant> {
        self.pending_reset
    }

    /// Replaces one field and clears any error recorded against it.
    ///
    /// Setting the institution goes through [`select_institution`](Self::select_institution).
    pub fn update_field(&mut self, field: Field, value: impl Into<FieldValue>) {
        let value = value.into();
        if field == Field::Institution {
            self.select_institution(&value.to_string());
            return;
        }
        self.record.set(field, value);
        self.errors.clear(field);
    }

    /// Sets the institution and fills the derived fields from the lookup table.
    pub fn select_institution(&mut self, name: &str) {
        self.record.institution = name.to_string();
        self.errors.clear(Field::Institution);
        self.sync_from_lookup();
    }

    /// Copies the selected institution's statistics into the derived fields.
    ///
    /// Does nothing when no institution is selected or the name is not in the
    /// table; values from an earlier selection are left in place. Applying the
    /// same institution again yields the same record.
    pub fn sync_from_lookup(&mut self) {
        if self.record.institution.is_empty() {
            return;
        }
        let Some(lookup) = self.table.lookup(&self.record.institution) else {
            return;
        };
        for (field, value) in lookup.derived_values() {
            self.record.set(field, value);
        }
        debug!(institution = %self.record.institution, "derived fields populated");
    }

    /// Re-checks the required answers, replacing every stored error.
    ///
    /// Returns `true` if nothing is missing.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_record(&self.record);
        self.errors.is_empty()
    }

    /// Validates and, if valid, delivers the record to `sink`.
    ///
    /// Any earlier acknowledgment and pending reset are dropped first. On
    /// acceptance the acknowledgment is raised again and a reset is scheduled
    /// for `now + RESET_DELAY`. If validation or the sink fails, the record is
    /// left as it was so the user can submit again.
    pub fn submit(
        &mut self,
        sink: &mut dyn SubmissionSink,
        now: Instant,
    ) -> Result<SubmitOutcome, StorageError> {
        self.acknowledged = false;
        self.pending_reset = None;

        if !self.validate() {
            return Ok(SubmitOutcome::Invalid);
        }

        if let Err(e) = sink.submit(&self.record) {
            warn!(error = %e, institution = %self.record.institution, "submission failed");
            return Err(e);
        }

        info!(institution = %self.record.institution, "registration submitted");
        self.acknowledged = true;
        self.pending_reset = Some(now + RESET_DELAY);
        Ok(SubmitOutcome::Accepted)
    }

    /// Clears every field and message and cancels any scheduled reset.
    pub fn reset(&mut self) {
        self.record = FormRecord::default();
        self.errors = ValidationErrors::default();
        self.acknowledged = false;
        self.pending_reset = None;
        debug!("form reset");
    }

    /// Fires the scheduled reset once its deadline has passed.
    ///
    /// Returns `true` if the form was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(deadline) if now >= deadline => {
                debug!("scheduled reset fired");
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Time left before the scheduled reset, if one is pending.
    pub fn reset_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending_reset
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for RegistrationSession {
    fn default() -> Self {
        Self::new(LookupTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::model::{UgcPolicy, ValidationError};

    /// Collects submitted records in memory.
    #[derive(Default)]
    struct RecordingSink {
        records: Vec<FormRecord>,
    }

    impl SubmissionSink for RecordingSink {
        fn submit(&mut self, record: &FormRecord) -> Result<(), StorageError> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn failing_sink(_: &FormRecord) -> Result<(), StorageError> {
        Err(StorageError::NoDataDir)
    }

    fn derived_snapshot(session: &RegistrationSession) -> Vec<FieldValue> {
        Field::derived()
            .iter()
            .map(|&f| session.record().get(f))
            .collect()
    }

    fn valid_session() -> RegistrationSession {
        let mut session = RegistrationSession::default();
        session.select_institution("GJU");
        session.update_field(Field::UgcPolicyFollowed, UgcPolicy::Yes);
        session
    }

    mod update_field {
        use super::*;

        #[test]
        fn replaces_only_named_field() {
            let mut session = RegistrationSession::default();
            session.update_field(Field::BVocList, "B.Voc Retail");
            session.update_field(Field::BVocNumber, "2");
            assert_eq!(
                session.record().get(Field::BVocList),
                FieldValue::from("B.Voc Retail")
            );
            assert_eq!(session.record().get(Field::BVocNumber), FieldValue::from("2"));
            assert_eq!(session.record().institution, "");
        }

        #[test]
        fn clears_error_for_that_field_only() {
            let mut session = RegistrationSession::default();
            assert!(!session.validate());
            assert_eq!(session.errors().len(), 2);

            session.update_field(Field::UgcPolicyFollowed, "No");
            assert!(session.errors().get(Field::UgcPolicyFollowed).is_none());
            assert_eq!(
                session.errors().get(Field::Institution),
                Some(ValidationError::MissingInstitution)
            );
        }

        #[test]
        fn editing_unrelated_field_keeps_errors() {
            let mut session = RegistrationSession::default();
            session.validate();
            session.update_field(Field::BVocList, "x");
            assert_eq!(session.errors().len(), 2);
        }

        #[test]
        fn institution_routes_through_selection() {
            let mut session = RegistrationSession::default();
            session.update_field(Field::Institution, "DCRUST");
            assert_eq!(session.record().institution, "DCRUST");
            assert_eq!(
                session.record().get(Field::TotalPrograms),
                FieldValue::Number(25.0)
            );
        }

        #[test]
        fn derived_field_can_be_overridden_after_selection() {
            let mut session = RegistrationSession::default();
            session.select_institution("GJU");
            session.update_field(Field::TotalPrograms, "11");
            assert_eq!(session.record().get(Field::TotalPrograms), FieldValue::from("11"));
        }
    }

    mod auto_populate {
        use super::*;

        #[test]
        fn gju_fills_derived_fields() {
            let mut session = RegistrationSession::default();
            session.select_institution("GJU");
            let record = session.record();
            assert_eq!(record.total_programs, FieldValue::Number(10.0));
            assert_eq!(record.ug_programs_number, FieldValue::Number(3.0));
            assert_eq!(record.ug_programs_percentage, FieldValue::Number(30.0));
            assert_eq!(record.regulating_councils_number, FieldValue::Number(5.0));
            assert_eq!(record.regulating_councils_percentage, FieldValue::Number(50.0));
            assert_eq!(record.bachelor_degree_number, FieldValue::Number(0.0));
            assert_eq!(record.bachelor_degree_percentage, FieldValue::Number(0.0));
            assert_eq!(record.b_voc_number, FieldValue::Number(1.0));
            assert_eq!(record.b_voc_percentage, FieldValue::Number(10.0));
        }

        #[test]
        fn leaves_other_fields_untouched() {
            let mut session = RegistrationSession::default();
            session.update_field(Field::RegulatingCouncilsNames, "AICTE");
            session.update_field(Field::CcfugpProgramsNumber, "4");
            session.update_field(Field::UgcPolicyFollowed, "No");
            session.select_institution("JCBUST");
            let record = session.record();
            assert_eq!(record.regulating_councils_names, FieldValue::from("AICTE"));
            assert_eq!(record.ccfugp_programs_number, FieldValue::from("4"));
            assert_eq!(record.ugc_policy_followed, Some(UgcPolicy::No));
        }

        #[test]
        fn does_not_copy_reference_ugc_answer() {
            let mut session = RegistrationSession::default();
            session.select_institution("Manav Rachna");
            assert_eq!(session.record().ugc_policy_followed, None);
        }

        #[test]
        fn unknown_institution_keeps_stale_values() {
            let mut session = RegistrationSession::default();
            session.select_institution("DCRUST");
            let before = derived_snapshot(&session);
            session.select_institution("Somewhere Else");
            assert_eq!(derived_snapshot(&session), before);
            assert_eq!(session.record().institution, "Somewhere Else");
        }

        #[test]
        fn clearing_selection_keeps_stale_values() {
            let mut session = RegistrationSession::default();
            session.select_institution("DCRUST");
            let before = derived_snapshot(&session);
            session.select_institution("");
            assert_eq!(derived_snapshot(&session), before);
        }

        #[test]
        fn switching_institution_overwrites_derived_fields() {
            let mut session = RegistrationSession::default();
            session.select_institution("DCRUST");
            session.select_institution("Manav Rachna");
            assert_eq!(
                session.record().regulating_councils_percentage,
                FieldValue::Number(66.6666667)
            );
            assert_eq!(session.record().total_programs, FieldValue::Number(15.0));
        }

        #[test]
        fn selecting_clears_institution_error() {
            let mut session = RegistrationSession::default();
            session.validate();
            session.select_institution("GJU");
            assert!(session.errors().get(Field::Institution).is_none());
            assert!(session.errors().get(Field::UgcPolicyFollowed).is_some());
        }

        #[quickcheck]
        fn unknown_names_leave_derived_fields_unchanged(name: String, start: u8) -> bool {
            let mut session = RegistrationSession::default();
            let names: Vec<String> = session.table().institutions().map(String::from).collect();
            session.select_institution(&names[start as usize % names.len()]);
            let before = derived_snapshot(&session);
            if session.table().lookup(&name).is_some() {
                return true;
            }
            session.select_institution(&name);
            derived_snapshot(&session) == before
        }

        #[quickcheck]
        fn known_names_are_applied_exactly_and_idempotently(pick: u8, noise: Vec<u32>) -> bool {
            let mut session = RegistrationSession::default();
            for (field, n) in Field::derived().iter().zip(noise) {
                session.update_field(*field, n);
            }
            let names: Vec<String> = session.table().institutions().map(String::from).collect();
            let name = &names[pick as usize % names.len()];
            let expected: Vec<FieldValue> = session
                .table()
                .lookup(name)
                .map(|r| r.derived_values().into_iter().map(|(_, v)| v).collect())
                .unwrap_or_default();

            session.select_institution(name);
            let once = session.record().clone();
            session.select_institution(name);
            derived_snapshot(&session) == expected && *session.record() == once
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn fresh_session_fails_both_required_fields() {
            let mut session = RegistrationSession::default();
            assert!(!session.validate());
            assert_eq!(session.errors().len(), 2);
        }

        #[test]
        fn passing_clears_previous_errors() {
            let mut session = RegistrationSession::default();
            session.validate();
            session.record.institution = "GJU".into();
            session.record.ugc_policy_followed = Some(UgcPolicy::No);
            assert!(session.validate());
            assert!(session.errors().is_empty());
        }

        #[test]
        fn lenient_numeric_fields_are_a_deliberate_policy() {
            let mut session = valid_session();
            session.update_field(Field::UgProgramsPercentage, "250");
            session.update_field(Field::BVocNumber, "-1");
            session.update_field(Field::TotalPrograms, "1.2.3");
            assert!(session.validate());
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn gju_yes_is_accepted_and_emitted() {
            let mut session = valid_session();
            let mut sink = RecordingSink::default();
            let now = Instant::now();

            let outcome = session.submit(&mut sink, now).unwrap();

            assert_eq!(outcome, SubmitOutcome::Accepted);
            assert_eq!(sink.records.len(), 1);
            let json = serde_json::to_value(&sink.records[0]).unwrap();
            assert_eq!(json["institution"], "GJU");
            assert_eq!(json["totalPrograms"], 10);
            assert_eq!(json["ugProgramsNumber"], 3);
            assert_eq!(json["ugProgramsPercentage"], 30);
            assert!(session.is_acknowledged());
            assert_eq!(session.pending_reset(), Some(now + RESET_DELAY));
        }

        #[test]
        fn emitted_record_wire_format() {
            let mut session = valid_session();
            session.update_field(Field::RegulatingCouncilsNames, "AICTE, NCTE");
            let mut sink = RecordingSink::default();
            session.submit(&mut sink, Instant::now()).unwrap();

            insta::assert_json_snapshot!(sink.records[0], @r#"
            {
              "institution": "GJU",
              "totalPrograms": 10,
              "ugcPolicyFollowed": "Yes",
              "ugProgramsNumber": 3,
              "ugProgramsPercentage": 30,
              "regulatingCouncilsNumber": 5,
              "regulatingCouncilsPercentage": 50,
              "regulatingCouncilsNames": "AICTE, NCTE",
              "ccfugpProgramsNumber": "",
              "ccfugpProgramsPercentage": "",
              "bachelorDegreeNumber": 0,
              "bachelorDegreePercentage": 0,
              "bachelorDegreeList": "",
              "bVocNumber": 1,
              "bVocPercentage": 10,
              "bVocList": ""
            }
            "#);
        }

        #[test]
        fn scheduled_reset_empties_form() {
            let mut session = valid_session();
            let now = Instant::now();
            session.submit(&mut RecordingSink::default(), now).unwrap();

            assert!(!session.tick(now + Duration::from_millis(2999)));
            assert!(session.is_acknowledged());
            assert!(!session.record().is_empty());

            assert!(session.tick(now + RESET_DELAY));
            assert!(session.record().is_empty());
            assert!(session.errors().is_empty());
            assert!(!session.is_acknowledged());
            assert_eq!(session.pending_reset(), None);
        }

        #[test]
        fn scheduled_reset_fires_once() {
            let mut session = valid_session();
            let now = Instant::now();
            session.submit(&mut RecordingSink::default(), now).unwrap();
            assert!(session.tick(now + RESET_DELAY));
            session.update_field(Field::BVocList, "typed after reset");
            assert!(!session.tick(now + RESET_DELAY * 2));
            assert_eq!(
                session.record().get(Field::BVocList),
                FieldValue::from("typed after reset")
            );
        }

        #[test]
        fn empty_institution_is_rejected_with_one_error() {
            let mut session = RegistrationSession::default();
            session.update_field(Field::UgcPolicyFollowed, UgcPolicy::Yes);
            session.update_field(Field::BVocList, "keep me");
            let before = session.record().clone();
            let mut sink = RecordingSink::default();

            let outcome = session.submit(&mut sink, Instant::now()).unwrap();

            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert!(sink.records.is_empty());
            assert_eq!(session.record(), &before);
            assert_eq!(session.errors().len(), 1);
            assert_eq!(
                session.errors().get(Field::Institution),
                Some(ValidationError::MissingInstitution)
            );
            assert!(!session.is_acknowledged());
            assert_eq!(session.pending_reset(), None);
        }

        #[test]
        fn all_default_submit_reports_both_errors() {
            let mut session = RegistrationSession::default();
            let outcome = session
                .submit(&mut RecordingSink::default(), Instant::now())
                .unwrap();
            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(session.errors().len(), 2);
        }

        #[test]
        fn sink_failure_leaves_session_unchanged() {
            let mut session = valid_session();
            let before = session.record().clone();
            let mut sink = failing_sink;

            let err = session.submit(&mut sink, Instant::now()).unwrap_err();

            assert!(matches!(err, StorageError::NoDataDir));
            assert_eq!(session.record(), &before);
            assert!(!session.is_acknowledged());
            assert_eq!(session.pending_reset(), None);
        }

        #[test]
        fn resubmit_supersedes_earlier_deadline() {
            let mut session = valid_session();
            let mut sink = RecordingSink::default();
            let first = Instant::now();
            session.submit(&mut sink, first).unwrap();

            let second = first + Duration::from_millis(2000);
            session.submit(&mut sink, second).unwrap();

            assert!(!session.tick(first + RESET_DELAY));
            assert!(!session.record().is_empty());
            assert!(session.tick(second + RESET_DELAY));
            assert!(session.record().is_empty());
            assert_eq!(sink.records.len(), 2);
        }

        #[test]
        fn invalid_resubmit_cancels_earlier_deadline() {
            let mut session = valid_session();
            let first = Instant::now();
            session.submit(&mut RecordingSink::default(), first).unwrap();

            session.select_institution("");
            session.update_field(Field::BVocList, "B.Voc Retail");
            let outcome = session
                .submit(&mut RecordingSink::default(), first + Duration::from_secs(1))
                .unwrap();

            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert!(!session.is_acknowledged());
            assert_eq!(session.pending_reset(), None);
            assert!(!session.tick(first + RESET_DELAY));
            assert_eq!(
                session.record().get(Field::BVocList),
                FieldValue::from("B.Voc Retail")
            );
            assert_eq!(
                session.errors().get(Field::Institution),
                Some(ValidationError::MissingInstitution)
            );
        }

        #[test]
        fn failed_delivery_cancels_earlier_deadline() {
            let mut session = valid_session();
            let first = Instant::now();
            session.submit(&mut RecordingSink::default(), first).unwrap();

            session.update_field(Field::BVocList, "B.Voc Retail");
            let mut sink = failing_sink;
            assert!(session.submit(&mut sink, first + Duration::from_secs(1)).is_err());

            assert!(!session.is_acknowledged());
            assert_eq!(session.pending_reset(), None);
            assert!(!session.tick(first + RESET_DELAY));
            assert_eq!(session.record().institution, "GJU");
        }

        #[test]
        fn remaining_time_counts_down() {
            let mut session = valid_session();
            let now = Instant::now();
            assert_eq!(session.reset_remaining(now), None);
            session.submit(&mut RecordingSink::default(), now).unwrap();
            assert_eq!(
                session.reset_remaining(now + Duration::from_millis(1000)),
                Some(Duration::from_millis(2000))
            );
            assert_eq!(
                session.reset_remaining(now + Duration::from_secs(10)),
                Some(Duration::ZERO)
            );
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn clears_everything_immediately() {
            let mut session = valid_session();
            session.update_field(Field::BVocList, "x");
            session.record.institution.clear();
            session.validate();
            session.reset();
            assert!(session.record().is_empty());
            assert!(session.errors().is_empty());
            assert!(!session.is_acknowledged());
        }

        #[test]
        fn cancels_pending_reset() {
            let mut session = valid_session();
            let now = Instant::now();
            session.submit(&mut RecordingSink::default(), now).unwrap();

            session.reset();
            assert!(session.record().is_empty());
            assert_eq!(session.pending_reset(), None);

            session.select_institution("JCBUST");
            assert!(!session.tick(now + RESET_DELAY));
            assert_eq!(session.record().institution, "JCBUST");
        }

        #[test]
        fn keeps_lookup_table() {
            let mut session = valid_session();
            session.reset();
            session.select_institution("GJU");
            assert_eq!(session.record().total_programs, FieldValue::Number(10.0));
        }
    }

    #[test]
    fn tick_without_pending_reset_is_noop() {
        let mut session = valid_session();
        assert!(!session.tick(Instant::now()));
        assert_eq!(session.record().institution, "GJU");
    }
}
