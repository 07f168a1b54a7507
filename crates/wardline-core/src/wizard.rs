//! Two-step admission wizard.
//!
//! An explicit finite-state machine with two named states and one validation
//! gate per forward transition: step 1 collects personal details and the
//! stay interval, step 2 collects medical details and document uploads.
//! Gates never panic or return errors; a refused transition leaves the
//! per-field error map populated for the caller to render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AdmissionDraft, DocumentType, FormField, NewPatient, PendingAttachment};
use crate::validate;

/// Doctors offered by the assignment selector. The contract only requires a
/// non-blank doctor; this list is the UI pick list.
pub const ASSIGNED_DOCTORS: [&str; 6] = [
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
    "Dr. James Lee",
    "Dr. Emily Rodriguez",
    "Dr. David Kim",
    "Dr. Lisa Anderson",
];

/// Wizard state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WizardStep {
    /// Step 1: personal information, contacts, and the stay interval
    PersonalAndDates,
    /// Step 2: medical information and document uploads
    MedicalAndDocuments,
}

impl WizardStep {
    /// 1-based step number for progress display.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::PersonalAndDates => 1,
            WizardStep::MedicalAndDocuments => 2,
        }
    }

    /// Step title shown in the dialog header.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::PersonalAndDates => "Personal & Dates",
            WizardStep::MedicalAndDocuments => "Medical & Documents",
        }
    }
}

/// Total number of wizard steps.
pub const TOTAL_STEPS: u8 = 2;

/// Validate the fields belonging to one step.
///
/// Returns a map from field to human-readable message; an empty map means
/// the step may be left through its forward gate.
pub fn validate_step(step: WizardStep, draft: &AdmissionDraft) -> BTreeMap<FormField, String> {
    let mut errors = BTreeMap::new();
    let blank = |s: &str| s.trim().is_empty();

    match step {
        WizardStep::PersonalAndDates => {
            if blank(&draft.name) {
                errors.insert(FormField::Name, "Name is required".into());
            }
            if validate::parse_age(&draft.age).is_none() {
                errors.insert(FormField::Age, "Valid age is required".into());
            }

            if blank(&draft.phone) {
                errors.insert(FormField::Phone, "Phone number is required".into());
            } else if !validate::is_valid_phone(&draft.phone) {
                errors.insert(FormField::Phone, "Phone must be exactly 10 digits".into());
            }

            if blank(&draft.email) {
                errors.insert(FormField::Email, "Email is required".into());
            } else if !validate::email_shape_ok(&draft.email) {
                errors.insert(FormField::Email, "Please enter a valid email".into());
            } else if validate::has_consecutive_periods(&draft.email) {
                errors.insert(
                    FormField::Email,
                    "Email cannot have two periods in a row".into(),
                );
            }

            // Emergency contact and email are optional but validated when present
            if !blank(&draft.emergency_contact) && !validate::is_valid_phone(&draft.emergency_contact)
            {
                errors.insert(
                    FormField::EmergencyContact,
                    "Emergency contact must be exactly 10 digits".into(),
                );
            }
            if !blank(&draft.emergency_email) {
                if !validate::email_shape_ok(&draft.emergency_email) {
                    errors.insert(FormField::EmergencyEmail, "Please enter a valid email".into());
                } else if validate::has_consecutive_periods(&draft.emergency_email) {
                    errors.insert(
                        FormField::EmergencyEmail,
                        "Email cannot have two periods in a row".into(),
                    );
                }
            }

            let admission = validate::parse_date(&draft.admission_date);
            if blank(&draft.admission_date) {
                errors.insert(FormField::AdmissionDate, "Admission date is required".into());
            } else if admission.is_none() {
                errors.insert(
                    FormField::AdmissionDate,
                    "Valid admission date is required".into(),
                );
            }

            if blank(&draft.discharge_date) {
                errors.insert(FormField::DischargeDate, "Discharge date is required".into());
            } else {
                match (admission, validate::parse_date(&draft.discharge_date)) {
                    (_, None) => {
                        errors.insert(
                            FormField::DischargeDate,
                            "Valid discharge date is required".into(),
                        );
                    }
                    (Some(admitted), Some(discharged)) if discharged < admitted => {
                        errors.insert(
                            FormField::DischargeDate,
                            "Discharge date must be after admission date".into(),
                        );
                    }
                    _ => {}
                }
            }
        }
        WizardStep::MedicalAndDocuments => {
            if blank(&draft.condition) {
                errors.insert(FormField::Condition, "Medical condition is required".into());
            }
            if blank(&draft.doctor) {
                errors.insert(FormField::Doctor, "Doctor name is required".into());
            }
        }
    }

    errors
}

/// Everything the persistence collaborator needs for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionSubmission {
    /// Typed wire payload
    pub patient: NewPatient,
    /// Accepted files, each tagged with its document type
    pub documents: Vec<PendingAttachment>,
}

/// The admission wizard: draft, step, error map, and pending attachments.
#[derive(Debug, Clone)]
pub struct AdmissionWizard {
    step: WizardStep,
    draft: AdmissionDraft,
    errors: BTreeMap<FormField, String>,
    selected_doc_type: DocumentType,
    attachments: Vec<PendingAttachment>,
}

impl Default for AdmissionWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionWizard {
    /// Fresh wizard on step 1 with an empty draft.
    pub fn new() -> Self {
        Self {
            step: WizardStep::PersonalAndDates,
            draft: AdmissionDraft::new(),
            errors: BTreeMap::new(),
            selected_doc_type: DocumentType::Bills,
            attachments: Vec::new(),
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Current draft values.
    pub fn draft(&self) -> &AdmissionDraft {
        &self.draft
    }

    /// Current per-field errors.
    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    /// Currently selected document category.
    pub fn selected_doc_type(&self) -> DocumentType {
        self.selected_doc_type
    }

    /// Files accepted so far.
    pub fn attachments(&self) -> &[PendingAttachment] {
        &self.attachments
    }

    /// Overwrite a field and optimistically clear its error, independent of
    /// re-running full validation.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set_field(field, value);
        self.errors.remove(&field);
    }

    /// Change the document category for subsequent uploads. Files already
    /// accepted keep the tag they were uploaded under.
    pub fn select_doc_type(&mut self, doc_type: DocumentType) {
        self.selected_doc_type = doc_type;
    }

    /// Offer a file for the pending-attachment list.
    ///
    /// Only `application/pdf` is accepted; anything else records the
    /// file-intake error and is discarded, leaving the list unchanged.
    /// Returns whether the file was accepted.
    pub fn attach_file(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> bool {
        let file_name = file_name.into();
        let content_type = content_type.into();

        if content_type != "application/pdf" {
            tracing::debug!(file = %file_name, mime = %content_type, "rejected non-PDF upload");
            self.errors
                .insert(FormField::FileUpload, "Please upload only PDF files".into());
            return false;
        }

        self.errors.remove(&FormField::FileUpload);
        self.attachments.push(PendingAttachment::new(
            file_name,
            content_type,
            bytes,
            self.selected_doc_type,
        ));
        true
    }

    /// Drop a pending attachment by position. Returns whether one existed.
    pub fn remove_attachment(&mut self, index: usize) -> bool {
        if index < self.attachments.len() {
            self.attachments.remove(index);
            true
        } else {
            false
        }
    }

    /// Re-run validation for the current step, replacing the error map.
    /// Returns whether the step is clean.
    pub fn validate_current(&mut self) -> bool {
        self.errors = validate_step(self.step, &self.draft);
        self.errors.is_empty()
    }

    /// Forward gate: validate the current step and move to the next one.
    /// Refused (returning `false`, errors populated) when validation fails
    /// or there is no next step.
    pub fn advance(&mut self) -> bool {
        match self.step {
            WizardStep::PersonalAndDates => {
                if self.validate_current() {
                    self.step = WizardStep::MedicalAndDocuments;
                    true
                } else {
                    tracing::debug!(errors = self.errors.len(), "step 1 gate refused");
                    false
                }
            }
            // Step 2's forward transition is `finish`
            WizardStep::MedicalAndDocuments => false,
        }
    }

    /// Backward transition: always allowed from step 2, clears the error
    /// map. Returns whether a move happened.
    pub fn back(&mut self) -> bool {
        match self.step {
            WizardStep::PersonalAndDates => false,
            WizardStep::MedicalAndDocuments => {
                self.step = WizardStep::PersonalAndDates;
                self.errors.clear();
                true
            }
        }
    }

    /// Final forward gate: validate step 2 and assemble the submission.
    ///
    /// Returns `None` when called from step 1 (error map untouched) or when
    /// step 2 fails validation (errors populated). The wizard itself does
    /// not talk to the backend; the caller hands the submission to the
    /// persistence client.
    pub fn finish(&mut self) -> Option<AdmissionSubmission> {
        if self.step != WizardStep::MedicalAndDocuments {
            return None;
        }
        if !self.validate_current() {
            tracing::debug!(errors = self.errors.len(), "submission gate refused");
            return None;
        }
        Some(AdmissionSubmission {
            patient: self.draft.to_submission(),
            documents: self.attachments.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_step1(wizard: &mut AdmissionWizard) {
        wizard.set_field(FormField::Name, "Asha Rao");
        wizard.set_field(FormField::Age, "54");
        wizard.set_field(FormField::Phone, "(123) 456-7890");
        wizard.set_field(FormField::Email, "asha@example.com");
        wizard.set_field(FormField::AdmissionDate, "2025-03-01");
        wizard.set_field(FormField::DischargeDate, "2025-03-09");
    }

    #[test]
    fn test_new_wizard_starts_on_step_one() {
        let wizard = AdmissionWizard::new();
        assert_eq!(wizard.step(), WizardStep::PersonalAndDates);
        assert_eq!(wizard.step().number(), 1);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.selected_doc_type(), DocumentType::Bills);
    }

    #[test]
    fn test_advance_refused_with_empty_draft() {
        let mut wizard = AdmissionWizard::new();
        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::PersonalAndDates);
        assert!(wizard.errors().contains_key(&FormField::Name));
        assert!(wizard.errors().contains_key(&FormField::Phone));
        assert!(wizard.errors().contains_key(&FormField::AdmissionDate));
    }

    #[test]
    fn test_advance_with_valid_step_one() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::MedicalAndDocuments);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_missing_discharge_date_is_the_only_error() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        wizard.set_field(FormField::DischargeDate, "");

        assert!(!wizard.advance());
        let keys: Vec<FormField> = wizard.errors().keys().copied().collect();
        assert_eq!(keys, vec![FormField::DischargeDate]);
        assert_eq!(
            wizard.errors()[&FormField::DischargeDate],
            "Discharge date is required"
        );
    }

    #[test]
    fn test_discharge_before_admission_rejected() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        wizard.set_field(FormField::DischargeDate, "2025-02-28");

        assert!(!wizard.advance());
        assert_eq!(
            wizard.errors()[&FormField::DischargeDate],
            "Discharge date must be after admission date"
        );
    }

    #[test]
    fn test_zero_length_stay_is_valid() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        wizard.set_field(FormField::DischargeDate, "2025-03-01");
        assert!(wizard.advance());
    }

    #[test]
    fn test_date_comparison_is_chronological_not_lexicographic() {
        // With a time part the strings would compare wrong lexicographically
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        wizard.set_field(FormField::AdmissionDate, "2025-03-01T09:00:00");
        wizard.set_field(FormField::DischargeDate, "2025-03-01");
        assert!(wizard.advance());
    }

    #[test]
    fn test_editing_a_field_clears_only_its_error() {
        let mut wizard = AdmissionWizard::new();
        assert!(!wizard.advance());
        let before = wizard.errors().len();
        assert!(before > 1);

        wizard.set_field(FormField::Name, "Asha Rao");
        assert!(!wizard.errors().contains_key(&FormField::Name));
        assert_eq!(wizard.errors().len(), before - 1);
    }

    #[test]
    fn test_emergency_fields_optional_but_checked_when_present() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        assert!(wizard.validate_current());

        wizard.set_field(FormField::EmergencyContact, "12345");
        assert!(!wizard.advance());
        assert_eq!(
            wizard.errors()[&FormField::EmergencyContact],
            "Emergency contact must be exactly 10 digits"
        );

        wizard.set_field(FormField::EmergencyContact, "098-765-4321");
        wizard.set_field(FormField::EmergencyEmail, "kin..folk@x.com");
        assert!(!wizard.advance());
        assert_eq!(
            wizard.errors()[&FormField::EmergencyEmail],
            "Email cannot have two periods in a row"
        );
    }

    #[test]
    fn test_revalidation_of_valid_step_is_idempotent() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        for _ in 0..3 {
            assert!(wizard.validate_current());
            assert!(wizard.errors().is_empty());
        }
    }

    #[test]
    fn test_back_clears_errors() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        assert!(wizard.advance());
        assert!(wizard.finish().is_none()); // step 2 empty, errors populated
        assert!(!wizard.errors().is_empty());

        assert!(wizard.back());
        assert_eq!(wizard.step(), WizardStep::PersonalAndDates);
        assert!(wizard.errors().is_empty());
        assert!(!wizard.back());
    }

    #[test]
    fn test_non_pdf_rejected_and_list_unchanged() {
        let mut wizard = AdmissionWizard::new();
        let accepted = wizard.attach_file(
            "notes.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            vec![0u8; 16],
        );
        assert!(!accepted);
        assert!(wizard.attachments().is_empty());
        assert_eq!(
            wizard.errors()[&FormField::FileUpload],
            "Please upload only PDF files"
        );
    }

    #[test]
    fn test_attachment_keeps_upload_time_tag() {
        let mut wizard = AdmissionWizard::new();
        assert!(wizard.attach_file("bill.pdf", "application/pdf", vec![1]));

        wizard.select_doc_type(DocumentType::Reports);
        assert!(wizard.attach_file("scan.pdf", "application/pdf", vec![2]));

        // Changing the selector later does not retag earlier uploads
        wizard.select_doc_type(DocumentType::DischargeNote);
        assert_eq!(wizard.attachments()[0].doc_type, DocumentType::Bills);
        assert_eq!(wizard.attachments()[1].doc_type, DocumentType::Reports);
    }

    #[test]
    fn test_accepted_upload_clears_intake_error() {
        let mut wizard = AdmissionWizard::new();
        wizard.attach_file("notes.docx", "application/msword", vec![]);
        assert!(wizard.errors().contains_key(&FormField::FileUpload));

        assert!(wizard.attach_file("bill.pdf", "application/pdf", vec![1]));
        assert!(!wizard.errors().contains_key(&FormField::FileUpload));
    }

    #[test]
    fn test_remove_attachment() {
        let mut wizard = AdmissionWizard::new();
        wizard.attach_file("a.pdf", "application/pdf", vec![1]);
        wizard.attach_file("b.pdf", "application/pdf", vec![2]);

        assert!(wizard.remove_attachment(0));
        assert_eq!(wizard.attachments().len(), 1);
        assert_eq!(wizard.attachments()[0].file_name, "b.pdf");
        assert!(!wizard.remove_attachment(5));
    }

    #[test]
    fn test_finish_gated_on_step_two_validation() {
        let mut wizard = AdmissionWizard::new();
        filled_step1(&mut wizard);
        assert!(wizard.finish().is_none()); // still on step 1
        assert!(wizard.errors().is_empty()); // refusal from step 1 records nothing
        assert!(wizard.advance());

        assert!(wizard.finish().is_none());
        assert!(wizard.errors().contains_key(&FormField::Condition));
        assert!(wizard.errors().contains_key(&FormField::Doctor));

        wizard.set_field(FormField::Condition, "Pneumonia");
        wizard.set_field(FormField::Doctor, ASSIGNED_DOCTORS[0]);
        wizard.attach_file("bill.pdf", "application/pdf", vec![9]);

        let submission = wizard.finish().expect("submission assembled");
        assert_eq!(submission.patient.patient_name, "Asha Rao");
        assert_eq!(submission.patient.patient_contact, "(123) 456-7890");
        assert_eq!(submission.documents.len(), 1);
        assert_eq!(submission.documents[0].doc_type, DocumentType::Bills);
    }
}
