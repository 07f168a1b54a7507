//! Wardline Core Library
//!
//! Client-side core for a hospital patient-management front-end: every page
//! is state-holding UI over one REST resource, and this crate owns the state
//! and the logic while the rendering layer stays thin.
//!
//! # Architecture
//!
//! ```text
//!                    UI pages (list / timeline / dashboard)
//!                                    │ FFI
//!                    ┌───────────────▼───────────────┐
//!                    │         wardline-core         │
//!                    │  wizard FSM · month roster    │
//!                    │  validation · stats · session │
//!                    └───────────────┬───────────────┘
//!                                    │ AdmissionSubmission
//!                            wardline-client
//!                                    │
//!                             GET/POST /patients
//! ```
//!
//! # Core Principle
//!
//! **Derived state is computed, never stored.** Pages hold the fetched
//! patient list; rosters, error maps, and counters are pure functions of it.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, AdmissionDraft, DocumentRef, etc.)
//! - [`wizard`]: Two-step admission wizard with per-step validation gates
//! - [`calendar`]: Month roster and interval/day membership
//! - [`validate`]: Field-level validation primitives
//! - [`stats`]: Roster search and dashboard counters
//! - [`session`]: Explicit session context (no client-side auth flag)

pub mod calendar;
pub mod models;
pub mod session;
pub mod stats;
pub mod validate;
pub mod wizard;

// Re-export commonly used types
pub use calendar::{MonthRoster, MonthView, StayDateError, StaySpan};
pub use models::{
    AdmissionDraft, DocumentRef, DocumentType, FormField, NewPatient, Patient, PendingAttachment,
};
pub use session::{AuthState, Session};
pub use stats::WardStats;
pub use wizard::{AdmissionSubmission, AdmissionWizard, WizardStep};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Mutex;

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WardlineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State error: {0}")]
    StateError(String),
}

impl From<serde_json::Error> for WardlineError {
    fn from(e: serde_json::Error) -> Self {
        WardlineError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for WardlineError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        WardlineError::StateError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a fresh admission wizard for the add-patient dialog.
#[uniffi::export]
pub fn new_admission_wizard() -> std::sync::Arc<WizardHandle> {
    std::sync::Arc::new(WizardHandle {
        inner: Mutex::new(AdmissionWizard::new()),
    })
}

// =========================================================================
// Wizard Handle
// =========================================================================

/// Thread-safe wizard wrapper for FFI.
#[derive(uniffi::Object)]
pub struct WizardHandle {
    inner: Mutex<AdmissionWizard>,
}

#[uniffi::export]
impl WizardHandle {
    /// Overwrite a field by its UI key and clear that field's error.
    pub fn set_field(&self, field: String, value: String) -> Result<(), WardlineError> {
        let field = FormField::from_key(&field)
            .ok_or_else(|| WardlineError::InvalidInput(format!("Unknown field: {}", field)))?;
        let mut wizard = self.inner.lock()?;
        wizard.set_field(field, value);
        Ok(())
    }

    /// Current value of a field by its UI key.
    pub fn field_value(&self, field: String) -> Result<String, WardlineError> {
        let field = FormField::from_key(&field)
            .ok_or_else(|| WardlineError::InvalidInput(format!("Unknown field: {}", field)))?;
        let wizard = self.inner.lock()?;
        Ok(wizard.draft().field(field).to_string())
    }

    /// Current step (number and title).
    pub fn current_step(&self) -> Result<FfiWizardStep, WardlineError> {
        let wizard = self.inner.lock()?;
        Ok(wizard.step().into())
    }

    /// Per-field validation errors, keyed by UI field key.
    pub fn field_errors(&self) -> Result<Vec<FfiFieldError>, WardlineError> {
        let wizard = self.inner.lock()?;
        Ok(wizard
            .errors()
            .iter()
            .map(|(field, message)| FfiFieldError {
                field: field.key().to_string(),
                message: message.clone(),
            })
            .collect())
    }

    /// Validate the current step and move forward when clean.
    pub fn advance(&self) -> Result<bool, WardlineError> {
        let mut wizard = self.inner.lock()?;
        Ok(wizard.advance())
    }

    /// Move back to step 1, clearing the error map.
    pub fn back(&self) -> Result<bool, WardlineError> {
        let mut wizard = self.inner.lock()?;
        Ok(wizard.back())
    }

    /// Change the document category for subsequent uploads.
    pub fn select_document_type(&self, label: String) -> Result<(), WardlineError> {
        let doc_type = DocumentType::from_label(&label)
            .ok_or_else(|| WardlineError::InvalidInput(format!("Unknown document type: {}", label)))?;
        let mut wizard = self.inner.lock()?;
        wizard.select_doc_type(doc_type);
        Ok(())
    }

    /// Offer a file; returns whether it was accepted (PDF only).
    pub fn attach_file(
        &self,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    ) -> Result<bool, WardlineError> {
        let mut wizard = self.inner.lock()?;
        Ok(wizard.attach_file(file_name, content_type, data))
    }

    /// Drop a pending attachment by position.
    pub fn remove_attachment(&self, index: u32) -> Result<bool, WardlineError> {
        let mut wizard = self.inner.lock()?;
        Ok(wizard.remove_attachment(index as usize))
    }

    /// Pending attachments (metadata only).
    pub fn attachments(&self) -> Result<Vec<FfiAttachmentInfo>, WardlineError> {
        let wizard = self.inner.lock()?;
        Ok(wizard.attachments().iter().map(|a| a.into()).collect())
    }

    /// Validate step 2 and assemble the submission, or return `None` with
    /// the error map populated.
    pub fn finish(&self) -> Result<Option<FfiSubmission>, WardlineError> {
        let mut wizard = self.inner.lock()?;
        Ok(wizard.finish().map(|s| s.into()))
    }
}

// =========================================================================
// Stateless Operations (exported to FFI)
// =========================================================================

/// Compute the admission timeline for one month from the raw `/patients`
/// response. `month` is 1-based.
#[uniffi::export]
pub fn month_roster(
    year: i32,
    month: u32,
    patients_json: String,
) -> Result<FfiMonthRoster, WardlineError> {
    let view = MonthView::new(year, month)
        .ok_or_else(|| WardlineError::InvalidInput(format!("Invalid month: {}-{}", year, month)))?;
    let patients: Vec<Patient> = serde_json::from_str(&patients_json)?;
    let roster = MonthRoster::build(view, &patients);

    let rows = roster
        .rows
        .iter()
        .map(|row| FfiRosterRow {
            patient_id: row.patient_id.clone(),
            patient_name: row.patient_name.clone(),
            admission: row.span.admission.to_string(),
            discharge: row.span.discharge.to_string(),
            occupied_days: roster.days_for_row(row),
        })
        .collect();
    let excluded = roster
        .excluded
        .iter()
        .map(|e| FfiExcludedStay {
            patient_id: e.patient_id.clone(),
            patient_name: e.patient_name.clone(),
            reason: e.error.to_string(),
        })
        .collect();

    Ok(FfiMonthRoster {
        title: roster.view.title(),
        days_in_month: roster.view.days_in_month(),
        rows,
        excluded,
    })
}

/// Compute dashboard counters from the raw `/patients` response against a
/// reference date (ISO `yyyy-mm-dd`).
#[uniffi::export]
pub fn ward_stats(patients_json: String, today: String) -> Result<FfiWardStats, WardlineError> {
    let reference: NaiveDate = validate::parse_date(&today)
        .ok_or_else(|| WardlineError::InvalidInput(format!("Invalid date: {}", today)))?;
    let patients: Vec<Patient> = serde_json::from_str(&patients_json)?;
    Ok(WardStats::compute(&patients, reference).into())
}

/// Filter the raw `/patients` response by a search term; returns matching
/// ids in API order.
#[uniffi::export]
pub fn search_patient_ids(
    patients_json: String,
    term: String,
) -> Result<Vec<String>, WardlineError> {
    let patients: Vec<Patient> = serde_json::from_str(&patients_json)?;
    Ok(stats::search(&patients, &term)
        .iter()
        .map(|p| p.id.clone())
        .collect())
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe wizard step.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWizardStep {
    pub number: u8,
    pub title: String,
}

impl From<WizardStep> for FfiWizardStep {
    fn from(step: WizardStep) -> Self {
        Self {
            number: step.number(),
            title: step.title().to_string(),
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

/// FFI-safe attachment metadata.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAttachmentInfo {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub document_type: String,
    pub size_bytes: u64,
}

impl From<&PendingAttachment> for FfiAttachmentInfo {
    fn from(attachment: &PendingAttachment) -> Self {
        Self {
            id: attachment.id.clone(),
            file_name: attachment.file_name.clone(),
            content_type: attachment.content_type.clone(),
            document_type: attachment.doc_type.label().to_string(),
            size_bytes: attachment.bytes.len() as u64,
        }
    }
}

/// FFI-safe submission payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmission {
    pub patient: FfiNewPatient,
    pub documents: Vec<FfiDocumentUpload>,
}

impl From<AdmissionSubmission> for FfiSubmission {
    fn from(submission: AdmissionSubmission) -> Self {
        Self {
            patient: submission.patient.into(),
            documents: submission
                .documents
                .into_iter()
                .map(|d| FfiDocumentUpload {
                    field_name: d.doc_type.field_name().to_string(),
                    file_name: d.file_name,
                    content_type: d.content_type,
                    data: d.bytes,
                })
                .collect(),
        }
    }
}

/// FFI-safe wire payload for patient creation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub patient_name: String,
    pub patient_contact: String,
    pub patient_email: String,
    pub emergency_name: String,
    pub emergency_email: String,
    pub emergency_contact: String,
    pub admission_date: String,
    pub discharge_date: String,
    pub medical_condition: String,
    pub assigned_doctor: String,
    pub age: u32,
    pub gender: String,
    pub doctor_notes: String,
}

impl From<NewPatient> for FfiNewPatient {
    fn from(p: NewPatient) -> Self {
        Self {
            patient_name: p.patient_name,
            patient_contact: p.patient_contact,
            patient_email: p.patient_email,
            emergency_name: p.emergency_name,
            emergency_email: p.emergency_email,
            emergency_contact: p.emergency_contact,
            admission_date: p.admission_date,
            discharge_date: p.discharge_date,
            medical_condition: p.medical_condition,
            assigned_doctor: p.assigned_doctor,
            age: p.age,
            gender: p.gender,
            doctor_notes: p.doctor_notes,
        }
    }
}

/// FFI-safe file part, already mapped to its backend field name.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDocumentUpload {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// FFI-safe month roster.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthRoster {
    pub title: String,
    pub days_in_month: u32,
    pub rows: Vec<FfiRosterRow>,
    pub excluded: Vec<FfiExcludedStay>,
}

/// FFI-safe roster row with precomputed occupied day numbers.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRosterRow {
    pub patient_id: String,
    pub patient_name: String,
    pub admission: String,
    pub discharge: String,
    pub occupied_days: Vec<u32>,
}

/// FFI-safe data-quality flag for a record left off the timeline.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExcludedStay {
    pub patient_id: String,
    pub patient_name: String,
    pub reason: String,
}

/// FFI-safe dashboard counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWardStats {
    pub total: u32,
    pub admitted: u32,
    pub admissions_this_month: u32,
    pub discharges_this_month: u32,
}

impl From<WardStats> for FfiWardStats {
    fn from(stats: WardStats) -> Self {
        Self {
            total: stats.total as u32,
            admitted: stats.admitted as u32,
            admissions_this_month: stats.admissions_this_month as u32,
            discharges_this_month: stats.discharges_this_month as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patients_json() -> String {
        serde_json::json!([
            {
                "_id": "p-1",
                "patient_name": "Asha Rao",
                "medical_condition": "Pneumonia",
                "assigned_doctor": "Dr. Sarah Johnson",
                "admission_date": "2025-02-25",
                "discharge_date": "2025-03-03"
            },
            {
                "_id": "p-2",
                "patient_name": "Dev Mehta",
                "medical_condition": "Fracture",
                "assigned_doctor": "Dr. Michael Chen",
                "admission_date": "not-a-date",
                "discharge_date": "2025-03-09"
            }
        ])
        .to_string()
    }

    #[test]
    fn test_month_roster_export() {
        let roster = month_roster(2025, 3, patients_json()).unwrap();
        assert_eq!(roster.title, "March 2025");
        assert_eq!(roster.days_in_month, 31);
        assert_eq!(roster.rows.len(), 1);
        assert_eq!(roster.rows[0].occupied_days, vec![1, 2, 3]);
        assert_eq!(roster.excluded.len(), 1);
        assert_eq!(roster.excluded[0].patient_id, "p-2");
    }

    #[test]
    fn test_month_roster_rejects_invalid_month() {
        let err = month_roster(2025, 0, "[]".into()).unwrap_err();
        assert!(matches!(err, WardlineError::InvalidInput(_)));
    }

    #[test]
    fn test_wizard_handle_flow() {
        let handle = new_admission_wizard();
        handle.set_field("name".into(), "Asha Rao".into()).unwrap();
        handle.set_field("age".into(), "54".into()).unwrap();
        handle.set_field("phone".into(), "1234567890".into()).unwrap();
        handle.set_field("email".into(), "asha@example.com".into()).unwrap();
        handle.set_field("admissionDate".into(), "2025-03-01".into()).unwrap();
        handle.set_field("dischargeDate".into(), "2025-03-09".into()).unwrap();

        assert!(handle.advance().unwrap());
        assert_eq!(handle.current_step().unwrap().number, 2);

        handle.set_field("condition".into(), "Pneumonia".into()).unwrap();
        handle.set_field("doctor".into(), "Dr. Sarah Johnson".into()).unwrap();
        handle.select_document_type("Reports".into()).unwrap();
        assert!(handle
            .attach_file("scan.pdf".into(), "application/pdf".into(), vec![1, 2])
            .unwrap());

        let submission = handle.finish().unwrap().expect("submission assembled");
        assert_eq!(submission.patient.patient_name, "Asha Rao");
        assert_eq!(submission.documents[0].field_name, "reports");
    }

    #[test]
    fn test_wizard_handle_unknown_field() {
        let handle = new_admission_wizard();
        let err = handle.set_field("ward".into(), "3".into()).unwrap_err();
        assert!(matches!(err, WardlineError::InvalidInput(_)));
    }

    #[test]
    fn test_ward_stats_export() {
        let stats = ward_stats(patients_json(), "2025-03-01".into()).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.admitted, 1);
    }

    #[test]
    fn test_search_export() {
        let ids = search_patient_ids(patients_json(), "fracture".into()).unwrap();
        assert_eq!(ids, vec!["p-2"]);
    }
}
