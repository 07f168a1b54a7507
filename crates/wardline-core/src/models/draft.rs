//! Admission form draft: the ephemeral, all-string mirror of the wizard
//! fields plus pending file attachments. Created empty when the dialog
//! opens, mutated per keystroke, discarded on submit or cancel.

use serde::{Deserialize, Serialize};

use super::document::DocumentType;
use super::patient::NewPatient;

/// Identifies one field of the admission form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Age,
    Gender,
    Phone,
    Email,
    EmergencyName,
    EmergencyEmail,
    EmergencyContact,
    Condition,
    Doctor,
    DoctorNotes,
    AdmissionDate,
    DischargeDate,
    /// Pseudo-field carrying file-intake errors
    FileUpload,
}

impl FormField {
    /// Stable key used by the UI layer, matching the form's input names.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Age => "age",
            FormField::Gender => "gender",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::EmergencyName => "emergencyName",
            FormField::EmergencyEmail => "emergencyEmail",
            FormField::EmergencyContact => "emergencyContact",
            FormField::Condition => "condition",
            FormField::Doctor => "doctor",
            FormField::DoctorNotes => "doctorNotes",
            FormField::AdmissionDate => "admissionDate",
            FormField::DischargeDate => "dischargeDate",
            FormField::FileUpload => "fileUpload",
        }
    }

    /// Parse a UI field key.
    pub fn from_key(key: &str) -> Option<Self> {
        [
            FormField::Name,
            FormField::Age,
            FormField::Gender,
            FormField::Phone,
            FormField::Email,
            FormField::EmergencyName,
            FormField::EmergencyEmail,
            FormField::EmergencyContact,
            FormField::Condition,
            FormField::Doctor,
            FormField::DoctorNotes,
            FormField::AdmissionDate,
            FormField::DischargeDate,
            FormField::FileUpload,
        ]
        .into_iter()
        .find(|f| f.key() == key)
    }
}

/// The admission form state. All values are strings pending parse; dates use
/// ISO `yyyy-mm-dd` as produced by date inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdmissionDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub emergency_name: String,
    pub emergency_email: String,
    pub emergency_contact: String,
    pub condition: String,
    pub doctor: String,
    pub doctor_notes: String,
    pub admission_date: String,
    pub discharge_date: String,
}

impl Default for AdmissionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionDraft {
    /// Empty draft with the form's initial values.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            // The gender selector opens on "Male"
            gender: "Male".into(),
            phone: String::new(),
            email: String::new(),
            emergency_name: String::new(),
            emergency_email: String::new(),
            emergency_contact: String::new(),
            condition: String::new(),
            doctor: String::new(),
            doctor_notes: String::new(),
            admission_date: String::new(),
            discharge_date: String::new(),
        }
    }

    /// Current value of a field. [`FormField::FileUpload`] has no draft
    /// value and reads as empty.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Gender => &self.gender,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::EmergencyName => &self.emergency_name,
            FormField::EmergencyEmail => &self.emergency_email,
            FormField::EmergencyContact => &self.emergency_contact,
            FormField::Condition => &self.condition,
            FormField::Doctor => &self.doctor,
            FormField::DoctorNotes => &self.doctor_notes,
            FormField::AdmissionDate => &self.admission_date,
            FormField::DischargeDate => &self.discharge_date,
            FormField::FileUpload => "",
        }
    }

    /// Overwrite a field. Writes to [`FormField::FileUpload`] are ignored.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Age => self.age = value,
            FormField::Gender => self.gender = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::EmergencyName => self.emergency_name = value,
            FormField::EmergencyEmail => self.emergency_email = value,
            FormField::EmergencyContact => self.emergency_contact = value,
            FormField::Condition => self.condition = value,
            FormField::Doctor => self.doctor = value,
            FormField::DoctorNotes => self.doctor_notes = value,
            FormField::AdmissionDate => self.admission_date = value,
            FormField::DischargeDate => self.discharge_date = value,
            FormField::FileUpload => {}
        }
    }

    /// Assemble the wire payload, applying the backend's expected fallbacks
    /// for the optional fields.
    pub fn to_submission(&self) -> NewPatient {
        let blank = |s: &str| s.trim().is_empty();
        NewPatient {
            patient_name: self.name.clone(),
            patient_contact: self.phone.clone(),
            patient_email: self.email.clone(),
            emergency_name: if blank(&self.emergency_name) {
                "Not Provided".into()
            } else {
                self.emergency_name.clone()
            },
            emergency_email: if blank(&self.emergency_email) {
                self.email.clone()
            } else {
                self.emergency_email.clone()
            },
            emergency_contact: if blank(&self.emergency_contact) {
                self.phone.clone()
            } else {
                self.emergency_contact.clone()
            },
            admission_date: self.admission_date.clone(),
            discharge_date: self.discharge_date.clone(),
            medical_condition: self.condition.clone(),
            assigned_doctor: self.doctor.clone(),
            age: self.age.trim().parse().unwrap_or(0),
            gender: self.gender.clone(),
            doctor_notes: if blank(&self.doctor_notes) {
                format!("Patient admitted for {}", self.condition)
            } else {
                self.doctor_notes.clone()
            },
        }
    }
}

/// A file accepted into the pending-attachment list, tagged with the
/// document type that was selected at the moment of upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingAttachment {
    /// Local attachment id
    pub id: String,
    /// Original file name
    pub file_name: String,
    /// MIME type as reported by the picker
    pub content_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// Category selected when the file was uploaded; later selector changes
    /// do not retag
    pub doc_type: DocumentType,
}

impl PendingAttachment {
    /// Wrap an accepted file.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
        doc_type: DocumentType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            doc_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_defaults() {
        let draft = AdmissionDraft::new();
        assert_eq!(draft.gender, "Male");
        assert!(draft.name.is_empty());
        assert!(draft.admission_date.is_empty());
    }

    #[test]
    fn test_field_round_trip() {
        let mut draft = AdmissionDraft::new();
        draft.set_field(FormField::Name, "Asha Rao");
        draft.set_field(FormField::DischargeDate, "2025-03-09");
        assert_eq!(draft.field(FormField::Name), "Asha Rao");
        assert_eq!(draft.field(FormField::DischargeDate), "2025-03-09");
    }

    #[test]
    fn test_form_field_key_round_trip() {
        for key in ["name", "emergencyContact", "dischargeDate", "fileUpload"] {
            let field = FormField::from_key(key).unwrap();
            assert_eq!(field.key(), key);
        }
        assert_eq!(FormField::from_key("ward"), None);
    }

    #[test]
    fn test_submission_fallbacks() {
        let mut draft = AdmissionDraft::new();
        draft.name = "Asha Rao".into();
        draft.age = "54".into();
        draft.phone = "1234567890".into();
        draft.email = "asha@example.com".into();
        draft.condition = "Pneumonia".into();
        draft.doctor = "Dr. Sarah Johnson".into();
        draft.admission_date = "2025-03-01".into();
        draft.discharge_date = "2025-03-09".into();

        let payload = draft.to_submission();
        assert_eq!(payload.emergency_name, "Not Provided");
        assert_eq!(payload.emergency_email, "asha@example.com");
        assert_eq!(payload.emergency_contact, "1234567890");
        assert_eq!(payload.doctor_notes, "Patient admitted for Pneumonia");
        assert_eq!(payload.age, 54);
    }

    #[test]
    fn test_submission_keeps_explicit_values() {
        let mut draft = AdmissionDraft::new();
        draft.name = "Dev Mehta".into();
        draft.age = "not a number".into();
        draft.emergency_name = "Mira Mehta".into();
        draft.doctor_notes = "Review in two days".into();

        let payload = draft.to_submission();
        assert_eq!(payload.emergency_name, "Mira Mehta");
        assert_eq!(payload.doctor_notes, "Review in two days");
        // Unparsable age falls back to 0, matching the form's coercion
        assert_eq!(payload.age, 0);
    }

    #[test]
    fn test_pending_attachment_tags() {
        let attachment =
            PendingAttachment::new("bill.pdf", "application/pdf", vec![1, 2], DocumentType::Bills);
        assert_eq!(attachment.doc_type, DocumentType::Bills);
        assert_eq!(attachment.id.len(), 36);
    }
}
