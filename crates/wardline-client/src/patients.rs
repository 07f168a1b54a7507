//! The `/patients` resource client.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use wardline_core::models::{NewPatient, Patient};
use wardline_core::session::Session;
use wardline_core::wizard::AdmissionSubmission;

use crate::config::ApiConfig;
use crate::error::{classify_error_body, snippet, ApiError};

/// Blocking client for the patient collection.
///
/// Every successful response is required to actually be JSON before it is
/// decoded; an HTML body from a proxy or a dead backend is reported as such
/// rather than as a parse error.
#[derive(Debug, Clone)]
pub struct PatientsApi {
    http: Client,
    config: ApiConfig,
    session: Option<Session>,
}

impl PatientsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            session: None,
        }
    }

    /// Client configured from `WARDLINE_API_URL`.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Attach a session; its token rides along as a bearer header.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET /patients`
    pub fn list(&self) -> Result<Vec<Patient>, ApiError> {
        let url = self.config.patients_url();
        tracing::debug!(%url, "fetching patient list");
        let response = self.authorized(self.http.get(&url)).send()?;
        self.decode(&url, response)
    }

    /// `GET /patients/{id}`
    pub fn get(&self, id: &str) -> Result<Patient, ApiError> {
        let url = self.config.patient_url(id);
        let response = self.authorized(self.http.get(&url)).send()?;
        self.decode(&url, response)
    }

    /// `POST /patients` as multipart: all text fields plus each accepted
    /// file under its document category's backend field name.
    pub fn create(&self, submission: &AdmissionSubmission) -> Result<Patient, ApiError> {
        let url = self.config.patients_url();
        tracing::debug!(
            %url,
            documents = submission.documents.len(),
            "creating patient"
        );

        let mut form = Form::new();
        for (name, value) in submission.patient.form_fields() {
            form = form.text(name, value);
        }
        for document in &submission.documents {
            let part = Part::bytes(document.bytes.clone())
                .file_name(document.file_name.clone())
                .mime_str(&document.content_type)?;
            form = form.part(document.doc_type.field_name(), part);
        }

        let response = self
            .authorized(self.http.post(&url))
            .multipart(form)
            .send()?;
        self.decode(&url, response)
    }

    /// `PUT /patients/{id}`
    pub fn update(&self, id: &str, patient: &NewPatient) -> Result<Patient, ApiError> {
        let url = self.config.patient_url(id);
        let response = self
            .authorized(self.http.put(&url))
            .json(patient)
            .send()?;
        self.decode(&url, response)
    }

    /// `DELETE /patients/{id}`
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.config.patient_url(id);
        let response = self.authorized(self.http.delete(&url)).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text()?;
            Err(classify_error_body(status.as_u16(), &body))
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => builder.header("Authorization", session.bearer()),
            None => builder,
        }
    }

    /// Check status and content type, then decode the JSON body.
    fn decode<T: DeserializeOwned>(&self, url: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            tracing::debug!(%url, status = status.as_u16(), "request failed");
            return Err(classify_error_body(status.as_u16(), &body));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text()?;

        if !content_type.contains("application/json") {
            tracing::warn!(%url, %content_type, "non-JSON response from backend");
            return Err(ApiError::UnexpectedContentType {
                url: url.to_string(),
                content_type,
                body_snippet: snippet(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
