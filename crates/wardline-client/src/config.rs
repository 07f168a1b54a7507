//! API endpoint configuration.

/// Base URL used when `WARDLINE_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// The single REST resource the client talks to.
pub const PATIENTS_ENDPOINT: &str = "/patients";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    /// Config against an explicit base URL; a trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read `WARDLINE_API_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        match std::env::var("WARDLINE_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The patient collection URL.
    pub fn patients_url(&self) -> String {
        self.url(PATIENTS_ENDPOINT)
    }

    /// The URL for one patient.
    pub fn patient_url(&self, id: &str) -> String {
        format!("{}/{}", self.patients_url(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ApiConfig::default();
        assert_eq!(config.patients_url(), "http://localhost:8000/api/v1/patients");
        assert_eq!(
            config.patient_url("p-1"),
            "http://localhost:8000/api/v1/patients/p-1"
        );
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let config = ApiConfig::new("https://ward.example.org/api/v1/");
        assert_eq!(
            config.patients_url(),
            "https://ward.example.org/api/v1/patients"
        );
    }
}
