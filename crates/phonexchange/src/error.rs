use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::catalog::{CatalogError, CatalogImportError};
use crate::config::ConfigError;
use crate::leads::{LeadSubmissionError, RepositoryError};
use crate::telemetry::TelemetryError;
use crate::valuation::ValuationError;
use crate::wizard::WizardError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(CatalogImportError),
    Catalog(CatalogError),
    Valuation(ValuationError),
    Wizard(WizardError),
    Lead(LeadSubmissionError),
    /// Caller supplied something unusable, e.g. an unreadable answers file.
    Input(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "catalog import error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Valuation(err) => write!(f, "valuation error: {}", err),
            AppError::Wizard(err) => write!(f, "wizard error: {}", err),
            AppError::Lead(err) => write!(f, "lead error: {}", err),
            AppError::Input(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Valuation(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Lead(err) => Some(err),
            AppError::Input(_) => None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Import(_) | AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Catalog(err) | AppError::Valuation(ValuationError::Catalog(err)) => {
                match err {
                    CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    CatalogError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
            AppError::Valuation(ValuationError::UnknownModel(_)) => StatusCode::NOT_FOUND,
            AppError::Valuation(ValuationError::IncompleteAnswerSet { .. })
            | AppError::Lead(LeadSubmissionError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Lead(LeadSubmissionError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Wizard(_)
            | AppError::Lead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // API callers see the domain message without the layer prefix.
        let body = match &self {
            AppError::Valuation(err) => match err {
                ValuationError::IncompleteAnswerSet { missing } => json!({
                    "error": err.to_string(),
                    "missing": missing,
                }),
                _ => json!({ "error": err.to_string() }),
            },
            AppError::Catalog(err) => json!({ "error": err.to_string() }),
            AppError::Lead(err) => json!({ "error": err.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogImportError> for AppError {
    fn from(value: CatalogImportError) -> Self {
        Self::Import(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ValuationError> for AppError {
    fn from(value: ValuationError) -> Self {
        Self::Valuation(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<LeadSubmissionError> for AppError {
    fn from(value: LeadSubmissionError) -> Self {
        Self::Lead(value)
    }
}
