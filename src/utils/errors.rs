//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y su
//! proyección a respuestas estructuradas para la capa que consuma
//! la librería.

use serde_json::json;
use thiserror::Error;

/// Errores del cálculo de tarifas
///
/// Todos son fallos de validación locales y recuperables: bloquean el
/// recálculo puntual, nunca el resto de la aplicación.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid daily rate: {0}")]
    InvalidRate(String),

    #[error("Invalid rental date: {0}")]
    InvalidDate(String),

    #[error("Rental period does not span a billable day")]
    ZeroDuration,
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Respuesta de error estructurada
///
/// Misma forma que expone la API externa: la capa HTTP (fuera de esta
/// librería) decide el status code a partir de `code`.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AppError {
    /// Proyectar el error a su respuesta estructurada
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            AppError::Validation(e) => ErrorResponse {
                error: "Validation Error".to_string(),
                message: "The provided data is invalid".to_string(),
                details: Some(json!(e)),
                code: Some("VALIDATION_ERROR".to_string()),
            },

            AppError::Pricing(e) => ErrorResponse {
                error: "Pricing Error".to_string(),
                message: e.to_string(),
                details: None,
                code: Some(match e {
                    PricingError::InvalidRate(_) => "INVALID_RATE".to_string(),
                    PricingError::InvalidDate(_) => "INVALID_DATE".to_string(),
                    PricingError::ZeroDuration => "ZERO_DURATION".to_string(),
                }),
            },

            AppError::NotFound(msg) => ErrorResponse {
                error: "Not Found".to_string(),
                message: msg.clone(),
                details: None,
                code: Some("NOT_FOUND".to_string()),
            },

            AppError::Conflict(msg) => ErrorResponse {
                error: "Conflict".to_string(),
                message: msg.clone(),
                details: None,
                code: Some("CONFLICT".to_string()),
            },

            AppError::BadRequest(msg) => ErrorResponse {
                error: "Bad Request".to_string(),
                message: msg.clone(),
                details: None,
                code: Some("BAD_REQUEST".to_string()),
            },

            AppError::Internal(msg) => ErrorResponse {
                error: "Internal Error".to_string(),
                message: "An unexpected error occurred".to_string(),
                details: Some(json!({ "internal_error": msg })),
                code: Some("INTERNAL_ERROR".to_string()),
            },
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_codes() {
        let err = AppError::from(PricingError::ZeroDuration);
        let response = err.to_response();
        assert_eq!(response.code.as_deref(), Some("ZERO_DURATION"));

        let err = AppError::from(PricingError::InvalidRate("abc".to_string()));
        assert_eq!(err.to_response().code.as_deref(), Some("INVALID_RATE"));
    }

    #[test]
    fn test_not_found_helper() {
        let err = not_found_error("Vehicle", "123");
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_response().code.as_deref(), Some("NOT_FOUND"));
    }
}
