//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos. Las funciones con firma
//! `fn(&str) -> Result<(), ValidationError>` se enchufan como
//! validadores custom en los derive de `validator`.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    // Placa: 2-4 caracteres alfanuméricos + 3-4 dígitos, separador opcional
    static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"^[A-Z0-9]{1,4}[- ]?[0-9]{3,4}[- ]?[A-Z]{0,2}$").unwrap();
    // Cédula: 3 + 7 + 1 dígitos, guiones opcionales
    static ref DOCUMENT_ID_RE: Regex =
        Regex::new(r"^[0-9]{3}-?[0-9]{7}-?[0-9]$").unwrap();
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a hora (formato de formulario HH:MM)
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        let mut error = ValidationError::new("time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if !LICENSE_PLATE_RE.is_match(&normalized) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de cédula
pub fn validate_document_id(value: &str) -> Result<(), ValidationError> {
    if !DOCUMENT_ID_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("document_id");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XXX-XXXXXXX-X".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de código de alquiler
pub fn validate_rental_code(value: &str) -> Result<(), ValidationError> {
    if !value.starts_with("ALQ-") || value.len() < 5 {
        let mut error = ValidationError::new("rental_code");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ALQ- followed by digits".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-03-01";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/03/01";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("09:00").is_ok());
        assert!(validate_time("18:30").is_ok());
        assert!(validate_time("9 am").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("809-555-0147").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("A123456").is_ok());
        assert!(validate_license_plate("AB-1234").is_ok());
        assert!(validate_license_plate("ab 1234").is_ok());
        assert!(validate_license_plate("A").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_document_id() {
        assert!(validate_document_id("001-1234567-8").is_ok());
        assert!(validate_document_id("00112345678").is_ok());
        assert!(validate_document_id("123-45-6").is_err());
    }

    #[test]
    fn test_validate_rental_code() {
        assert!(validate_rental_code("ALQ-0042").is_ok());
        assert!(validate_rental_code("042").is_err());
        assert!(validate_rental_code("ALQ-").is_err());
    }
}
