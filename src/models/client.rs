//! Modelo de Client
//!
//! Este módulo contiene el struct Client y sus variantes para CRUD
//! operations del registro de clientes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Client principal - un cliente del registro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Nombre completo para listados y resúmenes
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request para crear un nuevo cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(custom = "crate::utils::validation::validate_document_id")]
    pub document_id: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 200))]
    pub address: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

/// Request para actualizar un cliente existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 200))]
    pub address: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

/// Response de cliente para la capa que consume la librería
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub full_name: String,
    pub document_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: String,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            full_name: client.full_name(),
            document_id: client.document_id.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            created_at: client.created_at.to_rfc3339(),
        }
    }
}

/// Filtros para búsqueda de clientes
///
/// `search` replica la barra de búsqueda: nombre, email o teléfono.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilters {
    pub search: Option<String>,
}
