//! Repositorio de clientes
//!
//! Registro en memoria de clientes con chequeo de cédula duplicada y
//! búsqueda por nombre, email o teléfono.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::client::{Client, ClientFilters, CreateClientRequest, UpdateClientRequest};
use crate::utils::errors::{conflict_error, internal_error, AppError};

pub struct ClientRepository {
    store: RwLock<HashMap<Uuid, Client>>,
}

impl Default for ClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, request: CreateClientRequest) -> Result<Client, AppError> {
        request.validate()?;

        let document_id = request.document_id.trim().to_string();
        if self.document_id_exists(&document_id)? {
            return Err(conflict_error("Client", "document_id", &document_id));
        }

        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("client store lock poisoned"))?;

        let client = Client {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            document_id,
            email: request.email,
            phone: request.phone,
            address: request.address,
            birth_date: request.birth_date,
            created_at: Utc::now(),
        };

        store.insert(client.id, client.clone());
        Ok(client)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("client store lock poisoned"))?;
        Ok(store.get(&id).cloned())
    }

    /// Listar el registro aplicando la búsqueda, más recientes primero
    pub fn list(&self, filters: &ClientFilters) -> Result<Vec<Client>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("client store lock poisoned"))?;

        let mut clients: Vec<Client> = store
            .values()
            .filter(|c| matches_search(c, filters.search.as_deref()))
            .cloned()
            .collect();

        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clients)
    }

    pub fn document_id_exists(&self, document_id: &str) -> Result<bool, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("client store lock poisoned"))?;
        Ok(store.values().any(|c| c.document_id == document_id.trim()))
    }

    pub fn update(&self, id: Uuid, request: UpdateClientRequest) -> Result<Client, AppError> {
        request.validate()?;

        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("client store lock poisoned"))?;

        let current = store
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

        if let Some(first_name) = request.first_name {
            current.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            current.last_name = last_name;
        }
        if let Some(email) = request.email {
            current.email = email;
        }
        if request.phone.is_some() {
            current.phone = request.phone;
        }
        if request.address.is_some() {
            current.address = request.address;
        }
        if request.birth_date.is_some() {
            current.birth_date = request.birth_date;
        }

        Ok(current.clone())
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("client store lock poisoned"))?;

        store
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
        Ok(())
    }
}

fn matches_search(client: &Client, search: Option<&str>) -> bool {
    let term = match search {
        Some(term) => term.trim().to_lowercase(),
        None => return true,
    };
    if term.is_empty() {
        return true;
    }

    let phone_matches = client
        .phone
        .as_deref()
        .map(|p| p.contains(&term))
        .unwrap_or(false);

    client.full_name().to_lowercase().contains(&term)
        || client.email.to_lowercase().contains(&term)
        || phone_matches
}
