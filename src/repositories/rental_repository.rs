//! Repositorio de alquileres
//!
//! Libro de órdenes en memoria. Las órdenes llegan ya construidas por el
//! servicio de alquileres; aquí solo se almacenan, listan y filtran.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::rental::{Rental, RentalFilters};
use crate::utils::errors::{internal_error, AppError};

pub struct RentalRepository {
    store: RwLock<HashMap<Uuid, Rental>>,
}

impl Default for RentalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RentalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, rental: Rental) -> Result<Rental, AppError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("rental store lock poisoned"))?;
        store.insert(rental.id, rental.clone());
        Ok(rental)
    }

    /// Reemplazar una orden existente
    pub fn save(&self, rental: Rental) -> Result<Rental, AppError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("rental store lock poisoned"))?;

        if !store.contains_key(&rental.id) {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        store.insert(rental.id, rental.clone());
        Ok(rental)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("rental store lock poisoned"))?;
        Ok(store.get(&id).cloned())
    }

    pub fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("rental store lock poisoned"))?;
        Ok(store.values().any(|r| r.code == code))
    }

    /// Listar órdenes aplicando los filtros, más recientes primero
    pub fn list(&self, filters: &RentalFilters) -> Result<Vec<Rental>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("rental store lock poisoned"))?;

        let mut rentals: Vec<Rental> = store
            .values()
            .filter(|r| matches_filters(r, filters))
            .cloned()
            .collect();

        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rentals)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("rental store lock poisoned"))?;

        store
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;
        Ok(())
    }
}

fn matches_filters(rental: &Rental, filters: &RentalFilters) -> bool {
    if let Some(status) = filters.status {
        if rental.status != status {
            return false;
        }
    }

    if let Some(vehicle_id) = filters.vehicle_id {
        if rental.vehicle_id != vehicle_id {
            return false;
        }
    }

    if let Some(client_id) = filters.client_id {
        if rental.client_id != client_id {
            return false;
        }
    }

    if let Some(date) = filters.active_on {
        if date < rental.start_date || date > rental.end_date {
            return false;
        }
    }

    if let Some(term) = &filters.search {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            let description_matches = rental
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false);

            if !rental.code.to_lowercase().contains(&term) && !description_matches {
                return false;
            }
        }
    }

    true
}
