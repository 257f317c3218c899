//! Repositorio de vehículos
//!
//! Catálogo en memoria de la flota. Hace las veces del backend REST que
//! la aplicación consulta: altas, bajas, búsqueda y chequeo de placas
//! duplicadas.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters,
};
use crate::utils::codes::generate_code;
use crate::utils::errors::{conflict_error, internal_error, validation_error, AppError};
use crate::utils::validation::validate_non_negative;

pub struct VehicleRepository {
    store: RwLock<HashMap<Uuid, Vehicle>>,
}

impl Default for VehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        request.validate()?;

        if validate_non_negative(request.daily_rate).is_err() {
            return Err(validation_error("daily_rate", "must be non-negative"));
        }

        let plate = request.license_plate.trim().to_uppercase();
        if self.license_plate_exists(&plate)? {
            return Err(conflict_error("Vehicle", "license_plate", &plate));
        }

        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;

        let mut code = generate_code("VEH");
        while store.values().any(|v| v.code == code) {
            code = generate_code("VEH");
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            code,
            brand: request.brand,
            model: request.model,
            year: request.year,
            color: request.color,
            category: request.category,
            license_plate: plate,
            transmission: request.transmission,
            fuel_type: request.fuel_type,
            daily_rate: request.daily_rate,
            mileage: request.mileage.unwrap_or_default(),
            stock: request.stock,
            image_url: request.image_url,
            entry_date: request.entry_date,
            description: request.description,
            created_at: Utc::now(),
        };

        store.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;
        Ok(store.get(&id).cloned())
    }

    /// Listar la flota aplicando búsqueda y filtros, más recientes primero
    pub fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;

        let mut vehicles: Vec<Vehicle> = store
            .values()
            .filter(|v| matches_filters(v, filters))
            .cloned()
            .collect();

        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    pub fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;
        let normalized = license_plate.trim().to_uppercase();
        Ok(store.values().any(|v| v.license_plate == normalized))
    }

    pub fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        request.validate()?;

        if let Some(rate) = request.daily_rate {
            if validate_non_negative(rate).is_err() {
                return Err(validation_error("daily_rate", "must be non-negative"));
            }
        }

        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;

        // Chequear la placa nueva contra el resto de la flota
        if let Some(plate) = &request.license_plate {
            let normalized = plate.trim().to_uppercase();
            if store.values().any(|v| v.id != id && v.license_plate == normalized) {
                return Err(conflict_error("Vehicle", "license_plate", &normalized));
            }
        }

        let current = store
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if let Some(brand) = request.brand {
            current.brand = brand;
        }
        if let Some(model) = request.model {
            current.model = model;
        }
        if request.year.is_some() {
            current.year = request.year;
        }
        if request.color.is_some() {
            current.color = request.color;
        }
        if let Some(category) = request.category {
            current.category = category;
        }
        if let Some(plate) = request.license_plate {
            current.license_plate = plate.trim().to_uppercase();
        }
        if request.transmission.is_some() {
            current.transmission = request.transmission;
        }
        if request.fuel_type.is_some() {
            current.fuel_type = request.fuel_type;
        }
        if let Some(rate) = request.daily_rate {
            current.daily_rate = rate;
        }
        if let Some(mileage) = request.mileage {
            current.mileage = mileage;
        }
        if let Some(stock) = request.stock {
            current.stock = stock;
        }
        if request.description.is_some() {
            current.description = request.description;
        }
        if request.image_url.is_some() {
            current.image_url = request.image_url;
        }

        Ok(current.clone())
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| internal_error("vehicle store lock poisoned"))?;

        store
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        Ok(())
    }
}

fn matches_filters(vehicle: &Vehicle, filters: &VehicleFilters) -> bool {
    if filters.available_only && !vehicle.is_available() {
        return false;
    }

    if let Some(category) = filters.category {
        if vehicle.category != category {
            return false;
        }
    }

    if let Some(term) = &filters.search {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            let year_matches = vehicle
                .year
                .map(|y| y.to_string().contains(&term))
                .unwrap_or(false);
            let color_matches = vehicle
                .color
                .as_deref()
                .map(|c| c.to_lowercase().contains(&term))
                .unwrap_or(false);

            if !vehicle.brand.to_lowercase().contains(&term)
                && !vehicle.model.to_lowercase().contains(&term)
                && !vehicle.license_plate.to_lowercase().contains(&term)
                && !color_matches
                && !year_matches
            {
                return false;
            }
        }
    }

    true
}
