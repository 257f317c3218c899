//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD
//! operations, más la tarjeta de tarifa que consume el cálculo de precios.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Categoría del vehículo - determina el tier de depósito
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Pickup,
    Hatchback,
    Sporty,
    Van,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VehicleCategory::Sedan => "Sedan",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Pickup => "Pickup",
            VehicleCategory::Hatchback => "Hatchback",
            VehicleCategory::Sporty => "Sporty",
            VehicleCategory::Van => "Van",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for VehicleCategory {
    type Err = String;

    // Acepta los labels en español de los formularios originales
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedan" | "sedán" => Ok(VehicleCategory::Sedan),
            "suv" => Ok(VehicleCategory::Suv),
            "pickup" => Ok(VehicleCategory::Pickup),
            "hatchback" => Ok(VehicleCategory::Hatchback),
            "sporty" | "deportivo" => Ok(VehicleCategory::Sporty),
            "van" => Ok(VehicleCategory::Van),
            other => Err(format!("unknown vehicle category '{}'", other)),
        }
    }
}

/// Tipo de transmisión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransmissionType {
    Automatic,
    Manual,
    #[serde(rename = "CVT")]
    Cvt,
}

/// Tipo de combustible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

/// Vehicle principal - un vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub code: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub category: VehicleCategory,
    pub license_plate: String,
    pub transmission: Option<TransmissionType>,
    pub fuel_type: Option<FuelType>,
    pub daily_rate: Decimal,
    pub mileage: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Un vehículo se puede alquilar mientras tenga unidades disponibles
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Etiqueta para listados: "Toyota Corolla (A123456)"
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }

    /// Tarjeta de tarifa que consume el cálculo de precios
    pub fn rate_card(&self) -> RateCard {
        RateCard {
            daily_rate: self.daily_rate,
            category: self.category,
        }
    }
}

/// Datos de tarifa de un vehículo - entrada del cálculo de precios
///
/// Solo lleva lo que el cálculo necesita: la tarifa diaria y la
/// categoría para el tier de depósito.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCard {
    pub daily_rate: Decimal,
    pub category: VehicleCategory,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,

    pub category: VehicleCategory,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: String,

    pub transmission: Option<TransmissionType>,
    pub fuel_type: Option<FuelType>,

    pub daily_rate: Decimal,

    pub mileage: Option<Decimal>,

    #[validate(range(min = 0))]
    pub stock: i32,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub image_url: Option<String>,
    pub entry_date: Option<NaiveDate>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,

    pub category: Option<VehicleCategory>,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: Option<String>,

    pub transmission: Option<TransmissionType>,
    pub fuel_type: Option<FuelType>,

    pub daily_rate: Option<Decimal>,

    pub mileage: Option<Decimal>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub image_url: Option<String>,
}

/// Response de vehículo para la capa que consume la librería
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub code: String,
    pub label: String,
    pub category: String,
    pub license_plate: String,
    pub daily_rate: String,
    pub mileage: String,
    pub stock: i32,
    pub available: bool,
    pub created_at: String,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            code: vehicle.code.clone(),
            label: vehicle.label(),
            category: vehicle.category.to_string(),
            license_plate: vehicle.license_plate.clone(),
            daily_rate: vehicle.daily_rate.to_string(),
            mileage: vehicle.mileage.to_string(),
            stock: vehicle.stock,
            available: vehicle.is_available(),
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}

/// Filtros para búsqueda de vehículos
///
/// `search` replica la barra de búsqueda: marca, modelo, color, placa o año.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub search: Option<String>,
    pub category: Option<VehicleCategory>,
    pub available_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str_accepts_spanish_labels() {
        assert_eq!("Sedán".parse::<VehicleCategory>().unwrap(), VehicleCategory::Sedan);
        assert_eq!("Deportivo".parse::<VehicleCategory>().unwrap(), VehicleCategory::Sporty);
        assert_eq!("SUV".parse::<VehicleCategory>().unwrap(), VehicleCategory::Suv);
        assert!("Camión".parse::<VehicleCategory>().is_err());
    }

    #[test]
    fn test_availability_follows_stock() {
        let mut vehicle = sample_vehicle();
        assert!(vehicle.is_available());
        vehicle.stock = 0;
        assert!(!vehicle.is_available());
    }

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            code: "VEH-0001".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: Some(2022),
            color: Some("Gris".to_string()),
            category: VehicleCategory::Sedan,
            license_plate: "A123456".to_string(),
            transmission: Some(TransmissionType::Automatic),
            fuel_type: Some(FuelType::Gasoline),
            daily_rate: Decimal::new(4500, 2),
            mileage: Decimal::new(125000, 1),
            stock: 2,
            image_url: None,
            entry_date: None,
            description: None,
            created_at: Utc::now(),
        }
    }
}
