//! Núcleo de gestión de alquiler de vehículos
//!
//! Esta librería contiene los modelos de dominio, repositorios en memoria
//! y servicios de negocio sobre los que se monta la aplicación web de
//! alquileres: flota de vehículos, registro de clientes, órdenes de
//! alquiler y el cálculo de tarifas (subtotal, impuesto, total, depósito).

pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use config::PricingConfig;
pub use services::pricing_service::PricingService;
pub use services::rental_service::RentalService;
pub use services::statistics_service::StatisticsService;
pub use utils::errors::{AppError, AppResult, PricingError};
