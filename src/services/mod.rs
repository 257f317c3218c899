//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el
//! cálculo de tarifas, la orquestación del ciclo de vida de las
//! órdenes y las estadísticas del dashboard.

pub mod pricing_service;
pub mod rental_service;
pub mod statistics_service;

pub use pricing_service::*;
pub use rental_service::*;
pub use statistics_service::*;
