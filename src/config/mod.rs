//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de tarifas, depósitos y
//! horarios por defecto del sistema.

pub mod pricing;

pub use pricing::*;
