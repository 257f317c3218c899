//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del negocio de alquiler:
//! vehículos de la flota, clientes y órdenes de alquiler.

pub mod client;
pub mod rental;
pub mod vehicle;
