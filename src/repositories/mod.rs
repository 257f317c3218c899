//! Repositorios del sistema
//!
//! Almacenes en memoria que hacen las veces del backend de persistencia:
//! catálogo de vehículos, registro de clientes y libro de alquileres.

pub mod client_repository;
pub mod rental_repository;
pub mod vehicle_repository;

pub use client_repository::ClientRepository;
pub use rental_repository::RentalRepository;
pub use vehicle_repository::VehicleRepository;
