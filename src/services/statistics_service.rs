//! Servicio de estadísticas
//!
//! Este módulo arma el resumen para el dashboard: tamaño de flota,
//! conteos de órdenes por estado, ingresos y depósitos retenidos.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::rental::{RentalFilters, RentalStatus};
use crate::models::client::ClientFilters;
use crate::models::vehicle::VehicleFilters;
use crate::repositories::{ClientRepository, RentalRepository, VehicleRepository};
use crate::utils::errors::AppResult;

/// Resumen para dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,

    // Resumen de flota
    pub total_vehicles: usize,
    pub available_vehicles: usize,

    // Resumen de clientes
    pub total_clients: usize,

    // Resumen de alquileres
    pub total_rentals: usize,
    pub pending_rentals: usize,
    pub in_progress_rentals: usize,
    pub completed_rentals: usize,
    pub cancelled_rentals: usize,

    // Métricas financieras
    pub total_revenue: Decimal,
    pub deposits_held: Decimal,
    pub average_rental_days: f64,
}

pub struct StatisticsService {
    vehicles: Arc<VehicleRepository>,
    clients: Arc<ClientRepository>,
    rentals: Arc<RentalRepository>,
}

impl StatisticsService {
    pub fn new(
        vehicles: Arc<VehicleRepository>,
        clients: Arc<ClientRepository>,
        rentals: Arc<RentalRepository>,
    ) -> Self {
        Self {
            vehicles,
            clients,
            rentals,
        }
    }

    /// Armar el resumen del día sobre el estado actual de los almacenes
    pub fn dashboard_summary(&self) -> AppResult<DashboardSummary> {
        let vehicles = self.vehicles.list(&VehicleFilters::default())?;
        let clients = self.clients.list(&ClientFilters::default())?;
        let rentals = self.rentals.list(&RentalFilters::default())?;

        let mut pending = 0;
        let mut in_progress = 0;
        let mut completed = 0;
        let mut cancelled = 0;
        let mut revenue = Decimal::ZERO;
        let mut deposits_held = Decimal::ZERO;
        let mut billed_days: i64 = 0;
        let mut billed_count: usize = 0;

        for rental in &rentals {
            match rental.status {
                RentalStatus::Pending => pending += 1,
                RentalStatus::InProgress => in_progress += 1,
                RentalStatus::Completed => completed += 1,
                RentalStatus::Cancelled => cancelled += 1,
            }

            // Los ingresos cuentan solo órdenes completadas
            if rental.status == RentalStatus::Completed {
                revenue += rental.total;
            }

            // Depósitos retenidos: órdenes no canceladas sin depósito devuelto
            if rental.status != RentalStatus::Cancelled && !rental.deposit_returned {
                deposits_held += rental.deposit;
            }

            if rental.status != RentalStatus::Cancelled {
                billed_days += rental.days;
                billed_count += 1;
            }
        }

        let average_rental_days = if billed_count > 0 {
            billed_days as f64 / billed_count as f64
        } else {
            0.0
        };

        Ok(DashboardSummary {
            date: Utc::now().date_naive(),
            total_vehicles: vehicles.len(),
            available_vehicles: vehicles.iter().filter(|v| v.is_available()).count(),
            total_clients: clients.len(),
            total_rentals: rentals.len(),
            pending_rentals: pending,
            in_progress_rentals: in_progress,
            completed_rentals: completed,
            cancelled_rentals: cancelled,
            total_revenue: revenue,
            deposits_held,
            average_rental_days,
        })
    }
}
