//! Servicio de alquileres
//!
//! Este módulo orquesta el ciclo de vida de una orden: cotización,
//! creación con chequeo de disponibilidad, recálculo del desglose
//! cuando cambian el vehículo o las fechas, y las transiciones de
//! estado hasta la devolución del depósito.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::rental::{
    CreateRentalRequest, PricingBreakdown, Rental, RentalFilters, RentalPeriod, RentalStatus,
    RentalSummary, ReturnDetails, UpdateRentalRequest,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::{ClientRepository, RentalRepository, VehicleRepository};
use crate::services::pricing_service::PricingService;
use crate::utils::codes::generate_code;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct RentalService {
    vehicles: Arc<VehicleRepository>,
    clients: Arc<ClientRepository>,
    rentals: Arc<RentalRepository>,
    pricing: PricingService,
}

impl RentalService {
    pub fn new(
        vehicles: Arc<VehicleRepository>,
        clients: Arc<ClientRepository>,
        rentals: Arc<RentalRepository>,
        pricing: PricingService,
    ) -> Self {
        Self {
            vehicles,
            clients,
            rentals,
            pricing,
        }
    }

    /// Cotizar un alquiler sin crear la orden
    ///
    /// Punto de entrada del recálculo del formulario: se invoca de nuevo
    /// cada vez que cambia el vehículo o alguna de las fechas.
    pub fn quote(
        &self,
        vehicle_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<PricingBreakdown> {
        let vehicle = self.require_vehicle(vehicle_id)?;
        let period = RentalPeriod::from_calendar_dates(start_date, end_date);
        let breakdown = self.pricing.compute_breakdown(&vehicle.rate_card(), &period)?;
        Ok(breakdown)
    }

    /// Crear una orden de alquiler
    pub fn create_rental(&self, request: CreateRentalRequest) -> AppResult<Rental> {
        request.validate()?;

        let client = self
            .clients
            .find_by_id(request.client_id)?
            .ok_or_else(|| not_found_error("Client", &request.client_id.to_string()))?;
        let vehicle = self.require_available_vehicle(request.vehicle_id)?;

        let period = RentalPeriod::from_calendar_dates(request.start_date, request.end_date);
        let breakdown = self.pricing.compute_breakdown(&vehicle.rate_card(), &period)?;

        let mut code = generate_code("ALQ");
        while self.rentals.code_exists(&code)? {
            code = generate_code("ALQ");
        }

        let config = self.pricing.config();
        let mut rental = Rental {
            id: Uuid::new_v4(),
            code,
            description: request.description,
            client_id: client.id,
            vehicle_id: vehicle.id,
            reserved_on: request.reserved_on.unwrap_or_else(|| Utc::now().date_naive()),
            start_date: request.start_date,
            end_date: request.end_date,
            pickup_time: request.pickup_time.unwrap_or(config.default_pickup_time),
            return_time: request.return_time.unwrap_or(config.default_return_time),
            status: RentalStatus::Pending,
            initial_mileage: Some(vehicle.mileage),
            final_mileage: None,
            initial_fuel: request.initial_fuel.unwrap_or_default(),
            final_fuel: None,
            payment_method: request.payment_method.unwrap_or_default(),
            insurance: request.insurance.unwrap_or_default(),
            days: 0,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            deposit: Decimal::ZERO,
            deposit_returned: false,
            pickup_notes: request.pickup_notes,
            return_notes: None,
            created_at: Utc::now(),
        };
        rental.apply_breakdown(&breakdown);

        info!(
            "✅ Alquiler {} creado: {} → {} ({} días, total {})",
            rental.code,
            client.full_name(),
            vehicle.label(),
            rental.days,
            rental.total
        );
        self.rentals.insert(rental)
    }

    /// Actualizar una orden existente
    ///
    /// Si cambia el vehículo o alguna fecha, el desglose se recalcula y
    /// se vuelve a fusionar; un desglose fallido nunca toca la orden.
    pub fn update_rental(&self, id: Uuid, request: UpdateRentalRequest) -> AppResult<Rental> {
        request.validate()?;

        let mut rental = self.require_rental(id)?;
        if !rental.is_active() {
            return Err(AppError::Conflict(format!(
                "Rental {} is {} and can no longer be modified",
                rental.code, rental.status
            )));
        }

        if let Some(client_id) = request.client_id {
            self.clients
                .find_by_id(client_id)?
                .ok_or_else(|| not_found_error("Client", &client_id.to_string()))?;
            rental.client_id = client_id;
        }

        let pricing_changed = request.vehicle_id.is_some()
            || request.start_date.is_some()
            || request.end_date.is_some();

        if let Some(vehicle_id) = request.vehicle_id {
            let vehicle = self.require_available_vehicle(vehicle_id)?;
            rental.vehicle_id = vehicle.id;
            rental.initial_mileage = Some(vehicle.mileage);
        }
        if let Some(start_date) = request.start_date {
            rental.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            rental.end_date = end_date;
        }
        if let Some(pickup_time) = request.pickup_time {
            rental.pickup_time = pickup_time;
        }
        if let Some(return_time) = request.return_time {
            rental.return_time = return_time;
        }
        if let Some(payment_method) = request.payment_method {
            rental.payment_method = payment_method;
        }
        if let Some(insurance) = request.insurance {
            rental.insurance = insurance;
        }
        if request.description.is_some() {
            rental.description = request.description;
        }
        if request.pickup_notes.is_some() {
            rental.pickup_notes = request.pickup_notes;
        }

        if pricing_changed {
            let vehicle = self.require_vehicle(rental.vehicle_id)?;
            let breakdown = self
                .pricing
                .compute_breakdown(&vehicle.rate_card(), &rental.period())?;
            rental.apply_breakdown(&breakdown);
            info!(
                "🔄 Desglose de {} recalculado: {} días, total {}",
                rental.code, rental.days, rental.total
            );
        }

        self.rentals.save(rental)
    }

    /// Pending → InProgress: el vehículo fue entregado
    pub fn start_rental(&self, id: Uuid) -> AppResult<Rental> {
        let mut rental = self.require_rental(id)?;
        if rental.status != RentalStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Rental {} cannot start from status {}",
                rental.code, rental.status
            )));
        }
        rental.status = RentalStatus::InProgress;
        self.rentals.save(rental)
    }

    /// Cerrar una orden activa registrando la devolución
    pub fn complete_rental(&self, id: Uuid, details: ReturnDetails) -> AppResult<Rental> {
        details.validate()?;

        let mut rental = self.require_rental(id)?;
        if !rental.is_active() {
            return Err(AppError::Conflict(format!(
                "Rental {} is already {}",
                rental.code, rental.status
            )));
        }

        if details.final_mileage.is_some() {
            rental.final_mileage = details.final_mileage;
        }
        if details.final_fuel.is_some() {
            rental.final_fuel = details.final_fuel;
        }
        if details.return_notes.is_some() {
            rental.return_notes = details.return_notes;
        }
        rental.status = RentalStatus::Completed;

        info!("✅ Alquiler {} completado", rental.code);
        self.rentals.save(rental)
    }

    /// Cancelar una orden activa
    pub fn cancel_rental(&self, id: Uuid) -> AppResult<Rental> {
        let mut rental = self.require_rental(id)?;
        if !rental.is_active() {
            return Err(AppError::Conflict(format!(
                "Rental {} is already {}",
                rental.code, rental.status
            )));
        }
        rental.status = RentalStatus::Cancelled;

        warn!("❌ Alquiler {} cancelado", rental.code);
        self.rentals.save(rental)
    }

    /// Marcar el depósito como devuelto
    ///
    /// Solo una orden completada puede devolver su depósito.
    pub fn return_deposit(&self, id: Uuid) -> AppResult<Rental> {
        let mut rental = self.require_rental(id)?;
        if rental.status != RentalStatus::Completed {
            return Err(AppError::Conflict(format!(
                "Deposit of rental {} cannot be returned while {}",
                rental.code, rental.status
            )));
        }
        if rental.deposit_returned {
            return Err(AppError::Conflict(format!(
                "Deposit of rental {} was already returned",
                rental.code
            )));
        }
        rental.deposit_returned = true;
        self.rentals.save(rental)
    }

    pub fn get_rental(&self, id: Uuid) -> AppResult<Rental> {
        self.require_rental(id)
    }

    pub fn list_rentals(&self, filters: &RentalFilters) -> AppResult<Vec<Rental>> {
        self.rentals.list(filters)
    }

    pub fn delete_rental(&self, id: Uuid) -> AppResult<()> {
        self.rentals.delete(id)
    }

    /// Filas de listado con nombres de cliente y vehículo resueltos
    pub fn summaries(&self, filters: &RentalFilters) -> AppResult<Vec<RentalSummary>> {
        let rentals = self.rentals.list(filters)?;

        rentals
            .into_iter()
            .map(|rental| {
                let client_name = self
                    .clients
                    .find_by_id(rental.client_id)?
                    .map(|c| c.full_name())
                    .unwrap_or_else(|| "Not available".to_string());
                let vehicle_label = self
                    .vehicles
                    .find_by_id(rental.vehicle_id)?
                    .map(|v| v.label())
                    .unwrap_or_else(|| "Not available".to_string());

                Ok(RentalSummary {
                    id: rental.id,
                    code: rental.code,
                    client_name,
                    vehicle_label,
                    start_date: rental.start_date,
                    end_date: rental.end_date,
                    pickup_time: rental.pickup_time,
                    return_time: rental.return_time,
                    total: rental.total,
                    status: rental.status,
                })
            })
            .collect()
    }

    fn require_rental(&self, id: Uuid) -> AppResult<Rental> {
        self.rentals
            .find_by_id(id)?
            .ok_or_else(|| not_found_error("Rental", &id.to_string()))
    }

    fn require_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    fn require_available_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self.require_vehicle(id)?;
        if !vehicle.is_available() {
            return Err(AppError::Conflict(format!(
                "Vehicle {} has no units available",
                vehicle.label()
            )));
        }
        Ok(vehicle)
    }
}
