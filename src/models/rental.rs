//! Modelo de Rental
//!
//! Este módulo contiene la orden de alquiler, su ciclo de vida, el
//! período alquilado y el desglose de precios que se fusiona en la
//! orden antes de persistirla.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::utils::errors::PricingError;

/// Estado de la orden de alquiler
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RentalStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RentalStatus::Pending => "Pending",
            RentalStatus::InProgress => "In progress",
            RentalStatus::Completed => "Completed",
            RentalStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

/// Método de pago
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Cash,
    Transfer,
}

/// Cobertura del seguro
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsuranceCoverage {
    #[default]
    Basic,
    Intermediate,
    Premium,
    AllRisk,
}

/// Nivel de combustible del tanque
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelLevel {
    #[default]
    Full,
    ThreeQuarters,
    Half,
    Quarter,
    Empty,
}

/// Período alquilado: entrega y devolución
///
/// Se construye a partir de fecha + hora de cada extremo. El orden de los
/// extremos no se asume: el conteo de días usa la diferencia absoluta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RentalPeriod {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Construir el período facturable desde fechas de calendario
    ///
    /// Los extremos quedan a medianoche: las horas de entrega y
    /// devolución son logística, no entran en la facturación.
    pub fn from_calendar_dates(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start: start_date.and_time(NaiveTime::MIN),
            end: end_date.and_time(NaiveTime::MIN),
        }
    }

    /// Parsear el período desde strings de formulario (YYYY-MM-DD)
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, PricingError> {
        let start = parse_form_date(start_date)?;
        let end = parse_form_date(end_date)?;
        Ok(Self::from_calendar_dates(start, end))
    }
}

fn parse_form_date(value: &str) -> Result<NaiveDate, PricingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PricingError::InvalidDate("date is required".to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PricingError::InvalidDate(format!("'{}' is not a valid date", value)))
}

/// Desglose de precios de un alquiler
///
/// Value object sin identidad propia: se calcula y se fusiona en la
/// orden. `total` es siempre la suma de los componentes ya redondeados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub days: i64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub deposit: Decimal,
}

/// Rental principal - una orden de alquiler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub code: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub reserved_on: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub return_time: NaiveTime,
    pub status: RentalStatus,
    pub initial_mileage: Option<Decimal>,
    pub final_mileage: Option<Decimal>,
    pub initial_fuel: FuelLevel,
    pub final_fuel: Option<FuelLevel>,
    pub payment_method: PaymentMethod,
    pub insurance: InsuranceCoverage,
    pub days: i64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub deposit: Decimal,
    pub deposit_returned: bool,
    pub pickup_notes: Option<String>,
    pub return_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    /// Período facturable de la orden
    pub fn period(&self) -> RentalPeriod {
        RentalPeriod::from_calendar_dates(self.start_date, self.end_date)
    }

    /// Fusionar un desglose calculado en la orden
    pub fn apply_breakdown(&mut self, breakdown: &PricingBreakdown) {
        self.days = breakdown.days;
        self.subtotal = breakdown.subtotal;
        self.tax = breakdown.tax;
        self.total = breakdown.total;
        self.deposit = breakdown.deposit;
    }

    /// Una orden está viva mientras no se complete ni se cancele
    pub fn is_active(&self) -> bool {
        matches!(self.status, RentalStatus::Pending | RentalStatus::InProgress)
    }
}

/// Request para crear una nueva orden de alquiler
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRentalRequest {
    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub client_id: Uuid,
    pub vehicle_id: Uuid,

    /// Por defecto la fecha de hoy
    pub reserved_on: Option<NaiveDate>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Por defecto los horarios configurados (09:00 / 18:00)
    pub pickup_time: Option<NaiveTime>,
    pub return_time: Option<NaiveTime>,

    pub payment_method: Option<PaymentMethod>,
    pub insurance: Option<InsuranceCoverage>,
    pub initial_fuel: Option<FuelLevel>,

    #[validate(length(max = 1000))]
    pub pickup_notes: Option<String>,
}

/// Request para actualizar una orden existente
///
/// Los cambios de estado no pasan por aquí: van por las transiciones
/// explícitas del servicio (start / complete / cancel).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRentalRequest {
    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub client_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pickup_time: Option<NaiveTime>,
    pub return_time: Option<NaiveTime>,

    pub payment_method: Option<PaymentMethod>,
    pub insurance: Option<InsuranceCoverage>,

    #[validate(length(max = 1000))]
    pub pickup_notes: Option<String>,
}

/// Detalle de devolución al completar una orden
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReturnDetails {
    pub final_mileage: Option<Decimal>,
    pub final_fuel: Option<FuelLevel>,

    #[validate(length(max = 1000))]
    pub return_notes: Option<String>,
}

/// Filtros para búsqueda de alquileres
///
/// Replica la barra de filtros: estado, vehículo, fecha activa y
/// búsqueda por código o descripción.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalFilters {
    pub status: Option<RentalStatus>,
    pub vehicle_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub active_on: Option<NaiveDate>,
    pub search: Option<String>,
}

/// Fila de listado con los nombres ya resueltos
#[derive(Debug, Clone, Serialize)]
pub struct RentalSummary {
    pub id: Uuid,
    pub code: String,
    pub client_name: String,
    pub vehicle_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub return_time: NaiveTime,
    pub total: Decimal,
    pub status: RentalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_rejects_bad_input() {
        assert!(RentalPeriod::parse("2024-03-01", "2024-03-04").is_ok());
        assert!(matches!(
            RentalPeriod::parse("", "2024-03-04"),
            Err(PricingError::InvalidDate(_))
        ));
        assert!(matches!(
            RentalPeriod::parse("01/03/2024", "2024-03-04"),
            Err(PricingError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_apply_breakdown_merges_fields() {
        let mut rental = sample_rental();
        let breakdown = PricingBreakdown {
            days: 3,
            subtotal: Decimal::new(13500, 2),
            tax: Decimal::new(1620, 2),
            total: Decimal::new(15120, 2),
            deposit: Decimal::new(20000, 2),
        };

        rental.apply_breakdown(&breakdown);

        assert_eq!(rental.days, 3);
        assert_eq!(rental.subtotal, Decimal::new(13500, 2));
        assert_eq!(rental.tax, Decimal::new(1620, 2));
        assert_eq!(rental.total, Decimal::new(15120, 2));
        assert_eq!(rental.total, rental.subtotal + rental.tax);
    }

    fn sample_rental() -> Rental {
        Rental {
            id: Uuid::new_v4(),
            code: "ALQ-0001".to_string(),
            description: None,
            client_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            reserved_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            pickup_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            return_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            status: RentalStatus::Pending,
            initial_mileage: None,
            final_mileage: None,
            initial_fuel: FuelLevel::Full,
            final_fuel: None,
            payment_method: PaymentMethod::CreditCard,
            insurance: InsuranceCoverage::Basic,
            days: 0,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            deposit: Decimal::ZERO,
            deposit_returned: false,
            pickup_notes: None,
            return_notes: None,
            created_at: Utc::now(),
        }
    }
}
