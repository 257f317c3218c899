//! Servicio de cálculo de tarifas
//!
//! Este módulo contiene el cálculo del desglose de un alquiler:
//! días facturables, subtotal, impuesto, total y depósito. Es una
//! transformación pura sobre sus entradas, sin estado ni I/O; el
//! disparo del recálculo cuando cambia un input es responsabilidad
//! del caller.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::config::PricingConfig;
use crate::models::rental::{PricingBreakdown, RentalPeriod};
use crate::models::vehicle::RateCard;
use crate::utils::errors::PricingError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Redondeo monetario a 2 decimales, mitad hacia afuera
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub struct PricingService {
    config: PricingConfig,
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl PricingService {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Calcular el desglose de un alquiler
    ///
    /// Invariantes del resultado: los cuatro montos son no negativos,
    /// con 2 decimales, y `total` es exactamente `subtotal + tax` (la
    /// suma de los componentes ya redondeados, nunca un
    /// `subtotal * 1.12` redondeado aparte).
    pub fn compute_breakdown(
        &self,
        rate: &RateCard,
        period: &RentalPeriod,
    ) -> Result<PricingBreakdown, PricingError> {
        if rate.daily_rate.is_sign_negative() {
            return Err(PricingError::InvalidRate(format!(
                "'{}' is not a non-negative amount",
                rate.daily_rate
            )));
        }

        let days = Self::billable_days(period)?;

        let subtotal = round2(rate.daily_rate * Decimal::from(days));
        let tax = round2(subtotal * self.config.tax_rate);
        let total = round2(subtotal + tax);
        let deposit = self.config.deposits.amount_for(rate.category);

        Ok(PricingBreakdown {
            days,
            subtotal,
            tax,
            total,
            deposit,
        })
    }

    /// Días facturables de un período
    ///
    /// Techo de la duración transcurrida en días de 24 horas: pisar un
    /// día nuevo, aunque sea por una hora, factura un día completo. El
    /// orden de los extremos no se asume (diferencia absoluta); un
    /// período que no llega a un día facturable es un error de entrada,
    /// no un alquiler de costo cero.
    pub fn billable_days(period: &RentalPeriod) -> Result<i64, PricingError> {
        let elapsed_ms = (period.end - period.start).num_milliseconds().abs();
        let days = (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

        if days <= 0 {
            return Err(PricingError::ZeroDuration);
        }
        Ok(days)
    }

    /// Parsear una tarifa diaria venida de un formulario
    pub fn parse_rate(raw: &str) -> Result<Decimal, PricingError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(PricingError::InvalidRate("daily rate is required".to_string()));
        }

        let rate = Decimal::from_str(value)
            .map_err(|_| PricingError::InvalidRate(format!("'{}' is not a valid amount", value)))?;

        if rate.is_sign_negative() {
            return Err(PricingError::InvalidRate(format!(
                "'{}' is not a non-negative amount",
                value
            )));
        }
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleCategory;
    use chrono::NaiveDate;

    fn service() -> PricingService {
        PricingService::default()
    }

    fn rate(amount: &str, category: VehicleCategory) -> RateCard {
        RateCard {
            daily_rate: Decimal::from_str(amount).unwrap(),
            category,
        }
    }

    fn calendar_period(start: (i32, u32, u32), end: (i32, u32, u32)) -> RentalPeriod {
        RentalPeriod::from_calendar_dates(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn test_three_day_sedan_breakdown() {
        let breakdown = service()
            .compute_breakdown(
                &rate("45.00", VehicleCategory::Sedan),
                &calendar_period((2024, 3, 1), (2024, 3, 4)),
            )
            .unwrap();

        assert_eq!(breakdown.days, 3);
        assert_eq!(breakdown.subtotal, Decimal::new(13500, 2));
        assert_eq!(breakdown.tax, Decimal::new(1620, 2));
        assert_eq!(breakdown.total, Decimal::new(15120, 2));
        assert_eq!(breakdown.deposit, Decimal::new(20000, 2));
    }

    #[test]
    fn test_one_day_suv_breakdown() {
        let breakdown = service()
            .compute_breakdown(
                &rate("80.00", VehicleCategory::Suv),
                &calendar_period((2024, 3, 1), (2024, 3, 2)),
            )
            .unwrap();

        assert_eq!(breakdown.days, 1);
        assert_eq!(breakdown.subtotal, Decimal::new(8000, 2));
        assert_eq!(breakdown.tax, Decimal::new(960, 2));
        assert_eq!(breakdown.total, Decimal::new(8960, 2));
        assert_eq!(breakdown.deposit, Decimal::new(30000, 2));
    }

    #[test]
    fn test_deposit_by_category() {
        let svc = service();
        let period = calendar_period((2024, 3, 1), (2024, 3, 8));

        for (category, expected) in [
            (VehicleCategory::Suv, Decimal::new(30000, 2)),
            (VehicleCategory::Pickup, Decimal::new(30000, 2)),
            (VehicleCategory::Sedan, Decimal::new(20000, 2)),
            (VehicleCategory::Hatchback, Decimal::new(20000, 2)),
            (VehicleCategory::Sporty, Decimal::new(20000, 2)),
            (VehicleCategory::Van, Decimal::new(20000, 2)),
        ] {
            let breakdown = svc
                .compute_breakdown(&rate("99.99", category), &period)
                .unwrap();
            assert_eq!(breakdown.deposit, expected, "category {}", category);
        }
    }

    #[test]
    fn test_partial_day_bills_full_day() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        // 24 horas exactas: un día
        let end = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(
            PricingService::billable_days(&RentalPeriod::new(start, end)).unwrap(),
            1
        );

        // 24 horas y un minuto: dos días
        let end = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(9, 1, 0)
            .unwrap();
        assert_eq!(
            PricingService::billable_days(&RentalPeriod::new(start, end)).unwrap(),
            2
        );
    }

    #[test]
    fn test_reversed_period_yields_same_breakdown() {
        let svc = service();
        let card = rate("45.00", VehicleCategory::Sedan);

        let forward = svc
            .compute_breakdown(&card, &calendar_period((2024, 3, 1), (2024, 3, 4)))
            .unwrap();
        let reversed = svc
            .compute_breakdown(&card, &calendar_period((2024, 3, 4), (2024, 3, 1)))
            .unwrap();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let result = service().compute_breakdown(
            &rate("45.00", VehicleCategory::Sedan),
            &calendar_period((2024, 3, 1), (2024, 3, 1)),
        );
        assert_eq!(result.unwrap_err(), PricingError::ZeroDuration);
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let card = RateCard {
            daily_rate: Decimal::from_str("-1.00").unwrap(),
            category: VehicleCategory::Sedan,
        };
        let result =
            service().compute_breakdown(&card, &calendar_period((2024, 3, 1), (2024, 3, 4)));
        assert!(matches!(result, Err(PricingError::InvalidRate(_))));
    }

    #[test]
    fn test_total_is_sum_of_rounded_components() {
        let svc = service();
        let period = calendar_period((2024, 3, 1), (2024, 3, 4));

        for amount in ["33.33", "19.99", "0.01", "124.75"] {
            let breakdown = svc
                .compute_breakdown(&rate(amount, VehicleCategory::Van), &period)
                .unwrap();

            assert_eq!(breakdown.total, breakdown.subtotal + breakdown.tax);
            assert_eq!(breakdown.tax, round2(breakdown.subtotal * Decimal::new(12, 2)));
            assert!(breakdown.subtotal >= Decimal::ZERO);
            assert_eq!(breakdown.subtotal.round_dp(2), breakdown.subtotal);
        }
    }

    #[test]
    fn test_subtotal_scales_with_days() {
        let breakdown = service()
            .compute_breakdown(
                &rate("12.50", VehicleCategory::Hatchback),
                &calendar_period((2024, 6, 1), (2024, 6, 11)),
            )
            .unwrap();

        assert_eq!(breakdown.days, 10);
        assert_eq!(breakdown.subtotal, Decimal::new(12500, 2));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(
            PricingService::parse_rate("45.00").unwrap(),
            Decimal::new(4500, 2)
        );
        assert_eq!(
            PricingService::parse_rate(" 80 ").unwrap(),
            Decimal::from(80)
        );
        assert!(matches!(
            PricingService::parse_rate(""),
            Err(PricingError::InvalidRate(_))
        ));
        assert!(matches!(
            PricingService::parse_rate("precio"),
            Err(PricingError::InvalidRate(_))
        ));
        assert!(matches!(
            PricingService::parse_rate("-5.00"),
            Err(PricingError::InvalidRate(_))
        ));
    }
}
