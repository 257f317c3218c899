//! Configuración de tarifas
//!
//! Este módulo maneja la tasa de impuesto, la tabla de depósitos por
//! categoría y los horarios por defecto de entrega y devolución.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use crate::models::vehicle::VehicleCategory;

/// Tabla de depósitos por categoría de vehículo
///
/// Las categorías sin entrada explícita usan el monto estándar, así que
/// agregar una categoría nueva no toca el cálculo.
#[derive(Debug, Clone)]
pub struct DepositSchedule {
    tiers: HashMap<VehicleCategory, Decimal>,
    standard: Decimal,
}

impl DepositSchedule {
    pub fn new(tiers: HashMap<VehicleCategory, Decimal>, standard: Decimal) -> Self {
        Self { tiers, standard }
    }

    /// Obtener el depósito para una categoría
    pub fn amount_for(&self, category: VehicleCategory) -> Decimal {
        self.tiers.get(&category).copied().unwrap_or(self.standard)
    }
}

impl Default for DepositSchedule {
    fn default() -> Self {
        let mut tiers = HashMap::new();
        // SUV y Pickup llevan el depósito alto; el resto el estándar
        tiers.insert(VehicleCategory::Suv, Decimal::new(30000, 2));
        tiers.insert(VehicleCategory::Pickup, Decimal::new(30000, 2));
        Self {
            tiers,
            standard: Decimal::new(20000, 2),
        }
    }
}

/// Configuración de tarifas
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub tax_rate: Decimal,
    pub deposits: DepositSchedule,
    pub default_pickup_time: NaiveTime,
    pub default_return_time: NaiveTime,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            // 12% fijo sobre el subtotal
            tax_rate: Decimal::new(12, 2),
            deposits: DepositSchedule::default(),
            default_pickup_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid pickup time"),
            default_return_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid return time"),
        }
    }
}

impl PricingConfig {
    /// Cargar la configuración con overrides desde variables de entorno
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rate) = env::var("RENTAL_TAX_RATE").ok().and_then(|v| Decimal::from_str(&v).ok()) {
            config.tax_rate = rate;
        }

        let standard = env::var("RENTAL_STANDARD_DEPOSIT")
            .ok()
            .and_then(|v| Decimal::from_str(&v).ok());
        let heavy = env::var("RENTAL_HEAVY_DEPOSIT")
            .ok()
            .and_then(|v| Decimal::from_str(&v).ok());

        if standard.is_some() || heavy.is_some() {
            let standard = standard.unwrap_or(Decimal::new(20000, 2));
            let heavy = heavy.unwrap_or(Decimal::new(30000, 2));
            let mut tiers = HashMap::new();
            tiers.insert(VehicleCategory::Suv, heavy);
            tiers.insert(VehicleCategory::Pickup, heavy);
            config.deposits = DepositSchedule::new(tiers, standard);
        }

        if let Some(time) = env::var("RENTAL_PICKUP_TIME")
            .ok()
            .and_then(|v| NaiveTime::parse_from_str(&v, "%H:%M").ok())
        {
            config.default_pickup_time = time;
        }
        if let Some(time) = env::var("RENTAL_RETURN_TIME")
            .ok()
            .and_then(|v| NaiveTime::parse_from_str(&v, "%H:%M").ok())
        {
            config.default_return_time = time;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deposit_schedule() {
        let schedule = DepositSchedule::default();
        assert_eq!(schedule.amount_for(VehicleCategory::Suv), Decimal::new(30000, 2));
        assert_eq!(schedule.amount_for(VehicleCategory::Pickup), Decimal::new(30000, 2));
        assert_eq!(schedule.amount_for(VehicleCategory::Sedan), Decimal::new(20000, 2));
        assert_eq!(schedule.amount_for(VehicleCategory::Van), Decimal::new(20000, 2));
    }

    #[test]
    fn test_default_tax_rate() {
        let config = PricingConfig::default();
        assert_eq!(config.tax_rate, Decimal::new(12, 2));
        assert_eq!(config.default_pickup_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.default_return_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }
}
