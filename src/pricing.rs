use serde::{Deserialize, Serialize};
use crate::core::lending::{LendingError, LendingResult};

// Pricing abstracts how a fare is computed from distance and base fare. The
// variant is chosen once when the ride is dispatched and travels with the
// ride record, so a later rate change never reprices an in-flight ride.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Pricing {
    Standard,
    Peak,
    Traffic,
}

impl Pricing {
    // hour is 0..=23, selection is by hour of day only
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            7..=9 => Pricing::Peak,
            17..=19 => Pricing::Traffic,
            _ => Pricing::Standard,
        }
    }

    pub fn fare(&self, distance_km: f64, base_fare: f64) -> f64 {
        match self {
            Pricing::Standard => base_fare + distance_km * 1.5,
            Pricing::Peak => base_fare * 1.5 + distance_km * 2.5,
            Pricing::Traffic => base_fare + distance_km * 2.0 + 5.0,
        }
    }
}

impl std::fmt::Display for Pricing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pricing::Standard => write!(f, "STANDARD"),
            Pricing::Peak => write!(f, "PEAK"),
            Pricing::Traffic => write!(f, "TRAFFIC"),
        }
    }
}

// Discount carries only read-only configuration, validated when built. A
// malformed discount is a construction failure, not a recoverable outcome.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Discount {
    None,
    Percentage(f64),
    FixedAmount(f64),
}

impl Discount {
    pub fn percentage(percent: f64) -> LendingResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(LendingError::validation(
                format!("discount percentage {} must be between 0 and 100", percent).as_str(),
                None));
        }
        Ok(Discount::Percentage(percent))
    }

    pub fn fixed_amount(amount: f64) -> LendingResult<Self> {
        if amount < 0.0 {
            return Err(LendingError::validation(
                format!("fixed discount {} must not be negative", amount).as_str(), None));
        }
        Ok(Discount::FixedAmount(amount))
    }

    // never returns a negative total
    pub fn apply(&self, subtotal: f64) -> f64 {
        match self {
            Discount::None => subtotal,
            Discount::Percentage(percent) => subtotal * (1.0 - percent / 100.0),
            Discount::FixedAmount(amount) => subtotal - amount.min(subtotal),
        }
    }
}
