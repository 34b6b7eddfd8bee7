//! Call pricing.
//!
//! Maps the two raw inputs of a call (relay stations and length in minutes)
//! to its billing figures. The tax rate is a flat percentage picked by the
//! relay-station bracket; it is not marginal.

use serde::{Deserialize, Serialize};

/// Cost per minute of a call routed through 50 relay stations.
pub const RATE_PER_50_RELAYS: f64 = 0.40;

/// Relay-station tax bracket.
///
/// Bounds are inclusive. Counts that fall outside every bracket (zero,
/// negative, or a fractional count between two brackets such as 5.5) are
/// taxed at 0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxBracket {
    /// No bracket matched.
    Unmatched,
    /// 1 to 5 relay stations.
    UpTo5,
    /// 6 to 11 relay stations.
    UpTo11,
    /// 12 to 20 relay stations.
    UpTo20,
    /// 21 to 50 relay stations.
    UpTo50,
    /// More than 50 relay stations.
    Over50,
}

impl TaxBracket {
    /// All brackets that carry a rate, in ascending order.
    pub const ALL: [Self; 5] = [
        Self::UpTo5,
        Self::UpTo11,
        Self::UpTo20,
        Self::UpTo50,
        Self::Over50,
    ];

    /// Pick the bracket for a relay-station count.
    #[must_use]
    pub fn for_relays(relay_stations: f64) -> Self {
        match relay_stations {
            r if (1.0..=5.0).contains(&r) => Self::UpTo5,
            r if (6.0..=11.0).contains(&r) => Self::UpTo11,
            r if (12.0..=20.0).contains(&r) => Self::UpTo20,
            r if (21.0..=50.0).contains(&r) => Self::UpTo50,
            r if r > 50.0 => Self::Over50,
            _ => Self::Unmatched,
        }
    }

    /// Tax rate in percent.
    #[must_use]
    pub fn rate_percent(self) -> f64 {
        match self {
            Self::Unmatched => 0.0,
            Self::UpTo5 => 1.0,
            Self::UpTo11 => 3.0,
            Self::UpTo20 => 5.0,
            Self::UpTo50 => 8.0,
            Self::Over50 => 12.0,
        }
    }

    /// Human-readable relay-station range.
    #[must_use]
    pub fn range_label(self) -> &'static str {
        match self {
            Self::Unmatched => "other",
            Self::UpTo5 => "1 - 5",
            Self::UpTo11 => "6 - 11",
            Self::UpTo20 => "12 - 20",
            Self::UpTo50 => "21 - 50",
            Self::Over50 => "> 50",
        }
    }
}

/// Derived billing figures for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Pre-tax cost.
    pub net_cost: f64,
    /// Fractional tax rate (0.03 for 3%).
    pub tax_rate: f64,
    /// Tax amount, `net_cost * tax_rate`.
    pub call_tax: f64,
    /// `net_cost + call_tax`.
    pub total_cost: f64,
}

/// Price a call.
///
/// Never fails. Negative inputs are not rejected and flow through the
/// formula as-is.
#[must_use]
pub fn compute(relay_stations: f64, length_minutes: f64) -> Pricing {
    let rate = TaxBracket::for_relays(relay_stations).rate_percent();
    let net_cost = (relay_stations / 50.0) * RATE_PER_50_RELAYS * length_minutes;
    let call_tax = net_cost * (rate / 100.0);

    Pricing {
        net_cost,
        tax_rate: rate / 100.0,
        call_tax,
        total_cost: net_cost + call_tax,
    }
}
