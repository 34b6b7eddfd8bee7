//! Call record type.
//!
//! A call record carries two raw inputs (relay stations and call length) and
//! four billing fields derived from them by [`crate::pricing::compute`].

use serde::{Deserialize, Serialize};

use crate::pricing::{self, Pricing};

/// One billed call.
///
/// Phone numbers are not unique: several records for the same number are
/// several calls by that number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// The cell phone number that placed the call.
    pub phone_number: String,

    /// Relay stations used to route the call.
    pub relay_stations: f64,

    /// Call length in minutes.
    pub length_minutes: f64,

    /// Pre-tax cost.
    pub net_cost: f64,

    /// Fractional tax rate.
    pub tax_rate: f64,

    /// Tax amount.
    pub call_tax: f64,

    /// Net cost plus tax.
    pub total_cost: f64,
}

impl CallRecord {
    /// Create a record whose billing fields are still zero.
    ///
    /// This is the state of every record read by a bulk load until the
    /// store is recalculated.
    #[must_use]
    pub fn unprocessed(
        phone_number: impl Into<String>,
        relay_stations: f64,
        length_minutes: f64,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            relay_stations,
            length_minutes,
            net_cost: 0.0,
            tax_rate: 0.0,
            call_tax: 0.0,
            total_cost: 0.0,
        }
    }

    /// Create a fully priced record.
    #[must_use]
    pub fn priced(
        phone_number: impl Into<String>,
        relay_stations: f64,
        length_minutes: f64,
    ) -> Self {
        Self::unprocessed(phone_number, relay_stations, length_minutes).reprice()
    }

    /// Return this record with its billing fields derived from the raw inputs.
    #[must_use]
    pub fn reprice(self) -> Self {
        let pricing = pricing::compute(self.relay_stations, self.length_minutes);
        self.with_pricing(pricing)
    }

    /// Return this record with the given billing fields.
    #[must_use]
    pub fn with_pricing(self, pricing: Pricing) -> Self {
        Self {
            net_cost: pricing.net_cost,
            tax_rate: pricing.tax_rate,
            call_tax: pricing.call_tax,
            total_cost: pricing.total_cost,
            ..self
        }
    }

    /// The billing fields as a [`Pricing`] value.
    #[must_use]
    pub fn pricing(&self) -> Pricing {
        Pricing {
            net_cost: self.net_cost,
            tax_rate: self.tax_rate,
            call_tax: self.call_tax,
            total_cost: self.total_cost,
        }
    }

    /// Check whether the billing fields match the raw inputs.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.pricing() == pricing::compute(self.relay_stations, self.length_minutes)
    }

    /// Check if this record belongs to the given phone number.
    #[must_use]
    pub fn matches(&self, phone_number: &str) -> bool {
        self.phone_number == phone_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprocessed_has_zero_billing() {
        let record = CallRecord::unprocessed("555-0100", 10.0, 60.0);

        assert_eq!(record.phone_number, "555-0100");
        assert_eq!(record.pricing(), Pricing::default());
        assert!(!record.is_priced());
    }

    #[test]
    fn test_priced_matches_compute() {
        let record = CallRecord::priced("555-0100", 10.0, 60.0);

        assert_eq!(record.pricing(), pricing::compute(10.0, 60.0));
        assert!(record.is_priced());
    }

    #[test]
    fn test_reprice_returns_updated_value() {
        let stale = CallRecord::unprocessed("555-0100", 25.0, 3.0);
        let fresh = stale.clone().reprice();

        assert!(!stale.is_priced());
        assert!(fresh.is_priced());
        assert_eq!(fresh.phone_number, stale.phone_number);
        assert_eq!(fresh.relay_stations.to_bits(), stale.relay_stations.to_bits());
    }

    #[test]
    fn test_zero_relays_unprocessed_counts_as_priced() {
        // Zero relays price to all-zero billing, same as an unprocessed record.
        let record = CallRecord::unprocessed("555-0100", 0.0, 12.0);
        assert!(record.is_priced());
    }

    #[test]
    fn test_matches() {
        let record = CallRecord::unprocessed("555-0100", 1.0, 1.0);
        assert!(record.matches("555-0100"));
        assert!(!record.matches("555-0101"));
        assert!(!record.matches("555-010"));
    }

    #[test]
    fn test_record_serialization() {
        let record = CallRecord::priced("555-0100", 12.0, 7.5);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("phone_number"));
        assert!(json.contains("total_cost"));

        let deserialized: CallRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.phone_number, "555-0100");
        assert!((deserialized.total_cost - record.total_cost).abs() < 1e-9);
    }
}
