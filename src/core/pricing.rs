use crate::domain::model::{ParticipantCount, PriceSummary, SeminarOffering};

/// VAT applied on top of the seminar subtotal.
pub const TAX_RATE: f64 = 0.20;

pub struct PricingCalculator;

impl PricingCalculator {
    /// Tax and total are kept unrounded; round only when displaying.
    /// The subtotal saturates at `u64::MAX`; catalogs reject prices that
    /// could reach it.
    pub fn summarize(unit_price: u64, participants: ParticipantCount) -> PriceSummary {
        let subtotal = unit_price.saturating_mul(u64::from(participants.get()));
        let tax = subtotal as f64 * TAX_RATE;

        PriceSummary {
            unit_price,
            participants,
            subtotal,
            tax,
            total: subtotal as f64 + tax,
        }
    }

    pub fn for_offering(offering: &SeminarOffering, participants: ParticipantCount) -> PriceSummary {
        Self::summarize(offering.unit_price, participants)
    }

    /// Running total shown next to the participant counter, before tax.
    pub fn detail_total(offering: &SeminarOffering, participants: ParticipantCount) -> u64 {
        offering
            .unit_price
            .saturating_mul(u64::from(participants.get()))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
