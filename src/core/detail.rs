use crate::core::catalog::Catalog;
use crate::core::pricing::PricingCalculator;
use crate::domain::model::{Locale, ParticipantCount, SeminarOffering};
use crate::utils::error::Result;

/// Participant counter shown on a seminar page, before checkout.
#[derive(Debug, Clone)]
pub struct DetailSelection {
    offering: SeminarOffering,
    participants: ParticipantCount,
}

impl DetailSelection {
    pub fn open(catalog: &Catalog, id: u32) -> Result<Self> {
        Ok(Self {
            offering: catalog.get(id)?.clone(),
            participants: ParticipantCount::default(),
        })
    }

    pub fn offering(&self) -> &SeminarOffering {
        &self.offering
    }

    pub fn participants(&self) -> ParticipantCount {
        self.participants
    }

    pub fn increment(&mut self) {
        self.participants.increment();
    }

    pub fn decrement(&mut self) {
        self.participants.decrement();
    }

    pub fn total(&self) -> u64 {
        PricingCalculator::detail_total(&self.offering, self.participants)
    }

    pub fn checkout_path(&self, locale: Locale) -> String {
        format!(
            "/{}/formations/{}/checkout?participants={}",
            locale.code(),
            self.offering.id,
            self.participants
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_and_running_total() {
        let catalog = Catalog::builtin();
        let mut selection = DetailSelection::open(&catalog, 2).unwrap();
        assert_eq!(selection.total(), 1899);

        selection.increment();
        selection.increment();
        assert_eq!(selection.participants().get(), 3);
        assert_eq!(selection.total(), 1899 * 3);

        for _ in 0..5 {
            selection.decrement();
        }
        assert_eq!(selection.participants().get(), 1);
    }

    #[test]
    fn test_checkout_path_carries_count() {
        let catalog = Catalog::builtin();
        let mut selection = DetailSelection::open(&catalog, 1).unwrap();
        selection.increment();
        assert_eq!(
            selection.checkout_path(Locale::En),
            "/en/formations/1/checkout?participants=2"
        );
    }

    #[test]
    fn test_unknown_offering() {
        let catalog = Catalog::builtin();
        assert!(DetailSelection::open(&catalog, 7).is_err());
    }
}
