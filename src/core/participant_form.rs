use crate::domain::model::{
    ContactField, ContactRecord, ParticipantCount, PrimaryContact, RecordSelector,
};
use crate::utils::error::{BookingError, Result};
use serde::Serialize;

/// Required fields still empty on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub record: RecordSelector,
    pub fields: Vec<ContactField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub missing: Vec<MissingFields>,
    pub terms_accepted: bool,
}

impl FormReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.terms_accepted
    }
}

/// Primary contact plus one contact record per participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantForm {
    primary: PrimaryContact,
    participants: Vec<ContactRecord>,
    count: ParticipantCount,
    terms_accepted: bool,
}

impl ParticipantForm {
    pub fn new(count: ParticipantCount) -> Self {
        Self {
            primary: PrimaryContact::default(),
            participants: vec![ContactRecord::default(); count.get() as usize],
            count,
            terms_accepted: false,
        }
    }

    pub fn count(&self) -> ParticipantCount {
        self.count
    }

    pub fn primary(&self) -> &PrimaryContact {
        &self.primary
    }

    pub fn participants(&self) -> &[ContactRecord] {
        &self.participants
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Clamps `requested` and resizes the participant list. Entries at
    /// surviving indices are kept; the primary contact is untouched.
    pub fn set_participant_count(&mut self, requested: u32) -> ParticipantCount {
        let count = ParticipantCount::new(requested);
        if count != self.count {
            tracing::debug!("Resizing participant list from {} to {}", self.count, count);
        }
        self.participants
            .resize_with(count.get() as usize, ContactRecord::default);
        self.count = count;
        count
    }

    /// Stores `value` verbatim.
    pub fn update_field(
        &mut self,
        selector: RecordSelector,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<()> {
        let slot = match selector {
            RecordSelector::Primary => Some(self.primary.field_mut(field)),
            RecordSelector::Participant(index) => self
                .participants
                .get_mut(index)
                .and_then(|record| record.field_mut(field)),
        };

        match slot {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(BookingError::OutOfRange {
                selector: format!("{} ({})", selector, field),
            }),
        }
    }

    pub fn validate(&self) -> bool {
        self.terms_accepted
            && self.primary.missing_fields().is_empty()
            && self
                .participants
                .iter()
                .all(|record| record.missing_fields().is_empty())
    }

    /// Field-level breakdown of what `validate` rejects.
    pub fn report(&self) -> FormReport {
        let mut missing = Vec::new();

        let primary = self.primary.missing_fields();
        if !primary.is_empty() {
            missing.push(MissingFields {
                record: RecordSelector::Primary,
                fields: primary,
            });
        }

        for (index, record) in self.participants.iter().enumerate() {
            let fields = record.missing_fields();
            if !fields.is_empty() {
                missing.push(MissingFields {
                    record: RecordSelector::Participant(index),
                    fields,
                });
            }
        }

        FormReport {
            missing,
            terms_accepted: self.terms_accepted,
        }
    }
}
