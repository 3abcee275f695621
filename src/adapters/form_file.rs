use crate::core::checkout::CheckoutSession;
use crate::domain::model::{
    ContactField, ContactRecord, PaymentMethod, PrimaryContact, RecordSelector,
};
use crate::utils::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Checkout form answers prepared ahead of time, e.g. for the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilledForm {
    #[serde(default)]
    pub primary: PrimaryContact,
    #[serde(default)]
    pub participants: Vec<ContactRecord>,
    #[serde(default)]
    pub accept_terms: bool,
    pub payment_method: Option<PaymentMethod>,
}

impl FilledForm {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replays the answers through the session's field updates. More
    /// participant entries than the session holds is `OutOfRange`.
    pub fn apply_to(&self, session: &mut CheckoutSession) -> Result<()> {
        for field in ContactField::PERSONAL.into_iter().chain(ContactField::POSTAL) {
            session.update_field(RecordSelector::Primary, field, self.primary.field(field))?;
        }

        for (index, record) in self.participants.iter().enumerate() {
            for field in ContactField::PERSONAL {
                let value = record.field(field).unwrap_or_default();
                session.update_field(RecordSelector::Participant(index), field, value)?;
            }
        }

        if let Some(method) = self.payment_method {
            session.set_payment_method(method);
        }
        session.set_terms_accepted(self.accept_terms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::domain::model::{Locale, ParticipantCount};
    use crate::utils::error::BookingError;

    const FORM: &str = r#"
accept_terms = true
payment_method = "mastercard"

[primary]
first_name = "Nino"
last_name = "Beridze"
email = "nino@example.com"
phone = "+995 555 123 456"
address = "12 Rustaveli Ave"
city = "Tbilisi"
postal_code = "0108"
country = "Georgia"

[[participants]]
first_name = "Giorgi"
last_name = "Kapanadze"
email = "giorgi@example.com"
phone = "+995 555 654 321"
"#;

    #[test]
    fn test_apply_complete_form() {
        let form = FilledForm::from_toml_str(FORM).unwrap();
        let catalog = Catalog::builtin();
        let mut session =
            CheckoutSession::open(&catalog, 1, ParticipantCount::new(1), Locale::Fr).unwrap();

        form.apply_to(&mut session).unwrap();

        assert!(session.can_submit());
        assert_eq!(session.payment_method(), PaymentMethod::Mastercard);
        assert_eq!(session.form().primary().city, "Tbilisi");
        assert_eq!(session.form().participants()[0].first_name, "Giorgi");
    }

    #[test]
    fn test_too_many_participants_is_out_of_range() {
        let form = FilledForm::from_toml_str(FORM).unwrap();
        let catalog = Catalog::builtin();
        let mut session =
            CheckoutSession::open(&catalog, 1, ParticipantCount::new(1), Locale::Fr).unwrap();
        session.set_participant_count(1);

        let mut doubled = form.clone();
        doubled.participants.push(form.participants[0].clone());
        assert!(matches!(
            doubled.apply_to(&mut session),
            Err(BookingError::OutOfRange { .. })
        ));
    }
}
