use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PARTICIPANTS: u32 = 1;
pub const MAX_PARTICIPANTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeminarOffering {
    pub id: u32,
    pub title: String,
    pub destination: String,
    pub unit_price: u64,
    pub date_range: String,
    pub duration_label: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub program: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
}

/// Number of attendees for one booking, always within
/// `MIN_PARTICIPANTS..=MAX_PARTICIPANTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub struct ParticipantCount(u32);

impl ParticipantCount {
    pub fn new(requested: u32) -> Self {
        Self(requested.clamp(MIN_PARTICIPANTS, MAX_PARTICIPANTS))
    }

    /// Reads the `participants` navigation parameter. Integers of any size
    /// are clamped; missing or unparsable values fall back to a single
    /// participant.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim) else {
            return Self::default();
        };
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value.strip_prefix('+').unwrap_or(value)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::default();
        }

        match (negative, digits.parse::<u64>()) {
            (true, _) => Self(MIN_PARTICIPANTS),
            (false, Ok(n)) => Self(n.clamp(MIN_PARTICIPANTS.into(), MAX_PARTICIPANTS.into()) as u32),
            (false, Err(_)) => Self(MAX_PARTICIPANTS),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        *self = Self::new(self.0.saturating_add(1));
    }

    pub fn decrement(&mut self) {
        *self = Self::new(self.0.saturating_sub(1));
    }

    pub fn can_increment(self) -> bool {
        self.0 < MAX_PARTICIPANTS
    }

    pub fn can_decrement(self) -> bool {
        self.0 > MIN_PARTICIPANTS
    }
}

impl Default for ParticipantCount {
    fn default() -> Self {
        Self(MIN_PARTICIPANTS)
    }
}

impl From<u32> for ParticipantCount {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<ParticipantCount> for u32 {
    fn from(value: ParticipantCount) -> Self {
        value.0
    }
}

impl fmt::Display for ParticipantCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryContact {
    #[serde(flatten)]
    pub contact: ContactRecord,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    PostalCode,
    Country,
}

impl ContactField {
    pub const PERSONAL: [ContactField; 4] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Phone,
    ];

    pub const POSTAL: [ContactField; 4] = [
        ContactField::Address,
        ContactField::City,
        ContactField::PostalCode,
        ContactField::Country,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Address => "address",
            ContactField::City => "city",
            ContactField::PostalCode => "postal_code",
            ContactField::Country => "country",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContactRecord {
    /// `None` for postal fields, which only the primary contact carries.
    pub fn field(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::FirstName => Some(self.first_name.as_str()),
            ContactField::LastName => Some(self.last_name.as_str()),
            ContactField::Email => Some(self.email.as_str()),
            ContactField::Phone => Some(self.phone.as_str()),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> Option<&mut String> {
        match field {
            ContactField::FirstName => Some(&mut self.first_name),
            ContactField::LastName => Some(&mut self.last_name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            _ => None,
        }
    }

    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::PERSONAL
            .into_iter()
            .filter(|f| self.field(*f).is_some_and(str::is_empty))
            .collect()
    }
}

impl PrimaryContact {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Address => self.address.as_str(),
            ContactField::City => self.city.as_str(),
            ContactField::PostalCode => self.postal_code.as_str(),
            ContactField::Country => self.country.as_str(),
            personal => self.contact.field(personal).unwrap_or_default(),
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Address => &mut self.address,
            ContactField::City => &mut self.city,
            ContactField::PostalCode => &mut self.postal_code,
            ContactField::Country => &mut self.country,
            ContactField::FirstName => &mut self.contact.first_name,
            ContactField::LastName => &mut self.contact.last_name,
            ContactField::Email => &mut self.contact.email,
            ContactField::Phone => &mut self.contact.phone,
        }
    }

    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::PERSONAL
            .into_iter()
            .chain(ContactField::POSTAL)
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSelector {
    Primary,
    Participant(usize),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Primary => f.write_str("primary contact"),
            RecordSelector::Participant(index) => write!(f, "participant {}", index + 1),
        }
    }
}

/// Derived figures for one booking. Stored unrounded; the display helpers
/// round to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub unit_price: u64,
    pub participants: ParticipantCount,
    pub subtotal: u64,
    pub tax: f64,
    pub total: f64,
}

impl PriceSummary {
    pub fn tax_display(&self) -> String {
        format!("{:.2}", self.tax)
    }

    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Visa,
    Mastercard,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visa" => Ok(PaymentMethod::Visa),
            "mastercard" => Ok(PaymentMethod::Mastercard),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
    Ka,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Fr, Locale::En, Locale::Ka];

    /// Unknown or missing locale codes resolve to the default locale.
    pub fn resolve(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("en") => Locale::En,
            Some("ka") => Locale::Ka,
            _ => Locale::Fr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
            Locale::Ka => "ka",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_count_clamps() {
        assert_eq!(ParticipantCount::new(15).get(), 10);
        assert_eq!(ParticipantCount::new(0).get(), 1);
        assert_eq!(ParticipantCount::new(4).get(), 4);
    }

    #[test]
    fn test_participant_count_from_query() {
        assert_eq!(ParticipantCount::from_query(None).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("abc")).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("3")).get(), 3);
        assert_eq!(ParticipantCount::from_query(Some("-2")).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("99")).get(), 10);
        assert_eq!(ParticipantCount::from_query(Some("99999999999999999999")).get(), 10);
        assert_eq!(ParticipantCount::from_query(Some("-99999999999999999999")).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("+4")).get(), 4);
        assert_eq!(ParticipantCount::from_query(Some("-0")).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("1e3")).get(), 1);
        assert_eq!(ParticipantCount::from_query(Some("-")).get(), 1);
    }

    #[test]
    fn test_increment_and_decrement_stop_at_bounds() {
        let mut count = ParticipantCount::default();
        count.decrement();
        assert_eq!(count.get(), 1);
        assert!(!count.can_decrement());

        for _ in 0..20 {
            count.increment();
        }
        assert_eq!(count.get(), 10);
        assert!(!count.can_increment());
    }

    #[test]
    fn test_participant_has_no_postal_fields() {
        let mut record = ContactRecord::default();
        assert!(record.field_mut(ContactField::City).is_none());
        assert_eq!(record.missing_fields(), ContactField::PERSONAL.to_vec());
    }

    #[test]
    fn test_primary_contact_missing_fields() {
        let mut primary = PrimaryContact::default();
        *primary.field_mut(ContactField::FirstName) = "Nino".to_string();
        *primary.field_mut(ContactField::Country) = "Georgia".to_string();
        let missing = primary.missing_fields();
        assert_eq!(missing.len(), 6);
        assert!(!missing.contains(&ContactField::FirstName));
        assert!(!missing.contains(&ContactField::Country));
    }

    #[test]
    fn test_locale_resolution() {
        assert_eq!(Locale::resolve(Some("EN")), Locale::En);
        assert_eq!(Locale::resolve(Some("de")), Locale::Fr);
        assert_eq!(Locale::resolve(None), Locale::Fr);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("Mastercard".parse::<PaymentMethod>(), Ok(PaymentMethod::Mastercard));
        assert!("amex".parse::<PaymentMethod>().is_err());
    }
}
