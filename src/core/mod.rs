pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod detail;
pub mod participant_form;
pub mod pricing;

pub use crate::domain::model::{
    ContactField, ContactRecord, Locale, ParticipantCount, PaymentMethod, PriceSummary,
    PrimaryContact, RecordSelector, SeminarOffering,
};
pub use crate::domain::ports::{BookingGateway, CatalogSource, ContactTransport};
pub use crate::utils::error::Result;
