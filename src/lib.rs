pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::BookingConfig;
pub use crate::core::{
    catalog::Catalog, checkout::CheckoutSession, contact::ContactForm,
    participant_form::ParticipantForm, pricing::PricingCalculator,
};
pub use crate::utils::error::{BookingError, Result};
