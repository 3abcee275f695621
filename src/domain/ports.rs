use crate::domain::model::{
    ContactMessage, ContactRecord, Locale, ParticipantCount, PaymentMethod, PriceSummary,
    PrimaryContact, SeminarOffering,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the checkout hands over once the form is complete.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub offering_id: u32,
    pub participants: ParticipantCount,
    pub primary_contact: PrimaryContact,
    pub attendees: Vec<ContactRecord>,
    pub payment_method: PaymentMethod,
    pub locale: Locale,
    pub price: PriceSummary,
}

/// User-visible outcome of handing a booking to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionNotice {
    pub notice_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub delivered_at: DateTime<Utc>,
}

pub trait CatalogSource: Send + Sync {
    fn offerings(&self) -> Result<Vec<SeminarOffering>>;
}

pub trait BookingGateway: Send + Sync {
    fn submit(&self, request: &BookingRequest) -> Result<SubmissionNotice>;
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> Result<ContactReceipt>;
}
