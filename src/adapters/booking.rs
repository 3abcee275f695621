use crate::core::checkout::NOTICE_PAYMENT_NOT_IMPLEMENTED;
use crate::domain::ports::{BookingGateway, BookingRequest, SubmissionNotice};
use crate::utils::error::Result;

/// Payment is not wired to a provider yet. Every booking gets the
/// "not yet implemented" notice and nothing else happens.
#[derive(Debug, Clone, Default)]
pub struct StubBookingGateway;

impl BookingGateway for StubBookingGateway {
    fn submit(&self, request: &BookingRequest) -> Result<SubmissionNotice> {
        tracing::warn!(
            "Payment processing not implemented; booking for seminar {} ({:?}, {}) was not sent",
            request.offering_id,
            request.payment_method,
            request.price.total_display()
        );
        Ok(SubmissionNotice {
            notice_key: NOTICE_PAYMENT_NOT_IMPLEMENTED.to_string(),
        })
    }
}
