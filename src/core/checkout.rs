use crate::core::catalog::Catalog;
use crate::core::participant_form::{FormReport, ParticipantForm};
use crate::core::pricing::PricingCalculator;
use crate::domain::model::{
    ContactField, Locale, ParticipantCount, PaymentMethod, PriceSummary, RecordSelector,
    SeminarOffering,
};
use crate::domain::ports::{BookingGateway, BookingRequest, SubmissionNotice};
use crate::utils::error::{BookingError, Result};
use serde::Serialize;

pub const NOTICE_MUST_ACCEPT_TERMS: &str = "checkout.mustAcceptTerms";
pub const NOTICE_INCOMPLETE_FORM: &str = "checkout.incompleteForm";
pub const NOTICE_PAYMENT_NOT_IMPLEMENTED: &str = "checkout.paymentNotImplemented";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    Editing,
    Submitting,
    SubmissionStubbed,
}

/// Checkout state owned by the page controller.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    offering: SeminarOffering,
    form: ParticipantForm,
    payment_method: PaymentMethod,
    locale: Locale,
    phase: CheckoutPhase,
}

impl CheckoutSession {
    pub fn open(
        catalog: &Catalog,
        offering_id: u32,
        participants: ParticipantCount,
        locale: Locale,
    ) -> Result<Self> {
        let offering = catalog.get(offering_id)?.clone();
        tracing::debug!(
            "Opening checkout for seminar {} with {} participant(s)",
            offering.id,
            participants
        );

        Ok(Self {
            offering,
            form: ParticipantForm::new(participants),
            payment_method: PaymentMethod::default(),
            locale,
            phase: CheckoutPhase::Editing,
        })
    }

    /// Opens checkout from the raw `participants` navigation parameter.
    pub fn from_navigation(
        catalog: &Catalog,
        offering_id: u32,
        participants_param: Option<&str>,
        locale: Locale,
    ) -> Result<Self> {
        Self::open(
            catalog,
            offering_id,
            ParticipantCount::from_query(participants_param),
            locale,
        )
    }

    pub fn offering(&self) -> &SeminarOffering {
        &self.offering
    }

    pub fn form(&self) -> &ParticipantForm {
        &self.form
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn price_summary(&self) -> PriceSummary {
        PricingCalculator::for_offering(&self.offering, self.form.count())
    }

    /// Keeps the participant list in step with a count change that arrives
    /// after checkout has opened.
    pub fn set_participant_count(&mut self, requested: u32) -> ParticipantCount {
        self.phase = CheckoutPhase::Editing;
        self.form.set_participant_count(requested)
    }

    pub fn update_field(
        &mut self,
        selector: RecordSelector,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.phase = CheckoutPhase::Editing;
        self.form.update_field(selector, field, value)
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.phase = CheckoutPhase::Editing;
        self.form.set_terms_accepted(accepted);
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.phase = CheckoutPhase::Editing;
        self.payment_method = method;
    }

    pub fn can_submit(&self) -> bool {
        self.phase == CheckoutPhase::Editing && self.form.validate()
    }

    pub fn report(&self) -> FormReport {
        self.form.report()
    }

    pub fn booking_request(&self) -> BookingRequest {
        BookingRequest {
            offering_id: self.offering.id,
            participants: self.form.count(),
            primary_contact: self.form.primary().clone(),
            attendees: self.form.participants().to_vec(),
            payment_method: self.payment_method,
            locale: self.locale,
            price: self.price_summary(),
        }
    }

    /// Hands a complete form to the gateway. An incomplete form leaves the
    /// session in `Editing`; only `Editing` may submit.
    pub fn submit<G: BookingGateway + ?Sized>(&mut self, gateway: &G) -> Result<SubmissionNotice> {
        if self.phase != CheckoutPhase::Editing {
            tracing::debug!("Checkout submit ignored in phase {:?}", self.phase);
            return Err(BookingError::AlreadySubmitted);
        }

        if !self.form.validate() {
            let report = self.form.report();
            let notice_key = if report.terms_accepted {
                NOTICE_INCOMPLETE_FORM
            } else {
                NOTICE_MUST_ACCEPT_TERMS
            };
            tracing::debug!("Checkout blocked: {:?}", report);
            return Err(BookingError::validation(
                describe_report(&report),
                notice_key,
            ));
        }

        self.phase = CheckoutPhase::Submitting;
        let request = self.booking_request();
        tracing::info!(
            "Submitting booking for seminar {} ({} participant(s), total {})",
            request.offering_id,
            request.participants,
            request.price.total_display()
        );

        match gateway.submit(&request) {
            Ok(notice) => {
                self.phase = CheckoutPhase::SubmissionStubbed;
                Ok(notice)
            }
            Err(e) => {
                self.phase = CheckoutPhase::Editing;
                Err(e)
            }
        }
    }
}

fn describe_report(report: &FormReport) -> String {
    let mut parts: Vec<String> = report
        .missing
        .iter()
        .map(|m| {
            let fields: Vec<&str> = m.fields.iter().map(|f| f.as_str()).collect();
            format!("{} missing {}", m.record, fields.join(", "))
        })
        .collect();
    if !report.terms_accepted {
        parts.push("terms not accepted".to_string());
    }
    parts.join("; ")
}
