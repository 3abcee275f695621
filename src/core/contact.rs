use crate::domain::model::ContactMessage;
use crate::domain::ports::{ContactReceipt, ContactTransport};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const NOTICE_CONTACT_INCOMPLETE: &str = "home.contact.incomplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMessageField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    pub message: ContactMessage,
    pub is_submitting: bool,
    pub success_visible: bool,
    /// Bumped on every accepted submission; a notice timer only hides the
    /// notice of its own submission.
    pub submission: u64,
}

/// Stands in for a contact backend: waits, then reports delivery.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ContactTransport for SimulatedTransport {
    async fn deliver(&self, message: &ContactMessage) -> Result<ContactReceipt> {
        tracing::debug!(
            "Simulating delivery of contact message from {} ({:?})",
            message.email,
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(ContactReceipt {
            delivered_at: Utc::now(),
        })
    }
}

/// Home-page contact form. One submission may be in flight at a time.
#[derive(Clone)]
pub struct ContactForm {
    state: Arc<Mutex<ContactFormState>>,
    transport: Arc<dyn ContactTransport>,
    success_notice: Duration,
}

impl ContactForm {
    pub fn new(transport: Arc<dyn ContactTransport>, success_notice: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ContactFormState::default())),
            transport,
            success_notice,
        }
    }

    pub async fn update(&self, field: ContactMessageField, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        let slot = match field {
            ContactMessageField::Name => &mut state.message.name,
            ContactMessageField::Email => &mut state.message.email,
            ContactMessageField::Message => &mut state.message.message,
        };
        *slot = value.into();
    }

    pub async fn snapshot(&self) -> ContactFormState {
        self.state.lock().await.clone()
    }

    /// Starts delivery in a background task. `on_complete` runs exactly once
    /// with the delivery result; on success the form is cleared and the
    /// success notice stays visible for the configured duration.
    pub async fn submit<F>(&self, on_complete: F) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<ContactReceipt>) + Send + 'static,
    {
        let (submission, message) = {
            let mut state = self.state.lock().await;
            if state.is_submitting {
                return Err(BookingError::SubmissionInProgress);
            }
            if !state.message.is_complete() {
                return Err(BookingError::validation(
                    "name, email and message are required",
                    NOTICE_CONTACT_INCOMPLETE,
                ));
            }
            state.is_submitting = true;
            state.success_visible = false;
            state.submission += 1;
            (state.submission, state.message.clone())
        };

        let state = Arc::clone(&self.state);
        let transport = Arc::clone(&self.transport);
        let success_notice = self.success_notice;

        Ok(tokio::spawn(async move {
            let result = transport.deliver(&message).await;
            let delivered = result.is_ok();

            {
                let mut guard = state.lock().await;
                guard.is_submitting = false;
                if delivered {
                    guard.message = ContactMessage::default();
                    guard.success_visible = true;
                }
            }

            match &result {
                Ok(receipt) => tracing::info!("Contact message delivered at {}", receipt.delivered_at),
                Err(e) => tracing::warn!("Contact message delivery failed: {}", e),
            }
            on_complete(result);

            if delivered {
                tokio::time::sleep(success_notice).await;
                let mut guard = state.lock().await;
                if guard.submission == submission {
                    guard.success_visible = false;
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RejectingTransport;

    #[async_trait]
    impl ContactTransport for RejectingTransport {
        async fn deliver(&self, _message: &ContactMessage) -> Result<ContactReceipt> {
            Err(BookingError::RemoteRejected { status: 503 })
        }
    }

    async fn fill_message(form: &ContactForm) {
        form.update(ContactMessageField::Name, "Dr. Beridze").await;
        form.update(ContactMessageField::Email, "beridze@example.com").await;
        form.update(ContactMessageField::Message, "Group rates?").await;
    }

    async fn filled_form(transport: Arc<dyn ContactTransport>) -> ContactForm {
        let form = ContactForm::new(transport, Duration::from_millis(20));
        fill_message(&form).await;
        form
    }

    #[test]
    fn test_simulated_transport_reports_delivery() {
        let before = Utc::now();
        let message = ContactMessage {
            name: "Nino".to_string(),
            email: "nino@example.com".to_string(),
            message: "Hello".to_string(),
        };
        let receipt =
            tokio_test::block_on(SimulatedTransport::new(Duration::ZERO).deliver(&message))
                .unwrap();
        assert!(receipt.delivered_at >= before);
    }

    #[tokio::test]
    async fn test_incomplete_message_rejected() {
        let form = ContactForm::new(
            Arc::new(SimulatedTransport::new(Duration::from_millis(1))),
            Duration::from_millis(1),
        );
        form.update(ContactMessageField::Name, "Only a name").await;
        let err = form.submit(|_| {}).await.unwrap_err();
        assert_eq!(err.notice_key(), Some(NOTICE_CONTACT_INCOMPLETE));
        assert!(!form.snapshot().await.is_submitting);
    }

    #[tokio::test]
    async fn test_successful_submission_clears_form_and_calls_back_once() {
        let form = filled_form(Arc::new(SimulatedTransport::new(Duration::from_millis(30)))).await;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let handle = form
            .submit(move |result| {
                assert!(result.is_ok());
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert!(form.snapshot().await.is_submitting);
        assert!(matches!(
            form.submit(|_| {}).await,
            Err(BookingError::SubmissionInProgress)
        ));

        handle.await.unwrap();

        let state = form.snapshot().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!state.is_submitting);
        assert_eq!(state.message, ContactMessage::default());
        assert!(!state.success_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_notice_window() {
        let form = ContactForm::new(
            Arc::new(SimulatedTransport::new(Duration::from_millis(10))),
            Duration::from_millis(100),
        );
        fill_message(&form).await;
        let first = form.submit(|_| {}).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = form.snapshot().await;
        assert!(state.success_visible);
        assert_eq!(state.submission, 1);

        fill_message(&form).await;
        let second = form.submit(|_| {}).await.unwrap();

        // The first notice timer fires while the second notice is showing.
        first.await.unwrap();
        assert!(form.snapshot().await.success_visible);

        second.await.unwrap();
        let state = form.snapshot().await;
        assert!(!state.success_visible);
        assert_eq!(state.submission, 2);
    }

    #[tokio::test]
    async fn test_failed_delivery_keeps_message() {
        let form = filled_form(Arc::new(RejectingTransport)).await;
        let (tx, rx) = tokio::sync::oneshot::channel();

        let handle = form
            .submit(move |result| {
                let _ = tx.send(result.is_err());
            })
            .await
            .unwrap();
        handle.await.unwrap();

        assert!(rx.await.unwrap());
        let state = form.snapshot().await;
        assert!(!state.is_submitting);
        assert!(!state.success_visible);
        assert_eq!(state.message.name, "Dr. Beridze");
    }
}
