/// Domain events for the registration service
///
/// The email/notification side of registration is owned by an external
/// collaborator keyed off completed registrations. The service publishes a
/// `RegistrationCompleted` event after each successful commit; delivery is
/// fire-and-forget and publish failures never fail the request.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for registrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RegistrationEvent {
    /// An applicant completed their registration
    RegistrationCompleted(RegistrationCompletedEvent),
}

/// Event data for a completed registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCompletedEvent {
    /// ID of the created registration submission
    pub registration_id: Uuid,
    /// Application that was completed
    pub application_id: Uuid,
    /// Event the registration belongs to
    pub event_id: Uuid,
    /// Applicant contact email, for the notification collaborator
    pub applicant_email: String,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

impl RegistrationEvent {
    /// Create a new RegistrationCompleted event
    pub fn completed(
        registration_id: Uuid,
        application_id: Uuid,
        event_id: Uuid,
        applicant_email: String,
    ) -> Self {
        Self::RegistrationCompleted(RegistrationCompletedEvent {
            registration_id,
            application_id,
            event_id,
            applicant_email,
            timestamp: Utc::now(),
        })
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a registration event
    async fn publish(&self, event: RegistrationEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: RegistrationEvent) -> anyhow::Result<()> {
        // No-op: events are not published
        Ok(())
    }
}

/// Publisher that logs events through tracing
///
/// Stands in for the external notification collaborator until one is wired.
pub struct LogEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for LogEventPublisher {
    async fn publish(&self, event: RegistrationEvent) -> anyhow::Result<()> {
        match &event {
            RegistrationEvent::RegistrationCompleted(e) => {
                tracing::info!(
                    registration_id = %e.registration_id,
                    application_id = %e.application_id,
                    event_id = %e.event_id,
                    "registration completed"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_event_creation() {
        let registration_id = Uuid::new_v4();
        let application_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();

        let event = RegistrationEvent::completed(
            registration_id,
            application_id,
            event_id,
            "robin@example.com".to_string(),
        );

        match event {
            RegistrationEvent::RegistrationCompleted(e) => {
                assert_eq!(e.registration_id, registration_id);
                assert_eq!(e.application_id, application_id);
                assert_eq!(e.event_id, event_id);
                assert_eq!(e.applicant_email, "robin@example.com");
            }
        }
    }

    #[tokio::test]
    async fn test_noop_event_publisher() {
        let publisher = NoOpEventPublisher;
        let event = RegistrationEvent::completed(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "robin@example.com".to_string(),
        );

        // Should not error
        assert!(publisher.publish(event).await.is_ok());
    }
}
