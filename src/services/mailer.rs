use async_trait::async_trait;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use crate::{config::AppConfig, error::AppError, services::store::TripStore};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_trip_confirmation(&self, trip_id: Uuid) -> Result<(), AppError>;
}

/// Delivers the owner confirmation email through a local mail-submission
/// relay (mailpit-style, plain SMTP without TLS).
#[derive(Clone)]
pub struct SmtpMailer {
    store: TripStore,
    smtp_host: String,
    smtp_port: u16,
    from: String,
}

impl SmtpMailer {
    pub fn new(store: TripStore, config: &AppConfig) -> Self {
        Self {
            store,
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            from: config.mail_from.clone(),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_trip_confirmation(&self, trip_id: Uuid) -> Result<(), AppError> {
        let trip = self
            .store
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("trip not found".to_string()))?;

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(format!("{} <{}>", trip.owner_name, trip.owner_email).parse()?)
            .subject("Confirm your trip")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Hello, {}!\n\n\
                 Your trip to {} starting on {} needs to be confirmed.\n\
                 Use the link in your trip page to confirm it.\n",
                trip.owner_name,
                trip.destination,
                trip.starts_at.format("%Y-%m-%d"),
            ))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.smtp_host)
            .port(self.smtp_port)
            .build();
        transport.send(message).await?;

        Ok(())
    }
}
