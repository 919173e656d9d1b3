//! Client notifications for booking events.
//!
//! Delivery is best effort: handlers log a failed notification and still
//! answer the request successfully.

use async_trait::async_trait;
use coachbook_core::{models::booking::Booking, notice::StatusNotice};
use eyre::Result;
use tracing::info;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// A new booking request was stored.
    async fn booking_received(&self, booking: &Booking) -> Result<()>;

    /// An admin (or the client) changed the booking status.
    async fn booking_status_changed(&self, booking: &Booking, notice: &StatusNotice) -> Result<()>;
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn booking_received(&self, booking: &Booking) -> Result<()> {
        let notice = StatusNotice::for_status(booking.status);
        info!(
            to = %booking.email,
            subject = %notice.subject(),
            "Booking {} received for {} {}",
            booking.id, booking.date, booking.time
        );
        Ok(())
    }

    async fn booking_status_changed(&self, booking: &Booking, notice: &StatusNotice) -> Result<()> {
        info!(
            to = %booking.email,
            subject = %notice.subject(),
            "{}",
            notice.render_text(&booking.name, booking.date, booking.time)
        );
        Ok(())
    }
}
