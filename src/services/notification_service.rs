// src/services/notification_service.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing;

use crate::{
    errors::TeknisiResult,
    models::booking::{Booking, BookingStatus},
    services::messaging_service::NotificationGateway,
    utils::{locale, phone},
};

// Shown when a template needs a technician and the booking has none yet.
const TECHNICIAN_PENDING: &str = "(belum ditentukan)";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderCreated,       // "Pesanan diterima, konfirmasi menyusul"
    TechnicianAssigned, // "Teknisi sudah ditugaskan"
    TechnicianOnTheWay, // "Teknisi dalam perjalanan"
    JobCompleted,       // "Pekerjaan selesai, terima kasih"
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::OrderCreated,
        NotificationKind::TechnicianAssigned,
        NotificationKind::TechnicianOnTheWay,
        NotificationKind::JobCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderCreated => "order_created",
            NotificationKind::TechnicianAssigned => "technician_assigned",
            NotificationKind::TechnicianOnTheWay => "technician_on_the_way",
            NotificationKind::JobCompleted => "job_completed",
        }
    }

    /// `None` for anything outside the four known kinds.
    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    /// Label shown to the operator in the confirmation toast.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::OrderCreated => "Pesanan Diterima",
            NotificationKind::TechnicianAssigned => "Teknisi Ditugaskan",
            NotificationKind::TechnicianOnTheWay => "Teknisi Dalam Perjalanan",
            NotificationKind::JobCompleted => "Pekerjaan Selesai",
        }
    }

    /// Booking status this notification announces.
    pub fn status(&self) -> BookingStatus {
        match self {
            NotificationKind::OrderCreated => BookingStatus::Created,
            NotificationKind::TechnicianAssigned => BookingStatus::TechnicianAssigned,
            NotificationKind::TechnicianOnTheWay => BookingStatus::TechnicianOnTheWay,
            NotificationKind::JobCompleted => BookingStatus::Completed,
        }
    }

    fn customer_message(&self, booking: &Booking) -> String {
        let date = locale::long_date(booking.scheduled_date);
        let technician = booking
            .technician
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(TECHNICIAN_PENDING);

        match self {
            NotificationKind::OrderCreated => format!(
                "Halo {}, pesanan layanan {} Anda untuk {} pukul {} telah kami terima (ID Pesanan #{}). \
                 Kami akan segera mengirimkan konfirmasi jadwal.",
                booking.customer_name,
                booking.service_name,
                date,
                locale::clock(booking.scheduled_time),
                booking.id
            ),
            NotificationKind::TechnicianAssigned => format!(
                "Pesanan #{}: teknisi {} telah ditugaskan untuk layanan {} pada {}. \
                 Teknisi akan menghubungi Anda sebelum tiba di lokasi.",
                booking.id, technician, booking.service_name, date
            ),
            NotificationKind::TechnicianOnTheWay => format!(
                "Halo {}, teknisi {} sedang dalam perjalanan menuju lokasi Anda untuk layanan {}.",
                booking.customer_name, technician, booking.service_name
            ),
            NotificationKind::JobCompleted => format!(
                "Pekerjaan {} untuk pesanan #{} telah selesai. \
                 Terima kasih telah menggunakan layanan kami!",
                booking.service_name, booking.id
            ),
        }
    }
}

impl From<BookingStatus> for NotificationKind {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Created => NotificationKind::OrderCreated,
            BookingStatus::TechnicianAssigned => NotificationKind::TechnicianAssigned,
            BookingStatus::TechnicianOnTheWay => NotificationKind::TechnicianOnTheWay,
            BookingStatus::Completed => NotificationKind::JobCompleted,
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown notification kind: {}", s))
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedNotification {
    pub recipient: String,
    pub customer_message: String,
    pub admin_confirmation: String,
}

impl ComposedNotification {
    /// An empty composition means nothing should be sent.
    pub fn is_empty(&self) -> bool {
        self.customer_message.is_empty()
    }
}

/// Builds the customer message and the operator confirmation. No side effects.
pub fn compose(kind: NotificationKind, booking: &Booking) -> ComposedNotification {
    ComposedNotification {
        recipient: phone::normalize(&booking.phone),
        customer_message: kind.customer_message(booking),
        admin_confirmation: format!(
            "Notifikasi \"{}\" terkirim ke {}",
            kind.label(),
            booking.customer_name
        ),
    }
}

/// String-keyed form of [`compose`]. Unknown kinds give empty strings.
pub fn compose_event(kind: &str, booking: &Booking) -> ComposedNotification {
    match NotificationKind::parse(kind) {
        Some(kind) => compose(kind, booking),
        None => ComposedNotification {
            recipient: phone::normalize(&booking.phone),
            ..Default::default()
        },
    }
}

/// Composes a notification and hands it to the configured gateway.
#[derive(Clone)]
pub struct Notifier {
    gateway: Arc<dyn NotificationGateway>,
}

impl Notifier {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Returns the operator confirmation, or an empty string for an unknown kind.
    pub async fn notify(&self, kind: &str, booking: &Booking) -> TeknisiResult<String> {
        match NotificationKind::parse(kind) {
            Some(kind) => self.notify_kind(kind, booking).await,
            None => {
                tracing::warn!("Unknown notification kind '{}' for booking #{}", kind, booking.id);
                Ok(String::new())
            }
        }
    }

    pub async fn notify_kind(&self, kind: NotificationKind, booking: &Booking) -> TeknisiResult<String> {
        let composed = compose(kind, booking);

        tracing::info!(
            recipient = %composed.recipient,
            kind = %kind,
            booking_id = booking.id,
            gateway = self.gateway.name(),
            message = %composed.customer_message
        );

        let receipt = self
            .gateway
            .send(&composed.recipient, &composed.customer_message)
            .await?;

        tracing::debug!("Notification {} delivered as {}", kind, receipt.id);
        Ok(composed.admin_confirmation)
    }

    /// Checks that `next` moves the booking forward, then sends the matching notification.
    pub async fn notify_transition(&self, booking: &Booking, next: BookingStatus) -> TeknisiResult<String> {
        let status = booking.status.advance(next)?;
        self.notify_kind(NotificationKind::from(status), booking).await
    }
}
