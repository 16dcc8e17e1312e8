pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types
pub use errors::{TeknisiError, TeknisiResult};
pub use models::{Booking, BookingStatus, Technician, TechnicianRole};
pub use services::messaging_service::{
    DeliveryReceipt, GatewayError, LogGateway, MemoryGateway, NotificationGateway, WhatsAppGateway,
};
pub use services::notification_service::{
    ComposedNotification, NotificationKind, Notifier, compose, compose_event,
};
pub use services::schedule_service::{DaySchedule, reconcile, reconcile_at};
pub use state::{AppConfig, AppState};
pub use utils::phone::{self, normalize};
