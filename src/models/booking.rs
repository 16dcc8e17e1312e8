// src/models/booking.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TeknisiError, TeknisiResult};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Created,             // Order received, no technician yet
    TechnicianAssigned,  // Technician picked, visit not started
    TechnicianOnTheWay,  // Technician travelling to the customer
    Completed,           // Job finished
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Created => "created",
            BookingStatus::TechnicianAssigned => "technician_assigned",
            BookingStatus::TechnicianOnTheWay => "technician_on_the_way",
            BookingStatus::Completed => "completed",
        }
    }

    /// Moves forward along `created -> technician_assigned -> technician_on_the_way -> completed`.
    /// Skipping ahead is allowed; staying put, going back or leaving `completed` is not.
    pub fn advance(self, next: BookingStatus) -> TeknisiResult<BookingStatus> {
        if self.is_terminal() || next <= self {
            return Err(TeknisiError::invalid_transition(self, next));
        }
        Ok(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Created
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Booking {
    pub id: u64,
    pub customer_name: String,
    pub phone: String, // Raw, as typed by the customer (e.g. "0812...")
    pub service_name: String,
    pub scheduled_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub scheduled_time: NaiveTime,
    #[serde(default)]
    pub technician: Option<String>, // Display name, filled in on assignment
    #[serde(default)]
    pub technician_id: Option<u64>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(
        id: u64,
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        service_name: impl Into<String>,
        scheduled_date: NaiveDate,
        scheduled_time: NaiveTime,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            phone: phone.into(),
            service_name: service_name.into(),
            scheduled_date,
            scheduled_time,
            technician: None,
            technician_id: None,
            status: BookingStatus::Created,
            address: None,
            notes: None,
        }
    }

    pub fn with_technician(mut self, name: impl Into<String>) -> Self {
        self.technician = Some(name.into());
        self
    }

    pub fn with_technician_id(mut self, id: u64) -> Self {
        self.technician_id = Some(id);
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// True when neither a technician name nor an id has been set.
    pub fn is_unassigned(&self) -> bool {
        self.technician_id.is_none()
            && self
                .technician
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
    }

    pub fn from_json(payload: &str) -> TeknisiResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Decodes the booking list as returned by the bookings endpoint.
pub fn bookings_from_json(payload: &str) -> TeknisiResult<Vec<Booking>> {
    Ok(serde_json::from_str(payload)?)
}

// The dashboard sends "HH:MM"; full "HH:MM:SS" is accepted as well.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}
