// src/models/technician.rs
use serde::{Deserialize, Serialize};

use crate::errors::TeknisiResult;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TechnicianRole {
    Technician, // Field worker, shows up on the schedule
    Admin,      // Back-office account that also appears in the user list
    Other(String),
}

impl From<String> for TechnicianRole {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "technician" | "teknisi" => TechnicianRole::Technician,
            "admin" => TechnicianRole::Admin,
            _ => TechnicianRole::Other(tag),
        }
    }
}

impl From<TechnicianRole> for String {
    fn from(role: TechnicianRole) -> Self {
        match role {
            TechnicianRole::Technician => "technician".to_string(),
            TechnicianRole::Admin => "admin".to_string(),
            TechnicianRole::Other(tag) => tag,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Technician {
    pub id: u64,
    pub name: String,     // Display name, what bookings carry
    pub username: String, // Login name
    pub role: TechnicianRole,
}

impl Technician {
    pub fn new(id: u64, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            role: TechnicianRole::Technician,
        }
    }

    /// Case-insensitive display-name match, ignoring surrounding whitespace.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Decodes the roster as returned by the users endpoint.
pub fn technicians_from_json(payload: &str) -> TeknisiResult<Vec<Technician>> {
    Ok(serde_json::from_str(payload)?)
}
