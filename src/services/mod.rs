// src/services/mod.rs
pub mod messaging_service;
pub mod notification_service;
pub mod schedule_service;
