// src/utils/mod.rs
pub mod id_generator;
pub mod locale;
pub mod phone;
