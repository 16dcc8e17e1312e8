// src/models/mod.rs
pub mod booking;
pub mod technician;

pub use booking::*;
pub use technician::*;
