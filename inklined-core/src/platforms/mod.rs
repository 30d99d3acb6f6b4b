// src/platforms/mod.rs

pub mod stripe;
